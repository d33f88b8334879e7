// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack - a named, environment-pinned unit of declarations
//!
//! A stack owns its declarations exclusively. Declaring something returns a
//! typed [`Handle`]; passing that handle into another stack's declarations
//! is the only way one stack can depend on another, and the dependency is
//! recorded automatically from the declaration's references.
//!
//! ```text
//! Stack "Wiki"                          Stack "Dns"
//! ┌────────────────────────┐            ┌──────────────────────────────┐
//! │ Bucket ◄── Cdn ─────────┼─ Handle ──►│ A/AAAA test → alias(Wiki/Cdn) │
//! └────────────────────────┘            └──────────────────────────────┘
//!            dependencies(Dns) = { Domain, Wiki, ... }
//! ```

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::Environment;
use crate::domain::{Handle, Ref};
use crate::errors::{CompositionError, CompositionResult};
use crate::resources::{Declaration, Resource};

/// One declaration with its stack-local logical id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declared {
    pub logical_id: String,
    pub declaration: Declaration,
}

/// Named container of declarations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    name: String,
    environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Stacks this one references, by name
    dependencies: BTreeSet<String>,
    resources: Vec<Declared>,
}

impl Stack {
    pub fn new(name: impl Into<String>, environment: &Environment) -> Self {
        Self {
            name: name.into(),
            environment: environment.clone(),
            description: None,
            dependencies: BTreeSet::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a resource under a stack-local logical id
    ///
    /// # Errors
    /// - `DuplicateLogicalId` if the id is already used in this stack
    /// - `UnresolvedReference` / `KindMismatch` if a same-stack reference
    ///   does not name an earlier declaration of the right kind
    pub fn declare<T: Resource>(
        &mut self,
        logical_id: &str,
        resource: T,
    ) -> CompositionResult<Handle<T>> {
        if self.get(logical_id).is_some() {
            return Err(CompositionError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id: logical_id.to_string(),
            });
        }

        for reference in resource.references() {
            if reference.stack == self.name {
                self.check_local(&reference)?;
            } else {
                self.dependencies.insert(reference.stack);
            }
        }

        debug!("Declared {} {}/{}", T::KIND, self.name, logical_id);
        self.resources.push(Declared {
            logical_id: logical_id.to_string(),
            declaration: resource.into(),
        });
        Ok(Handle::new(self.name.clone(), logical_id))
    }

    fn check_local(&self, reference: &Ref) -> CompositionResult<()> {
        match self.get(&reference.logical_id) {
            None => Err(CompositionError::UnresolvedReference {
                consumer: self.name.clone(),
                stack: reference.stack.clone(),
                logical_id: reference.logical_id.clone(),
            }),
            Some(found) if found.kind() != reference.kind => Err(CompositionError::KindMismatch {
                stack: reference.stack.clone(),
                logical_id: reference.logical_id.clone(),
                expected: reference.kind,
                found: found.kind(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Borrow a declaration made in this stack
    pub fn lookup<T: Resource>(&self, handle: &Handle<T>) -> Option<&T> {
        if handle.stack() != self.name {
            return None;
        }
        self.get(handle.logical_id()).and_then(T::from_declaration)
    }

    pub fn get(&self, logical_id: &str) -> Option<&Declaration> {
        self.resources
            .iter()
            .find(|declared| declared.logical_id == logical_id)
            .map(|declared| &declared.declaration)
    }

    /// Every declaration of type `T`, in declaration order
    pub fn all<'a, T: Resource + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.resources
            .iter()
            .filter_map(|declared| T::from_declaration(&declared.declaration))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub fn resources(&self) -> &[Declared] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// A constructed stack together with the narrow output it exposes
///
/// Consumers only ever see `output`; the stack itself goes to the
/// [`App`](crate::app::App).
#[derive(Debug, Clone)]
pub struct Built<O> {
    pub stack: Stack,
    pub output: O,
}

impl<O> Built<O> {
    pub fn new(stack: Stack, output: O) -> Self {
        Self { stack, output }
    }
}
