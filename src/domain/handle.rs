// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cross-Stack References
//!
//! A [`Ref`] names one declaration: the stack that owns it, its logical id
//! within that stack, and its kind. A [`Handle<T>`] is the typed form handed
//! out by [`Stack::declare`](crate::stack::Stack::declare); the type
//! parameter keeps a distribution handle from being passed where an API
//! endpoint handle is expected.
//!
//! Handles can only be minted by declaring something, so holding one is
//! proof that its producer was constructed. Whether the producer was also
//! *added to the app* is checked by [`App::add_stack`](crate::app::App::add_stack).

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::ResourceKind;
use crate::resources::Resource;

/// Untyped reference to a declaration in some stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ref {
    pub stack: String,
    pub logical_id: String,
    pub kind: ResourceKind,
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.stack, self.logical_id, self.kind)
    }
}

/// Typed reference to a declaration of `T`
pub struct Handle<T> {
    reference: Ref,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> Handle<T> {
    pub(crate) fn new(stack: impl Into<String>, logical_id: impl Into<String>) -> Self {
        Self {
            reference: Ref {
                stack: stack.into(),
                logical_id: logical_id.into(),
                kind: T::KIND,
            },
            _marker: PhantomData,
        }
    }
}

impl<T> Handle<T> {
    pub fn reference(&self) -> &Ref {
        &self.reference
    }

    /// Name of the stack that declared the resource
    pub fn stack(&self) -> &str {
        &self.reference.stack
    }

    pub fn logical_id(&self) -> &str {
        &self.reference.logical_id
    }

    pub fn to_ref(&self) -> Ref {
        self.reference.clone()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.reference).finish()
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

impl<T> Serialize for Handle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.reference.serialize(serializer)
    }
}

impl<T> From<&Handle<T>> for Ref {
    fn from(handle: &Handle<T>) -> Self {
        handle.to_ref()
    }
}
