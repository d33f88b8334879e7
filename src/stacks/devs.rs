// Copyright (c) 2025 - Cowboy AI, Inc.
//! Devs stack: the operator group for human maintainers

use crate::config::Environment;
use crate::domain::Handle;
use crate::errors::CompositionResult;
use crate::resources::AccessGroup;
use crate::stack::{Built, Stack};

const DEVELOPERS_GROUP: &str = "developers";

pub struct DevsStack;

impl DevsStack {
    pub const NAME: &'static str = "Devs";

    pub fn build(environment: &Environment) -> CompositionResult<Built<Handle<AccessGroup>>> {
        let mut stack = Stack::new(Self::NAME, environment);
        let developers = stack.declare(
            "Developers",
            AccessGroup {
                group_name: DEVELOPERS_GROUP.to_string(),
            },
        )?;
        Ok(Built::new(stack, developers))
    }
}
