// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster stack: shared container cluster for on-demand tasks
//!
//! No instances are provisioned; tasks run on demand until a steady 24/7
//! workload justifies standing capacity.

use crate::config::{ClusterConfig, Environment};
use crate::domain::Handle;
use crate::errors::CompositionResult;
use crate::resources::Cluster;
use crate::stack::{Built, Stack};

pub struct ClusterStack;

impl ClusterStack {
    pub const NAME: &'static str = "Cluster";

    pub fn build(
        environment: &Environment,
        config: &ClusterConfig,
    ) -> CompositionResult<Built<Handle<Cluster>>> {
        let mut stack = Stack::new(Self::NAME, environment);
        let cluster = stack.declare("Cluster", Cluster::on_demand(&config.cluster_name))?;
        Ok(Built::new(stack, cluster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_stack() {
        let environment = Environment::new("123456789012", "us-east-1");
        let built = ClusterStack::build(&environment, &ClusterConfig::default()).unwrap();
        let cluster = built.stack.lookup(&built.output).unwrap();
        assert_eq!(cluster.cluster_name, "common-cluster");
        assert_eq!(cluster.standing_instances, 0);
    }
}
