// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarable Resource Taxonomy
//!
//! Defines the set of resource kinds a stack can declare. The kind travels
//! with every cross-stack reference so a handle can be checked against the
//! declaration it resolves to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarable resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    // Naming and TLS
    /// Authoritative DNS zone
    HostedZone,
    /// TLS certificate
    Certificate,
    /// DNS record within a hosted zone
    DnsRecord,

    // Storage
    /// Object storage bucket
    Bucket,
    /// Key-value table
    Table,
    /// Container image registry
    ImageRepository,

    // Edge
    /// CDN distribution
    Distribution,
    /// HTTP API endpoint
    ApiEndpoint,

    // Compute
    /// Inline-source compute function
    ComputeFunction,
    /// Container cluster
    Cluster,
    /// Container task definition
    TaskDefinition,
    /// Recurring schedule rule
    ScheduledJob,

    // Delivery and access
    /// Source-triggered build project
    BuildProject,
    /// Narrow permission grant
    Grant,
    /// Operator access group
    AccessGroup,
}

impl ResourceKind {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HostedZone => "hosted_zone",
            Self::Certificate => "certificate",
            Self::DnsRecord => "dns_record",
            Self::Bucket => "bucket",
            Self::Table => "table",
            Self::ImageRepository => "image_repository",
            Self::Distribution => "distribution",
            Self::ApiEndpoint => "api_endpoint",
            Self::ComputeFunction => "compute_function",
            Self::Cluster => "cluster",
            Self::TaskDefinition => "task_definition",
            Self::ScheduledJob => "scheduled_job",
            Self::BuildProject => "build_project",
            Self::Grant => "grant",
            Self::AccessGroup => "access_group",
        }
    }

    /// Whether resources of this kind can be the target of an alias record
    pub fn is_alias_target(&self) -> bool {
        matches!(self, Self::Distribution | Self::ApiEndpoint)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
