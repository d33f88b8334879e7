// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Declarations
//!
//! Value types describing what the deployment engine should provision. A
//! declaration is immutable once it enters a stack; references to other
//! declarations are held as [`Ref`]s so the whole set serializes into a
//! self-contained hand-off document.
//!
//! # Architecture
//!
//! ```text
//! constructs / stacks ──builds──> T: Resource
//!                                     │ Stack::declare
//!                                     ▼
//!                              Declaration (tagged)  ──> Assembly JSON
//!                                     │
//!                                     └── references() ──> stack dependencies
//! ```

pub mod access;
pub mod build;
pub mod cdn;
pub mod compute;
pub mod dns;
pub mod storage;
pub mod zone;

use serde::Serialize;

use crate::domain::{Ref, ResourceKind};

pub use access::{AccessGroup, Grant, Principal};
pub use build::{BuildEnvironment, BuildImage, BuildProject, ComputeType, SourceRepository};
pub use cdn::{CachePolicy, Distribution, Origin, PriceClass, ViewerProtocolPolicy};
pub use compute::{
    ApiEndpoint, Cluster, ComputeFunction, ContainerSpec, Schedule, ScheduledJob, SubnetType,
    TaskDefinition, TaskTarget,
};
pub use dns::{AliasTarget, DnsRecord, RecordIdentity, RecordSet, RecordTarget, RecordType};
pub use storage::{Bucket, BucketAccess, ImageRepository, RemovalPolicy, Table};
pub use zone::{Certificate, HostedZone};

/// A declarable resource type
///
/// Implemented for every declaration struct; ties the Rust type to its
/// [`ResourceKind`] so typed handles can be checked against what they
/// resolve to.
pub trait Resource: Into<Declaration> {
    const KIND: ResourceKind;

    /// Borrow `Self` out of a declaration of the matching kind
    fn from_declaration(declaration: &Declaration) -> Option<&Self>;

    /// Every other declaration this one refers to
    fn references(&self) -> Vec<Ref>;
}

/// Any declaration a stack can hold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    HostedZone(HostedZone),
    Certificate(Certificate),
    DnsRecord(DnsRecord),
    Bucket(Bucket),
    Table(Table),
    ImageRepository(ImageRepository),
    Distribution(Distribution),
    ApiEndpoint(ApiEndpoint),
    ComputeFunction(ComputeFunction),
    Cluster(Cluster),
    TaskDefinition(TaskDefinition),
    ScheduledJob(ScheduledJob),
    BuildProject(BuildProject),
    Grant(Grant),
    AccessGroup(AccessGroup),
}

impl Declaration {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::HostedZone(_) => ResourceKind::HostedZone,
            Self::Certificate(_) => ResourceKind::Certificate,
            Self::DnsRecord(_) => ResourceKind::DnsRecord,
            Self::Bucket(_) => ResourceKind::Bucket,
            Self::Table(_) => ResourceKind::Table,
            Self::ImageRepository(_) => ResourceKind::ImageRepository,
            Self::Distribution(_) => ResourceKind::Distribution,
            Self::ApiEndpoint(_) => ResourceKind::ApiEndpoint,
            Self::ComputeFunction(_) => ResourceKind::ComputeFunction,
            Self::Cluster(_) => ResourceKind::Cluster,
            Self::TaskDefinition(_) => ResourceKind::TaskDefinition,
            Self::ScheduledJob(_) => ResourceKind::ScheduledJob,
            Self::BuildProject(_) => ResourceKind::BuildProject,
            Self::Grant(_) => ResourceKind::Grant,
            Self::AccessGroup(_) => ResourceKind::AccessGroup,
        }
    }

    pub fn references(&self) -> Vec<Ref> {
        match self {
            Self::HostedZone(inner) => inner.references(),
            Self::Certificate(inner) => inner.references(),
            Self::DnsRecord(inner) => inner.references(),
            Self::Bucket(inner) => inner.references(),
            Self::Table(inner) => inner.references(),
            Self::ImageRepository(inner) => inner.references(),
            Self::Distribution(inner) => inner.references(),
            Self::ApiEndpoint(inner) => inner.references(),
            Self::ComputeFunction(inner) => inner.references(),
            Self::Cluster(inner) => inner.references(),
            Self::TaskDefinition(inner) => inner.references(),
            Self::ScheduledJob(inner) => inner.references(),
            Self::BuildProject(inner) => inner.references(),
            Self::Grant(inner) => inner.references(),
            Self::AccessGroup(inner) => inner.references(),
        }
    }
}

/// Implement [`Resource`] and `Into<Declaration>` for a declaration struct
///
/// The struct, its [`Declaration`] variant and its [`ResourceKind`] variant
/// share one name.
macro_rules! impl_resource {
    ($ty:ident) => {
        impl_resource!($ty, |_resource| Vec::new());
    };
    ($ty:ident, |$resource:ident| $references:expr) => {
        impl From<$ty> for $crate::resources::Declaration {
            fn from(value: $ty) -> Self {
                $crate::resources::Declaration::$ty(value)
            }
        }

        impl $crate::resources::Resource for $ty {
            const KIND: $crate::domain::ResourceKind = $crate::domain::ResourceKind::$ty;

            fn from_declaration(declaration: &$crate::resources::Declaration) -> Option<&Self> {
                match declaration {
                    $crate::resources::Declaration::$ty(inner) => Some(inner),
                    _ => None,
                }
            }

            fn references(&self) -> Vec<$crate::domain::Ref> {
                let $resource = self;
                $references
            }
        }
    };
}

pub(crate) use impl_resource;
