//! Infrastructure composition for the Reclaimers community website
//!
//! This crate declares the deployment's stacks (hosted zone, certificate,
//! site buckets and CDNs, the Discord redirect, the shared cluster, the news
//! job and every DNS record) and wires them together through typed handles.
//! The result is an [`Assembly`]: a deterministic, fully resolved document
//! for an external deployment engine.

pub mod app;
pub mod config;
pub mod constructs;
pub mod domain;
pub mod errors;
pub mod resources;
pub mod stack;
pub mod stacks;

// Re-export commonly used types
pub use app::{compose, App, Assembly};
pub use config::{DeploymentConfig, Environment};
pub use domain::{Handle, Hostname, Ref, ResourceKind};
pub use errors::{CompositionError, CompositionResult};
pub use stack::{Built, Stack};
