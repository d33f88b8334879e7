//! Error types for stack composition

use thiserror::Error;

use crate::config::Environment;
use crate::domain::{HostnameError, ResourceKind, ValidationError};
use crate::resources::dns::RecordIdentity;

/// Errors that can occur while composing stacks
///
/// Every variant is a structural error: it is detected before the assembly
/// is handed to the deployment engine and blocks output entirely.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// Composition was attempted against the wrong account/region pair
    #[error("Environment mismatch: composition is pinned to {pinned}, target is {actual}")]
    EnvironmentMismatch {
        pinned: Environment,
        actual: Environment,
    },

    /// Two DNS records share one (type, name) identity
    #[error("Duplicate DNS record: {0}")]
    DuplicateRecord(RecordIdentity),

    /// Two declarations in one stack share a logical id
    #[error("Duplicate logical id {logical_id} in stack {stack}")]
    DuplicateLogicalId { stack: String, logical_id: String },

    /// Two stacks share a name within one app
    #[error("Duplicate stack: {0}")]
    DuplicateStack(String),

    /// A stack consumed a handle whose producer has not been added
    #[error("Unresolved reference from stack {consumer} to {stack}/{logical_id}")]
    UnresolvedReference {
        consumer: String,
        stack: String,
        logical_id: String,
    },

    /// A handle resolved to a declaration of a different kind
    #[error("Reference {stack}/{logical_id} expected {expected}, found {found}")]
    KindMismatch {
        stack: String,
        logical_id: String,
        expected: ResourceKind,
        found: ResourceKind,
    },

    /// An alias record names a domain its target does not accept
    #[error("Alias record {record} points at {target}, which does not accept that name")]
    UncoveredAlias { record: RecordIdentity, target: String },

    /// A TLS-terminating resource accepts a name its certificate does not cover
    #[error("Domain {domain} is not covered by certificate {certificate}")]
    UncoveredDomain { domain: String, certificate: String },

    /// Hostname validation failed
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] HostnameError),

    /// Pure invariant check failed
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for composition operations
pub type CompositionResult<T> = Result<T, CompositionError>;
