// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declaration Domain Models
//!
//! Core concepts shared by every stack: validated names, the taxonomy of
//! declarable resources, typed cross-stack references and the pure
//! invariants declarations must satisfy.
//!
//! # Value Objects with Invariants
//!
//! - [`Hostname`] - DNS names including wildcard and service labels
//! - [`ResourceKind`] - Declarable resource taxonomy
//! - [`Ref`] / [`Handle`] - Stack-qualified references, untyped and typed

pub mod handle;
pub mod hostname;
pub mod invariants;
pub mod resource_type;

pub use handle::{Handle, Ref};
pub use hostname::{Hostname, HostnameError};
pub use invariants::{ValidationError, ValidationResult};
pub use resource_type::ResourceKind;
