// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deployment Stacks
//!
//! One module per stack. Each stack exposes a `build` function that takes
//! the pinned [`Environment`](crate::config::Environment), its configuration
//! section and the handles it consumes, and returns a
//! [`Built`](crate::stack::Built) carrying the stack plus its narrow output.
//!
//! ```text
//!            ┌────────────── Domain ──────────────┐
//!            │ zone, certificate                   │
//!            ▼                                     ▼
//! Cluster ─► News        Wiki   Files   DiscordRedirect    Devs
//!                          │      │            │
//!                          └──────┴─── Dns ◄───┘
//! ```

pub mod cluster;
pub mod devs;
pub mod discord;
pub mod dns;
pub mod domain;
pub mod files;
pub mod news;
pub mod wiki;

pub use cluster::ClusterStack;
pub use devs::DevsStack;
pub use discord::DiscordRedirectStack;
pub use dns::{DnsStack, DnsStackProps, RedirectAlias, SiteAlias};
pub use domain::{DomainOutputs, DomainStack};
pub use files::FilesStack;
pub use news::NewsStack;
pub use wiki::WikiStack;

use crate::domain::Hostname;
use crate::errors::CompositionResult;

/// Name for a subdomain label under `root`; the empty label is `root` itself
pub fn qualify(root: &Hostname, label: &str) -> CompositionResult<Hostname> {
    if label.is_empty() {
        return Ok(root.clone());
    }
    Ok(root.child(label)?)
}

/// [`qualify`] every label, keeping order
pub fn qualify_all(root: &Hostname, labels: &[String]) -> CompositionResult<Vec<Hostname>> {
    labels.iter().map(|label| qualify(root, label)).collect()
}
