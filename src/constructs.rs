// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Construct Library
//!
//! Parameterized building blocks for the resource shapes every site stack
//! repeats. Constructs only build values; the calling stack declares them.

use tracing::debug;

use crate::domain::invariants::{validate_bucket_name, validate_inline_source};
use crate::errors::CompositionResult;
use crate::resources::compute::Runtime;
use crate::resources::storage::{Bucket, BucketAccess, RemovalPolicy, WebsiteConfig};
use crate::resources::ComputeFunction;

/// Index document served by every public bucket
pub const WEBSITE_INDEX_DOCUMENT: &str = "index.html";

/// Platform ceiling on inline function source, in bytes
pub const INLINE_SOURCE_LIMIT: usize = 4096;

/// Basic bucket, either a public website or private storage
///
/// Public buckets serve [`WEBSITE_INDEX_DOCUMENT`] plus the optional error
/// document and grant public read. Private buckets have no website
/// configuration, so `error_document` is ignored for them.
pub fn make_bucket(
    name: &str,
    public: bool,
    error_document: Option<&str>,
) -> CompositionResult<Bucket> {
    validate_bucket_name(name)?;

    if !public {
        if let Some(document) = error_document {
            debug!("Ignoring error document {} for private bucket {}", document, name);
        }
        return Ok(Bucket {
            name: name.to_string(),
            access: BucketAccess::Private,
            website: None,
            removal_policy: RemovalPolicy::Retain,
        });
    }

    Ok(Bucket {
        name: name.to_string(),
        access: BucketAccess::PublicRead,
        website: Some(WebsiteConfig {
            index_document: WEBSITE_INDEX_DOCUMENT.to_string(),
            error_document: error_document.map(str::to_string),
        }),
        removal_policy: RemovalPolicy::Retain,
    })
}

/// Small function with its source embedded in the declaration
///
/// Keep handlers small: source over [`INLINE_SOURCE_LIMIT`] bytes is
/// rejected.
pub fn make_inline_function(name: &str, source: &str) -> CompositionResult<ComputeFunction> {
    validate_inline_source(name, source, INLINE_SOURCE_LIMIT)?;

    Ok(ComputeFunction {
        name: name.to_string(),
        runtime: Runtime::Nodejs12,
        handler: "index.handler".to_string(),
        inline_source: source.to_string(),
    })
}
