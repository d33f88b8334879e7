// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Declaration Invariants
//!
//! Business rules checked before a declaration enters a stack. All functions
//! are pure (no side effects) and return detailed validation results.
//!
//! # Invariant Categories
//!
//! 1. **Naming Invariants**: provider naming rules that are cheap to check locally
//! 2. **Payload Invariants**: size ceilings on inline payloads
//! 3. **Access Invariants**: CDN origins must be publicly readable
//! 4. **Record Invariants**: record targets agree with the record type and zone
//! 5. **Schedule Invariants**: rates are positive whole minutes

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::time::Duration;

use crate::domain::Hostname;
use crate::resources::dns::{RecordIdentity, RecordTarget, RecordType};
use crate::resources::storage::{Bucket, BucketAccess};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Bucket name violates provider naming rules
    #[error("Invalid bucket name {name}: {reason}")]
    InvalidBucketName { name: String, reason: &'static str },

    /// Inline source exceeds the platform ceiling
    #[error("Inline source for {name} is {size} bytes, limit is {limit}")]
    SourceTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    /// CDN origin bucket is private
    #[error("Distribution origin bucket {0} must allow public read")]
    PrivateOrigin(String),

    /// Record target does not fit the record type
    #[error("{record_type} record {name} cannot target {detail}")]
    TargetMismatch {
        record_type: RecordType,
        name: String,
        detail: String,
    },

    /// Record has nothing to point at
    #[error("{0} has no values")]
    EmptyValues(String),

    /// Record name lies outside the hosted zone
    #[error("Record {name} is outside zone {zone}")]
    OutsideZone { name: String, zone: String },

    /// Two declarations share one DNS identity
    #[error("Duplicate record identity {0}")]
    DuplicateIdentity(RecordIdentity),

    /// Recurrence is not a positive whole number of minutes
    #[error("Schedule rate of {0} seconds is not a positive whole number of minutes")]
    InvalidRate(u64),
}

/// Validate a bucket name against provider naming rules
///
/// # Rules
/// - 3 to 63 characters
/// - Lowercase letters, digits, `-` and `.` only
/// - Starts and ends with a letter or digit
pub fn validate_bucket_name(name: &str) -> ValidationResult {
    let invalid = |reason| ValidationError::InvalidBucketName {
        name: name.to_string(),
        reason,
    };

    if name.len() < 3 || name.len() > 63 {
        return Err(invalid("length must be 3-63 characters"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid("only lowercase letters, digits, '-' and '.' are allowed"));
    }

    let alphanumeric = |c: Option<char>| c.map(|c| c.is_ascii_alphanumeric()).unwrap_or(false);
    if !alphanumeric(name.chars().next()) || !alphanumeric(name.chars().last()) {
        return Err(invalid("must start and end with a letter or digit"));
    }

    Ok(())
}

/// Validate an inline source payload fits the platform ceiling
pub fn validate_inline_source(name: &str, source: &str, limit: usize) -> ValidationResult {
    if source.len() > limit {
        return Err(ValidationError::SourceTooLarge {
            name: name.to_string(),
            size: source.len(),
            limit,
        });
    }
    Ok(())
}

/// Validate a schedule recurrence
///
/// Rate rules count in whole minutes and never fire at rate zero.
pub fn validate_rate(interval: Duration) -> ValidationResult {
    let secs = interval.as_secs();
    if secs == 0 || secs % 60 != 0 || interval.subsec_nanos() != 0 {
        return Err(ValidationError::InvalidRate(secs));
    }
    Ok(())
}

/// Validate a bucket can serve as a CDN origin
///
/// The CDN is the intended access path, so the origin must be public-read.
pub fn validate_public_origin(bucket: &Bucket) -> ValidationResult {
    if bucket.access != BucketAccess::PublicRead {
        return Err(ValidationError::PrivateOrigin(bucket.name.clone()));
    }
    Ok(())
}

/// Validate a record target agrees with its record type
///
/// # Rules
/// - A holds IPv4 addresses or an alias, AAAA holds IPv6 addresses or an alias
/// - CNAME holds exactly one canonical name
/// - MX holds mail exchanges, TXT holds text values
/// - Value lists are never empty
pub fn validate_record_target(
    record_type: RecordType,
    name: &Hostname,
    target: &RecordTarget,
) -> ValidationResult {
    let mismatch = |detail: &str| ValidationError::TargetMismatch {
        record_type,
        name: name.to_string(),
        detail: detail.to_string(),
    };

    match (record_type, target) {
        (RecordType::A | RecordType::Aaaa, RecordTarget::Alias(_)) => Ok(()),
        (RecordType::A | RecordType::Aaaa, RecordTarget::Addresses(addresses)) => {
            if addresses.is_empty() {
                return Err(ValidationError::EmptyValues(name.to_string()));
            }
            let wants_v4 = record_type == RecordType::A;
            if addresses
                .iter()
                .any(|address| matches!(address, IpAddr::V4(_)) != wants_v4)
            {
                return Err(mismatch("an address of the other IP family"));
            }
            Ok(())
        }
        (RecordType::Cname, RecordTarget::CanonicalName(_)) => Ok(()),
        (RecordType::Mx, RecordTarget::MailExchanges(exchanges)) => {
            if exchanges.is_empty() {
                return Err(ValidationError::EmptyValues(name.to_string()));
            }
            Ok(())
        }
        (RecordType::Txt, RecordTarget::Text(values)) => {
            if values.is_empty() {
                return Err(ValidationError::EmptyValues(name.to_string()));
            }
            Ok(())
        }
        (_, target) => Err(mismatch(target.describe())),
    }
}

/// Validate a record name sits inside the hosted zone
pub fn validate_within_zone(name: &Hostname, zone: &Hostname) -> ValidationResult {
    if !name.is_within(zone) {
        return Err(ValidationError::OutsideZone {
            name: name.to_string(),
            zone: zone.to_string(),
        });
    }
    Ok(())
}

/// Validate that no (type, name) identity appears twice
pub fn validate_unique_identities<'a>(
    identities: impl IntoIterator<Item = &'a RecordIdentity>,
) -> ValidationResult {
    let mut seen = BTreeSet::new();
    for identity in identities {
        if !seen.insert(identity) {
            return Err(ValidationError::DuplicateIdentity(identity.clone()));
        }
    }
    Ok(())
}
