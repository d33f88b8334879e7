// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Record Declarations
//!
//! A record's identity is its `(type, name)` pair. [`RecordSet`] is the one
//! place records are collected before they are declared, and it refuses a
//! second record with an identity it already holds; nothing is ever
//! overwritten.
//!
//! # Mutation
//!
//! Records are keyed by identity, so entries can be added or retired in any
//! order without disturbing unrelated records. Legacy records carry a
//! `retire_after` date and can be swept with [`RecordSet::retire_expired`].

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use super::cdn::Distribution;
use super::compute::ApiEndpoint;
use super::impl_resource;
use super::zone::HostedZone;
use crate::config::Environment;
use crate::domain::invariants::{
    validate_record_target, validate_within_zone, ValidationError, ValidationResult,
};
use crate::domain::{Handle, Hostname, Ref};
use crate::errors::{CompositionError, CompositionResult};

/// CDN hosted-zone id for alias records, per partition
const CDN_ALIAS_ZONE_AWS: &str = "Z2FDTNDATAQYW2";
const CDN_ALIAS_ZONE_AWS_CN: &str = "Z3RFFRIM2A3IF5";

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }

    /// Address record type for an IP family
    pub fn for_address(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::A,
            IpAddr::V6(_) => Self::Aaaa,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a record within its zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordIdentity {
    pub record_type: RecordType,
    pub name: Hostname,
}

impl RecordIdentity {
    pub fn new(record_type: RecordType, name: Hostname) -> Self {
        Self { record_type, name }
    }

    /// Stack-local logical id derived from the identity
    ///
    /// The capitalized type is followed by each label, introduced by `D`.
    /// Inside a label `W` stands for the wildcard, `U` for a leading
    /// underscore and `H` for a hyphen. Names are stored lowercase, so the
    /// markers never collide with label text and distinct identities always
    /// get distinct ids: `AAAA *.reclaimers.net` becomes
    /// `AaaaDWDreclaimersDnet` and `A a-b.reclaimers.net` becomes
    /// `ADaHbDreclaimersDnet`.
    pub fn logical_id(&self) -> String {
        let record_type = self.record_type.as_str().to_lowercase();
        let mut id = String::with_capacity(record_type.len() + self.name.as_str().len() * 2);
        let mut chars = record_type.chars();
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.push_str(chars.as_str());
        }

        for label in self.name.labels() {
            id.push('D');
            for ch in label.chars() {
                match ch {
                    '*' => id.push('W'),
                    '_' => id.push('U'),
                    '-' => id.push('H'),
                    other => id.push(other),
                }
            }
        }
        id
    }
}

impl fmt::Display for RecordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.record_type, self.name)
    }
}

/// Mail exchange with its preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailExchange {
    pub priority: u16,
    pub host: Hostname,
}

/// Alias to a provider-managed resource
///
/// Carries the partition's CDN hosted-zone id so the reference resolves
/// correctly even when the target was declared in another stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasTarget {
    pub target: Ref,
    pub hosted_zone_id: String,
}

impl AliasTarget {
    pub fn distribution(handle: &Handle<Distribution>, environment: &Environment) -> Self {
        Self {
            target: handle.to_ref(),
            hosted_zone_id: cdn_alias_zone(environment).to_string(),
        }
    }

    /// Alias to an edge-optimized API endpoint, which is served by the CDN
    pub fn api_endpoint(handle: &Handle<ApiEndpoint>, environment: &Environment) -> Self {
        Self {
            target: handle.to_ref(),
            hosted_zone_id: cdn_alias_zone(environment).to_string(),
        }
    }
}

fn cdn_alias_zone(environment: &Environment) -> &'static str {
    match environment.partition() {
        "aws-cn" => CDN_ALIAS_ZONE_AWS_CN,
        _ => CDN_ALIAS_ZONE_AWS,
    }
}

/// What a record resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTarget {
    Addresses(Vec<IpAddr>),
    CanonicalName(Hostname),
    MailExchanges(Vec<MailExchange>),
    Text(Vec<String>),
    Alias(AliasTarget),
}

impl RecordTarget {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Addresses(_) => "literal addresses",
            Self::CanonicalName(_) => "a canonical name",
            Self::MailExchanges(_) => "mail exchanges",
            Self::Text(_) => "text values",
            Self::Alias(_) => "an alias",
        }
    }
}

/// One record in the hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub zone: Ref,
    pub record_type: RecordType,
    pub name: Hostname,
    pub target: RecordTarget,
    /// Alias records take the target's TTL and carry none of their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
    /// Legacy records are scheduled for removal after this day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retire_after: Option<NaiveDate>,
}

impl DnsRecord {
    /// Create a record, checking the target fits the record type
    pub fn new(
        zone: &Handle<HostedZone>,
        record_type: RecordType,
        name: Hostname,
        target: RecordTarget,
    ) -> Result<Self, ValidationError> {
        validate_record_target(record_type, &name, &target)?;
        Ok(Self {
            zone: zone.to_ref(),
            record_type,
            name,
            target,
            ttl_secs: None,
            retire_after: None,
        })
    }

    /// A + AAAA alias pair for one name
    pub fn alias_pair(
        zone: &Handle<HostedZone>,
        name: &Hostname,
        alias: AliasTarget,
    ) -> Result<[Self; 2], ValidationError> {
        Ok([
            Self::new(zone, RecordType::A, name.clone(), RecordTarget::Alias(alias.clone()))?,
            Self::new(zone, RecordType::Aaaa, name.clone(), RecordTarget::Alias(alias))?,
        ])
    }

    /// Literal address records for one name, one record per IP family
    pub fn addresses(
        zone: &Handle<HostedZone>,
        name: &Hostname,
        addresses: &[IpAddr],
        ttl: Duration,
    ) -> Result<Vec<Self>, ValidationError> {
        if addresses.is_empty() {
            return Err(ValidationError::EmptyValues(name.to_string()));
        }

        let mut by_type: BTreeMap<RecordType, Vec<IpAddr>> = BTreeMap::new();
        for address in addresses {
            by_type
                .entry(RecordType::for_address(address))
                .or_default()
                .push(*address);
        }

        by_type
            .into_iter()
            .map(|(record_type, family)| {
                Ok(Self::new(zone, record_type, name.clone(), RecordTarget::Addresses(family))?
                    .with_ttl(ttl))
            })
            .collect()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = Some(ttl.as_secs());
        self
    }

    pub fn retire_after(mut self, day: NaiveDate) -> Self {
        self.retire_after = Some(day);
        self
    }

    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity::new(self.record_type, self.name.clone())
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.target, RecordTarget::Alias(_))
    }

    /// Whether the record's retirement date is before `as_of`
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.retire_after.map(|day| day < as_of).unwrap_or(false)
    }
}

impl_resource!(DnsRecord, |record| {
    let mut references = vec![record.zone.clone()];
    if let RecordTarget::Alias(alias) = &record.target {
        references.push(alias.target.clone());
    }
    references
});

/// Records of one hosted zone, unique by identity
#[derive(Debug, Clone)]
pub struct RecordSet {
    zone: Handle<HostedZone>,
    zone_name: Hostname,
    records: BTreeMap<RecordIdentity, DnsRecord>,
}

impl RecordSet {
    pub fn new(zone: Handle<HostedZone>, zone_name: Hostname) -> Self {
        Self {
            zone,
            zone_name,
            records: BTreeMap::new(),
        }
    }

    pub fn zone(&self) -> &Handle<HostedZone> {
        &self.zone
    }

    pub fn zone_name(&self) -> &Hostname {
        &self.zone_name
    }

    /// Add a record
    ///
    /// # Errors
    /// - `DuplicateRecord` if a record with the same identity is present
    /// - `Validation` if the record belongs to another zone or lies outside it
    pub fn insert(&mut self, record: DnsRecord) -> CompositionResult<()> {
        self.validate_membership(&record)?;

        let identity = record.identity();
        if self.records.contains_key(&identity) {
            return Err(CompositionError::DuplicateRecord(identity));
        }

        tracing::debug!("Declared DNS record {}", identity);
        self.records.insert(identity, record);
        Ok(())
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = DnsRecord>) -> CompositionResult<()> {
        records.into_iter().try_for_each(|record| self.insert(record))
    }

    fn validate_membership(&self, record: &DnsRecord) -> ValidationResult {
        if record.zone != self.zone.to_ref() {
            return Err(ValidationError::OutsideZone {
                name: record.name.to_string(),
                zone: record.zone.to_string(),
            });
        }
        validate_within_zone(&record.name, &self.zone_name)
    }

    /// Remove one record, leaving every other record untouched
    pub fn retire(&mut self, identity: &RecordIdentity) -> Option<DnsRecord> {
        self.records.remove(identity)
    }

    /// Remove every record whose retirement date is before `as_of`
    pub fn retire_expired(&mut self, as_of: NaiveDate) -> Vec<DnsRecord> {
        let expired: Vec<RecordIdentity> = self
            .records
            .iter()
            .filter(|(_, record)| record.is_expired(as_of))
            .map(|(identity, _)| identity.clone())
            .collect();

        expired
            .iter()
            .filter_map(|identity| self.records.remove(identity))
            .collect()
    }

    pub fn get(&self, identity: &RecordIdentity) -> Option<&DnsRecord> {
        self.records.get(identity)
    }

    pub fn contains(&self, identity: &RecordIdentity) -> bool {
        self.records.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in identity order
    pub fn iter(&self) -> impl Iterator<Item = &DnsRecord> {
        self.records.values()
    }

    pub fn identities(&self) -> impl Iterator<Item = &RecordIdentity> {
        self.records.keys()
    }

    pub fn into_records(self) -> Vec<DnsRecord> {
        self.records.into_values().collect()
    }
}
