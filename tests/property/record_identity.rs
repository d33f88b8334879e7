// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Record Identity Uniqueness
//!
//! No composed record set ever holds two records with one `(type, name)`
//! identity, and a rejected insert never replaces what is already there.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use reclaimers_infrastructure::resources::{
    DnsRecord, RecordIdentity, RecordSet, RecordTarget, RecordType,
};
use reclaimers_infrastructure::stacks::DomainStack;
use reclaimers_infrastructure::{compose, CompositionError, Hostname};

use crate::fixtures::{environment, reference_config};

// ============================================================================
// Strategies
// ============================================================================

fn address() -> impl Strategy<Value = IpAddr> {
    prop_oneof![
        any::<[u8; 4]>().prop_map(IpAddr::from),
        any::<[u16; 8]>().prop_map(IpAddr::from),
    ]
}

/// Labels under a prefix no other record source uses
fn service_table() -> impl Strategy<Value = BTreeMap<String, Vec<IpAddr>>> {
    prop::collection::btree_map("svc[a-z0-9]{0,6}", prop::collection::vec(address(), 1..4), 0..6)
}

fn record_type() -> impl Strategy<Value = RecordType> {
    prop_oneof![Just(RecordType::A), Just(RecordType::Aaaa), Just(RecordType::Txt)]
}

fn record(zone: &RecordSet, record_type: RecordType, label: &str, value: u8) -> DnsRecord {
    let name = Hostname::new(format!("{}.reclaimers.net", label)).expect("valid label");
    let target = match record_type {
        RecordType::A => RecordTarget::Addresses(vec![IpAddr::from([10, 0, 0, value])]),
        RecordType::Aaaa => RecordTarget::Addresses(vec![IpAddr::from([0xfd00, 0, 0, 0, 0, 0, 0, value as u16])]),
        _ => RecordTarget::Text(vec![format!("value={}", value)]),
    };
    DnsRecord::new(zone.zone(), record_type, name, target).expect("target fits type")
}

fn empty_record_set() -> RecordSet {
    let root = Hostname::new("reclaimers.net").expect("valid root");
    let domain = DomainStack::build(&environment(), &root).expect("domain stack");
    RecordSet::new(domain.output.zone, root)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Any service table composes into a set of unique identities, one
    /// record per IP family per service
    #[test]
    fn prop_composed_identities_unique(table in service_table()) {
        let mut config = reference_config();
        config.dns.fixed_addresses.extend(table.clone());

        let assembly = compose(&config, &environment()).expect("services never collide");
        let identities: Vec<RecordIdentity> = assembly.records().map(DnsRecord::identity).collect();
        let distinct: BTreeSet<&RecordIdentity> = identities.iter().collect();
        prop_assert_eq!(distinct.len(), identities.len());

        for (label, addresses) in &table {
            let families: BTreeSet<RecordType> = addresses.iter().map(RecordType::for_address).collect();
            let name = format!("{}.reclaimers.net", label);
            let declared = identities
                .iter()
                .filter(|identity| identity.name.as_str() == name)
                .count();
            prop_assert_eq!(declared, families.len());
        }
    }

    /// Inserting an arbitrary sequence keeps exactly the first record of
    /// each identity and rejects every later one
    #[test]
    fn prop_duplicates_rejected_first_kept(
        inserts in prop::collection::vec((record_type(), "[a-c]", any::<u8>()), 1..40)
    ) {
        let mut set = empty_record_set();
        let mut first: BTreeMap<RecordIdentity, DnsRecord> = BTreeMap::new();

        for (record_type, label, value) in &inserts {
            let candidate = record(&set, *record_type, label, *value);
            let identity = candidate.identity();
            match set.insert(candidate.clone()) {
                Ok(()) => {
                    prop_assert!(!first.contains_key(&identity));
                    first.insert(identity, candidate);
                }
                Err(CompositionError::DuplicateRecord(rejected)) => {
                    prop_assert_eq!(&rejected, &identity);
                    prop_assert!(first.contains_key(&identity));
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }

        prop_assert_eq!(set.len(), first.len());
        for (identity, record) in &first {
            prop_assert_eq!(set.get(identity), Some(record));
        }
    }
}
