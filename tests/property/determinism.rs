// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Composition Determinism
//!
//! Composing twice from one configuration yields the same assembly, down to
//! the serialized bytes.

use proptest::prelude::*;
use std::time::Duration;

use reclaimers_infrastructure::resources::ScheduledJob;
use reclaimers_infrastructure::compose;

use crate::fixtures::{environment, ipv4, reference_config};

proptest! {
    #[test]
    fn prop_composition_is_deterministic(
        schedule_minutes in 1u64..=1440,
        cache_ttl_minutes in 1u64..=120,
        services in prop::collection::btree_map("svc[a-z]{1,4}", any::<[u8; 4]>(), 0..4),
    ) {
        let mut config = reference_config();
        config.news.schedule_minutes = schedule_minutes;
        config.wiki.cache_ttl_minutes = cache_ttl_minutes;
        for (label, octets) in services {
            config.dns.fixed_addresses.insert(label, vec![ipv4(octets)]);
        }

        let first = compose(&config, &environment()).expect("valid configuration");
        let second = compose(&config, &environment()).expect("valid configuration");
        prop_assert_eq!(first.to_json().expect("serializes"), second.to_json().expect("serializes"));

        let job = first.all::<ScheduledJob>().next().expect("one job");
        prop_assert_eq!(job.schedule.interval(), Duration::from_secs(schedule_minutes * 60));
    }
}
