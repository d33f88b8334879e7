// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for reclaimers-infrastructure
//!
//! Deterministic configurations and environments shared by the integration
//! suites. Nothing here reads the process environment or the clock.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::net::IpAddr;

use reclaimers_infrastructure::config::DeploymentConfig;
use reclaimers_infrastructure::resources::{DnsRecord, RecordIdentity};
use reclaimers_infrastructure::{Assembly, Environment};

pub const ACCOUNT: &str = "123456789012";
pub const REGION: &str = "us-east-1";
pub const OTHER_REGION: &str = "eu-west-1";

/// Day after every reference legacy record expires
pub fn after_legacy_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 7, 1).expect("Invalid fixture date")
}

pub fn environment() -> Environment {
    Environment::new(ACCOUNT, REGION)
}

pub fn reference_config() -> DeploymentConfig {
    DeploymentConfig::default()
}

/// Reference deployment moved onto another root domain
pub fn config_for(domain_name: &str) -> DeploymentConfig {
    DeploymentConfig {
        domain_name: domain_name.to_string(),
        ..DeploymentConfig::default()
    }
}

/// Reference deployment with one more fixed-address service
pub fn config_with_service(label: &str, addresses: &[IpAddr]) -> DeploymentConfig {
    let mut config = reference_config();
    config
        .dns
        .fixed_addresses
        .insert(label.to_string(), addresses.to_vec());
    config
}

pub fn ipv4(octets: [u8; 4]) -> IpAddr {
    IpAddr::from(octets)
}

pub fn ipv6(text: &str) -> IpAddr {
    text.parse().expect("Invalid IPv6 address in test fixture")
}

/// Every DNS record of an assembly, keyed by identity
pub fn records_by_identity(assembly: &Assembly) -> Vec<(RecordIdentity, DnsRecord)> {
    assembly
        .records()
        .map(|record| (record.identity(), record.clone()))
        .collect()
}
