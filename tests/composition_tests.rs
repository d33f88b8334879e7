// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for whole-deployment composition
//!
//! These tests compose the full stack graph and inspect the resulting
//! assembly the way the deployment engine would receive it.

mod fixtures;

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_case::test_case;

use reclaimers_infrastructure::config::{DeploymentConfig, WikiConfig};
use reclaimers_infrastructure::constructs::{make_bucket, WEBSITE_INDEX_DOCUMENT};
use reclaimers_infrastructure::resources::zone::CertificateValidation;
use reclaimers_infrastructure::resources::{
    Bucket, BucketAccess, Certificate, Distribution, HostedZone, ScheduledJob,
};
use reclaimers_infrastructure::{compose, CompositionError, Environment, Hostname, ResourceKind};

use fixtures::*;

/// Scenario: composing for example.net yields its zone and a certificate
/// covering the root and the wildcard
#[test]
fn test_example_net_zone_and_certificate() -> Result<()> {
    let config = config_for("example.net");
    let assembly = compose(&config, &environment())?;

    let zones: Vec<&HostedZone> = assembly.all::<HostedZone>().collect();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].zone_name.as_str(), "example.net");

    let certificates: Vec<&Certificate> = assembly.all::<Certificate>().collect();
    assert_eq!(certificates.len(), 1);
    let names: Vec<&str> = certificates[0].names().map(Hostname::as_str).collect();
    assert!(names.contains(&"example.net"));
    assert!(names.contains(&"*.example.net"));
    Ok(())
}

/// Certificate validation references the zone of the same run
#[test]
fn test_certificate_validated_by_composed_zone() -> Result<()> {
    let assembly = compose(&reference_config(), &environment())?;
    let domain = assembly.stack("Domain").expect("Domain stack is composed");

    let certificate = assembly.all::<Certificate>().next().expect("one certificate");
    let CertificateValidation::Dns { zone } = &certificate.validation;
    assert_eq!(zone.stack, domain.name());
    assert_eq!(zone.kind, ResourceKind::HostedZone);
    assert!(domain.get(&zone.logical_id).is_some());
    Ok(())
}

/// Scenario: a public wiki bucket gets the fixed index document and the
/// configured error document
#[test]
fn test_wiki_public_bucket_website() -> Result<()> {
    let assembly = compose(&reference_config(), &environment())?;
    let wiki = assembly.stack("Wiki").expect("Wiki stack is composed");

    let site = wiki
        .all::<Bucket>()
        .find(|bucket| bucket.name == "reclaimers-wiki-files")
        .expect("site bucket");
    let website = site.website.as_ref().expect("public bucket serves a website");
    assert_eq!(website.index_document, WEBSITE_INDEX_DOCUMENT);
    assert_eq!(website.error_document.as_deref(), Some("404/index.html"));
    assert_eq!(site.access, BucketAccess::PublicRead);
    Ok(())
}

/// Scenario: a private bucket has no website configuration, whatever error
/// document is passed
#[test]
fn test_private_bucket_has_no_website() -> Result<()> {
    let bucket = make_bucket("reclaimers-wiki-cache", false, Some("404/index.html"))?;
    assert_eq!(bucket.website, None);
    assert_eq!(bucket.access, BucketAccess::Private);

    let assembly = compose(&reference_config(), &environment())?;
    let cache = assembly
        .all::<Bucket>()
        .find(|bucket| bucket.name == "reclaimers-wiki-cache")
        .expect("cache bucket");
    assert_eq!(cache.website, None);
    Ok(())
}

/// Scenario: an hourly news recurrence yields exactly one job bound to the
/// shared cluster
#[test]
fn test_news_job_bound_to_cluster() -> Result<()> {
    let assembly = compose(&reference_config(), &environment())?;

    let jobs: Vec<&ScheduledJob> = assembly.all::<ScheduledJob>().collect();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].schedule.interval(), Duration::from_secs(60 * 60));
    assert_eq!(jobs[0].schedule.expression(), "rate(1 hour)");

    let cluster_stack = assembly.stack("Cluster").expect("Cluster stack is composed");
    assert_eq!(jobs[0].target.cluster.stack, cluster_stack.name());
    assert_eq!(jobs[0].target.cluster.kind, ResourceKind::Cluster);
    assert!(cluster_stack.get(&jobs[0].target.cluster.logical_id).is_some());
    Ok(())
}

#[test]
fn test_every_tls_name_is_covered() -> Result<()> {
    let assembly = compose(&reference_config(), &environment())?;
    let certificate = assembly.all::<Certificate>().next().expect("one certificate");

    for distribution in assembly.all::<Distribution>() {
        for name in &distribution.domain_names {
            assert!(certificate.covers(name), "{} is not covered", name);
        }
    }
    Ok(())
}

/// A CDN name outside the zone cannot be covered by the zone's certificate
#[test]
fn test_uncovered_cdn_name_rejected() {
    let mut config = reference_config();
    config.wiki = WikiConfig {
        cdn_aliases: vec!["test".to_string(), "deep.test".to_string()],
        dns_aliases: vec!["test".to_string()],
        ..WikiConfig::default()
    };

    let err = compose(&config, &environment()).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::UncoveredDomain { domain, .. } if domain == "deep.test.reclaimers.net"
    ));
}

/// A zero recurrence is refused instead of being emitted as a one-minute job
#[test]
fn test_zero_news_schedule_rejected() {
    let mut config = reference_config();
    config.news.schedule_minutes = 0;

    let err = compose(&config, &environment()).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::Configuration(message) if message.contains("news.schedule_minutes")
    ));
}

#[test_case("wiki.cache_ttl_minutes" ; "wiki cache ttl")]
#[test_case("news.schedule_minutes" ; "news schedule")]
fn test_out_of_range_minutes_rejected(field: &str) {
    let mut config = reference_config();
    match field {
        "wiki.cache_ttl_minutes" => config.wiki.cache_ttl_minutes = u64::MAX,
        _ => config.news.schedule_minutes = u64::MAX,
    }

    let err = compose(&config, &environment()).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::Configuration(message) if message.contains(field)
    ));
}

#[test]
fn test_wrong_environment_emits_nothing() {
    let config = reference_config();
    let err = compose(&config, &Environment::new(ACCOUNT, OTHER_REGION)).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::EnvironmentMismatch { pinned, actual }
            if pinned.region == REGION && actual.region == OTHER_REGION
    ));
}

#[test]
fn test_recomposition_is_identical() -> Result<()> {
    let config = reference_config();
    let first = compose(&config, &environment())?;
    let second = compose(&config, &environment())?;

    assert_eq!(first, second);
    assert_eq!(first.to_json()?, second.to_json()?);
    Ok(())
}

#[test]
fn test_assembly_json_shape() -> Result<()> {
    let assembly = compose(&reference_config(), &environment())?;
    let json: serde_json::Value = serde_json::from_str(&assembly.to_json()?)?;

    assert_eq!(json["environment"]["account"], ACCOUNT);
    assert_eq!(json["stacks"][0]["name"], "Domain");

    let zone = &json["stacks"][0]["resources"][0];
    assert_eq!(zone["logical_id"], "Zone");
    assert_eq!(zone["declaration"]["kind"], "hosted_zone");
    assert_eq!(zone["declaration"]["zone_name"], "reclaimers.net");
    assert_eq!(zone["declaration"]["caa_issuer"], "amazon.com");

    let dns = json["stacks"]
        .as_array()
        .and_then(|stacks| stacks.iter().find(|stack| stack["name"] == "Dns"))
        .expect("Dns stack in JSON");
    assert_eq!(
        dns["dependencies"],
        serde_json::json!(["DiscordRedirect", "Domain", "Files", "Wiki"])
    );
    Ok(())
}

#[test]
fn test_configuration_file_overrides() -> Result<()> {
    let config = DeploymentConfig::from_json(
        r#"{
            "domain_name": "example.net",
            "news": {"schedule_minutes": 30},
            "dns": {"fixed_addresses": {}, "legacy_records": []}
        }"#,
    )?;
    let assembly = compose(&config, &environment())?;

    let job = assembly.all::<ScheduledJob>().next().expect("one job");
    assert_eq!(job.schedule.expression(), "rate(30 minutes)");

    let root = Hostname::new("example.net")?;
    assert!(assembly.records().all(|record| record.name.is_within(&root)));
    Ok(())
}
