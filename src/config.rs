// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deployment Configuration
//!
//! The tunable inputs of the deployment: the domain, CDN aliases, cache
//! TTLs, the job recurrence and the fixed-address service table. Everything
//! else is structural and lives in the stack modules.
//!
//! Every field defaults to the reference deployment, so an empty JSON object
//! is a valid configuration file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use crate::domain::Hostname;
use crate::errors::{CompositionError, CompositionResult};

/// Account/region pair a composition is pinned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub account: String,
    pub region: String,
}

impl Environment {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }

    /// Resolve the actual target pair from the process environment
    ///
    /// Reads `CDK_DEFAULT_ACCOUNT`/`CDK_DEFAULT_REGION`, falling back to
    /// `AWS_ACCOUNT_ID`/`AWS_REGION`.
    pub fn from_env() -> CompositionResult<Self> {
        let account = std::env::var("CDK_DEFAULT_ACCOUNT")
            .or_else(|_| std::env::var("AWS_ACCOUNT_ID"))
            .map_err(|_| {
                CompositionError::Configuration(
                    "CDK_DEFAULT_ACCOUNT or AWS_ACCOUNT_ID must be set".to_string(),
                )
            })?;
        let region = std::env::var("CDK_DEFAULT_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .map_err(|_| {
                CompositionError::Configuration(
                    "CDK_DEFAULT_REGION or AWS_REGION must be set".to_string(),
                )
            })?;
        Ok(Self::new(account, region))
    }

    /// Provider partition the region belongs to
    pub fn partition(&self) -> &'static str {
        if self.region.starts_with("cn-") {
            "aws-cn"
        } else {
            "aws"
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.region)
    }
}

/// Top-level configuration for one deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Pinned account/region pair
    pub environment: Environment,
    /// Root domain of the hosted zone
    pub domain_name: String,
    pub wiki: WikiConfig,
    pub files: FilesConfig,
    pub discord: DiscordConfig,
    pub cluster: ClusterConfig,
    pub news: NewsConfig,
    pub dns: DnsConfig,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            environment: Environment::new("123456789012", "us-east-1"),
            domain_name: "reclaimers.net".to_string(),
            wiki: WikiConfig::default(),
            files: FilesConfig::default(),
            discord: DiscordConfig::default(),
            cluster: ClusterConfig::default(),
            news: NewsConfig::default(),
            dns: DnsConfig::default(),
        }
    }
}

impl DeploymentConfig {
    /// Load configuration from environment variables
    ///
    /// `RECLAIMERS_CONFIG` optionally names a JSON file; without it the
    /// reference deployment is used.
    pub fn from_env() -> CompositionResult<Self> {
        match std::env::var("RECLAIMERS_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> CompositionResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CompositionError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CompositionResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Root domain of the hosted zone
    pub fn root_domain(&self) -> CompositionResult<Hostname> {
        Ok(Hostname::new(self.domain_name.as_str())?)
    }
}

/// Wiki site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    pub bucket_name: String,
    pub cache_bucket_name: Option<String>,
    pub error_document: Option<String>,
    /// Subdomain labels the CDN accepts; empty string is the root domain
    pub cdn_aliases: Vec<String>,
    /// Subset of `cdn_aliases` that get alias records in the zone
    pub dns_aliases: Vec<String>,
    pub cache_ttl_minutes: u64,
    pub source: SourceConfig,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            bucket_name: "reclaimers-wiki-files".to_string(),
            cache_bucket_name: Some("reclaimers-wiki-cache".to_string()),
            error_document: Some("404/index.html".to_string()),
            cdn_aliases: vec![
                "c20".to_string(),
                "www".to_string(),
                "test".to_string(),
                String::new(),
            ],
            dns_aliases: vec!["test".to_string()],
            cache_ttl_minutes: 5,
            source: SourceConfig::new("Sigmmma", "c20"),
        }
    }
}

impl WikiConfig {
    pub fn cache_ttl(&self) -> CompositionResult<Duration> {
        minutes("wiki.cache_ttl_minutes", self.cache_ttl_minutes)
    }
}

/// Public files site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub bucket_name: String,
    pub cdn_aliases: Vec<String>,
    pub dns_aliases: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            bucket_name: "reclaimers-public-files".to_string(),
            cdn_aliases: vec!["files".to_string()],
            dns_aliases: vec!["files".to_string()],
        }
    }
}

/// Discord invite redirect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub subdomain: String,
    pub invite_url: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            subdomain: "discord".to_string(),
            invite_url: "https://discord.gg/k6Q4JBp".to_string(),
        }
    }
}

/// Shared container cluster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub cluster_name: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_name: "common-cluster".to_string(),
        }
    }
}

/// RSS news notifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub schedule_minutes: u64,
    pub image_repository: String,
    pub image_tag: String,
    pub source: SourceConfig,
    pub feeds_source: SourceConfig,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            schedule_minutes: 60,
            image_repository: "reclaimers-news".to_string(),
            image_tag: "latest".to_string(),
            source: SourceConfig::new("Sigmmma", "reclaimers-news"),
            feeds_source: SourceConfig::new("Sigmmma", "reclaimers-news-sources"),
        }
    }
}

impl NewsConfig {
    /// Job recurrence; zero minutes is rejected rather than rounded up
    pub fn schedule(&self) -> CompositionResult<Duration> {
        if self.schedule_minutes == 0 {
            return Err(CompositionError::Configuration(
                "news.schedule_minutes must be at least 1".to_string(),
            ));
        }
        minutes("news.schedule_minutes", self.schedule_minutes)
    }
}

fn minutes(field: &str, value: u64) -> CompositionResult<Duration> {
    value
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            CompositionError::Configuration(format!("{} of {} minutes is out of range", field, value))
        })
}

/// External source repository watched by a build project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "master".to_string()
}

impl SourceConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: default_branch(),
        }
    }
}

/// DNS record configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// TTL for records with literal values
    pub record_ttl_secs: u64,
    /// TTL for fixed-address service records
    pub fixed_address_ttl_secs: u64,
    /// Subdomain label → addresses of externally hosted services
    pub fixed_addresses: BTreeMap<String, Vec<IpAddr>>,
    /// Time-boxed records kept from a previous deployment
    pub legacy_records: Vec<LegacyRecordConfig>,
    /// Retire legacy records whose date has passed as of this day
    pub as_of: Option<NaiveDate>,
    /// Labels whose legacy records are retired now, whatever their date
    pub retired: Vec<String>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        let mut fixed_addresses = BTreeMap::new();
        fixed_addresses.insert(
            "play".to_string(),
            vec![IpAddr::from([108, 61, 232, 93])],
        );

        let retire_after = NaiveDate::from_ymd_opt(2021, 6, 30);
        let legacy = |label: &str, address: IpAddr| LegacyRecordConfig {
            name: label.to_string(),
            address,
            retire_after,
        };
        let cdn_v4 = IpAddr::from([13, 224, 29, 111]);

        Self {
            record_ttl_secs: 5 * 24 * 60 * 60,
            fixed_address_ttl_secs: 5 * 60,
            fixed_addresses,
            legacy_records: vec![
                legacy("disord", IpAddr::from([13, 224, 8, 101])),
                legacy(
                    "disord",
                    IpAddr::from([0x2600, 0x9000, 0x2196, 0x5a00, 0x15, 0x6834, 0xc400, 0x93a1]),
                ),
                legacy("c20", cdn_v4),
                legacy("www", cdn_v4),
                legacy("", cdn_v4),
            ],
            as_of: None,
            retired: Vec::new(),
        }
    }
}

impl DnsConfig {
    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(self.record_ttl_secs)
    }

    pub fn fixed_address_ttl(&self) -> Duration {
        Duration::from_secs(self.fixed_address_ttl_secs)
    }
}

/// One legacy literal-address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRecordConfig {
    /// Subdomain label; empty string is the root domain
    pub name: String,
    pub address: IpAddr,
    #[serde(default)]
    pub retire_after: Option<NaiveDate>,
}
