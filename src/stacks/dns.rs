// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dns stack: every record in the hosted zone
//!
//! Records from all sources are gathered into one [`RecordSet`] before any
//! of them is declared, so a `(type, name)` collision between, say, a site
//! alias and a legacy record is caught here rather than by the provider.
//!
//! # Record sources
//!
//! 1. Mail routing (MX, DKIM CNAMEs, SPF) against fixed provider values
//! 2. Time-boxed legacy records, swept when `as_of` is past their date and
//!    retired by label when listed in `retired`
//! 3. A + AAAA aliases for every site distribution name
//! 4. Fixed-address services from the configured name → address table
//! 5. A + AAAA aliases for redirect endpoints
//!
//! Legacy records are swept before anything else is added, so a new record
//! may take over the identity of an expired one.

use tracing::{debug, info, warn};

use super::domain::DomainOutputs;
use super::qualify;
use crate::config::{DnsConfig, Environment};
use crate::domain::{Handle, Hostname};
use crate::errors::CompositionResult;
use crate::resources::dns::MailExchange;
use crate::resources::{
    AliasTarget, ApiEndpoint, Distribution, DnsRecord, RecordIdentity, RecordSet, RecordTarget,
    RecordType,
};
use crate::stack::{Built, Stack};

const MAIL_EXCHANGES: [(u16, &str); 2] = [
    (10, "in1-smtp.messagingengine.com"),
    (20, "in2-smtp.messagingengine.com"),
];
const DKIM_SELECTORS: u8 = 3;
const DKIM_TARGET_SUFFIX: &str = "dkim.fmhosted.com";
const SPF_POLICY: &str = "v=spf1 include:spf.messagingengine.com ?all";

/// A site distribution and the names that resolve to it
#[derive(Debug, Clone)]
pub struct SiteAlias {
    pub distribution: Handle<Distribution>,
    pub names: Vec<Hostname>,
}

impl SiteAlias {
    pub fn new(distribution: Handle<Distribution>, names: Vec<Hostname>) -> Self {
        Self { distribution, names }
    }
}

/// A redirect endpoint and the single name that resolves to it
#[derive(Debug, Clone)]
pub struct RedirectAlias {
    pub endpoint: Handle<ApiEndpoint>,
    pub name: Hostname,
}

impl RedirectAlias {
    pub fn new(endpoint: Handle<ApiEndpoint>, name: Hostname) -> Self {
        Self { endpoint, name }
    }
}

/// Leaf outputs the zone's records point at
#[derive(Debug, Clone, Default)]
pub struct DnsStackProps {
    pub sites: Vec<SiteAlias>,
    pub redirects: Vec<RedirectAlias>,
}

pub struct DnsStack;

impl DnsStack {
    pub const NAME: &'static str = "Dns";

    /// Gather every record of the zone
    ///
    /// # Errors
    /// - `DuplicateRecord` when two sources produce the same identity
    /// - `Validation` when a name lies outside the zone or a target does not
    ///   fit its record type
    pub fn records(
        environment: &Environment,
        config: &DnsConfig,
        domain: &DomainOutputs,
        props: &DnsStackProps,
    ) -> CompositionResult<RecordSet> {
        let mut records = RecordSet::new(domain.zone.clone(), domain.zone_name.clone());

        mail_records(&mut records, config)?;

        for legacy in &config.legacy_records {
            let name = qualify(&domain.zone_name, &legacy.name)?;
            for record in DnsRecord::addresses(&domain.zone, &name, &[legacy.address], config.record_ttl())? {
                records.insert(match legacy.retire_after {
                    Some(day) => record.retire_after(day),
                    None => record,
                })?;
            }
        }

        if let Some(as_of) = config.as_of {
            for retired in records.retire_expired(as_of) {
                warn!(
                    "Retired legacy record {} (retire after {:?}, as of {})",
                    retired.identity(),
                    retired.retire_after,
                    as_of
                );
            }
        }

        for label in &config.retired {
            let name = qualify(&domain.zone_name, label)?;
            let retired: Vec<DnsRecord> = [RecordType::A, RecordType::Aaaa]
                .into_iter()
                .filter_map(|record_type| records.retire(&RecordIdentity::new(record_type, name.clone())))
                .collect();
            if retired.is_empty() {
                debug!("No legacy record at {} left to retire", name);
            }
            for record in retired {
                warn!("Retired legacy record {} ahead of its date", record.identity());
            }
        }

        for site in &props.sites {
            for name in &site.names {
                let alias = AliasTarget::distribution(&site.distribution, environment);
                records.extend(DnsRecord::alias_pair(&domain.zone, name, alias)?)?;
            }
        }

        for (label, addresses) in &config.fixed_addresses {
            let name = qualify(&domain.zone_name, label)?;
            records.extend(DnsRecord::addresses(
                &domain.zone,
                &name,
                addresses,
                config.fixed_address_ttl(),
            )?)?;
        }

        for redirect in &props.redirects {
            let alias = AliasTarget::api_endpoint(&redirect.endpoint, environment);
            records.extend(DnsRecord::alias_pair(&domain.zone, &redirect.name, alias)?)?;
        }

        Ok(records)
    }

    /// Declare every record of the zone under its identity's logical id
    pub fn build(
        environment: &Environment,
        config: &DnsConfig,
        domain: &DomainOutputs,
        props: &DnsStackProps,
    ) -> CompositionResult<Built<Vec<RecordIdentity>>> {
        let records = Self::records(environment, config, domain, props)?;
        let mut stack = Stack::new(Self::NAME, environment);

        let identities: Vec<RecordIdentity> = records.identities().cloned().collect();
        for (identity, record) in identities.iter().zip(records.into_records()) {
            stack.declare(&identity.logical_id(), record)?;
        }

        info!("Declared {} records in zone {}", identities.len(), domain.zone_name);
        Ok(Built::new(stack, identities))
    }
}

/// MX at the root and wildcard, DKIM selectors and SPF policy
fn mail_records(records: &mut RecordSet, config: &DnsConfig) -> CompositionResult<()> {
    let zone = records.zone().clone();
    let root = records.zone_name().clone();
    let ttl = config.record_ttl();

    let exchanges = MAIL_EXCHANGES
        .iter()
        .map(|(priority, host)| -> CompositionResult<MailExchange> {
            Ok(MailExchange {
                priority: *priority,
                host: Hostname::new(*host)?,
            })
        })
        .collect::<CompositionResult<Vec<_>>>()?;

    for name in [root.clone(), root.wildcard()] {
        let target = RecordTarget::MailExchanges(exchanges.clone());
        records.insert(DnsRecord::new(&zone, RecordType::Mx, name, target)?.with_ttl(ttl))?;
    }

    for selector in 1..=DKIM_SELECTORS {
        let name = root.child(&format!("fm{}._domainkey", selector))?;
        let target = RecordTarget::CanonicalName(Hostname::new(format!(
            "fm{}.{}.{}",
            selector, root, DKIM_TARGET_SUFFIX
        ))?);
        records.insert(DnsRecord::new(&zone, RecordType::Cname, name, target)?.with_ttl(ttl))?;
    }

    let spf = RecordTarget::Text(vec![SPF_POLICY.to_string()]);
    records.insert(DnsRecord::new(&zone, RecordType::Txt, root, spf)?.with_ttl(ttl))?;

    Ok(())
}
