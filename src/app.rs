// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composition Root
//!
//! [`App`] collects stacks in dependency order and turns them into an
//! [`Assembly`], the document handed to the deployment engine.
//!
//! # Guarantees
//!
//! - Composition only starts when the pinned and actual environments agree
//! - A stack is accepted only after every stack it references, and only if
//!   each reference names an existing declaration of the expected kind, so
//!   insertion order is always a valid deployment order
//! - [`App::synth`] rejects assembly-wide defects: duplicate record
//!   identities, aliases whose target does not accept the name, and
//!   TLS names the bound certificate does not cover

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::{DeploymentConfig, Environment};
use crate::domain::invariants::validate_unique_identities;
use crate::domain::{Hostname, Ref, ResourceKind, ValidationError};
use crate::errors::{CompositionError, CompositionResult};
use crate::resources::{
    ApiEndpoint, Certificate, Declaration, Distribution, DnsRecord, RecordIdentity, RecordTarget,
    Resource,
};
use crate::stack::{Built, Stack};
use crate::stacks::{
    qualify, qualify_all, ClusterStack, DevsStack, DiscordRedirectStack, DnsStack, DnsStackProps,
    DomainStack, FilesStack, NewsStack, RedirectAlias, SiteAlias, WikiStack,
};

/// Stacks of one deployment, in dependency order
#[derive(Debug)]
pub struct App {
    environment: Environment,
    stacks: Vec<Stack>,
}

impl App {
    /// Start a composition pinned to `pinned`
    ///
    /// # Errors
    /// `EnvironmentMismatch` when `actual` is a different account/region pair.
    pub fn new(pinned: Environment, actual: &Environment) -> CompositionResult<Self> {
        if &pinned != actual {
            return Err(CompositionError::EnvironmentMismatch {
                pinned,
                actual: actual.clone(),
            });
        }

        info!("Composing for {}", pinned);
        Ok(Self {
            environment: pinned,
            stacks: Vec::new(),
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Accept a stack whose references all resolve to stacks already added
    pub fn add_stack(&mut self, stack: Stack) -> CompositionResult<()> {
        if self.stack(stack.name()).is_some() {
            return Err(CompositionError::DuplicateStack(stack.name().to_string()));
        }

        if stack.environment() != &self.environment {
            return Err(CompositionError::EnvironmentMismatch {
                pinned: self.environment.clone(),
                actual: stack.environment().clone(),
            });
        }

        for declared in stack.resources() {
            for reference in declared.declaration.references() {
                if reference.stack != stack.name() {
                    self.check_resolves(stack.name(), &reference)?;
                }
            }
        }

        info!(
            "Added stack {} ({} declarations, depends on {:?})",
            stack.name(),
            stack.len(),
            stack.dependencies()
        );
        self.stacks.push(stack);
        Ok(())
    }

    /// Add a built stack and hand back its output
    pub fn add<O>(&mut self, built: Built<O>) -> CompositionResult<O> {
        self.add_stack(built.stack)?;
        Ok(built.output)
    }

    fn check_resolves(&self, consumer: &str, reference: &Ref) -> CompositionResult<()> {
        match self.resolve(reference) {
            None => Err(CompositionError::UnresolvedReference {
                consumer: consumer.to_string(),
                stack: reference.stack.clone(),
                logical_id: reference.logical_id.clone(),
            }),
            Some(found) if found.kind() != reference.kind => Err(CompositionError::KindMismatch {
                stack: reference.stack.clone(),
                logical_id: reference.logical_id.clone(),
                expected: reference.kind,
                found: found.kind(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Declaration a reference points at, if its stack has been added
    pub fn resolve(&self, reference: &Ref) -> Option<&Declaration> {
        self.stack(&reference.stack)?.get(&reference.logical_id)
    }

    pub fn stack(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|stack| stack.name() == name)
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Run assembly-wide checks and produce the hand-off document
    pub fn synth(self) -> CompositionResult<Assembly> {
        self.check_unique_records()?;
        self.check_alias_coverage()?;
        self.check_certificate_coverage()?;

        info!("Synthesized {} stacks for {}", self.stacks.len(), self.environment);
        Ok(Assembly {
            environment: self.environment,
            stacks: self.stacks,
        })
    }

    fn all<'a, T: Resource + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.stacks.iter().flat_map(|stack| stack.all::<T>())
    }

    fn check_unique_records(&self) -> CompositionResult<()> {
        let mut by_zone: BTreeMap<&Ref, Vec<RecordIdentity>> = BTreeMap::new();
        for record in self.all::<DnsRecord>() {
            by_zone.entry(&record.zone).or_default().push(record.identity());
        }

        for identities in by_zone.values() {
            validate_unique_identities(identities).map_err(|error| match error {
                ValidationError::DuplicateIdentity(identity) => {
                    CompositionError::DuplicateRecord(identity)
                }
                other => other.into(),
            })?;
        }
        Ok(())
    }

    fn check_alias_coverage(&self) -> CompositionResult<()> {
        for record in self.all::<DnsRecord>() {
            let RecordTarget::Alias(alias) = &record.target else {
                continue;
            };

            let accepted = match self.resolve(&alias.target) {
                Some(Declaration::Distribution(distribution)) => distribution.accepts(&record.name),
                Some(Declaration::ApiEndpoint(endpoint)) => endpoint.domain_name == record.name,
                _ => false,
            };
            if !accepted {
                return Err(CompositionError::UncoveredAlias {
                    record: record.identity(),
                    target: alias.target.to_string(),
                });
            }
            debug!("Alias {} covered by {}", record.identity(), alias.target);
        }
        Ok(())
    }

    fn check_certificate_coverage(&self) -> CompositionResult<()> {
        let distributions = self
            .all::<Distribution>()
            .flat_map(|distribution| {
                distribution
                    .domain_names
                    .iter()
                    .map(move |name| (name, &distribution.certificate))
            });
        let endpoints = self
            .all::<ApiEndpoint>()
            .map(|endpoint| (&endpoint.domain_name, &endpoint.certificate));

        for (name, certificate) in distributions.chain(endpoints) {
            self.check_covered(name, certificate)?;
        }
        Ok(())
    }

    fn check_covered(&self, name: &Hostname, certificate: &Ref) -> CompositionResult<()> {
        let covered = self
            .resolve(certificate)
            .and_then(Certificate::from_declaration)
            .map(|certificate| certificate.covers(name))
            .unwrap_or(false);
        if !covered {
            return Err(CompositionError::UncoveredDomain {
                domain: name.to_string(),
                certificate: certificate.to_string(),
            });
        }
        Ok(())
    }
}

/// Fully resolved declaration set for the deployment engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assembly {
    environment: Environment,
    stacks: Vec<Stack>,
}

impl Assembly {
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Stacks in deployment order
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn stack(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|stack| stack.name() == name)
    }

    /// Every declaration of type `T` across all stacks
    pub fn all<'a, T: Resource + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.stacks.iter().flat_map(|stack| stack.all::<T>())
    }

    /// Every DNS record across all stacks
    pub fn records(&self) -> impl Iterator<Item = &DnsRecord> {
        self.all::<DnsRecord>()
    }

    /// Number of declarations of `kind` across all stacks
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.stacks
            .iter()
            .flat_map(|stack| stack.resources())
            .filter(|declared| declared.declaration.kind() == kind)
            .count()
    }

    pub fn to_json(&self) -> CompositionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compose the whole deployment
///
/// Stacks are built and added in dependency order: Domain, Cluster, News,
/// Wiki, Files, DiscordRedirect, Devs and finally Dns, which points records
/// at the leaf outputs.
pub fn compose(config: &DeploymentConfig, actual: &Environment) -> CompositionResult<Assembly> {
    let mut app = App::new(config.environment.clone(), actual)?;
    let environment = app.environment().clone();
    let root = config.root_domain()?;

    let domain = app.add(DomainStack::build(&environment, &root)?)?;
    let cluster = app.add(ClusterStack::build(&environment, &config.cluster)?)?;
    app.add(NewsStack::build(&environment, &config.news, &cluster)?)?;

    let wiki = app.add(WikiStack::build(
        &environment,
        &root,
        &config.wiki,
        &domain.certificate,
    )?)?;
    let files = app.add(FilesStack::build(
        &environment,
        &root,
        &config.files,
        &domain.certificate,
    )?)?;
    let discord = app.add(DiscordRedirectStack::build(
        &environment,
        &root,
        &config.discord,
        &domain.certificate,
    )?)?;
    app.add(DevsStack::build(&environment)?)?;

    let props = DnsStackProps {
        sites: vec![
            SiteAlias::new(wiki, qualify_all(&root, &config.wiki.dns_aliases)?),
            SiteAlias::new(files, qualify_all(&root, &config.files.dns_aliases)?),
        ],
        redirects: vec![RedirectAlias::new(
            discord,
            qualify(&root, &config.discord.subdomain)?,
        )],
    };
    app.add(DnsStack::build(&environment, &config.dns, &domain, &props)?)?;

    app.synth()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Handle;
    use crate::resources::RecordType;

    fn environment() -> Environment {
        Environment::new("123456789012", "us-east-1")
    }

    #[test]
    fn test_environment_mismatch() {
        let err = App::new(environment(), &Environment::new("123456789012", "eu-west-1")).unwrap_err();
        assert!(matches!(err, CompositionError::EnvironmentMismatch { .. }));
    }

    #[test]
    fn test_stack_pinned_elsewhere_rejected() {
        let mut app = App::new(environment(), &environment()).unwrap();
        let other = Environment::new("210987654321", "us-east-1");
        let err = app.add(DevsStack::build(&other).unwrap()).unwrap_err();
        assert!(matches!(err, CompositionError::EnvironmentMismatch { .. }));
    }

    #[test]
    fn test_duplicate_stack_rejected() {
        let mut app = App::new(environment(), &environment()).unwrap();
        app.add(DevsStack::build(&environment()).unwrap()).unwrap();
        let err = app.add(DevsStack::build(&environment()).unwrap()).unwrap_err();
        assert!(matches!(err, CompositionError::DuplicateStack(name) if name == "Devs"));
    }

    #[test]
    fn test_consumer_before_producer_rejected() {
        let root = Hostname::new("reclaimers.net").unwrap();
        let mut app = App::new(environment(), &environment()).unwrap();
        let domain = DomainStack::build(&environment(), &root).unwrap();

        let files = FilesStack::build(
            &environment(),
            &root,
            &Default::default(),
            &domain.output.certificate,
        )
        .unwrap();
        let err = app.add(files).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::UnresolvedReference { consumer, stack, .. }
                if consumer == "Files" && stack == "Domain"
        ));
    }

    #[test]
    fn test_forged_kind_rejected() {
        let root = Hostname::new("reclaimers.net").unwrap();
        let mut app = App::new(environment(), &environment()).unwrap();
        app.add(DomainStack::build(&environment(), &root).unwrap()).unwrap();

        // Points at the zone while claiming to be a certificate
        let forged: Handle<Certificate> = Handle::new("Domain", "Zone");
        let files = FilesStack::build(&environment(), &root, &Default::default(), &forged).unwrap();
        assert!(matches!(
            app.add(files).unwrap_err(),
            CompositionError::KindMismatch {
                expected: ResourceKind::Certificate,
                found: ResourceKind::HostedZone,
                ..
            }
        ));
    }

    #[test]
    fn test_alias_to_unaccepted_name_rejected() {
        let config = DeploymentConfig {
            wiki: crate::config::WikiConfig {
                cdn_aliases: vec!["c20".to_string()],
                dns_aliases: vec!["test".to_string()],
                ..Default::default()
            },
            ..DeploymentConfig::default()
        };
        let err = compose(&config, &config.environment).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::UncoveredAlias { record, .. }
                if record.name.as_str() == "test.reclaimers.net"
        ));
    }

    #[test]
    fn test_reference_composition() {
        let config = DeploymentConfig::default();
        let assembly = compose(&config, &config.environment).unwrap();

        let names: Vec<&str> = assembly.stacks().iter().map(Stack::name).collect();
        assert_eq!(
            names,
            vec!["Domain", "Cluster", "News", "Wiki", "Files", "DiscordRedirect", "Devs", "Dns"]
        );
        assert_eq!(assembly.count(ResourceKind::HostedZone), 1);
        assert_eq!(assembly.count(ResourceKind::Certificate), 1);
        assert_eq!(assembly.count(ResourceKind::ScheduledJob), 1);

        let aliases = assembly
            .records()
            .filter(|record| record.is_alias() && record.record_type == RecordType::A)
            .count();
        // test, files, discord
        assert_eq!(aliases, 3);
    }
}
