// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain stack: the hosted zone and the shared TLS certificate

use crate::config::Environment;
use crate::domain::{Handle, Hostname};
use crate::errors::CompositionResult;
use crate::resources::{Certificate, HostedZone};
use crate::stack::{Built, Stack};

/// Handles every other stack may consume from the Domain stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOutputs {
    pub zone: Handle<HostedZone>,
    pub zone_name: Hostname,
    pub certificate: Handle<Certificate>,
}

pub struct DomainStack;

impl DomainStack {
    pub const NAME: &'static str = "Domain";

    /// Declare the zone, then a certificate validated through it
    ///
    /// The certificate covers the root domain and `*.root`.
    pub fn build(environment: &Environment, root: &Hostname) -> CompositionResult<Built<DomainOutputs>> {
        let mut stack = Stack::new(Self::NAME, environment);

        let zone = HostedZone::new(root.clone()).with_provider_caa();
        let zone_handle = stack.declare("Zone", zone.clone())?;

        let certificate = Certificate::for_zone(&zone_handle, &zone);
        let certificate_handle = stack.declare("Cert", certificate)?;

        Ok(Built::new(
            stack,
            DomainOutputs {
                zone: zone_handle,
                zone_name: root.clone(),
                certificate: certificate_handle,
            },
        ))
    }
}
