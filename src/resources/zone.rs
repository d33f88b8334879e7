// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosted zone and TLS certificate declarations

use serde::Serialize;

use super::impl_resource;
use crate::domain::{Handle, Hostname};

/// Authoritative record set for a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedZone {
    pub zone_name: Hostname,
    /// CAA issuer clients should expect certificates from, if restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caa_issuer: Option<String>,
}

impl HostedZone {
    /// CAA issuer value for the provider's certificate authority
    pub const PROVIDER_CA: &'static str = "amazon.com";

    pub fn new(zone_name: Hostname) -> Self {
        Self {
            zone_name,
            caa_issuer: None,
        }
    }

    /// Restrict certificate issuance for the zone to the provider's CA
    pub fn with_provider_caa(mut self) -> Self {
        self.caa_issuer = Some(Self::PROVIDER_CA.to_string());
        self
    }

    pub fn is_caa_restricted(&self) -> bool {
        self.caa_issuer.is_some()
    }
}

impl_resource!(HostedZone);

/// How the certificate authority verifies domain ownership
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CertificateValidation {
    /// Challenge records placed into the given zone
    Dns { zone: crate::domain::Ref },
}

/// Signed TLS credential for a primary domain and alternative names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub domain_name: Hostname,
    pub subject_alternative_names: Vec<Hostname>,
    pub validation: CertificateValidation,
}

impl Certificate {
    /// Certificate for a zone's apex plus a full wildcard, validated via DNS
    /// against that same zone
    ///
    /// Takes the zone's handle, so the zone must already be declared.
    pub fn for_zone(zone: &Handle<HostedZone>, declared: &HostedZone) -> Self {
        let apex = declared.zone_name.clone();
        Self {
            subject_alternative_names: vec![apex.clone(), apex.wildcard()],
            domain_name: apex,
            validation: CertificateValidation::Dns {
                zone: zone.to_ref(),
            },
        }
    }

    /// Every name the certificate is signed for
    pub fn names(&self) -> impl Iterator<Item = &Hostname> {
        std::iter::once(&self.domain_name).chain(self.subject_alternative_names.iter())
    }

    /// Whether a client requesting `name` would accept this certificate
    pub fn covers(&self, name: &Hostname) -> bool {
        self.names().any(|pattern| name.matches(pattern))
    }
}

impl_resource!(Certificate, |certificate| match &certificate.validation {
    CertificateValidation::Dns { zone } => vec![zone.clone()],
});
