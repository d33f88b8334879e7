// Copyright (c) 2025 - Cowboy AI, Inc.
//! CDN distribution declarations

use serde::Serialize;
use std::time::Duration;

use super::impl_resource;
use super::storage::Bucket;
use super::zone::Certificate;
use crate::domain::invariants::{validate_public_origin, ValidationError};
use crate::domain::{Handle, Hostname, Ref};

/// Edge location coverage tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceClass {
    /// North America and Europe only (cheapest)
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
}

/// How viewers reaching the edge over plain HTTP are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    AllowAll,
    HttpsOnly,
    RedirectToHttps,
}

/// Named cache policy with a default TTL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachePolicy {
    pub name: String,
    pub default_ttl_secs: u64,
}

impl CachePolicy {
    pub fn new(name: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            name: name.into(),
            default_ttl_secs: default_ttl.as_secs(),
        }
    }
}

/// Bucket origin behind a distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub bucket: Ref,
}

impl Origin {
    /// Use a declared bucket as origin
    ///
    /// The bucket must be public-read; the CDN is the intended access path.
    pub fn bucket(handle: &Handle<Bucket>, declared: &Bucket) -> Result<Self, ValidationError> {
        validate_public_origin(declared)?;
        Ok(Self {
            bucket: handle.to_ref(),
        })
    }
}

/// Caching, TLS-terminating edge layer in front of one origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub certificate: Ref,
    /// Names the edge accepts requests for, in declaration order
    pub domain_names: Vec<Hostname>,
    pub price_class: PriceClass,
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_policy: Option<CachePolicy>,
    pub origin: Origin,
}

impl Distribution {
    pub fn builder(certificate: &Handle<Certificate>, origin: Origin) -> DistributionBuilder {
        DistributionBuilder {
            certificate: certificate.to_ref(),
            origin,
            domain_names: Vec::new(),
            price_class: PriceClass::PriceClass100,
            viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
            cache_policy: None,
        }
    }

    pub fn accepts(&self, name: &Hostname) -> bool {
        self.domain_names.contains(name)
    }
}

impl_resource!(Distribution, |distribution| vec![
    distribution.certificate.clone(),
    distribution.origin.bucket.clone(),
]);

/// Fluent construction for [`Distribution`]
#[derive(Debug, Clone)]
pub struct DistributionBuilder {
    certificate: Ref,
    origin: Origin,
    domain_names: Vec<Hostname>,
    price_class: PriceClass,
    viewer_protocol_policy: ViewerProtocolPolicy,
    cache_policy: Option<CachePolicy>,
}

impl DistributionBuilder {
    /// Accept requests for an additional name; repeats are ignored
    pub fn domain_name(mut self, name: Hostname) -> Self {
        if !self.domain_names.contains(&name) {
            self.domain_names.push(name);
        }
        self
    }

    pub fn domain_names(self, names: impl IntoIterator<Item = Hostname>) -> Self {
        names.into_iter().fold(self, Self::domain_name)
    }

    pub fn price_class(mut self, price_class: PriceClass) -> Self {
        self.price_class = price_class;
        self
    }

    pub fn viewer_protocol_policy(mut self, policy: ViewerProtocolPolicy) -> Self {
        self.viewer_protocol_policy = policy;
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = Some(policy);
        self
    }

    /// Build the distribution
    ///
    /// A certificate-bound distribution needs at least one accepted name.
    pub fn build(self) -> Result<Distribution, ValidationError> {
        if self.domain_names.is_empty() {
            return Err(ValidationError::EmptyValues(format!(
                "distribution origin {}",
                self.origin.bucket
            )));
        }

        Ok(Distribution {
            certificate: self.certificate,
            domain_names: self.domain_names,
            price_class: self.price_class,
            viewer_protocol_policy: self.viewer_protocol_policy,
            cache_policy: self.cache_policy,
            origin: self.origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::storage::{BucketAccess, RemovalPolicy};

    fn bucket(access: BucketAccess) -> Bucket {
        Bucket {
            name: "reclaimers-public-files".to_string(),
            access,
            website: None,
            removal_policy: RemovalPolicy::Retain,
        }
    }

    #[test]
    fn test_private_origin_rejected() {
        let handle: Handle<Bucket> = Handle::new("Files", "Bucket");
        assert_eq!(
            Origin::bucket(&handle, &bucket(BucketAccess::Private)),
            Err(ValidationError::PrivateOrigin("reclaimers-public-files".to_string()))
        );
        assert!(Origin::bucket(&handle, &bucket(BucketAccess::PublicRead)).is_ok());
    }

    #[test]
    fn test_builder_dedupes_names_and_keeps_order() {
        let certificate: Handle<Certificate> = Handle::new("Domain", "Certificate");
        let origin = Origin::bucket(&Handle::new("Files", "Bucket"), &bucket(BucketAccess::PublicRead))
            .unwrap();

        let names = ["files.example.net", "www.example.net", "files.example.net"]
            .into_iter()
            .map(|name| Hostname::new(name).unwrap());
        let distribution = Distribution::builder(&certificate, origin)
            .domain_names(names)
            .cache_policy(CachePolicy::new("files-ttl", Duration::from_secs(300)))
            .build()
            .unwrap();

        assert_eq!(distribution.domain_names.len(), 2);
        assert_eq!(distribution.domain_names[0].as_str(), "files.example.net");
        assert_eq!(distribution.price_class, PriceClass::PriceClass100);
        assert_eq!(distribution.cache_policy.unwrap().default_ttl_secs, 300);
    }

    #[test]
    fn test_builder_requires_a_name() {
        let certificate: Handle<Certificate> = Handle::new("Domain", "Certificate");
        let origin = Origin::bucket(&Handle::new("Files", "Bucket"), &bucket(BucketAccess::PublicRead))
            .unwrap();
        assert!(Distribution::builder(&certificate, origin).build().is_err());
    }
}
