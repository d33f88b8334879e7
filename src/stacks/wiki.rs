// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wiki stack: the c20 wiki site and its automated build
//!
//! The build watches the wiki's source repository and syncs its output into
//! the site bucket; the CDN fronts that bucket with the shared certificate.

use tracing::debug;

use crate::config::{Environment, WikiConfig};
use crate::constructs::make_bucket;
use crate::domain::{Handle, Hostname};
use crate::errors::CompositionResult;
use crate::resources::{
    BuildEnvironment, BuildImage, BuildProject, CachePolicy, Certificate, Distribution, Grant,
    Origin, PriceClass, Principal, SourceRepository, ViewerProtocolPolicy,
};
use crate::stack::{Built, Stack};
use crate::stacks::qualify_all;

const BUILD_PROJECT_NAME: &str = "wiki-build";
const CACHE_POLICY_NAME: &str = "c20-ttl-policy";

pub struct WikiStack;

impl WikiStack {
    pub const NAME: &'static str = "Wiki";

    pub fn build(
        environment: &Environment,
        root: &Hostname,
        config: &WikiConfig,
        certificate: &Handle<Certificate>,
    ) -> CompositionResult<Built<Handle<Distribution>>> {
        let mut stack = Stack::new(Self::NAME, environment)
            .with_description("c20 wiki website and its automated build from source");

        let bucket = make_bucket(&config.bucket_name, true, config.error_document.as_deref())?;
        let bucket_handle = stack.declare("Bucket", bucket.clone())?;

        let cache_handle = match &config.cache_bucket_name {
            Some(name) => Some(stack.declare("CacheBucket", make_bucket(name, false, None)?)?),
            None => None,
        };

        let project = BuildProject::new(
            BUILD_PROJECT_NAME,
            "Automatically builds and deploys the wiki to S3",
            BuildEnvironment::small(BuildImage::Standard5),
            SourceRepository::github(&config.source),
        );
        let build_handle = stack.declare("Build", project)?;
        let builder = Principal::build_project(&build_handle);

        stack.declare(
            "BuildBucketReadWrite",
            Grant::bucket_read_write(builder.clone(), &bucket_handle),
        )?;
        if let Some(cache_handle) = &cache_handle {
            stack.declare(
                "BuildCacheReadWrite",
                Grant::bucket_read_write(builder.clone(), cache_handle),
            )?;
        }
        if config.error_document.is_some() {
            debug!("Granting website configuration on {} to {}", bucket.name, BUILD_PROJECT_NAME);
            stack.declare(
                "BuildBucketWebsite",
                Grant::bucket_website_config(builder, &bucket_handle),
            )?;
        }

        let distribution = Distribution::builder(certificate, Origin::bucket(&bucket_handle, &bucket)?)
            .domain_names(qualify_all(root, &config.cdn_aliases)?)
            .price_class(PriceClass::PriceClass100)
            .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
            .cache_policy(CachePolicy::new(CACHE_POLICY_NAME, config.cache_ttl()?))
            .build()?;
        let cdn = stack.declare("Cdn", distribution)?;

        Ok(Built::new(stack, cdn))
    }
}
