// Copyright (c) 2025 - Cowboy AI, Inc.
//! Files stack: a public bucket for manually shared files behind the CDN

use crate::config::{Environment, FilesConfig};
use crate::constructs::make_bucket;
use crate::domain::{Handle, Hostname};
use crate::errors::CompositionResult;
use crate::resources::{Certificate, Distribution, Origin, PriceClass, ViewerProtocolPolicy};
use crate::stack::{Built, Stack};
use crate::stacks::qualify_all;

pub struct FilesStack;

impl FilesStack {
    pub const NAME: &'static str = "Files";

    pub fn build(
        environment: &Environment,
        root: &Hostname,
        config: &FilesConfig,
        certificate: &Handle<Certificate>,
    ) -> CompositionResult<Built<Handle<Distribution>>> {
        let mut stack = Stack::new(Self::NAME, environment)
            .with_description("Public bucket for files shared by hand, without directory listing");

        let bucket = make_bucket(&config.bucket_name, true, None)?;
        let bucket_handle = stack.declare("Bucket", bucket.clone())?;

        let distribution = Distribution::builder(certificate, Origin::bucket(&bucket_handle, &bucket)?)
            .domain_names(qualify_all(root, &config.cdn_aliases)?)
            .price_class(PriceClass::PriceClass100)
            .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
            .build()?;
        let cdn = stack.declare("Cdn", distribution)?;

        Ok(Built::new(stack, cdn))
    }
}
