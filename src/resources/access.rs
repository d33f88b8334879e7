// Copyright (c) 2025 - Cowboy AI, Inc.
//! Access declarations: narrow permission grants and operator groups
//!
//! Grants are always scoped to one principal and one resource. Nothing here
//! grants account-wide access.

use serde::Serialize;
use std::collections::BTreeSet;

use super::build::BuildProject;
use super::compute::TaskDefinition;
use super::impl_resource;
use super::storage::{Bucket, ImageRepository, Table};
use crate::domain::{Handle, Ref};

const BUCKET_READ_WRITE: &[&str] = &[
    "s3:GetObject*",
    "s3:GetBucket*",
    "s3:List*",
    "s3:DeleteObject*",
    "s3:PutObject",
    "s3:Abort*",
];

const BUCKET_WEBSITE: &[&str] = &["s3:GetBucketWebsite", "s3:PutBucketWebsite"];

const TABLE_READ_WRITE: &[&str] = &[
    "dynamodb:BatchGetItem",
    "dynamodb:GetItem",
    "dynamodb:Query",
    "dynamodb:Scan",
    "dynamodb:ConditionCheckItem",
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

const REPOSITORY_PULL_PUSH: &[&str] = &[
    "ecr:BatchCheckLayerAvailability",
    "ecr:GetDownloadUrlForLayer",
    "ecr:BatchGetImage",
    "ecr:PutImage",
    "ecr:InitiateLayerUpload",
    "ecr:UploadLayerPart",
    "ecr:CompleteLayerUpload",
];

/// Identity a grant is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum Principal {
    /// Service role of a build project
    BuildProject(Ref),
    /// Role assumed by the containers of a task
    TaskRole(Ref),
}

impl Principal {
    pub fn build_project(handle: &Handle<BuildProject>) -> Self {
        Self::BuildProject(handle.to_ref())
    }

    pub fn task_role(handle: &Handle<TaskDefinition>) -> Self {
        Self::TaskRole(handle.to_ref())
    }

    fn reference(&self) -> &Ref {
        match self {
            Self::BuildProject(reference) | Self::TaskRole(reference) => reference,
        }
    }
}

/// Permission for one principal to act on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grant {
    pub principal: Principal,
    pub resource: Ref,
    pub actions: BTreeSet<String>,
}

impl Grant {
    fn new(principal: Principal, resource: Ref, actions: &[&str]) -> Self {
        Self {
            principal,
            resource,
            actions: actions.iter().map(|action| action.to_string()).collect(),
        }
    }

    /// Object read/write on a bucket
    pub fn bucket_read_write(principal: Principal, bucket: &Handle<Bucket>) -> Self {
        Self::new(principal, bucket.to_ref(), BUCKET_READ_WRITE)
    }

    /// Mutate website-hosting metadata on a bucket
    ///
    /// Not part of read/write; a build that rewrites error documents needs it
    /// explicitly.
    pub fn bucket_website_config(principal: Principal, bucket: &Handle<Bucket>) -> Self {
        Self::new(principal, bucket.to_ref(), BUCKET_WEBSITE)
    }

    /// Item read/write on a table
    pub fn table_read_write(principal: Principal, table: &Handle<Table>) -> Self {
        Self::new(principal, table.to_ref(), TABLE_READ_WRITE)
    }

    /// Image pull and push on a repository
    pub fn repository_pull_push(principal: Principal, repository: &Handle<ImageRepository>) -> Self {
        let mut grant = Self::new(principal, repository.to_ref(), REPOSITORY_PULL_PUSH);
        // Registry login cannot be scoped to one repository.
        grant.actions.insert("ecr:GetAuthorizationToken".to_string());
        grant
    }

    pub fn allows(&self, action: &str) -> bool {
        self.actions.contains(action)
    }
}

impl_resource!(Grant, |grant| vec![
    grant.principal.reference().clone(),
    grant.resource.clone(),
]);

/// Group of human operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessGroup {
    pub group_name: String,
}

impl_resource!(AccessGroup);
