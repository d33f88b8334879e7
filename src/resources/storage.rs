// Copyright (c) 2025 - Cowboy AI, Inc.
//! Storage declarations: buckets, key-value tables and image registries

use serde::Serialize;

use super::impl_resource;

/// What happens to stored data when the declaration is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

/// Bucket access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketAccess {
    Private,
    PublicRead,
}

/// Static website serving configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebsiteConfig {
    pub index_document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_document: Option<String>,
}

/// Object storage bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub access: BucketAccess,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<WebsiteConfig>,
    pub removal_policy: RemovalPolicy,
}

impl Bucket {
    pub fn is_public(&self) -> bool {
        self.access == BucketAccess::PublicRead
    }
}

impl_resource!(Bucket);

/// Key attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

/// Named key attribute of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::String,
        }
    }
}

/// Table capacity billing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    PayPerRequest,
}

/// Key-value table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
    pub billing_mode: BillingMode,
    pub removal_policy: RemovalPolicy,
}

impl_resource!(Table);

/// Container image registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRepository {
    pub repository_name: String,
    pub removal_policy: RemovalPolicy,
}

impl_resource!(ImageRepository);
