// Copyright (c) 2025 - Cowboy AI, Inc.
//! Build pipeline declarations
//!
//! A build project is declared with its triggers (push/merge events on
//! external repositories) and its environment. What the build actually does
//! lives in the watched repository's own build spec.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::impl_resource;
use crate::config::SourceConfig;

/// Managed build image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildImage {
    #[serde(rename = "aws/codebuild/standard:5.0")]
    Standard5,
    #[serde(rename = "aws/codebuild/amazonlinux2-x86_64-standard:3.0")]
    AmazonLinux2V3,
}

/// Build host sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeType {
    Small,
    Medium,
    Large,
}

/// Repository event that starts a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Push,
    PullRequestMerged,
}

/// One trigger: an event on a given head ref
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookFilter {
    pub event: EventAction,
    pub head_ref: String,
}

/// External source repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRepository {
    /// Name secondary sources are exposed under inside the build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub owner: String,
    pub repo: String,
    pub clone_depth: u32,
    pub triggers: Vec<WebhookFilter>,
}

impl SourceRepository {
    /// Shallow GitHub checkout built on every push or merged pull request
    /// to the configured branch
    pub fn github(source: &SourceConfig) -> Self {
        let head_ref = format!("refs/heads/{}", source.branch);
        Self {
            identifier: None,
            owner: source.owner.clone(),
            repo: source.repo.clone(),
            clone_depth: 1,
            triggers: vec![
                WebhookFilter {
                    event: EventAction::Push,
                    head_ref: head_ref.clone(),
                },
                WebhookFilter {
                    event: EventAction::PullRequestMerged,
                    head_ref,
                },
            ],
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Build host environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
    pub image: BuildImage,
    pub compute_type: ComputeType,
    /// Needed to run a container daemon inside the build
    pub privileged: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl BuildEnvironment {
    pub fn small(image: BuildImage) -> Self {
        Self {
            image,
            compute_type: ComputeType::Small,
            privileged: false,
            variables: BTreeMap::new(),
        }
    }
}

/// Source-triggered build project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProject {
    pub project_name: String,
    pub description: String,
    pub timeout_minutes: u64,
    pub environment: BuildEnvironment,
    pub source: SourceRepository,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_sources: Vec<SourceRepository>,
    /// Publish a build status badge
    pub badge: bool,
}

impl BuildProject {
    pub fn new(
        project_name: impl Into<String>,
        description: impl Into<String>,
        environment: BuildEnvironment,
        source: SourceRepository,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            description: description.into(),
            timeout_minutes: 10,
            environment,
            source,
            secondary_sources: Vec::new(),
            badge: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_minutes = timeout.as_secs() / 60;
        self
    }

    pub fn with_secondary_source(mut self, source: SourceRepository) -> Self {
        self.secondary_sources.push(source);
        self
    }

    /// Every repository whose events start this build
    pub fn watched_repositories(&self) -> impl Iterator<Item = &SourceRepository> {
        std::iter::once(&self.source).chain(self.secondary_sources.iter())
    }
}

impl_resource!(BuildProject);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_source_triggers_on_push_and_merge() {
        let source = SourceRepository::github(&SourceConfig::new("Sigmmma", "c20"));
        assert_eq!(source.clone_depth, 1);
        assert_eq!(
            source.triggers,
            vec![
                WebhookFilter {
                    event: EventAction::Push,
                    head_ref: "refs/heads/master".to_string(),
                },
                WebhookFilter {
                    event: EventAction::PullRequestMerged,
                    head_ref: "refs/heads/master".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_build_project_serialization() {
        let project = BuildProject::new(
            "news-build",
            "builds the scanner",
            BuildEnvironment::small(BuildImage::AmazonLinux2V3),
            SourceRepository::github(&SourceConfig::new("Sigmmma", "reclaimers-news")),
        )
        .with_secondary_source(
            SourceRepository::github(&SourceConfig::new("Sigmmma", "reclaimers-news-sources"))
                .with_identifier("config"),
        );

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(
            json["environment"]["image"],
            "aws/codebuild/amazonlinux2-x86_64-standard:3.0"
        );
        assert_eq!(json["source"]["triggers"][1]["event"], "PULL_REQUEST_MERGED");
        assert_eq!(json["secondary_sources"][0]["identifier"], "config");
        assert_eq!(project.watched_repositories().count(), 2);
    }
}
