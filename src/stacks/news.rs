// Copyright (c) 2025 - Cowboy AI, Inc.
//! News stack: scheduled RSS scan that posts community news to Discord
//!
//! The scanner runs as a container task on the shared cluster. The table
//! records which feed items were already sent; the build publishes the
//! scanner image into the repository.

use std::collections::BTreeMap;

use crate::config::{Environment, NewsConfig};
use crate::domain::Handle;
use crate::errors::CompositionResult;
use crate::resources::storage::{BillingMode, KeyAttribute};
use crate::resources::{
    BuildEnvironment, BuildImage, BuildProject, Cluster, ContainerSpec, Grant, ImageRepository,
    Principal, RemovalPolicy, Schedule, ScheduledJob, SourceRepository, Table, TaskDefinition,
    TaskTarget,
};
use crate::stack::{Built, Stack};

const SENT_TABLE_NAME: &str = "news-sent-messages";
const TASK_FAMILY: &str = "news-task";
const RULE_NAME: &str = "news-schedule";
const BUILD_PROJECT_NAME: &str = "news-build";
/// Name the feed list checkout is exposed under inside the build
const FEEDS_SOURCE_IDENTIFIER: &str = "config";

/// Smallest task size: a quarter vCPU
const TASK_CPU: u32 = 256;
const TASK_MEMORY_MIB: u32 = 512;

pub struct NewsStack;

impl NewsStack {
    pub const NAME: &'static str = "News";

    pub fn build(
        environment: &Environment,
        config: &NewsConfig,
        cluster: &Handle<Cluster>,
    ) -> CompositionResult<Built<Handle<ScheduledJob>>> {
        let mut stack = Stack::new(Self::NAME, environment)
            .with_description("Community news notifications from RSS feeds");

        let table = stack.declare(
            "NewsSentMessages",
            Table {
                table_name: SENT_TABLE_NAME.to_string(),
                partition_key: KeyAttribute::string("sourceId"),
                sort_key: Some(KeyAttribute::string("guid")),
                billing_mode: BillingMode::PayPerRequest,
                removal_policy: RemovalPolicy::Retain,
            },
        )?;

        let repository = stack.declare(
            "ImageRepo",
            ImageRepository {
                repository_name: config.image_repository.clone(),
                removal_policy: RemovalPolicy::Destroy,
            },
        )?;

        let task = stack.declare(
            "NewsTask",
            TaskDefinition {
                family: TASK_FAMILY.to_string(),
                cpu: TASK_CPU,
                memory_mib: TASK_MEMORY_MIB,
                containers: vec![ContainerSpec::from_repository(
                    "ServiceContainer",
                    &repository,
                    &config.image_tag,
                )],
            },
        )?;

        stack.declare(
            "TaskTableReadWrite",
            Grant::table_read_write(Principal::task_role(&task), &table),
        )?;

        let job = stack.declare(
            "Schedule",
            ScheduledJob {
                rule_name: RULE_NAME.to_string(),
                description: "Determines how often we poll RSS for news".to_string(),
                schedule: Schedule::rate(config.schedule()?)?,
                target: TaskTarget::new(cluster, &task),
            },
        )?;

        let mut build_environment = BuildEnvironment::small(BuildImage::AmazonLinux2V3);
        build_environment.privileged = true;
        build_environment.variables = BTreeMap::from([
            ("AWS_DEFAULT_REGION".to_string(), environment.region.clone()),
            ("AWS_ACCOUNT_ID".to_string(), environment.account.clone()),
            ("IMAGE_REPO_NAME".to_string(), config.image_repository.clone()),
            ("IMAGE_TAG".to_string(), config.image_tag.clone()),
        ]);

        let project = BuildProject::new(
            BUILD_PROJECT_NAME,
            "Automatically builds and deploys the RSS news scanner",
            build_environment,
            SourceRepository::github(&config.source),
        )
        .with_secondary_source(
            SourceRepository::github(&config.feeds_source).with_identifier(FEEDS_SOURCE_IDENTIFIER),
        );
        let build = stack.declare("Build", project)?;

        stack.declare(
            "BuildRepositoryPullPush",
            Grant::repository_pull_push(Principal::build_project(&build), &repository),
        )?;

        Ok(Built::new(stack, job))
    }
}
