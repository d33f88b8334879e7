// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute declarations: functions, API endpoints, clusters and scheduled tasks

use serde::{Serialize, Serializer};
use std::time::Duration;

use super::impl_resource;
use super::storage::ImageRepository;
use super::zone::Certificate;
use crate::domain::invariants::{validate_rate, ValidationError};
use crate::domain::{Handle, Hostname, Ref};

/// Function runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Runtime {
    #[serde(rename = "nodejs12.x")]
    Nodejs12,
}

/// Small function whose source is embedded in the declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputeFunction {
    pub name: String,
    pub runtime: Runtime,
    /// `file.export` entrypoint inside the inline source
    pub handler: String,
    pub inline_source: String,
}

impl_resource!(ComputeFunction);

/// How an API endpoint is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    /// Fronted by the provider's CDN edge
    Edge,
    Regional,
}

/// HTTP API on a custom domain, proxying every request to one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEndpoint {
    pub api_name: String,
    pub domain_name: Hostname,
    pub certificate: Ref,
    pub handler: Ref,
    pub endpoint_type: EndpointType,
}

impl ApiEndpoint {
    pub fn new(
        api_name: impl Into<String>,
        domain_name: Hostname,
        certificate: &Handle<Certificate>,
        handler: &Handle<ComputeFunction>,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            domain_name,
            certificate: certificate.to_ref(),
            handler: handler.to_ref(),
            endpoint_type: EndpointType::Edge,
        }
    }
}

impl_resource!(ApiEndpoint, |endpoint| vec![
    endpoint.certificate.clone(),
    endpoint.handler.clone(),
]);

/// Subnet class tasks are placed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetType {
    Public,
    Private,
}

/// Container cluster
///
/// `standing_instances` of zero means tasks only run on on-demand capacity;
/// persistent capacity is deferred until a steady-state workload exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub cluster_name: String,
    pub standing_instances: u32,
    pub subnet_type: SubnetType,
}

impl Cluster {
    pub fn on_demand(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            standing_instances: 0,
            subnet_type: SubnetType::Public,
        }
    }
}

impl_resource!(Cluster);

/// Image pulled from a declared repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerImage {
    pub repository: Ref,
    pub tag: String,
}

/// One container within a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: ContainerImage,
}

impl ContainerSpec {
    pub fn from_repository(
        name: impl Into<String>,
        repository: &Handle<ImageRepository>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: ContainerImage {
                repository: repository.to_ref(),
                tag: tag.into(),
            },
        }
    }
}

/// Container task definition with its own execution role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDefinition {
    pub family: String,
    /// CPU units (1024 = one vCPU)
    pub cpu: u32,
    pub memory_mib: u32,
    pub containers: Vec<ContainerSpec>,
}

impl_resource!(TaskDefinition, |task| task
    .containers
    .iter()
    .map(|container| container.image.repository.clone())
    .collect());

/// Recurrence of a scheduled job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Rate(Duration),
}

impl Schedule {
    /// Fixed-rate recurrence of a positive whole number of minutes
    pub fn rate(interval: Duration) -> Result<Self, ValidationError> {
        validate_rate(interval)?;
        Ok(Self::Rate(interval))
    }

    /// Rate expression in the largest whole unit, e.g. `rate(1 hour)`
    pub fn expression(&self) -> String {
        match self {
            Self::Rate(interval) => {
                let minutes = interval.as_secs() / 60;
                let (amount, unit) = if minutes % (24 * 60) == 0 {
                    (minutes / (24 * 60), "day")
                } else if minutes % 60 == 0 {
                    (minutes / 60, "hour")
                } else {
                    (minutes, "minute")
                };
                let plural = if amount == 1 { "" } else { "s" };
                format!("rate({} {}{})", amount, unit, plural)
            }
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Self::Rate(interval) => *interval,
        }
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression())
    }
}

/// Task launched on a cluster when a rule fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTarget {
    pub cluster: Ref,
    pub task_definition: Ref,
    pub subnet_type: SubnetType,
}

impl TaskTarget {
    pub fn new(cluster: &Handle<Cluster>, task_definition: &Handle<TaskDefinition>) -> Self {
        Self {
            cluster: cluster.to_ref(),
            task_definition: task_definition.to_ref(),
            subnet_type: SubnetType::Public,
        }
    }
}

/// Recurring rule running one task on one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledJob {
    pub rule_name: String,
    pub description: String,
    pub schedule: Schedule,
    pub target: TaskTarget,
}

impl_resource!(ScheduledJob, |job| vec![
    job.target.cluster.clone(),
    job.target.task_definition.clone(),
]);
