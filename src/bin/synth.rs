// Copyright (c) 2025 - Cowboy AI, Inc.
//! Synth
//!
//! Composes every stack of the deployment and prints the assembly as JSON on
//! stdout. Logs go to stderr.
//!
//! Run with: cargo run --bin synth > assembly.json
//!
//! Environment:
//! 1. `CDK_DEFAULT_ACCOUNT` / `CDK_DEFAULT_REGION` (or `AWS_ACCOUNT_ID` /
//!    `AWS_REGION`) name the account/region being deployed to
//! 2. `RECLAIMERS_CONFIG` optionally names a JSON configuration file
//! 3. `RUST_LOG` adjusts log filtering

use anyhow::{Context, Result};
use reclaimers_infrastructure::{compose, DeploymentConfig, Environment, ResourceKind};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DeploymentConfig::from_env().context("Failed to load deployment configuration")?;
    let actual = Environment::from_env().context("Failed to resolve target environment")?;
    info!("Configuration loaded for {} ({})", config.domain_name, config.environment);

    let assembly = compose(&config, &actual).context("Composition failed")?;
    info!(
        "Assembly ready: {} stacks, {} DNS records",
        assembly.stacks().len(),
        assembly.count(ResourceKind::DnsRecord)
    );

    println!("{}", assembly.to_json()?);
    Ok(())
}
