// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use zonesync::{
    constants::{DEFAULT_LOG_FILTER, LINODE_API_URL, LOG_FORMAT_ENV},
    provider::LinodeClient,
    reconcilers::reconcile_with,
    spec,
};

/// Update Linode DNS configuration to match a specification.
#[derive(Parser, Debug)]
#[command(name = "zonesync", version, about)]
struct Args {
    /// Linode API key
    api_key: String,

    /// YAML file with the desired DNS specification
    config_file: PathBuf,

    /// Print changes on STDOUT, but do not execute them
    #[arg(short = 'd', long = "dryrun")]
    dryrun: bool,

    /// Linode API endpoint
    #[arg(long, default_value = LINODE_API_URL)]
    api_url: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("zonesync")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(args))
}

/// Initialize logging on stderr, keeping stdout for the change report.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT=json`.
fn initialize_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(args: Args) -> Result<()> {
    initialize_logging();

    info!(
        config_file = %args.config_file.display(),
        dry_run = args.dryrun,
        "Starting zonesync"
    );

    // The whole specification is validated before the provider is contacted
    let desired = spec::load_file(&args.config_file)
        .with_context(|| format!("Invalid specification {}", args.config_file.display()))?
        .into_desired_state();

    debug!(api_url = %args.api_url, "Creating Linode client");
    let client = LinodeClient::with_base_url(args.api_key, &args.api_url)
        .context("Failed to create Linode client")?;

    // Changes go to stdout as they are applied, so a failed run still shows
    // what was changed before the error
    let report = reconcile_with(&client, &desired, args.dryrun, |change| {
        println!("{change}");
    })
    .await
    .context("Failed to synchronise DNS zones")?;

    info!(changes = report.changes.len(), "zonesync finished");
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
