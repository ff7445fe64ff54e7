//! Validate an authorization policy file before deploying it.
//!
//! Usage:
//!   cargo run --bin check_policy -- path/to/policy.json
//!   cargo run --bin check_policy -- --defaults --print

use anyhow::{bail, Context, Result};
use clap::Parser;
use shelfgate::common::auth::{bootstrap, Policy};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "check_policy")]
#[command(about = "Validate a role→permission policy file", long_about = None)]
struct Cli {
    /// Policy file to validate
    #[arg(required_unless_present = "defaults")]
    path: Option<PathBuf>,

    /// Check the built-in default groups instead of a file
    #[arg(long, conflicts_with = "path")]
    defaults: bool,

    /// Print the normalized policy as JSON
    #[arg(long)]
    print: bool,

    /// Treat permissions no role holds as a warning instead of an error
    #[arg(long)]
    allow_unreachable: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,shelfgate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let policy: Policy = match &cli.path {
        Some(path) => bootstrap::load_policy_file(path)?,
        None => bootstrap::default_groups(),
    };

    for (role, permissions) in policy.roles() {
        let names: Vec<_> = permissions.iter().map(|p| p.as_str()).collect();
        tracing::info!(role = %role, permissions = ?names, "Role");
    }
    if !policy.is_populated() {
        bail!("Policy maps no roles; every non-staff request would be denied");
    }

    match policy.validate() {
        Ok(()) => tracing::info!("Every permission is reachable by at least one role"),
        Err(e) if cli.allow_unreachable => tracing::warn!(error = %e, "Policy has unreachable permissions"),
        Err(e) => return Err(e).context("Policy validation failed"),
    }

    if cli.print {
        let json = serde_json::to_string_pretty(&policy.to_config())
            .context("Failed to serialize policy")?;
        println!("{}", json);
    }

    Ok(())
}
