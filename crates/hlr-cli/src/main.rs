//! # hlr CLI entry point
//!
//! Parses command-line arguments, loads the reconciler configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hlr_cli::diverged::{run_diverged, DivergedArgs};
use hlr_cli::migrate::{run_migrate, MigrateArgs};
use hlr_cli::reconcile::{run_reconcile, ReconcileArgs};
use hlr_state::ReconcilerConfig;

/// Higher-Level Review draft reconciler.
///
/// Reconciles a persisted form draft with the contestable issues fetched for
/// the Veteran, migrates legacy drafts, and reports divergence.
#[derive(Parser, Debug)]
#[command(name = "hlr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one reconciliation pass over a draft and fetched issues.
    Reconcile(ReconcileArgs),

    /// Force the v2 migration of a legacy draft.
    Migrate(MigrateArgs),

    /// Check whether fetched issues diverge from a draft.
    Diverged(DivergedArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("hlr CLI starting");

    let config = match ReconcilerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(
        supported = ?config.supported_benefit_types,
        start_path = %config.start_path,
        "configuration loaded"
    );

    let result = match cli.command {
        Commands::Reconcile(args) => run_reconcile(&args, &config),
        Commands::Migrate(args) => run_migrate(&args),
        Commands::Diverged(args) => run_diverged(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
