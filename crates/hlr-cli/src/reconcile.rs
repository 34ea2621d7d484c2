//! # Reconcile Subcommand
//!
//! Runs one reconciliation pass over a draft and a fetched-issues state read
//! from disk, and prints what the form would render, the effects the pass
//! asks the host to apply, and the events it recorded.
//!
//! A single pass never observes its own effects: the printed `set_draft`
//! effect is the commit a live host would persist before notifying again.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hlr_core::DraftSessionId;
use hlr_state::{Effect, ReconcileEvent, Reconciler, ReconcilerConfig, RenderState, Snapshot};
use serde::Serialize;

use crate::snapshot::{load_draft, load_fetched, load_sub_task, parse_location};

/// Arguments for the `hlr reconcile` subcommand.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Path to the form draft JSON.
    #[arg(long)]
    pub draft: PathBuf,

    /// Path to the fetched-issues JSON.
    #[arg(long)]
    pub fetched: PathBuf,

    /// Current location of the form.
    #[arg(long, default_value = "/")]
    pub location: String,

    /// Treat the user as signed in.
    #[arg(long)]
    pub logged_in: bool,

    /// Path to the stored sub-task JSON.
    #[arg(long)]
    pub sub_task: Option<PathBuf>,
}

/// Output of one pass.
#[derive(Debug, Serialize)]
pub struct ReconcileReport {
    pub session: DraftSessionId,
    pub render: RenderState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub effects: Vec<Effect>,
    pub events: Vec<ReconcileEvent>,
}

/// Build the snapshot described by `args` and run one pass over it.
pub fn reconcile_report(args: &ReconcileArgs, config: &ReconcilerConfig) -> Result<ReconcileReport> {
    let location = parse_location(&args.location).context("invalid --location")?;
    let snapshot = Snapshot {
        draft: load_draft(&args.draft)?,
        fetched: load_fetched(&args.fetched)?,
        sub_task: load_sub_task(args.sub_task.as_deref())?,
        logged_in: args.logged_in,
        location,
    };

    let mut reconciler = Reconciler::new(config.clone());
    let pass = reconciler.evaluate(&snapshot);
    tracing::debug!(render = %pass.render, effects = pass.effects.len(), "pass complete");

    Ok(ReconcileReport {
        session: reconciler.session(),
        render: pass.render,
        message: pass.render.message(),
        effects: pass.effects,
        events: reconciler.events().entries().to_vec(),
    })
}

/// Execute the reconcile subcommand.
///
/// Returns exit code 0 on success.
pub fn run_reconcile(args: &ReconcileArgs, config: &ReconcilerConfig) -> Result<u8> {
    let report = reconcile_report(args, config)?;
    crate::print_json(&report)?;
    Ok(0)
}
