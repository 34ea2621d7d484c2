//! # Diverged Subcommand
//!
//! Compares fetched issues against a draft by identity and legacy count.
//! Only a completed fetch is compared; the reconciler never merges issues
//! from a fetch that is pending or failed, so neither does this verdict.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use hlr_core::FetchStatus;
use hlr_state::{detect_divergence, Divergence};
use serde::Serialize;

use crate::snapshot::{load_draft, load_fetched};

/// Exit code reported when the draft is out of sync.
pub const EXIT_DIVERGED: u8 = 2;

/// Arguments for the `hlr diverged` subcommand.
#[derive(Args, Debug)]
pub struct DivergedArgs {
    /// Path to the form draft JSON.
    #[arg(long)]
    pub draft: PathBuf,

    /// Path to the fetched-issues JSON.
    #[arg(long)]
    pub fetched: PathBuf,
}

/// Divergence verdict.
#[derive(Debug, Serialize)]
pub struct DivergedReport {
    pub status: FetchStatus,
    pub diverged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
}

/// Load both snapshots and compare them.
pub fn diverged_report(args: &DivergedArgs) -> Result<DivergedReport> {
    let draft = load_draft(&args.draft)?;
    let fetched = load_fetched(&args.fetched)?;
    if fetched.status != FetchStatus::Done {
        bail!(
            "fetch status is {}: divergence is only judged on completed fetches",
            fetched.status
        );
    }
    let divergence = detect_divergence(&fetched, &draft);
    Ok(DivergedReport {
        status: fetched.status,
        diverged: divergence.is_some(),
        divergence,
    })
}

/// Execute the diverged subcommand.
///
/// Returns exit code 0 when in sync, 2 when diverged.
pub fn run_diverged(args: &DivergedArgs) -> Result<u8> {
    let report = diverged_report(args)?;
    crate::print_json(&report)?;
    Ok(if report.diverged { EXIT_DIVERGED } else { 0 })
}
