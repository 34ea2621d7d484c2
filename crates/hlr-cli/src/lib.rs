//! # hlr-cli: Command-Line Interface for the HLR Draft Reconciler
//!
//! Provides the `hlr` binary, which drives the reconciliation engine in
//! `hlr-state` over JSON snapshots on disk.
//!
//! ## Subcommands
//!
//! - `hlr reconcile`: run one reconciliation pass and report render state, effects and events.
//! - `hlr migrate`: Forced v1 to v2 migration of a draft.
//! - `hlr diverged`: Divergence verdict between a draft and fetched issues.
//!
//! ```bash
//! hlr reconcile --draft draft.json --fetched fetched.json --location /review --logged-in
//! hlr migrate --draft draft.json
//! hlr diverged --draft draft.json --fetched fetched.json
//! ```
//!
//! Reports go to stdout as pretty JSON; logs go to stderr.

pub mod diverged;
pub mod migrate;
pub mod reconcile;
pub mod snapshot;

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write report")?;
    Ok(())
}
