//! # Migrate Subcommand
//!
//! Applies the forced v2 migration to a draft on disk and prints the
//! result. Drafts already in the v2 shape are printed unchanged.

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use hlr_core::FormDraft;
use hlr_state::force_migrate;
use serde::Serialize;

use crate::snapshot::load_draft;

/// Arguments for the `hlr migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Path to the form draft JSON.
    #[arg(long)]
    pub draft: PathBuf,
}

/// Output of the migration.
#[derive(Debug, Serialize)]
pub struct MigrateReport {
    pub migrated: bool,
    pub draft: FormDraft,
}

/// Load the draft and run the forced migration.
pub fn migrate_report(args: &MigrateArgs) -> Result<MigrateReport> {
    let draft = load_draft(&args.draft)?;
    let report = match force_migrate(&draft) {
        Cow::Borrowed(_) => MigrateReport {
            migrated: false,
            draft,
        },
        Cow::Owned(migrated) => MigrateReport {
            migrated: true,
            draft: migrated,
        },
    };
    tracing::info!(migrated = report.migrated, path = %args.draft.display(), "forced migration");
    Ok(report)
}

/// Execute the migrate subcommand.
///
/// Returns exit code 0 on success.
pub fn run_migrate(args: &MigrateArgs) -> Result<u8> {
    let report = migrate_report(args)?;
    crate::print_json(&report)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(body: &str) -> (tempfile::TempDir, MigrateArgs) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, body).unwrap();
        (dir, MigrateArgs { draft: path })
    }

    #[test]
    fn migrates_v1_draft() {
        let (_dir, args) = args_for(
            r#"{"informalConferenceRep":{"name":"Ada Lovelace","phone":"5551234"},
                "informalConferenceTimes":{"time1":"time0800to1000"}}"#,
        );
        let report = migrate_report(&args).unwrap();
        assert!(report.migrated);
        let value = serde_json::to_value(&report.draft).unwrap();
        assert_eq!(value["hlrV2"], true);
        assert_eq!(value["informalConferenceRep"]["firstName"], "Ada");
        assert_eq!(value["informalConferenceRep"]["lastName"], "Lovelace");
        assert_eq!(value["informalConferenceTime"], "time0800to1200");
    }

    #[test]
    fn v2_draft_is_unchanged() {
        let (_dir, args) = args_for(r#"{"hlrV2":true,"informalConferenceRep":{"firstName":"Ada"}}"#);
        let report = migrate_report(&args).unwrap();
        assert!(!report.migrated);
        assert!(report.draft.hlr_v2);
    }
}
