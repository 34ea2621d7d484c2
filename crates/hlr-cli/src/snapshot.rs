//! # Snapshot Files
//!
//! Reads the JSON documents the subcommands operate on: a form draft, a
//! fetched-issues state, and an optional sub-task. The location comes from
//! the command line and is validated here too.

use std::path::{Path, PathBuf};

use hlr_core::{FetchedIssues, FormDraft, HlrError, Location, SubTask};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to load a snapshot file.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value inside the snapshot failed validation.
    #[error(transparent)]
    Invalid(#[from] HlrError),
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a form draft.
pub fn load_draft(path: &Path) -> Result<FormDraft, SnapshotError> {
    read_json(path)
}

/// Load a fetched-issues state.
pub fn load_fetched(path: &Path) -> Result<FetchedIssues, SnapshotError> {
    read_json(path)
}

/// Load a sub-task, if a path was given.
pub fn load_sub_task(path: Option<&Path>) -> Result<Option<SubTask>, SnapshotError> {
    path.map(read_json).transpose()
}

/// Validate the form location.
pub fn parse_location(pathname: &str) -> Result<Location, SnapshotError> {
    Ok(Location::new(pathname)?)
}
