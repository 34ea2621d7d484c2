//! # Fetched Contestable Issues
//!
//! Result of the most recent issues fetch for a benefit type. The fetch is
//! owned by an external effect; this crate only describes what it reports.
//!
//! ## States
//!
//! ```text
//! Empty ──▶ InFlight ──▶ Done
//!                  │
//!                  └──▶ Error
//! ```
//!
//! A new fetch may only begin from `Empty`.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Status of the issues fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// No fetch has been started.
    #[default]
    Empty,
    /// A fetch was started and has not completed.
    InFlight,
    /// The fetch completed successfully.
    Done,
    /// The fetch failed.
    Error,
}

impl FetchStatus {
    /// Whether the attempt has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Whether the status can move to `next`.
    pub fn can_transition_to(&self, next: FetchStatus) -> bool {
        matches!(
            (self, next),
            (Self::Empty, Self::InFlight)
                | (Self::InFlight, Self::Done)
                | (Self::InFlight, Self::Error)
        )
    }

    /// Return the string value for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InFlight => "in_flight",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fetched issues state for one benefit type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedIssues {
    /// Fetch status.
    #[serde(default)]
    pub status: FetchStatus,
    /// Issues in server order.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Server-reported count of legacy appeals.
    #[serde(default)]
    pub legacy_count: u32,
}

impl FetchedIssues {
    /// A completed fetch.
    pub fn done(issues: Vec<Issue>, legacy_count: u32) -> Self {
        Self {
            status: FetchStatus::Done,
            issues,
            legacy_count,
        }
    }

    /// A failed fetch.
    pub fn error() -> Self {
        Self {
            status: FetchStatus::Error,
            ..Self::default()
        }
    }
}
