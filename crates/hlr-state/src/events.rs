//! # Reconciliation Event Log
//!
//! Records every decision the reconciler acts on: benefit type
//! initialization, fetch requests, forced migrations, merges, identity
//! misses, and redirects. Each event is also emitted through `tracing`;
//! the log exists so callers and tests can observe decisions without a
//! subscriber.
//!
//! The log is append-only and bounded. When it exceeds its capacity the
//! oldest 10% of entries are dropped.

use chrono::{DateTime, Utc};
use hlr_core::DraftSessionId;
use serde::{Deserialize, Serialize};

/// Kind of reconciliation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileEventKind {
    /// The draft lacked a benefit type and the resolved one was committed.
    BenefitTypeInitialized,
    /// An issues fetch was requested.
    FetchRequested,
    /// The fetch ended in error; its issues were not merged.
    FetchErrorIgnored,
    /// The legacy v1 shape was force-migrated before a commit.
    ForcedMigrationApplied,
    /// Fetched issues replaced the draft's contested issues.
    ContestedIssuesMerged,
    /// The area of disagreement was re-derived from the current selection.
    AreaOfDisagreementMerged,
    /// A selected issue had no prior area-of-disagreement entry and was
    /// filled with defaults.
    IdentityMiss,
    /// Navigation to the start page was issued.
    RedirectIssued,
}

impl ReconcileEventKind {
    /// Return the string value for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BenefitTypeInitialized => "benefit_type_initialized",
            Self::FetchRequested => "fetch_requested",
            Self::FetchErrorIgnored => "fetch_error_ignored",
            Self::ForcedMigrationApplied => "forced_migration_applied",
            Self::ContestedIssuesMerged => "contested_issues_merged",
            Self::AreaOfDisagreementMerged => "area_of_disagreement_merged",
            Self::IdentityMiss => "identity_miss",
            Self::RedirectIssued => "redirect_issued",
        }
    }
}

impl std::fmt::Display for ReconcileEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileEvent {
    /// What happened.
    pub kind: ReconcileEventKind,
    /// The draft session it happened in.
    pub session: DraftSessionId,
    /// UTC time of recording.
    pub at: DateTime<Utc>,
    /// Optional structured details.
    pub detail: Option<serde_json::Value>,
}

impl ReconcileEvent {
    /// Create an event stamped with the current UTC time.
    pub fn new(
        kind: ReconcileEventKind,
        session: DraftSessionId,
        detail: Option<serde_json::Value>,
    ) -> Self {
        Self {
            kind,
            session,
            at: Utc::now(),
            detail,
        }
    }
}

impl PartialEq for ReconcileEvent {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.session == other.session && self.detail == other.detail
    }
}

/// Bounded, append-only event log.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: Vec<ReconcileEvent>,
    max_entries: usize,
}

impl EventLog {
    /// Create a log holding at most `max_entries` events.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Append an event, trimming the oldest 10% on overflow.
    pub fn append(&mut self, event: ReconcileEvent) {
        self.entries.push(event);
        if self.entries.len() > self.max_entries {
            let trim_count = (self.max_entries / 10).max(1);
            self.entries.drain(..trim_count);
        }
    }

    /// All retained events, oldest first.
    pub fn entries(&self) -> &[ReconcileEvent] {
        &self.entries
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no events are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained events of one kind.
    pub fn of_kind(&self, kind: ReconcileEventKind) -> Vec<&ReconcileEvent> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Number of retained events of one kind.
    pub fn count(&self, kind: ReconcileEventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
