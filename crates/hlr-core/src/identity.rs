//! # Issue Identity and Session Identifiers
//!
//! An issue is the same issue across fetches when its canonical
//! `(name, date)` projection is the same. The projection lowercases the
//! name and strips every whitespace character from both parts, so
//! `"Left Knee"` and `"LeftKnee"` are the same issue.
//!
//! ## Invariant
//!
//! Dates are otherwise compared as written. A server that changes its date format
//! between fetches produces new identities; those surface as identity misses
//! during the area-of-disagreement merge instead of being silently matched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical identity of an issue or disagreement entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueIdentity {
    name: String,
    date: String,
}

impl IssueIdentity {
    /// Project a `(name, date)` pair into its canonical identity.
    pub fn new(name: &str, date: &str) -> Self {
        Self {
            name: strip_whitespace(name).to_lowercase(),
            date: strip_whitespace(date),
        }
    }

    /// Canonical (lowercased, whitespace-free) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whitespace-free date.
    pub fn date(&self) -> &str {
        &self.date
    }
}

impl std::fmt::Display for IssueIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.date)
    }
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Anything that is identified by an issue `(name, date)` pair.
pub trait Identified {
    /// The canonical identity of this value.
    fn identity(&self) -> IssueIdentity;
}

/// Identifier of one in-progress form session, used to correlate log
/// records and reconciliation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftSessionId(pub Uuid);

impl DraftSessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draft:{}", self.0)
    }
}
