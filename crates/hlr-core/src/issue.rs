//! # Contestable Issues and Area-of-Disagreement Entries
//!
//! Three shapes share the issue identity:
//!
//! - [`Issue`]: a contestable issue as returned by the issues fetch.
//! - [`ContestedIssue`]: an `Issue` recorded in the draft, with the
//!   Veteran's selection flag.
//! - [`AdditionalIssue`]: an issue the Veteran added by hand because the
//!   server did not list it.
//!
//! [`DisagreementEntry`] annotates one selected issue of either origin.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::{Identified, IssueIdentity};

/// A contestable issue descriptor.
///
/// Only the name and decision date are interpreted; every other server
/// field is carried through untouched in `raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue name (`ratingIssueSubjectText`).
    #[serde(rename = "ratingIssueSubjectText", default)]
    pub name: String,
    /// Decision date, normally `YYYY-MM-DD` (`approxDecisionDate`).
    #[serde(rename = "approxDecisionDate", default)]
    pub date: String,
    /// Opaque server fields.
    #[serde(flatten)]
    pub raw: Map<String, Value>,
}

impl Issue {
    /// An issue with no server fields beyond name and date.
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            raw: Map::new(),
        }
    }

    /// Attach an opaque server field.
    pub fn with_raw(mut self, key: impl Into<String>, value: Value) -> Self {
        self.raw.insert(key.into(), value);
        self
    }

    /// Whether the issue can be contested at all. Issues without a name
    /// are dropped when fetched issues are projected into the draft.
    pub fn is_contestable(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The decision date, if it parses as an ISO calendar date.
    pub fn decision_date(&self) -> Option<NaiveDate> {
        parse_decision_date(&self.date)
    }
}

impl Identified for Issue {
    fn identity(&self) -> IssueIdentity {
        IssueIdentity::new(&self.name, &self.date)
    }
}

/// An issue as recorded in the draft's `contestedIssues` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestedIssue {
    /// The issue itself.
    #[serde(flatten)]
    pub issue: Issue,
    /// Whether the Veteran selected this issue for review.
    #[serde(rename = "view:selected", default)]
    pub selected: bool,
}

impl ContestedIssue {
    /// Record an issue, unselected.
    pub fn new(issue: Issue) -> Self {
        Self {
            issue,
            selected: false,
        }
    }

    /// Record an issue as selected.
    pub fn selected(issue: Issue) -> Self {
        Self {
            issue,
            selected: true,
        }
    }
}

impl Identified for ContestedIssue {
    fn identity(&self) -> IssueIdentity {
        self.issue.identity()
    }
}

/// An issue added by the Veteran that the server did not report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalIssue {
    /// Issue name as typed by the Veteran.
    #[serde(default)]
    pub issue: String,
    /// Decision date as entered by the Veteran.
    #[serde(default)]
    pub decision_date: String,
    /// Whether the issue is selected for review.
    #[serde(rename = "view:selected", default)]
    pub selected: bool,
}

impl AdditionalIssue {
    /// A selected Veteran-added issue.
    pub fn selected(issue: impl Into<String>, decision_date: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            decision_date: decision_date.into(),
            selected: true,
        }
    }
}

impl Identified for AdditionalIssue {
    fn identity(&self) -> IssueIdentity {
        IssueIdentity::new(&self.issue, &self.decision_date)
    }
}

/// The aspects of a decision the Veteran disagrees with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisagreementOptions {
    /// Disagrees with the service-connection determination.
    #[serde(default)]
    pub service_connection: bool,
    /// Disagrees with the effective date.
    #[serde(default)]
    pub effective_date: bool,
    /// Disagrees with the evaluation (rating percentage).
    #[serde(default)]
    pub evaluation: bool,
    /// Disagrees with something else, described in `otherEntry`.
    #[serde(default)]
    pub other: bool,
}

impl DisagreementOptions {
    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        !(self.service_connection || self.effective_date || self.evaluation || self.other)
    }
}

/// The issue list an annotated entry was selected from.
///
/// Entries are stored in the shape of the issue they annotate, so the origin
/// decides the wire names of the name and date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntryOrigin {
    /// A server-reported issue (`ratingIssueSubjectText`, `approxDecisionDate`).
    #[default]
    Contested,
    /// A Veteran-added issue (`issue`, `decisionDate`).
    Additional,
}

/// A user-editable annotation over one selected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryWire", into = "EntryWire")]
pub struct DisagreementEntry {
    /// Display name of the annotated issue.
    pub name: String,
    /// Decision date of the annotated issue.
    pub date: String,
    /// Which list the annotated issue came from.
    pub origin: EntryOrigin,
    /// Selected disagreement aspects.
    pub disagreement_options: DisagreementOptions,
    /// Free-text explanation accompanying the `other` option.
    pub other_entry: Option<String>,
    /// Remaining fields of the annotated issue.
    pub extra: Map<String, Value>,
}

impl DisagreementEntry {
    /// An entry over a contested issue with no user selections.
    pub fn blank(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            origin: EntryOrigin::Contested,
            disagreement_options: DisagreementOptions::default(),
            other_entry: None,
            extra: Map::new(),
        }
    }

    /// An entry over a Veteran-added issue with no user selections.
    pub fn blank_additional(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            origin: EntryOrigin::Additional,
            ..Self::blank(name, date)
        }
    }

    /// Whether the Veteran has entered anything on this entry.
    pub fn has_user_input(&self) -> bool {
        !self.disagreement_options.is_empty() || self.other_entry.is_some()
    }
}

impl From<&ContestedIssue> for DisagreementEntry {
    fn from(contested: &ContestedIssue) -> Self {
        Self {
            extra: contested.issue.raw.clone(),
            ..Self::blank(contested.issue.name.clone(), contested.issue.date.clone())
        }
    }
}

impl From<&AdditionalIssue> for DisagreementEntry {
    fn from(added: &AdditionalIssue) -> Self {
        Self::blank_additional(added.issue.clone(), added.decision_date.clone())
    }
}

impl Identified for DisagreementEntry {
    fn identity(&self) -> IssueIdentity {
        IssueIdentity::new(&self.name, &self.date)
    }
}

/// Stored shape of an area-of-disagreement entry.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryWire {
    #[serde(rename = "ratingIssueSubjectText", default, skip_serializing_if = "Option::is_none")]
    rating_issue_subject_text: Option<String>,
    #[serde(rename = "approxDecisionDate", default, skip_serializing_if = "Option::is_none")]
    approx_decision_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decision_date: Option<String>,
    #[serde(default)]
    disagreement_options: DisagreementOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    other_entry: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<EntryWire> for DisagreementEntry {
    fn from(wire: EntryWire) -> Self {
        let contested = wire.rating_issue_subject_text.is_some() || wire.approx_decision_date.is_some();
        let additional = wire.issue.is_some() || wire.decision_date.is_some();
        let origin = if additional && !contested {
            EntryOrigin::Additional
        } else {
            EntryOrigin::Contested
        };
        Self {
            name: wire.rating_issue_subject_text.or(wire.issue).unwrap_or_default(),
            date: wire.approx_decision_date.or(wire.decision_date).unwrap_or_default(),
            origin,
            disagreement_options: wire.disagreement_options,
            other_entry: wire.other_entry,
            extra: wire.extra,
        }
    }
}

impl From<DisagreementEntry> for EntryWire {
    fn from(entry: DisagreementEntry) -> Self {
        let (rating, added) = match entry.origin {
            EntryOrigin::Contested => ((Some(entry.name), Some(entry.date)), (None, None)),
            EntryOrigin::Additional => ((None, None), (Some(entry.name), Some(entry.date))),
        };
        Self {
            rating_issue_subject_text: rating.0,
            approx_decision_date: rating.1,
            issue: added.0,
            decision_date: added.1,
            disagreement_options: entry.disagreement_options,
            other_entry: entry.other_entry,
            extra: entry.extra,
        }
    }
}

fn parse_decision_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
