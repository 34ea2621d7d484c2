//! # Divergence Detection
//!
//! Decides whether a completed fetch differs meaningfully from what the
//! draft already records.
//!
//! Issues are compared as identity sets, not by value. The server re-sends
//! issues with refined metadata (percentages, descriptions, decision text)
//! and that churn must not force a contested-issues overwrite. Order is
//! ignored too. Issues that cannot be contested (blank name) are left out
//! of the fetched set because the projection into the draft drops them;
//! counting them would report divergence on every pass.

use std::collections::BTreeSet;

use hlr_core::{FetchedIssues, FormDraft, Identified, IssueIdentity};
use serde::Serialize;

/// Why fetched issues diverge from the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Divergence {
    /// The identity sets differ.
    IssueSetChanged {
        /// Identities fetched but not in the draft.
        added: Vec<IssueIdentity>,
        /// Identities in the draft but no longer fetched.
        removed: Vec<IssueIdentity>,
    },
    /// The legacy appeal counts differ.
    LegacyCountChanged {
        /// Count recorded in the draft.
        draft: u32,
        /// Count reported by the fetch.
        fetched: u32,
    },
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssueSetChanged { added, removed } => write!(
                f,
                "issue set changed ({} added, {} removed)",
                added.len(),
                removed.len()
            ),
            Self::LegacyCountChanged { draft, fetched } => {
                write!(f, "legacy count changed ({draft} -> {fetched})")
            }
        }
    }
}

/// Report the first divergence found, issue set first.
pub fn detect_divergence(fetched: &FetchedIssues, draft: &FormDraft) -> Option<Divergence> {
    let fetched_ids: BTreeSet<IssueIdentity> = fetched
        .issues
        .iter()
        .filter(|issue| issue.is_contestable())
        .map(Identified::identity)
        .collect();
    let draft_ids: BTreeSet<IssueIdentity> = draft
        .contested_issues
        .iter()
        .map(Identified::identity)
        .collect();

    if fetched_ids != draft_ids {
        return Some(Divergence::IssueSetChanged {
            added: fetched_ids.difference(&draft_ids).cloned().collect(),
            removed: draft_ids.difference(&fetched_ids).cloned().collect(),
        });
    }
    if fetched.legacy_count != draft.legacy_count {
        return Some(Divergence::LegacyCountChanged {
            draft: draft.legacy_count,
            fetched: fetched.legacy_count,
        });
    }
    None
}

/// Whether fetched issues diverge from the draft.
pub fn has_diverged(fetched: &FetchedIssues, draft: &FormDraft) -> bool {
    detect_divergence(fetched, draft).is_some()
}


#[cfg(test)]
mod proptests {
    use hlr_core::{ContestedIssue, Issue};
    use proptest::prelude::*;

    use super::*;

    fn issues() -> impl Strategy<Value = Vec<Issue>> {
        prop::collection::vec(
            ("[A-Za-z]{1,10}", "20[0-2][0-9]-0[1-9]-1[0-9]")
                .prop_map(|(name, date)| Issue::new(name, date)),
            0..8,
        )
    }

    proptest! {
        /// A draft recording exactly the fetched issues, in any order, is in sync.
        #[test]
        fn draft_built_from_fetch_is_in_sync(list in issues(), legacy in 0u32..5, seed in any::<u64>()) {
            let mut recorded: Vec<ContestedIssue> =
                list.iter().cloned().map(ContestedIssue::new).collect();
            if !recorded.is_empty() {
                let len = recorded.len();
                recorded.rotate_left((seed as usize) % len);
            }
            let draft = FormDraft {
                contested_issues: recorded,
                legacy_count: legacy,
                ..FormDraft::default()
            };
            let fetched = FetchedIssues::done(list, legacy);
            prop_assert!(!has_diverged(&fetched, &draft));
        }
    }
}
