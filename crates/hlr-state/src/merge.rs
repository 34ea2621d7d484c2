//! # Merge Engine
//!
//! Two merges, applied by the reconciler in priority order with at most
//! one per pass:
//!
//! 1. **Contested issues.** When fetched issues diverge from the draft,
//!    the fetched list is projected into the draft (blank names dropped,
//!    newest decision first) and the legacy count copied over. Selection
//!    flags survive for issues whose identity was already recorded. The
//!    draft passes through the forced migration first.
//!
//! 2. **Area of disagreement.** When the current selection no longer lines
//!    up with the stored annotations, the annotations are rebuilt in
//!    selection order. Prior user input is carried forward by identity;
//!    entries without a prior match start blank and are reported as
//!    identity misses.
//!
//! Both merges read their inputs by reference and return a new draft.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use hlr_core::{
    ContestedIssue, DisagreementEntry, FetchedIssues, FormDraft, Identified, Issue, IssueIdentity,
};

use crate::migration::force_migrate;

/// Outcome of the contested-issues merge.
#[derive(Debug, Clone)]
pub struct ContestedMerge {
    /// The draft to commit.
    pub draft: FormDraft,
    /// Whether the forced migration rewrote the draft first.
    pub migrated: bool,
}

/// Replace the draft's contested issues with the fetched ones.
pub fn merge_contested_issues(draft: &FormDraft, fetched: &FetchedIssues) -> ContestedMerge {
    let base = force_migrate(draft);
    let migrated = matches!(base, std::borrow::Cow::Owned(_));
    let mut next = base.into_owned();
    next.contested_issues = process_contestable_issues(&fetched.issues, &draft.contested_issues);
    next.legacy_count = fetched.legacy_count;
    ContestedMerge {
        draft: next,
        migrated,
    }
}

/// Project fetched issues into the draft representation.
///
/// Drops issues without a name, orders by decision date (newest first,
/// unparseable dates last) then by name, and keeps the selection flag of
/// any issue already selected in `existing`.
pub fn process_contestable_issues(fetched: &[Issue], existing: &[ContestedIssue]) -> Vec<ContestedIssue> {
    let selected: HashSet<IssueIdentity> = existing
        .iter()
        .filter(|issue| issue.selected)
        .map(Identified::identity)
        .collect();

    let mut projected: Vec<ContestedIssue> = fetched
        .iter()
        .filter(|issue| issue.is_contestable())
        .map(|issue| ContestedIssue {
            selected: selected.contains(&issue.identity()),
            issue: issue.clone(),
        })
        .collect();

    projected.sort_by(|a, b| compare_newest_first(&a.issue, &b.issue));
    projected
}

fn compare_newest_first(a: &Issue, b: &Issue) -> Ordering {
    let by_date = match (a.decision_date(), b.decision_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// The freshly-selected issues, as blank disagreement entries: selected
/// contested issues first, then selected Veteran-added issues.
pub fn selected_issues(draft: &FormDraft) -> Vec<DisagreementEntry> {
    let contested = draft
        .contested_issues
        .iter()
        .filter(|issue| issue.selected)
        .map(DisagreementEntry::from);
    let additional = draft
        .additional_issues
        .iter()
        .filter(|issue| issue.selected)
        .map(DisagreementEntry::from);
    contested.chain(additional).collect()
}

/// Whether the stored annotations differ from the selection in length or
/// in identity at any index.
pub fn area_of_disagreement_outdated(selected: &[DisagreementEntry], stored: &[DisagreementEntry]) -> bool {
    selected.len() != stored.len()
        || selected
            .iter()
            .zip(stored)
            .any(|(fresh, prior)| fresh.identity() != prior.identity())
}

/// Outcome of the area-of-disagreement merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaMerge {
    /// Rebuilt entries, in selection order.
    pub entries: Vec<DisagreementEntry>,
    /// Identities that had no prior entry and were default-filled.
    pub misses: Vec<IssueIdentity>,
}

/// Rebuild annotations for `selected`, copying user input forward from
/// `prior` by identity.
pub fn copy_area_of_disagreement_options(selected: Vec<DisagreementEntry>, prior: &[DisagreementEntry]) -> AreaMerge {
    let mut by_identity: HashMap<IssueIdentity, &DisagreementEntry> = HashMap::new();
    for entry in prior {
        // First stored entry wins for duplicate identities.
        by_identity.entry(entry.identity()).or_insert(entry);
    }

    let mut misses = Vec::new();
    let entries = selected
        .into_iter()
        .map(|mut fresh| {
            let identity = fresh.identity();
            match by_identity.get(&identity) {
                Some(previous) => {
                    fresh.disagreement_options = previous.disagreement_options.clone();
                    fresh.other_entry = previous.other_entry.clone();
                }
                None => misses.push(identity),
            }
            fresh
        })
        .collect();

    AreaMerge { entries, misses }
}

/// Rebuild the draft's area of disagreement when it no longer matches the
/// selection. Returns `None` when it already does.
pub fn merge_area_of_disagreement(draft: &FormDraft) -> Option<(FormDraft, Vec<IssueIdentity>)> {
    let selected = selected_issues(draft);
    if !area_of_disagreement_outdated(&selected, &draft.area_of_disagreement) {
        return None;
    }
    let merge = copy_area_of_disagreement_options(selected, &draft.area_of_disagreement);
    let next = FormDraft {
        area_of_disagreement: merge.entries,
        ..draft.clone()
    };
    Some((next, merge.misses))
}

#[cfg(test)]
mod tests {
    use hlr_core::{AdditionalIssue, EntryOrigin, InformalConferenceRep};
    use serde_json::json;

    use super::*;

    fn annotated(name: &str, date: &str, note: &str) -> DisagreementEntry {
        let mut entry = DisagreementEntry::blank(name, date);
        entry.disagreement_options.other = true;
        entry.other_entry = Some(note.to_string());
        entry
    }

    #[test]
    fn projection_sorts_newest_first_and_drops_blank_names() {
        let fetched = vec![
            Issue::new("Knee", "2019-05-05"),
            Issue::new("", "2022-01-01"),
            Issue::new("Tinnitus", "2021-03-03"),
            Issue::new("Back", "unknown"),
            Issue::new("ankle", "2021-03-03"),
        ];
        let projected = process_contestable_issues(&fetched, &[]);
        let names: Vec<&str> = projected.iter().map(|i| i.issue.name.as_str()).collect();
        assert_eq!(names, vec!["ankle", "Tinnitus", "Knee", "Back"]);
        assert!(projected.iter().all(|i| !i.selected));
    }

    #[test]
    fn projection_keeps_selections_by_identity() {
        let existing = vec![
            ContestedIssue::selected(Issue::new("Tinnitus", "2021-03-03")),
            ContestedIssue::new(Issue::new("Knee", "2019-05-05")),
        ];
        let fetched = vec![
            Issue::new("TINNITUS", "2021-03-03").with_raw("ratingIssuePercentNumber", json!("10")),
            Issue::new("Knee", "2019-05-05"),
        ];
        let projected = process_contestable_issues(&fetched, &existing);
        assert!(projected[0].selected);
        assert_eq!(projected[0].issue.name, "TINNITUS");
        assert!(!projected[1].selected);
    }

    #[test]
    fn contested_merge_sets_legacy_count_and_migrates() {
        let draft = FormDraft {
            informal_conference_rep: Some(InformalConferenceRep {
                name: Some("Jane Doe".into()),
                ..InformalConferenceRep::default()
            }),
            ..FormDraft::default()
        };
        let fetched = FetchedIssues::done(vec![Issue::new("Knee", "2019-05-05")], 3);
        let merge = merge_contested_issues(&draft, &fetched);
        assert!(merge.migrated);
        assert_eq!(merge.draft.legacy_count, 3);
        assert_eq!(merge.draft.contested_issues.len(), 1);
        assert!(merge.draft.hlr_v2);
        // Inputs are untouched.
        assert_eq!(fetched.issues.len(), 1);
        assert!(draft.legacy_rep_name().is_some());
    }

    #[test]
    fn contested_merge_without_marker_does_not_migrate() {
        let fetched = FetchedIssues::done(vec![Issue::new("Knee", "2019-05-05")], 0);
        let merge = merge_contested_issues(&FormDraft::default(), &fetched);
        assert!(!merge.migrated);
        assert!(!merge.draft.hlr_v2);
    }

    #[test]
    fn selection_lists_contested_then_additional() {
        let draft = FormDraft {
            contested_issues: vec![
                ContestedIssue::new(Issue::new("Knee", "2019-05-05")),
                ContestedIssue::selected(Issue::new("Tinnitus", "2020-01-01")),
            ],
            additional_issues: vec![
                AdditionalIssue::selected("Back Pain", "2021-06-01"),
                AdditionalIssue {
                    selected: false,
                    ..AdditionalIssue::selected("Hip", "2021-07-01")
                },
            ],
            ..FormDraft::default()
        };
        let selected = selected_issues(&draft);
        let names: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Tinnitus", "Back Pain"]);
        assert_eq!(selected[1].origin, EntryOrigin::Additional);
        assert!(selected.iter().all(|e| !e.has_user_input()));
    }

    #[test]
    fn outdated_on_length_or_identity_mismatch() {
        let a = DisagreementEntry::blank("A", "2020-01-01");
        let b = DisagreementEntry::blank("B", "2020-01-02");
        assert!(!area_of_disagreement_outdated(&[a.clone(), b.clone()], &[a.clone(), b.clone()]));
        assert!(area_of_disagreement_outdated(&[a.clone()], &[a.clone(), b.clone()]));
        assert!(area_of_disagreement_outdated(&[b.clone(), a.clone()], &[a, b]));
    }

    #[test]
    fn user_notes_follow_identity() {
        let prior = vec![annotated("Tinnitus", "2020-01-01", "X")];
        let selected = vec![DisagreementEntry::blank("tinnitus", "2020-01-01")];
        let merge = copy_area_of_disagreement_options(selected, &prior);
        assert_eq!(merge.entries[0].other_entry.as_deref(), Some("X"));
        assert!(merge.entries[0].disagreement_options.other);
        assert_eq!(merge.entries[0].name, "tinnitus");
        assert!(merge.misses.is_empty());
    }

    #[test]
    fn unmatched_entries_default_and_are_reported() {
        let prior = vec![annotated("Tinnitus", "2020-01-01", "X")];
        let selected = vec![DisagreementEntry::blank("Tinnitus", "01/01/2020")];
        let merge = copy_area_of_disagreement_options(selected, &prior);
        assert!(!merge.entries[0].has_user_input());
        assert_eq!(merge.misses, vec![IssueIdentity::new("Tinnitus", "01/01/2020")]);
    }

    #[test]
    fn merge_follows_selection_order() {
        let draft = FormDraft {
            contested_issues: vec![
                ContestedIssue::selected(Issue::new("B", "2020-02-02")),
                ContestedIssue::selected(Issue::new("A", "2020-01-01")),
            ],
            area_of_disagreement: vec![
                annotated("A", "2020-01-01", "note a"),
                annotated("B", "2020-02-02", "note b"),
            ],
            ..FormDraft::default()
        };
        let (next, misses) = merge_area_of_disagreement(&draft).unwrap();
        let got: Vec<(&str, Option<&str>)> = next
            .area_of_disagreement
            .iter()
            .map(|e| (e.name.as_str(), e.other_entry.as_deref()))
            .collect();
        assert_eq!(got, vec![("B", Some("note b")), ("A", Some("note a"))]);
        assert!(misses.is_empty());
    }

    #[test]
    fn merge_is_none_when_in_sync() {
        let draft = FormDraft {
            contested_issues: vec![ContestedIssue::selected(Issue::new("A", "2020-01-01"))],
            area_of_disagreement: vec![annotated("A", "2020-01-01", "note")],
            ..FormDraft::default()
        };
        assert!(merge_area_of_disagreement(&draft).is_none());
    }
}
