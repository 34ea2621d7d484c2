//! # Forced Version 2 Migration
//!
//! Upgrades drafts still in the version 1 informal-conference shape.
//!
//! The versioned save-in-progress migrations only run when the stored form
//! version changes, and some v1 drafts slipped past that check. This forcer
//! keys off a semantic marker instead of a version counter: a non-blank
//! `informalConferenceRep.name` exists only in the v1 shape. It is checked
//! on every reconciliation commit.
//!
//! ## Invariant
//!
//! `force_migrate(&force_migrate(d)) == force_migrate(d)`. The migration
//! removes the marker it keys off, so a migrated draft is always returned
//! borrowed on the next pass.

use std::borrow::Cow;

use hlr_core::{ConferenceTime, FormDraft, InformalConferenceRep};

/// Whether the draft still carries the v1 marker.
pub fn needs_forced_migration(draft: &FormDraft) -> bool {
    draft.legacy_rep_name().is_some()
}

/// Normalize a v1 draft into the v2 shape. Drafts without the marker are
/// returned borrowed and untouched.
pub fn force_migrate(draft: &FormDraft) -> Cow<'_, FormDraft> {
    let Some(name) = draft.legacy_rep_name() else {
        return Cow::Borrowed(draft);
    };

    let mut migrated = draft.clone();
    let rep = migrated
        .informal_conference_rep
        .get_or_insert_with(InformalConferenceRep::default);
    let (first, last) = split_full_name(name);
    if rep.first_name.as_deref().map_or(true, str::is_empty) {
        rep.first_name = first;
    }
    if rep.last_name.as_deref().map_or(true, str::is_empty) {
        rep.last_name = last;
    }
    rep.name = None;

    if let Some(times) = migrated.informal_conference_times.take() {
        if migrated.informal_conference_time.is_none() {
            migrated.informal_conference_time = [times.time1, times.time2]
                .iter()
                .flatten()
                .find_map(|slot| ConferenceTime::from_legacy_slot(slot));
        }
    }

    migrated.hlr_v2 = true;
    Cow::Owned(migrated)
}

/// Split a full name: the last word is the last name, the rest the first.
fn split_full_name(full: &str) -> (Option<String>, Option<String>) {
    let words: Vec<&str> = full.split_whitespace().collect();
    match words.as_slice() {
        [] => (None, None),
        [only] => (Some((*only).to_string()), None),
        [rest @ .., last] => (Some(rest.join(" ")), Some((*last).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use hlr_core::LegacyConferenceTimes;

    use super::*;

    fn v1_draft(name: &str) -> FormDraft {
        FormDraft {
            informal_conference_rep: Some(InformalConferenceRep {
                name: Some(name.to_string()),
                phone: Some("8005551212".into()),
                ..InformalConferenceRep::default()
            }),
            informal_conference_times: Some(LegacyConferenceTimes {
                time1: Some("time1230to1400".into()),
                time2: Some("time0800to1000".into()),
            }),
            ..FormDraft::default()
        }
    }

    #[test]
    fn unflagged_draft_is_borrowed() {
        let draft = FormDraft::default();
        assert!(!needs_forced_migration(&draft));
        assert!(matches!(force_migrate(&draft), Cow::Borrowed(_)));
    }

    #[test]
    fn splits_name_and_collapses_times() {
        let migrated = force_migrate(&v1_draft("Jane Q. Doe")).into_owned();
        let rep = migrated.informal_conference_rep.as_ref().unwrap();
        assert_eq!(rep.name, None);
        assert_eq!(rep.first_name.as_deref(), Some("Jane Q."));
        assert_eq!(rep.last_name.as_deref(), Some("Doe"));
        assert_eq!(rep.phone.as_deref(), Some("8005551212"));
        assert_eq!(migrated.informal_conference_times, None);
        assert_eq!(
            migrated.informal_conference_time,
            Some(ConferenceTime::Afternoon)
        );
        assert!(migrated.hlr_v2);
        assert!(!needs_forced_migration(&migrated));
    }

    #[test]
    fn existing_v2_names_are_kept() {
        let mut draft = v1_draft("Jane Doe");
        if let Some(rep) = draft.informal_conference_rep.as_mut() {
            rep.first_name = Some("Janet".into());
        }
        let migrated = force_migrate(&draft).into_owned();
        let rep = migrated.informal_conference_rep.unwrap();
        assert_eq!(rep.first_name.as_deref(), Some("Janet"));
        assert_eq!(rep.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn single_word_name() {
        let migrated = force_migrate(&v1_draft("Cher")).into_owned();
        let rep = migrated.informal_conference_rep.unwrap();
        assert_eq!(rep.first_name.as_deref(), Some("Cher"));
        assert_eq!(rep.last_name, None);
    }

    #[test]
    fn unrecognized_slots_leave_time_unset() {
        let mut draft = v1_draft("Jane Doe");
        draft.informal_conference_times = Some(LegacyConferenceTimes {
            time1: Some("whenever".into()),
            time2: None,
        });
        let migrated = force_migrate(&draft).into_owned();
        assert_eq!(migrated.informal_conference_time, None);
        assert_eq!(migrated.informal_conference_times, None);
    }

    #[test]
    fn migration_is_idempotent() {
        let once = force_migrate(&v1_draft("Jane Doe")).into_owned();
        let twice = force_migrate(&once);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(*twice, once);
    }
}
