//! # External Collaborators
//!
//! The reconciler never owns the draft, the fetch, session storage, the
//! session, or the router. It reaches them through these traits, reads a
//! fresh snapshot on every notification, and writes back only through
//! full-replacement commits, fetch requests, and navigations.
//!
//! All methods are synchronous and non-blocking. `request_issues` starts
//! the fetch and returns; its result is observed through `fetched` on a
//! later notification.

use hlr_core::{BenefitType, FetchedIssues, FormDraft, Location, SubTask};

/// Read/write access to the persisted draft.
pub trait DraftStore {
    /// Snapshot of the current draft.
    fn draft(&self) -> FormDraft;
    /// Replace the draft.
    fn set_draft(&mut self, draft: FormDraft);
}

/// The contestable-issues fetch.
pub trait IssuesFetcher {
    /// Snapshot of the latest fetch state.
    fn fetched(&self) -> FetchedIssues;
    /// Start a fetch for `benefit_type`.
    fn request_issues(&mut self, benefit_type: &BenefitType);
}

/// Session-scoped sub-task storage.
pub trait SubTaskStore {
    /// The stored sub-task, if any.
    fn stored_sub_task(&self) -> Option<SubTask>;
}

/// Authentication status.
pub trait AuthStatus {
    /// Whether the user is signed in.
    fn is_logged_in(&self) -> bool;
}

/// Current location and navigation.
pub trait Navigator {
    /// The current location.
    fn location(&self) -> Location;
    /// Navigate to `path`.
    fn navigate(&mut self, path: &str);
}

/// Everything the reconciler talks to.
pub trait FormHost: DraftStore + IssuesFetcher + SubTaskStore + AuthStatus + Navigator {}

impl<T> FormHost for T where T: DraftStore + IssuesFetcher + SubTaskStore + AuthStatus + Navigator {}
