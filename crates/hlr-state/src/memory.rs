//! In-memory [`FormHost`](crate::services::FormHost) for tests and the CLI.
//!
//! Records every request, commit, and navigation. By default a fetch
//! request moves the status to `InFlight` immediately; a lagging host
//! leaves it at `Empty` to reproduce a store that has not caught up yet.

use hlr_core::{BenefitType, FetchStatus, FetchedIssues, FormDraft, Issue, Location, SubTask};

use crate::services::{AuthStatus, DraftStore, IssuesFetcher, Navigator, SubTaskStore};

/// Host state held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    /// Current draft.
    pub draft: FormDraft,
    /// Current fetch state.
    pub fetched: FetchedIssues,
    /// Stored sub-task.
    pub sub_task: Option<SubTask>,
    /// Whether the user is signed in.
    pub logged_in: bool,
    /// Current location.
    pub location: Location,
    /// Every fetch request, in order.
    pub requests: Vec<BenefitType>,
    /// Every committed draft, in order.
    pub commits: Vec<FormDraft>,
    /// Every navigation target, in order.
    pub navigations: Vec<String>,
    lagging_status: bool,
}

impl InMemoryHost {
    /// A signed-in host at `location` with the given draft.
    pub fn signed_in(draft: FormDraft, location: Location) -> Self {
        Self {
            draft,
            logged_in: true,
            location,
            ..Self::default()
        }
    }

    /// Keep the fetch status at `Empty` after a request.
    pub fn with_lagging_status(mut self) -> Self {
        self.lagging_status = true;
        self
    }

    /// Complete the outstanding fetch.
    pub fn complete_fetch(&mut self, issues: Vec<Issue>, legacy_count: u32) {
        self.fetched = FetchedIssues::done(issues, legacy_count);
    }

    /// Fail the outstanding fetch.
    pub fn fail_fetch(&mut self) {
        self.fetched = FetchedIssues::error();
    }
}

impl DraftStore for InMemoryHost {
    fn draft(&self) -> FormDraft {
        self.draft.clone()
    }

    fn set_draft(&mut self, draft: FormDraft) {
        self.commits.push(draft.clone());
        self.draft = draft;
    }
}

impl IssuesFetcher for InMemoryHost {
    fn fetched(&self) -> FetchedIssues {
        self.fetched.clone()
    }

    fn request_issues(&mut self, benefit_type: &BenefitType) {
        self.requests.push(benefit_type.clone());
        if !self.lagging_status && self.fetched.status.can_transition_to(FetchStatus::InFlight) {
            self.fetched.status = FetchStatus::InFlight;
        }
    }
}

impl SubTaskStore for InMemoryHost {
    fn stored_sub_task(&self) -> Option<SubTask> {
        self.sub_task.clone()
    }
}

impl AuthStatus for InMemoryHost {
    fn is_logged_in(&self) -> bool {
        self.logged_in
    }
}

impl Navigator for InMemoryHost {
    fn location(&self) -> Location {
        self.location.clone()
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
        self.location = Location {
            pathname: path.to_string(),
        };
    }
}
