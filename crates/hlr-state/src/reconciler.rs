//! # Draft Reconciler
//!
//! One handler, invoked once per state-change notification (draft changed,
//! fetch result changed, location changed). Each pass works from a fresh
//! [`Snapshot`] and yields the render state plus the effects to apply.
//!
//! ## Pass order
//!
//! ```text
//! resolve benefit type ──▶ render state (redirect at most once)
//!        │
//!        └─ supported ──▶ draft lacks benefit type ──▶ SetDraft (initialize)
//!                         signed out                ──▶ nothing
//!                         fetch owed                ──▶ RequestIssues
//!                         fetch pending             ──▶ nothing
//!                         fetch done + divergence   ──▶ SetDraft (contested issues)
//!                         selection out of sync     ──▶ SetDraft (area of disagreement)
//! ```
//!
//! At most one draft-related effect is produced per pass; the next
//! notification picks up where this one stopped. Issues from a failed
//! fetch are never merged.

use hlr_core::{
    BenefitType, DraftSessionId, FetchStatus, FetchedIssues, FormDraft, Location, SubTask,
};
use serde::Serialize;
use serde_json::json;

use crate::config::ReconcilerConfig;
use crate::divergence::detect_divergence;
use crate::events::{EventLog, ReconcileEvent, ReconcileEventKind};
use crate::gate::{FetchGate, GateInputs};
use crate::merge::{merge_area_of_disagreement, merge_contested_issues};
use crate::render::{select_render_state, RenderInputs, RenderState};
use crate::resolver::resolve_benefit_type;
use crate::services::FormHost;

/// Point-in-time view of everything a pass reads.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// The draft.
    pub draft: FormDraft,
    /// The latest fetch state.
    pub fetched: FetchedIssues,
    /// The stored sub-task.
    pub sub_task: Option<SubTask>,
    /// Whether the user is signed in.
    pub logged_in: bool,
    /// The current location.
    pub location: Location,
}

impl Snapshot {
    /// Read a snapshot from the host.
    pub fn capture<H: FormHost + ?Sized>(host: &H) -> Self {
        Self {
            draft: host.draft(),
            fetched: host.fetched(),
            sub_task: host.stored_sub_task(),
            logged_in: host.is_logged_in(),
            location: host.location(),
        }
    }
}

/// A side effect requested by a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    /// Replace the draft.
    SetDraft(FormDraft),
    /// Start the issues fetch.
    RequestIssues(BenefitType),
    /// Navigate to a path.
    Navigate(String),
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pass {
    /// What to display.
    pub render: RenderState,
    /// Effects to apply, in order.
    pub effects: Vec<Effect>,
}

/// Reconciles one draft session with its issues fetch.
#[derive(Debug)]
pub struct Reconciler {
    session: DraftSessionId,
    config: ReconcilerConfig,
    gate: FetchGate,
    redirected: bool,
    fetch_error_reported: bool,
    events: EventLog,
}

impl Reconciler {
    /// Create a reconciler for a new draft session.
    pub fn new(config: ReconcilerConfig) -> Self {
        let events = EventLog::new(config.event_log_capacity);
        Self {
            session: DraftSessionId::new(),
            config,
            gate: FetchGate::new(),
            redirected: false,
            fetch_error_reported: false,
            events,
        }
    }

    /// The session this reconciler serves.
    pub fn session(&self) -> DraftSessionId {
        self.session
    }

    /// The fetch gate.
    pub fn gate(&self) -> &FetchGate {
        &self.gate
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Handle a notification: snapshot the host, run a pass, apply its
    /// effects, and return the render state.
    pub fn on_notification<H: FormHost + ?Sized>(&mut self, host: &mut H) -> RenderState {
        let snapshot = Snapshot::capture(host);
        let pass = self.evaluate(&snapshot);
        for effect in pass.effects {
            match effect {
                Effect::SetDraft(draft) => host.set_draft(draft),
                Effect::RequestIssues(benefit_type) => host.request_issues(&benefit_type),
                Effect::Navigate(path) => host.navigate(&path),
            }
        }
        pass.render
    }

    /// Run one pass over a snapshot.
    pub fn evaluate(&mut self, snapshot: &Snapshot) -> Pass {
        let resolved = resolve_benefit_type(&snapshot.draft, snapshot.sub_task.as_ref());
        let supported = self.config.is_supported(resolved.as_ref());
        let render = select_render_state(&RenderInputs {
            benefit_type_supported: supported,
            logged_in: snapshot.logged_in,
            status: snapshot.fetched.status,
            location: &snapshot.location,
            start_path: &self.config.start_path,
        });

        let mut effects = Vec::new();
        if render == RenderState::RedirectToStart {
            if !self.redirected {
                self.redirected = true;
                let target = self.config.start_path.clone();
                tracing::info!(
                    from = %snapshot.location.pathname,
                    to = %target,
                    benefit_type = ?resolved,
                    "unsupported benefit type, redirecting to start"
                );
                self.record(
                    ReconcileEventKind::RedirectIssued,
                    Some(json!({ "from": snapshot.location.pathname, "to": target })),
                );
                effects.push(Effect::Navigate(target));
            }
        } else {
            self.redirected = false;
        }

        if let Some(benefit_type) = resolved.filter(|_| supported) {
            effects.extend(self.reconcile_draft(snapshot, benefit_type));
        }

        tracing::debug!(
            session = %self.session,
            render = %render,
            status = %snapshot.fetched.status,
            effects = effects.len(),
            "reconcile pass"
        );
        Pass { render, effects }
    }

    fn reconcile_draft(&mut self, snapshot: &Snapshot, resolved: BenefitType) -> Option<Effect> {
        let draft = &snapshot.draft;
        let fetched = &snapshot.fetched;

        if draft.benefit_type.is_none() {
            tracing::info!(benefit_type = %resolved, "copying benefit type from session storage into draft");
            self.record(
                ReconcileEventKind::BenefitTypeInitialized,
                Some(json!({ "benefit_type": resolved.as_str() })),
            );
            return Some(Effect::SetDraft(FormDraft {
                benefit_type: Some(resolved),
                ..draft.clone()
            }));
        }

        if !snapshot.logged_in {
            return None;
        }

        let gate_inputs = GateInputs {
            benefit_type_supported: true,
            logged_in: true,
            draft,
            status: fetched.status,
        };
        if let Some(benefit_type) = self.gate.owed(&gate_inputs) {
            self.gate.on_fetch_owed();
            tracing::info!(benefit_type = %benefit_type, "requesting contestable issues");
            self.record(
                ReconcileEventKind::FetchRequested,
                Some(json!({ "benefit_type": benefit_type.as_str() })),
            );
            return Some(Effect::RequestIssues(benefit_type.clone()));
        }

        match fetched.status {
            FetchStatus::Empty | FetchStatus::InFlight => return None,
            FetchStatus::Error => {
                if !self.fetch_error_reported {
                    self.fetch_error_reported = true;
                    tracing::warn!("contestable issues fetch failed, keeping draft issues");
                    self.record(ReconcileEventKind::FetchErrorIgnored, None);
                }
            }
            FetchStatus::Done => {
                if let Some(divergence) = detect_divergence(fetched, draft) {
                    let merge = merge_contested_issues(draft, fetched);
                    if merge.migrated {
                        tracing::info!("forcing v2 migration of legacy draft");
                        self.record(ReconcileEventKind::ForcedMigrationApplied, None);
                    }
                    tracing::info!(
                        %divergence,
                        issues = merge.draft.contested_issues.len(),
                        legacy_count = merge.draft.legacy_count,
                        "merging fetched contestable issues"
                    );
                    self.record(
                        ReconcileEventKind::ContestedIssuesMerged,
                        serde_json::to_value(&divergence).ok(),
                    );
                    return Some(Effect::SetDraft(merge.draft));
                }
            }
        }

        let (next, misses) = merge_area_of_disagreement(draft)?;
        for identity in &misses {
            tracing::debug!(%identity, "no prior area of disagreement entry, using defaults");
            self.record(
                ReconcileEventKind::IdentityMiss,
                Some(json!({ "identity": identity.to_string() })),
            );
        }
        tracing::info!(
            entries = next.area_of_disagreement.len(),
            defaulted = misses.len(),
            "rebuilding area of disagreement"
        );
        self.record(
            ReconcileEventKind::AreaOfDisagreementMerged,
            Some(json!({ "entries": next.area_of_disagreement.len(), "defaulted": misses.len() })),
        );
        Some(Effect::SetDraft(next))
    }

    fn record(&mut self, kind: ReconcileEventKind, detail: Option<serde_json::Value>) {
        self.events
            .append(ReconcileEvent::new(kind, self.session, detail));
    }
}
