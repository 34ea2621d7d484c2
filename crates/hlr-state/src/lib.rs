//! # hlr-state: Draft Reconciliation for the Higher-Level Review Form
//!
//! Keeps a persisted form draft consistent with the contestable issues
//! fetched for the Veteran, and decides what the form container shows.
//!
//! ## Components
//!
//! - **Resolver** (`resolver.rs`): picks the benefit type from the draft,
//!   falling back to the stored sub-task.
//!
//! - **Fetch gate** (`gate.rs`): a latch that lets exactly one issues fetch
//!   through per session, even when the external status lags.
//!
//! - **Migration** (`migration.rs`): forces the legacy v1 informal
//!   conference shape to v2 before any issues commit.
//!
//! - **Divergence** (`divergence.rs`) and **merge** (`merge.rs`):
//!   identity-keyed comparison and merge of contested issues and the area of
//!   disagreement.
//!
//! - **Render** (`render.rs`): `RedirectToStart`, `Loading`, or `Ready`.
//!
//! - **Reconciler** (`reconciler.rs`): runs the above once per
//!   notification against a [`FormHost`] and records an [`EventLog`].
//!
//! ## Design
//!
//! Every pass reads a fresh [`Snapshot`] and commits at most one full
//! draft replacement. Merges are pure functions over the snapshot; the only
//! state carried between passes is the fetch latch, the redirect latch, and
//! the event log.

pub mod config;
pub mod divergence;
pub mod events;
pub mod gate;
pub mod memory;
pub mod merge;
pub mod migration;
pub mod reconciler;
pub mod render;
pub mod resolver;
pub mod services;

// ─── Reconciler re-exports ──────────────────────────────────────────

pub use reconciler::{Effect, Pass, Reconciler, Snapshot};

// ─── Component re-exports ───────────────────────────────────────────

pub use config::{ConfigError, ReconcilerConfig};
pub use divergence::{detect_divergence, has_diverged, Divergence};
pub use events::{EventLog, ReconcileEvent, ReconcileEventKind};
pub use gate::{FetchGate, GateInputs};
pub use merge::{
    copy_area_of_disagreement_options, merge_area_of_disagreement, merge_contested_issues,
    process_contestable_issues, selected_issues, AreaMerge, ContestedMerge,
};
pub use migration::{force_migrate, needs_forced_migration};
pub use render::{select_render_state, RenderInputs, RenderState};
pub use resolver::resolve_benefit_type;

// ─── Host re-exports ────────────────────────────────────────────────

pub use memory::InMemoryHost;
pub use services::{AuthStatus, DraftStore, FormHost, IssuesFetcher, Navigator, SubTaskStore};
