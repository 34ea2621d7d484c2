//! # hlr-core: Foundational Types for the Higher-Level Review Form
//!
//! This crate defines the data the reconciliation engine in `hlr-state`
//! operates on. It depends on nothing internal; every other `hlr-*` crate
//! depends on it.
//!
//! ## Key Design Principles
//!
//! 1. **Identity is semantic, never positional.** Contestable issues,
//!    Veteran-added issues and area-of-disagreement entries are matched
//!    through [`IssueIdentity`], a canonicalizing projection of the
//!    `(name, date)` pair. Array indices carry no meaning across fetches.
//!
//! 2. **Newtypes for domain primitives.** `BenefitType` and
//!    `DraftSessionId` are distinct types; a bare string is never passed
//!    where a benefit type is expected.
//!
//! 3. **Drafts survive round trips.** `FormDraft` keeps every field it does
//!    not model in a flattened map, so a full-replacement commit never drops
//!    data written by other pages of the form.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public data types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` in the camelCase shape of the form data.

pub mod benefit;
pub mod draft;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod issue;
pub mod location;

// Re-export primary types for ergonomic imports.
pub use benefit::{BenefitType, SubTask};
pub use draft::{ConferenceTime, FormDraft, InformalConferenceRep, LegacyConferenceTimes};
pub use error::HlrError;
pub use fetch::{FetchStatus, FetchedIssues};
pub use identity::{DraftSessionId, Identified, IssueIdentity};
pub use issue::{
    AdditionalIssue, ContestedIssue, DisagreementEntry, DisagreementOptions, EntryOrigin, Issue,
};
pub use location::Location;
