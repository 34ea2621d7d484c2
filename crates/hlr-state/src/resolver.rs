//! Benefit type resolution.
//!
//! The draft is reset after sign-in and when restored from save-in-progress,
//! so the benefit type chosen in the sub-task wizard may only be found in
//! session storage. The draft wins when both are present.

use hlr_core::{BenefitType, FormDraft, SubTask};

/// Resolve the active benefit type: the draft's value, else the stored
/// sub-task's, else none.
pub fn resolve_benefit_type(draft: &FormDraft, sub_task: Option<&SubTask>) -> Option<BenefitType> {
    draft
        .benefit_type
        .clone()
        .or_else(|| sub_task.and_then(|task| task.benefit_type.clone()))
}
