//! # Form Draft
//!
//! The persisted, in-progress Higher-Level Review submission. The draft is
//! owned by an external save-in-progress store; the reconciliation engine
//! only reads snapshots of it and commits full replacements.
//!
//! Two shapes of the informal-conference section exist. Version 1 drafts
//! carry a single representative `name` and two preferred time slots
//! (`informalConferenceTimes`); version 2 drafts split the name into
//! `firstName`/`lastName` and record one `informalConferenceTime`. Both
//! deserialize into the same [`FormDraft`] so the forced migration in
//! `hlr-state` can rewrite one into the other.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::benefit::BenefitType;
use crate::issue::{AdditionalIssue, ContestedIssue, DisagreementEntry};

/// The authoritative, externally persisted form state for one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    /// Benefit type the review is filed against. A blank value reads as unset.
    #[serde(
        default,
        deserialize_with = "crate::benefit::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub benefit_type: Option<BenefitType>,
    /// Issues reported by the server, with the Veteran's selections.
    #[serde(default)]
    pub contested_issues: Vec<ContestedIssue>,
    /// Issues added by the Veteran.
    #[serde(default)]
    pub additional_issues: Vec<AdditionalIssue>,
    /// Annotations over the selected issues, in selection order.
    #[serde(default)]
    pub area_of_disagreement: Vec<DisagreementEntry>,
    /// Server-reported count of legacy appeals.
    #[serde(default)]
    pub legacy_count: u32,
    /// Informal conference representative, in either shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informal_conference_rep: Option<InformalConferenceRep>,
    /// Version 1 preferred conference slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informal_conference_times: Option<LegacyConferenceTimes>,
    /// Version 2 preferred conference window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informal_conference_time: Option<ConferenceTime>,
    /// Set once the draft is in the version 2 shape.
    #[serde(rename = "hlrV2", default, skip_serializing_if = "std::ops::Not::not")]
    pub hlr_v2: bool,
    /// Fields owned by other parts of the form.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormDraft {
    /// An empty draft for the given benefit type.
    pub fn for_benefit_type(benefit_type: BenefitType) -> Self {
        Self {
            benefit_type: Some(benefit_type),
            ..Self::default()
        }
    }

    /// The legacy representative name, when the draft still has one.
    ///
    /// Empty names count as absent.
    pub fn legacy_rep_name(&self) -> Option<&str> {
        self.informal_conference_rep
            .as_ref()
            .and_then(|rep| rep.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// The informal conference representative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformalConferenceRep {
    /// Version 1 full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version 2 first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Version 2 last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Phone extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Version 1 preferred time slots, each one of four legacy windows
/// (`time0800to1000`, `time1000to1230`, `time1230to1400`, `time1400to1630`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyConferenceTimes {
    /// First choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time1: Option<String>,
    /// Second choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time2: Option<String>,
}

/// Version 2 conference window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConferenceTime {
    /// 8:00 a.m. to noon Eastern.
    #[serde(rename = "time0800to1200")]
    Morning,
    /// Noon to 4:30 p.m. Eastern.
    #[serde(rename = "time1200to1630")]
    Afternoon,
}

impl ConferenceTime {
    /// Map a version 1 slot onto the version 2 window that contains its start.
    pub fn from_legacy_slot(slot: &str) -> Option<Self> {
        match slot.trim() {
            "time0800to1000" | "time1000to1230" => Some(Self::Morning),
            "time1230to1400" | "time1400to1630" => Some(Self::Afternoon),
            _ => None,
        }
    }
}
