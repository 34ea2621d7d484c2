//! # Benefit Types and Session Sub-Task
//!
//! A Higher-Level Review is filed against exactly one benefit type. The
//! value is either already recorded in the draft or was chosen in the
//! sub-task wizard that precedes the form and left in session storage.

use serde::{Deserialize, Serialize};

use crate::error::HlrError;

/// Identifier of a VA benefit type (`compensation`, `pensionSurvivorsBenefits`, ...).
///
/// Validated at construction: non-empty and free of whitespace. Whether the
/// type is *supported* is decided by the configured allow-list, not here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BenefitType(String);

impl BenefitType {
    /// Disability compensation, the benefit type supported by default.
    pub const COMPENSATION: &'static str = "compensation";

    /// Validate and wrap a benefit type string.
    ///
    /// # Errors
    ///
    /// Returns [`HlrError::InvalidBenefitType`] for empty strings or strings
    /// containing whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, HlrError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(HlrError::InvalidBenefitType(value));
        }
        Ok(Self(value))
    }

    /// The `compensation` benefit type.
    pub fn compensation() -> Self {
        Self(Self::COMPENSATION.to_string())
    }

    /// Access the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BenefitType {
    type Error = HlrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BenefitType> for String {
    fn from(value: BenefitType) -> Self {
        value.0
    }
}

impl std::str::FromStr for BenefitType {
    type Err = HlrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

/// Deserialize an optional benefit type, treating a blank string as absent.
///
/// Stored drafts and sub-tasks carry `""` once the value has been reset.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<BenefitType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => BenefitType::new(value).map(Some).map_err(serde::de::Error::custom),
    }
}

impl std::fmt::Display for BenefitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sub-task record kept in session storage by the pre-form wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    /// Benefit type picked in the wizard, if any.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub benefit_type: Option<BenefitType>,
}

impl SubTask {
    /// A sub-task record carrying the given benefit type.
    pub fn with_benefit_type(benefit_type: BenefitType) -> Self {
        Self {
            benefit_type: Some(benefit_type),
        }
    }
}
