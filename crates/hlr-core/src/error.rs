//! # Error Types
//!
//! The reconciliation engine itself is total: resolving, gating, detecting
//! divergence and merging never fail. Errors only exist at the edges where
//! untyped input enters the system (benefit type strings from configuration
//! or session storage, locations read from outside the form).

use thiserror::Error;

/// Top-level error type for the HLR crates.
#[derive(Error, Debug)]
pub enum HlrError {
    /// A benefit type string was empty or contained whitespace.
    #[error("invalid benefit type {0:?}: must be a non-empty identifier without whitespace")]
    InvalidBenefitType(String),

    /// A location path did not start with `/`.
    #[error("invalid location {0:?}: path must start with '/'")]
    InvalidLocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_benefit_type_message_quotes_input() {
        let err = HlrError::InvalidBenefitType("life insurance".into());
        assert!(err.to_string().contains("\"life insurance\""));
    }

    #[test]
    fn invalid_location_names_the_rule() {
        let err = HlrError::InvalidLocation("review".into());
        assert!(err.to_string().contains("must start with '/'"));
    }
}
