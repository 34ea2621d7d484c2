//! Current route of the form.

use serde::{Deserialize, Serialize};

use crate::error::HlrError;

/// The current location within the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path component, always starting with `/`.
    pub pathname: String,
}

impl Location {
    /// Validate and wrap a path.
    ///
    /// # Errors
    ///
    /// Returns [`HlrError::InvalidLocation`] when the path does not start
    /// with `/`.
    pub fn new(pathname: impl Into<String>) -> Result<Self, HlrError> {
        let pathname = pathname.into();
        if !pathname.starts_with('/') {
            return Err(HlrError::InvalidLocation(pathname));
        }
        Ok(Self { pathname })
    }

    /// Whether the location is already the page at `path`. The form may be
    /// mounted under a prefix, so only the trailing segment is compared.
    pub fn is_at(&self, path: &str) -> bool {
        self.pathname.ends_with(path)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
        }
    }
}
