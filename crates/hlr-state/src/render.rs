//! Render-state selection.
//!
//! A stateless projection recomputed from the current inputs on every
//! notification. A failed fetch leaves `Loading` the same way a completed
//! one does, so the form never spins forever on an error.

use hlr_core::{FetchStatus, Location};
use serde::{Deserialize, Serialize};

/// What the form container should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    /// Unsupported or unresolved benefit type: go back to the start page.
    RedirectToStart,
    /// Waiting for the issues fetch.
    Loading,
    /// Render the wrapped form content.
    Ready,
}

impl RenderState {
    /// Message shown while in this state, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToStart => Some("Please wait while we restart the application for you."),
            Self::Loading => Some("Loading your previous decisions..."),
            Self::Ready => None,
        }
    }
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RedirectToStart => "REDIRECT_TO_START",
            Self::Loading => "LOADING",
            Self::Ready => "READY",
        })
    }
}

/// Inputs to [`select_render_state`].
#[derive(Debug, Clone, Copy)]
pub struct RenderInputs<'a> {
    /// Whether the resolved benefit type is on the allow-list.
    pub benefit_type_supported: bool,
    /// Whether the user is signed in.
    pub logged_in: bool,
    /// The external fetch status.
    pub status: FetchStatus,
    /// The current location.
    pub location: &'a Location,
    /// Path of the start page.
    pub start_path: &'a str,
}

/// Classify the current inputs.
pub fn select_render_state(inputs: &RenderInputs<'_>) -> RenderState {
    if !inputs.benefit_type_supported && !inputs.location.is_at(inputs.start_path) {
        return RenderState::RedirectToStart;
    }
    let awaiting_fetch = matches!(inputs.status, FetchStatus::Empty | FetchStatus::InFlight);
    if inputs.logged_in && inputs.benefit_type_supported && awaiting_fetch {
        return RenderState::Loading;
    }
    RenderState::Ready
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(location: &Location, supported: bool, logged_in: bool, status: FetchStatus) -> RenderInputs<'_> {
        RenderInputs {
            benefit_type_supported: supported,
            logged_in,
            status,
            location,
            start_path: "/start",
        }
    }

    #[test]
    fn unsupported_off_start_redirects() {
        let review = Location::new("/review").unwrap();
        assert_eq!(
            select_render_state(&inputs(&review, false, true, FetchStatus::Done)),
            RenderState::RedirectToStart
        );
    }

    #[test]
    fn unsupported_on_start_is_ready() {
        let start = Location::new("/start").unwrap();
        assert_eq!(
            select_render_state(&inputs(&start, false, true, FetchStatus::Empty)),
            RenderState::Ready
        );
    }

    #[test]
    fn loading_while_fetch_pending() {
        let review = Location::new("/review").unwrap();
        for status in [FetchStatus::Empty, FetchStatus::InFlight] {
            assert_eq!(
                select_render_state(&inputs(&review, true, true, status)),
                RenderState::Loading
            );
        }
    }

    #[test]
    fn error_and_done_are_ready() {
        let review = Location::new("/review").unwrap();
        for status in [FetchStatus::Done, FetchStatus::Error] {
            assert_eq!(
                select_render_state(&inputs(&review, true, true, status)),
                RenderState::Ready
            );
        }
    }

    #[test]
    fn signed_out_is_ready() {
        let review = Location::new("/review").unwrap();
        assert_eq!(
            select_render_state(&inputs(&review, true, false, FetchStatus::Empty)),
            RenderState::Ready
        );
    }

    #[test]
    fn messages() {
        assert_eq!(RenderState::Ready.message(), None);
        assert_eq!(
            RenderState::Loading.message(),
            Some("Loading your previous decisions...")
        );
        assert_eq!(RenderState::RedirectToStart.to_string(), "REDIRECT_TO_START");
    }
}
