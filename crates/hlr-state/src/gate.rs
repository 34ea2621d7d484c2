//! # Fetch Gate
//!
//! Ensures at most one outstanding issues fetch per draft session.
//!
//! ## Invariant
//!
//! A fetch is owed only while the external status is `Empty` AND the local
//! latch is clear. The latch is set in the same step that issues the
//! request, so a notification that arrives before the external store has
//! left `Empty` cannot trigger a second request. The latch is never cleared
//! for the lifetime of the session: a failed or stalled fetch is not
//! retried by the gate.

use hlr_core::{BenefitType, FetchStatus, FormDraft};

/// Everything the gate needs to decide whether a fetch is owed.
#[derive(Debug, Clone, Copy)]
pub struct GateInputs<'a> {
    /// Whether the resolved benefit type is on the allow-list.
    pub benefit_type_supported: bool,
    /// Whether the user is signed in.
    pub logged_in: bool,
    /// The current draft snapshot.
    pub draft: &'a FormDraft,
    /// The external fetch status.
    pub status: FetchStatus,
}

/// Local in-flight latch guarding the issues fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchGate {
    in_flight: bool,
}

impl FetchGate {
    /// A gate with the latch clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request has been issued in this session.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a fetch is owed. Returns the benefit type to fetch for.
    ///
    /// The draft must already carry its benefit type; while the reconciler
    /// is still copying it in from session storage no fetch is issued.
    pub fn owed<'a>(&self, inputs: &GateInputs<'a>) -> Option<&'a BenefitType> {
        if !inputs.benefit_type_supported || !inputs.logged_in || self.in_flight {
            return None;
        }
        if inputs.status != FetchStatus::Empty {
            return None;
        }
        inputs.draft.benefit_type.as_ref()
    }

    /// Boolean form of [`FetchGate::owed`].
    pub fn should_fetch(&self, inputs: &GateInputs<'_>) -> bool {
        self.owed(inputs).is_some()
    }

    /// Record that the owed fetch is being issued.
    pub fn on_fetch_owed(&mut self) {
        self.in_flight = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(draft: &FormDraft, status: FetchStatus) -> GateInputs<'_> {
        GateInputs {
            benefit_type_supported: true,
            logged_in: true,
            draft,
            status,
        }
    }

    #[test]
    fn owed_when_all_preconditions_hold() {
        let draft = FormDraft::for_benefit_type(BenefitType::compensation());
        let gate = FetchGate::new();
        assert_eq!(
            gate.owed(&inputs(&draft, FetchStatus::Empty)),
            Some(&BenefitType::compensation())
        );
    }

    #[test]
    fn latch_blocks_second_request() {
        let draft = FormDraft::for_benefit_type(BenefitType::compensation());
        let mut gate = FetchGate::new();
        assert!(gate.should_fetch(&inputs(&draft, FetchStatus::Empty)));
        gate.on_fetch_owed();
        assert!(gate.is_in_flight());
        // External status still Empty: the latch alone must hold.
        assert!(!gate.should_fetch(&inputs(&draft, FetchStatus::Empty)));
    }

    #[test]
    fn not_owed_unless_status_empty() {
        let draft = FormDraft::for_benefit_type(BenefitType::compensation());
        let gate = FetchGate::new();
        for status in [FetchStatus::InFlight, FetchStatus::Done, FetchStatus::Error] {
            assert!(!gate.should_fetch(&inputs(&draft, status)), "{status}");
        }
    }

    #[test]
    fn not_owed_while_draft_benefit_type_unset() {
        let draft = FormDraft::default();
        assert!(!FetchGate::new().should_fetch(&inputs(&draft, FetchStatus::Empty)));
    }

    #[test]
    fn not_owed_when_signed_out_or_unsupported() {
        let draft = FormDraft::for_benefit_type(BenefitType::compensation());
        let gate = FetchGate::new();
        let mut signed_out = inputs(&draft, FetchStatus::Empty);
        signed_out.logged_in = false;
        assert!(!gate.should_fetch(&signed_out));

        let mut unsupported = inputs(&draft, FetchStatus::Empty);
        unsupported.benefit_type_supported = false;
        assert!(!gate.should_fetch(&unsupported));
    }
}
