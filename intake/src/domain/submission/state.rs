//! Lifecycle of a single form submission.

use serde::Serialize;
use thiserror::Error;

/// Where a submission is in its lifecycle.
///
/// `Idle -> Validating -> {Invalid | Valid -> Deriving -> {Completed | Invalid}}`.
/// A uniqueness conflict found while deriving sends the submission to
/// `Invalid`. `Invalid` and `Completed` admit no further transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Invalid,
    Valid,
    Deriving,
    Completed,
}

/// A transition the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("submission cannot move from {from:?} to {to:?}")]
pub struct InvalidTransition {
    /// State the submission was in.
    pub from: SubmissionState,
    /// State that was requested.
    pub to: SubmissionState,
}

impl SubmissionState {
    /// Whether the state ends the submission.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Invalid | Self::Completed)
    }

    /// Whether `next` may follow this state.
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Invalid | Self::Valid)
                | (Self::Valid, Self::Deriving)
                | (Self::Deriving, Self::Completed | Self::Invalid)
        )
    }

    /// Move to `next`, rejecting transitions the lifecycle forbids.
    ///
    /// # Examples
    /// ```
    /// use clinic_intake::domain::SubmissionState;
    ///
    /// let state = SubmissionState::Idle.advance(SubmissionState::Validating).unwrap();
    /// assert!(state.advance(SubmissionState::Completed).is_err());
    /// ```
    pub fn advance(self, next: Self) -> Result<Self, InvalidTransition> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::SubmissionState::{self, *};
    use rstest::rstest;

    #[rstest]
    #[case(Idle, Validating)]
    #[case(Validating, Invalid)]
    #[case(Validating, Valid)]
    #[case(Valid, Deriving)]
    #[case(Deriving, Completed)]
    #[case(Deriving, Invalid)]
    fn allowed_transitions(#[case] from: SubmissionState, #[case] to: SubmissionState) {
        assert_eq!(from.advance(to), Ok(to));
    }

    #[rstest]
    #[case(Idle, Valid)]
    #[case(Idle, Completed)]
    #[case(Validating, Deriving)]
    #[case(Valid, Completed)]
    #[case(Invalid, Validating)]
    #[case(Completed, Idle)]
    #[case(Completed, Validating)]
    fn forbidden_transitions(#[case] from: SubmissionState, #[case] to: SubmissionState) {
        let error = from.advance(to).expect_err("transition must be rejected");
        assert_eq!((error.from, error.to), (from, to));
    }

    #[rstest]
    fn terminal_states_have_no_successor() {
        let all = [Idle, Validating, Invalid, Valid, Deriving, Completed];
        for state in all.into_iter().filter(|state| state.is_terminal()) {
            assert!(all.iter().all(|next| !state.can_advance_to(*next)), "{state:?}");
        }
        assert!(Invalid.is_terminal());
        assert!(Completed.is_terminal());
        assert!(!Deriving.is_terminal());
    }
}
