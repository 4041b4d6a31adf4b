//! Lifecycle of one submission attempt.

use std::fmt;

/// Where the orchestrator is in the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Resolving,
    Dispatching,
    CompletedSuccess,
    CompletedFailure,
}

impl SubmissionState {
    /// True while an attempt has passed validation and has not concluded.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Resolving | SubmissionState::Dispatching)
    }

    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            SubmissionState::CompletedSuccess | SubmissionState::CompletedFailure
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Resolving => "resolving",
            SubmissionState::Dispatching => "dispatching",
            SubmissionState::CompletedSuccess => "completed-success",
            SubmissionState::CompletedFailure => "completed-failure",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitting_states() {
        assert!(!SubmissionState::Idle.is_submitting());
        assert!(!SubmissionState::Validating.is_submitting());
        assert!(SubmissionState::Resolving.is_submitting());
        assert!(SubmissionState::Dispatching.is_submitting());
        assert!(!SubmissionState::CompletedSuccess.is_submitting());
        assert!(!SubmissionState::CompletedFailure.is_submitting());
    }

    #[test]
    fn test_completed_states() {
        assert!(SubmissionState::CompletedSuccess.is_completed());
        assert!(SubmissionState::CompletedFailure.is_completed());
        assert!(!SubmissionState::Dispatching.is_completed());
    }

    #[test]
    fn test_display() {
        assert_eq!(SubmissionState::default().to_string(), "idle");
        assert_eq!(
            SubmissionState::CompletedFailure.to_string(),
            "completed-failure"
        );
    }
}
