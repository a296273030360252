//! Error types for the predictor.

use aura_protocol::ScoreError;
use aura_session::SessionError;

/// Failures of a predictor operation.
///
/// "Feed unavailable" and "result pending" are not here: both are normal
/// states, reported through [`PredictorState`](crate::PredictorState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictorError {
    #[error("not signed in")]
    Unauthenticated,

    /// Saving needs an available fixture.
    #[error("no fixture to predict")]
    NoFixture,

    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    InvalidScore(#[from] ScoreError),

    /// Checking needs a saved prediction.
    #[error("no saved prediction")]
    NoPrediction,

    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl PredictorError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Please log in to continue.".to_string(),
            Self::NoFixture => "No upcoming match to predict yet.".to_string(),
            Self::InvalidScore(_) => "Scores must be whole numbers, 0 or more.".to_string(),
            Self::NoPrediction => "Save a prediction first.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<SessionError> for PredictorError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unauthenticated => Self::Unauthenticated,
            SessionError::Validation(m) => Self::Validation(m),
            SessionError::Network(m) => Self::Network(m),
            SessionError::Unknown(m) => Self::Unknown(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use aura_protocol::Side;

    use super::*;

    #[test]
    fn test_from_session_error_keeps_kind() {
        assert_eq!(
            PredictorError::from(SessionError::Unauthenticated),
            PredictorError::Unauthenticated
        );
        assert_eq!(
            PredictorError::from(SessionError::Validation("Prediction locked.".into())),
            PredictorError::Validation("Prediction locked.".into())
        );
    }

    #[test]
    fn test_invalid_score_from_score_error() {
        let err: PredictorError = ScoreError::Negative {
            side: Side::Home,
            value: -1,
        }
        .into();
        assert!(matches!(err, PredictorError::InvalidScore(_)));
        assert_eq!(err.to_string(), "home score must not be negative (got -1)");
    }
}
