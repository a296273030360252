//! Error types for the session layer.

use aura_protocol::{ApiError, ErrorKind};

/// Failures the session layer surfaces to callers.
///
/// Every variant has a [`user_message`](Self::user_message) suitable for
/// a toast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No access token, or the server rejected it and renewal failed.
    /// Raised without a network call when nobody is signed in.
    #[error("not signed in")]
    Unauthenticated,

    /// The server rejected the input. The message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl SessionError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Please log in to continue.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// `true` when registration failed because the email is taken.
    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::Validation(m) if m.contains("already registered"))
    }
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err.kind() {
            ErrorKind::Unauthenticated => Self::Unauthenticated,
            ErrorKind::Validation => Self::Validation(err.to_string()),
            ErrorKind::Network => Self::Network(err.to_string()),
            ErrorKind::Unknown => Self::Unknown(err.to_string()),
        }
    }
}
