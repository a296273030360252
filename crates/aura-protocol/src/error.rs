//! Error types for the protocol layer.
//!
//! [`ProtocolError`] covers encoding and decoding, [`ScoreError`] covers
//! local scoreline validation, and [`ApiError`] is what every
//! [`ApiClient`](crate::ApiClient) call returns.

use aura_transport::TransportError;

use crate::types::Side;

/// Errors from turning bodies into bytes and back.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Malformed JSON, missing fields, or wrong types in a response.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Valid JSON whose content contradicts itself, such as a fixture
    /// feed that is neither unavailable nor carrying a fixture.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// A scoreline failed validation before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("{side} score must not be negative (got {value})")]
    Negative { side: Side, value: i64 },

    #[error("{side} score must be a whole number (got {input:?})")]
    NotAnInteger { side: Side, input: String },

    #[error("{side} score is out of range (got {value})")]
    TooLarge { side: Side, value: i64 },
}

/// Coarse classification of an [`ApiError`], used by the layers above to
/// decide between refreshing, showing the message, or a generic notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, expired, or rejected credential (HTTP 401).
    Unauthenticated,
    /// The server rejected the input (any other 4xx).
    Validation,
    /// No answer reached us.
    Network,
    /// Server fault (5xx) or a body we could not make sense of.
    Unknown,
}

/// Failure of one API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is already
    /// normalized for display.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected { status: 401, .. } => ErrorKind::Unauthenticated,
            Self::Rejected { status, .. } if (400..500).contains(status) => ErrorKind::Validation,
            Self::Rejected { .. } => ErrorKind::Unknown,
            Self::Transport(_) => ErrorKind::Network,
            Self::Protocol(_) => ErrorKind::Unknown,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> ApiError {
        ApiError::Rejected {
            status,
            message: "nope".into(),
        }
    }

    #[test]
    fn test_kind_maps_statuses() {
        assert_eq!(rejected(401).kind(), ErrorKind::Unauthenticated);
        assert_eq!(rejected(400).kind(), ErrorKind::Validation);
        assert_eq!(rejected(404).kind(), ErrorKind::Validation);
        assert_eq!(rejected(500).kind(), ErrorKind::Unknown);
        assert_eq!(rejected(502).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_kind_transport_is_network() {
        let err: ApiError = TransportError::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_kind_decode_is_unknown() {
        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        let err: ApiError = ProtocolError::Decode(decode).into();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_rejected_displays_message_only() {
        assert_eq!(rejected(400).to_string(), "nope");
    }

    #[test]
    fn test_score_error_display() {
        let err = ScoreError::Negative {
            side: Side::Away,
            value: -2,
        };
        assert_eq!(err.to_string(), "away score must not be negative (got -2)");
    }
}
