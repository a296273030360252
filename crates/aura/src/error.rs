//! Unified error type for the Aura client core.

use aura_predictor::PredictorError;
use aura_protocol::{ApiError, ProtocolError};
use aura_session::SessionError;
use aura_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// Callers of the `aura` crate handle this one type; `?` converts
/// sub-crate errors through the `#[from]` impls.
#[derive(Debug, thiserror::Error)]
pub enum AuraError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Predictor(#[from] PredictorError),

    /// Bad configuration value (URL, timeout, retry count, log filter).
    #[error("configuration error: {0}")]
    Config(String),
}
