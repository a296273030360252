/// Errors that can occur in the transport layer.
///
/// Each variant means no usable HTTP answer arrived. Status codes the
/// server did send (401, 400, ...) are not transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The base URL or the request path could not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Connecting or sending failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// A response arrived but its body could not be read.
    #[error("response body unreadable: {0}")]
    Body(String),
}
