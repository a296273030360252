//! Codec trait and the JSON implementation the API speaks.
//!
//! The client never calls `serde_json` directly for request and response
//! bodies; it goes through a [`Codec`]. Tests and the error normalizer
//! share the same decoding path as real responses.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes request bodies and decodes response bodies.
///
/// `Send + Sync + 'static` so a codec can live inside an `Arc`-shared
/// client that is driven from any Tokio worker.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value cannot be
    /// represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// do not match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use aura_protocol::{Codec, JsonCodec, UserProfile};
///
/// let codec = JsonCodec;
/// let user: UserProfile = codec
///     .decode(br#"{"id":1,"email":"a@x.com","favorite_club":"Arsenal","banter_mode":false}"#)
///     .unwrap();
/// assert_eq!(user.favorite_club, "Arsenal");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
