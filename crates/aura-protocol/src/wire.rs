//! Request and response bodies that never leave this crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;
use crate::codec::Codec;
use crate::types::{AccessToken, FixtureFeed, Prediction, UserProfile};

/// Reason used when the feed reports unavailability without saying why.
pub(crate) const UNAVAILABLE_FALLBACK: &str = "Match data unavailable.";

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub favorite_club: &'a str,
}

/// The server also returns an access token here; it is deliberately
/// ignored so that registering never signs anyone in.
#[derive(Deserialize)]
pub(crate) struct RegisterBody {
    pub user: UserProfile,
}

#[derive(Deserialize)]
pub(crate) struct RefreshBody {
    pub access: AccessToken,
}

#[derive(Serialize)]
pub(crate) struct ProfilePatch<'a> {
    pub favorite_club: &'a str,
}

/// `{"unavailable": true, "detail": ...}` or a fixture record.
///
/// An `unavailable` flag that is not `true` must come with a fixture;
/// otherwise the body is an [`ProtocolError::InvalidMessage`].
pub(crate) fn decode_fixture_feed<C: Codec>(
    codec: &C,
    body: &[u8],
) -> Result<FixtureFeed, ProtocolError> {
    let value: Value = codec.decode(body)?;
    let flag = value.get("unavailable").cloned();

    if flag == Some(Value::Bool(true)) {
        let reason = value
            .get("detail")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNAVAILABLE_FALLBACK);
        return Ok(FixtureFeed::Unavailable {
            reason: reason.to_string(),
        });
    }

    match serde_json::from_value(value) {
        Ok(fixture) => Ok(FixtureFeed::Available(fixture)),
        Err(_) if flag.is_some() => Err(ProtocolError::InvalidMessage(format!(
            "fixture feed sent unavailable={} without a fixture",
            flag.unwrap_or(Value::Null)
        ))),
        Err(e) => Err(ProtocolError::Decode(e)),
    }
}

/// `{}`, `null`, or an empty body all mean "no prediction yet".
pub(crate) fn decode_latest<C: Codec>(
    codec: &C,
    body: &[u8],
) -> Result<Option<Prediction>, ProtocolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match codec.decode::<Value>(body)? {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        value => serde_json::from_value(value)
            .map(Some)
            .map_err(ProtocolError::Decode),
    }
}

#[derive(Deserialize)]
pub(crate) struct GeneratedBody {
    pub text: String,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub message: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ChatReply {
    pub reply: String,
}
