//! Wire types and typed API client for Arsenal Aura.
//!
//! - **Types** ([`UserProfile`], [`Fixture`], [`Prediction`],
//!   [`ReconciliationResult`], ...) mirror the server's JSON.
//! - **Codec** ([`Codec`], [`JsonCodec`]) turns them into bytes and back.
//! - **Client** ([`ApiClient`]) gives every endpoint a typed async method
//!   over any [`Backend`](aura_transport::Backend).
//! - **Errors** ([`ApiError`], [`ErrorKind`]) normalize failed responses
//!   into one displayable message plus a coarse kind.
//!
//! ```text
//! Transport (bytes) → Protocol (typed calls) → Session / Predictor
//! ```

mod client;
mod clubs;
mod codec;
mod detail;
mod error;
mod types;
mod wire;

pub use client::{ApiClient, PENDING_DETAILS};
pub use clubs::{CLUBS, DEFAULT_CLUB, is_known_club};
pub use codec::{Codec, JsonCodec};
pub use detail::{FALLBACK_MESSAGE, error_message};
pub use error::{ApiError, ErrorKind, ProtocolError, ScoreError};
pub use types::{
    AccessToken, CheckResponse, Fixture, FixtureFeed, GenerateRequest, GeneratorMode, Honor,
    InfoLink, Intensity, LoginResponse, MatchId, NewPrediction, Player, Prediction, PredictionId,
    ReconciliationResult, Scoreline, Severity, Side, TimelineItem, UserId, UserProfile,
};
