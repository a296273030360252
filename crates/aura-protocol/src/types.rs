//! Domain types shared by the API client, the session layer, and the
//! predictor.
//!
//! Field names follow the server's JSON. Where the server's name is not
//! snake_case (`utcDate`, `homeBadge`, ...) a `#[serde(rename)]` maps it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ScoreError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// Server-assigned prediction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(pub u64);

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a scheduled match, as issued by the fixture feed.
///
/// The feed hands out numeric ids while stored predictions echo them back
/// as strings, so both JSON forms are accepted. Always serialized as a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl<'de> Deserialize<'de> for MatchId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for MatchId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short-lived bearer credential.
///
/// Opaque: nothing in the client inspects its contents. `Debug` never
/// prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The signed-in user's profile.
///
/// `banter_mode` is computed by the server from the favorite club. The
/// client treats it as an opaque flag and never derives it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub favorite_club: String,
    pub banter_mode: bool,
}

/// Body of a successful `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: AccessToken,
    pub user: UserProfile,
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// The next scheduled Arsenal match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub match_id: MatchId,
    pub opponent: String,
    pub arsenal_is_home: bool,
    #[serde(rename = "utcDate")]
    pub kickoff: DateTime<Utc>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(rename = "homeTeam", default)]
    pub home_team: Option<String>,
    #[serde(rename = "awayTeam", default)]
    pub away_team: Option<String>,
    #[serde(rename = "homeBadge", default)]
    pub home_badge: Option<String>,
    #[serde(rename = "awayBadge", default)]
    pub away_badge: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// The feed served a cached copy because the upstream schedule was
    /// unreachable.
    #[serde(default)]
    pub stale: bool,
}

impl Fixture {
    /// Badge URL for Arsenal's side of the fixture.
    pub fn arsenal_badge(&self) -> Option<&str> {
        if self.arsenal_is_home {
            self.home_badge.as_deref()
        } else {
            self.away_badge.as_deref()
        }
    }

    /// Badge URL for the opponent's side of the fixture.
    pub fn opponent_badge(&self) -> Option<&str> {
        if self.arsenal_is_home {
            self.away_badge.as_deref()
        } else {
            self.home_badge.as_deref()
        }
    }
}

/// What `GET /api/fixtures/next` produced.
///
/// An unavailable feed is a degraded-but-normal answer (HTTP 200), not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureFeed {
    Available(Fixture),
    Unavailable { reason: String },
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// Which side of a scoreline a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Away => write!(f, "away"),
        }
    }
}

/// A validated, non-negative scoreline.
///
/// `home` is Arsenal's goals and `away` the opponent's, regardless of
/// venue. Holding a `Scoreline` proves both values are non-negative
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Validates signed input.
    ///
    /// # Errors
    /// [`ScoreError::Negative`] for values below zero,
    /// [`ScoreError::TooLarge`] for values that do not fit a `u32`.
    pub fn from_signed(home: i64, away: i64) -> Result<Self, ScoreError> {
        Ok(Self {
            home: check(Side::Home, home)?,
            away: check(Side::Away, away)?,
        })
    }

    /// Validates raw text input such as form fields.
    ///
    /// # Errors
    /// [`ScoreError::NotAnInteger`] for anything that is not a whole
    /// number (`"2.5"`, `"two"`, `""`), otherwise as
    /// [`from_signed`](Self::from_signed).
    pub fn parse(home: &str, away: &str) -> Result<Self, ScoreError> {
        let parse = |side: Side, input: &str| {
            input
                .trim()
                .parse::<i64>()
                .map_err(|_| ScoreError::NotAnInteger {
                    side,
                    input: input.to_string(),
                })
        };
        Self::from_signed(parse(Side::Home, home)?, parse(Side::Away, away)?)
    }
}

fn check(side: Side, value: i64) -> Result<u32, ScoreError> {
    if value < 0 {
        return Err(ScoreError::Negative { side, value });
    }
    u32::try_from(value).map_err(|_| ScoreError::TooLarge { side, value })
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// A prediction as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    pub match_id: MatchId,
    pub opponent: String,
    pub arsenal_is_home: bool,
    pub kickoff: DateTime<Utc>,
    pub predicted_home: u32,
    pub predicted_away: u32,
    /// Set by the server once kickoff has passed; locked predictions can
    /// no longer be edited.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_home: Option<u32>,
    #[serde(default)]
    pub actual_away: Option<u32>,
    #[serde(default)]
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn scoreline(&self) -> Scoreline {
        Scoreline::new(self.predicted_home, self.predicted_away)
    }
}

/// Body of `POST /api/predictions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrediction {
    pub match_id: MatchId,
    pub opponent: String,
    pub arsenal_is_home: bool,
    pub kickoff: DateTime<Utc>,
    pub predicted_home: u32,
    pub predicted_away: u32,
}

impl NewPrediction {
    /// Ties a scoreline to the fixture it predicts.
    pub fn for_fixture(fixture: &Fixture, score: Scoreline) -> Self {
        Self {
            match_id: fixture.match_id.clone(),
            opponent: fixture.opponent.clone(),
            arsenal_is_home: fixture.arsenal_is_home,
            kickoff: fixture.kickoff,
            predicted_home: score.home,
            predicted_away: score.away,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// How close a prediction came, as graded by the server.
///
/// Carried on the wire as a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Exact scoreline.
    #[serde(rename = "green")]
    Exact,
    /// Right outcome, wrong scoreline.
    #[serde(rename = "yellow")]
    Close,
    #[serde(rename = "red")]
    Miss,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Self::Exact => "green",
            Self::Close => "yellow",
            Self::Miss => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Close => write!(f, "close"),
            Self::Miss => write!(f, "miss"),
        }
    }
}

/// A scored prediction, produced once the real result is known.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReconciliationResult {
    /// The server's copy of the prediction, with actual score and points.
    pub prediction: Prediction,
    pub points: i32,
    #[serde(rename = "result_color")]
    pub severity: Severity,
    pub message: String,
}

impl ReconciliationResult {
    pub fn prediction_id(&self) -> PredictionId {
        self.prediction.id
    }
}

/// Outcome of `POST /api/predictions/{id}/check`.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResponse {
    /// The match is over and the prediction was scored.
    Settled(ReconciliationResult),
    /// The match has not finished (or has no final score yet).
    Pending { message: String },
}

// ---------------------------------------------------------------------------
// Info archive
// ---------------------------------------------------------------------------

/// One entry of `GET /api/info/honors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Honor {
    pub id: u64,
    pub title: String,
    /// Display text, e.g. "14" or "13 (record)".
    pub count: String,
    #[serde(default)]
    pub subtitle: String,
}

/// One entry of `GET /api/info/timeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: u64,
    pub title: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of `GET /api/info/links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoLink {
    pub id: u64,
    pub title: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Generator and chat
// ---------------------------------------------------------------------------

/// One entry of `GET /api/modes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorMode {
    pub id: String,
    pub label: String,
}

/// One entry of `GET /api/players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Tone of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Query of `GET /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub mode: String,
    pub intensity: Intensity,
    pub player: Option<String>,
}
