//! Predictor state as the rendering layer sees it.

use aura_protocol::{Fixture, Prediction, ReconciliationResult, Scoreline};

/// Scoreline offered for editing when the user has no saved prediction.
pub const DEFAULT_DRAFT: Scoreline = Scoreline::new(2, 1);

/// What the fixture feed last said.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FixtureSlot {
    #[default]
    NotLoaded,
    Available(Fixture),
    /// The feed is down. The predictor stays usable, just without a
    /// match to predict.
    Unavailable { reason: String },
}

/// Result of the last reconciliation request.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Settled(ReconciliationResult),
    /// Neutral "check back later" state.
    Pending { message: String },
}

impl CheckOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictorState {
    pub fixture: FixtureSlot,
    /// The latest prediction the server has confirmed.
    pub prediction: Option<Prediction>,
    /// Editable scoreline: the saved prediction's, else [`DEFAULT_DRAFT`].
    pub draft: Scoreline,
    pub outcome: Option<CheckOutcome>,
}

impl PredictorState {
    pub fn fixture(&self) -> Option<&Fixture> {
        match &self.fixture {
            FixtureSlot::Available(fixture) => Some(fixture),
            _ => None,
        }
    }

    /// The reason no fixture is shown, if the feed reported one.
    pub fn error(&self) -> Option<&str> {
        match &self.fixture {
            FixtureSlot::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }
}

impl Default for PredictorState {
    fn default() -> Self {
        Self {
            fixture: FixtureSlot::NotLoaded,
            prediction: None,
            draft: DEFAULT_DRAFT,
            outcome: None,
        }
    }
}
