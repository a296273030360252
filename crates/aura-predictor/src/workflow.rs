//! The predictor state machine.

use std::sync::Arc;
use std::time::Duration;

use aura_protocol::{ApiClient, CheckResponse, FixtureFeed, NewPrediction, Scoreline};
use aura_session::{CredentialSource, SessionError, with_renewal};
use aura_transport::{Backend, RetryPolicy};

use crate::{CheckOutcome, FixtureSlot, PredictorError, PredictorState};

/// Tunables for [`PredictorWorkflow`].
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Retry policy for `check_result`. Only network failures retry.
    pub check_retry: RetryPolicy,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            check_retry: RetryPolicy {
                max_attempts: 2,
                backoff: Duration::from_millis(500),
            },
        }
    }
}

/// One user's predictor: the next fixture, their latest prediction, and
/// the last reconciliation outcome.
///
/// Operations take `&mut self`; the workflow is the only owner of its
/// state and the rendering layer reads it through
/// [`state`](Self::state). Failed operations leave the state as it was.
pub struct PredictorWorkflow<B, S> {
    api: Arc<ApiClient<B>>,
    credentials: S,
    config: PredictorConfig,
    state: PredictorState,
}

impl<B: Backend, S: CredentialSource> PredictorWorkflow<B, S> {
    pub fn new(api: Arc<ApiClient<B>>, credentials: S, config: PredictorConfig) -> Self {
        Self {
            api,
            credentials,
            config,
            state: PredictorState::default(),
        }
    }

    pub fn state(&self) -> &PredictorState {
        &self.state
    }

    /// Fetches the next fixture and the latest saved prediction
    /// concurrently.
    ///
    /// An unavailable feed is not an error: the state records
    /// [`FixtureSlot::Unavailable`] with the server's reason. A saved
    /// prediction becomes the draft.
    pub async fn load_context(&mut self) -> Result<&PredictorState, PredictorError> {
        let api = &*self.api;
        let credentials = &self.credentials;

        let (feed, latest) = tokio::join!(
            with_renewal(credentials, move |token| async move {
                api.next_fixture(&token).await
            }),
            with_renewal(credentials, move |token| async move {
                api.latest_prediction(&token).await
            }),
        );
        let feed = feed.inspect_err(|e| tracing::warn!(error = %e, "fixture load failed"))?;
        let latest =
            latest.inspect_err(|e| tracing::warn!(error = %e, "latest prediction load failed"))?;

        self.state.fixture = match feed {
            FixtureFeed::Available(fixture) => {
                tracing::info!(
                    match_id = %fixture.match_id,
                    opponent = %fixture.opponent,
                    stale = fixture.stale,
                    "fixture loaded"
                );
                FixtureSlot::Available(fixture)
            }
            FixtureFeed::Unavailable { reason } => {
                tracing::info!(%reason, "fixture feed unavailable");
                FixtureSlot::Unavailable { reason }
            }
        };
        if let Some(prediction) = &latest {
            self.state.draft = prediction.scoreline();
        }
        self.state.prediction = latest;
        Ok(&self.state)
    }

    /// Saves a prediction for the loaded fixture.
    ///
    /// Scores are validated before anything is sent. On success the saved
    /// prediction replaces the tracked one and any previous outcome is
    /// cleared.
    pub async fn save_prediction(
        &mut self,
        home: i64,
        away: i64,
    ) -> Result<&PredictorState, PredictorError> {
        let score = Scoreline::from_signed(home, away)?;
        self.save(score).await
    }

    /// As [`save_prediction`](Self::save_prediction), for raw form input.
    pub async fn save_prediction_text(
        &mut self,
        home: &str,
        away: &str,
    ) -> Result<&PredictorState, PredictorError> {
        let score = Scoreline::parse(home, away)?;
        self.save(score).await
    }

    async fn save(&mut self, score: Scoreline) -> Result<&PredictorState, PredictorError> {
        let fixture = self.state.fixture().ok_or(PredictorError::NoFixture)?;
        let body = NewPrediction::for_fixture(fixture, score);

        let api = &*self.api;
        let body = &body;
        let saved = with_renewal(&self.credentials, move |token| async move {
            api.create_prediction(&token, body).await
        })
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "prediction save failed"))?;

        tracing::info!(
            prediction_id = %saved.id,
            match_id = %saved.match_id,
            score = %saved.scoreline(),
            "prediction saved"
        );
        self.state.draft = saved.scoreline();
        self.state.prediction = Some(saved);
        self.state.outcome = None;
        Ok(&self.state)
    }

    /// Asks the server to score the tracked prediction.
    ///
    /// Before the match settles this yields [`CheckOutcome::Pending`] every
    /// time, changing nothing else. Once settled, the tracked prediction
    /// is replaced by the server's scored copy.
    pub async fn check_result(&mut self) -> Result<&CheckOutcome, PredictorError> {
        let id = self
            .state
            .prediction
            .as_ref()
            .map(|p| p.id)
            .ok_or(PredictorError::NoPrediction)?;

        let api = &*self.api;
        let credentials = &self.credentials;
        let response = self
            .config
            .check_retry
            .run(
                || {
                    with_renewal(credentials, move |token| async move {
                        api.check_prediction(&token, id).await
                    })
                },
                |e: &SessionError| matches!(e, SessionError::Network(_)),
            )
            .await
            .inspect_err(|e| tracing::warn!(prediction_id = %id, error = %e, "check failed"))?;

        let outcome = match response {
            CheckResponse::Settled(result) => {
                tracing::info!(
                    prediction_id = %id,
                    points = result.points,
                    severity = %result.severity,
                    "prediction settled"
                );
                self.state.prediction = Some(result.prediction.clone());
                CheckOutcome::Settled(result)
            }
            CheckResponse::Pending { message } => {
                tracing::debug!(prediction_id = %id, %message, "result pending");
                CheckOutcome::Pending { message }
            }
        };
        Ok(self.state.outcome.insert(outcome))
    }
}
