//! Typed API client.
//!
//! One async method per endpoint. Each builds a [`Request`], sends it
//! through the [`Backend`], normalizes failures into [`ApiError`], and
//! decodes the body with the [`JsonCodec`].

use aura_transport::{Backend, Request, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::ApiError;
use crate::codec::{Codec, JsonCodec};
use crate::detail::error_message;
use crate::types::{
    AccessToken, CheckResponse, FixtureFeed, GenerateRequest, GeneratorMode, Honor, InfoLink,
    LoginResponse, NewPrediction, Player, Prediction, PredictionId, ReconciliationResult,
    TimelineItem, UserProfile,
};
use crate::wire::{
    self, ChatMessage, ChatReply, Credentials, GeneratedBody, ProfilePatch, RefreshBody,
    RegisterBody, Registration,
};

/// Server details that mean "the match has no final score yet".
///
/// The check endpoint reports these as HTTP 400; the client turns them
/// into [`CheckResponse::Pending`] rather than an error.
pub const PENDING_DETAILS: [&str; 2] = ["Match not finished yet.", "Score not available."];

/// Typed client for the Arsenal Aura API.
#[derive(Debug)]
pub struct ApiClient<B> {
    backend: B,
    codec: JsonCodec,
}

impl<B: Backend> ApiClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            codec: JsonCodec,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -- auth ---------------------------------------------------------------

    /// `POST /api/auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = self.encode(&Credentials { email, password })?;
        self.fetch(Request::post("/api/auth/login", body)).await
    }

    /// `POST /api/auth/register`. Returns the new profile only.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        favorite_club: &str,
    ) -> Result<UserProfile, ApiError> {
        let body = self.encode(&Registration {
            email,
            password,
            favorite_club,
        })?;
        let created: RegisterBody = self.fetch(Request::post("/api/auth/register", body)).await?;
        Ok(created.user)
    }

    /// `POST /api/auth/refresh`, authenticated by the ambient refresh
    /// cookie rather than a bearer.
    pub async fn refresh(&self) -> Result<AccessToken, ApiError> {
        let refreshed: RefreshBody = self
            .fetch(Request::post("/api/auth/refresh", b"{}".to_vec()))
            .await?;
        Ok(refreshed.access)
    }

    // -- profile ------------------------------------------------------------

    /// `GET /api/me`.
    pub async fn me(&self, token: &AccessToken) -> Result<UserProfile, ApiError> {
        self.fetch(authed(Request::get("/api/me"), token)).await
    }

    /// `PATCH /api/me` with a new favorite club.
    pub async fn update_profile(
        &self,
        token: &AccessToken,
        favorite_club: &str,
    ) -> Result<UserProfile, ApiError> {
        let body = self.encode(&ProfilePatch { favorite_club })?;
        let request = authed(Request::patch("/api/me", body), token);
        self.fetch(request).await
    }

    // -- predictor ----------------------------------------------------------

    /// `GET /api/fixtures/next`.
    pub async fn next_fixture(&self, token: &AccessToken) -> Result<FixtureFeed, ApiError> {
        let response = self
            .execute(authed(Request::get("/api/fixtures/next"), token))
            .await?;
        Ok(wire::decode_fixture_feed(&self.codec, &response.body)?)
    }

    /// `GET /api/predictions/latest`. `None` when nothing was saved yet.
    pub async fn latest_prediction(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Prediction>, ApiError> {
        let response = self
            .execute(authed(Request::get("/api/predictions/latest"), token))
            .await?;
        Ok(wire::decode_latest(&self.codec, &response.body)?)
    }

    /// `POST /api/predictions`.
    pub async fn create_prediction(
        &self,
        token: &AccessToken,
        prediction: &NewPrediction,
    ) -> Result<Prediction, ApiError> {
        let body = self.encode(prediction)?;
        let request = authed(Request::post("/api/predictions", body), token);
        self.fetch(request).await
    }

    /// `POST /api/predictions/{id}/check`.
    ///
    /// A 400 whose detail is one of [`PENDING_DETAILS`] becomes
    /// [`CheckResponse::Pending`]; every other failure stays an error.
    pub async fn check_prediction(
        &self,
        token: &AccessToken,
        id: PredictionId,
    ) -> Result<CheckResponse, ApiError> {
        let path = format!("/api/predictions/{id}/check");
        match self
            .fetch::<ReconciliationResult>(authed(Request::post(path, b"{}".to_vec()), token))
            .await
        {
            Ok(result) => Ok(CheckResponse::Settled(result)),
            Err(ApiError::Rejected { status: 400, message })
                if PENDING_DETAILS.contains(&message.as_str()) =>
            {
                Ok(CheckResponse::Pending { message })
            }
            Err(e) => Err(e),
        }
    }

    // -- info archive -------------------------------------------------------

    /// `GET /api/info/honors`.
    pub async fn honors(&self, token: &AccessToken) -> Result<Vec<Honor>, ApiError> {
        let request = authed(Request::get("/api/info/honors"), token);
        self.fetch(request).await
    }

    /// `GET /api/info/timeline`.
    pub async fn timeline(&self, token: &AccessToken) -> Result<Vec<TimelineItem>, ApiError> {
        let request = authed(Request::get("/api/info/timeline"), token);
        self.fetch(request).await
    }

    /// `GET /api/info/links`.
    pub async fn info_links(&self, token: &AccessToken) -> Result<Vec<InfoLink>, ApiError> {
        let request = authed(Request::get("/api/info/links"), token);
        self.fetch(request).await
    }

    // -- generator and chat -------------------------------------------------

    /// `GET /api/modes`.
    pub async fn modes(&self, token: &AccessToken) -> Result<Vec<GeneratorMode>, ApiError> {
        self.fetch(authed(Request::get("/api/modes"), token)).await
    }

    /// `GET /api/players`.
    pub async fn players(&self, token: &AccessToken) -> Result<Vec<Player>, ApiError> {
        let request = authed(Request::get("/api/players"), token);
        self.fetch(request).await
    }

    /// `GET /api/generate`. Returns the generated text.
    pub async fn generate(
        &self,
        token: &AccessToken,
        query: &GenerateRequest,
    ) -> Result<String, ApiError> {
        let mut request = Request::get("/api/generate")
            .with_query("mode", query.mode.as_str())
            .with_query("intensity", query.intensity.as_str());
        if let Some(player) = &query.player {
            request = request.with_query("player", player.as_str());
        }
        let generated: GeneratedBody = self.fetch(authed(request, token)).await?;
        Ok(generated.text)
    }

    /// `POST /api/chat`. Returns the reply text.
    pub async fn chat(&self, token: &AccessToken, message: &str) -> Result<String, ApiError> {
        let body = self.encode(&ChatMessage { message })?;
        let reply: ChatReply = self
            .fetch(authed(Request::post("/api/chat", body), token))
            .await?;
        Ok(reply.reply)
    }

    // -- plumbing -----------------------------------------------------------

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ApiError> {
        Ok(self.codec.encode(value)?)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        Ok(self.codec.decode(&response.body)?)
    }

    async fn execute(&self, request: Request) -> Result<Response, ApiError> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.backend.send(request).await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "request did not reach the API");
        })?;

        if response.is_success() {
            tracing::debug!(%method, %path, status = response.status, "request ok");
            return Ok(response);
        }

        let message = error_message(&response.body, response.json);
        tracing::debug!(%method, %path, status = response.status, %message, "request rejected");
        Err(ApiError::Rejected {
            status: response.status,
            message,
        })
    }
}

fn authed(request: Request, token: &AccessToken) -> Request {
    request.with_bearer(token.as_str())
}
