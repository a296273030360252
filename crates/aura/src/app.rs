//! `AuraApp` builder and composition root.
//!
//! Owns the one session manager for the process and hands out read
//! handles and predictor workflows that share it. Nothing here is a
//! global: tests build as many apps as they like.

use std::sync::Arc;

use aura_predictor::{PredictorConfig, PredictorWorkflow};
use aura_protocol::{
    ApiClient, DEFAULT_CLUB, GenerateRequest, GeneratorMode, Honor, InfoLink, Player,
    TimelineItem, UserProfile,
};
use aura_session::{
    AuthSessionManager, RouteDecision, RouteGuard, Session, SessionConfig, SessionReader,
    with_renewal,
};
use aura_transport::{Backend, HttpBackend};

use crate::{AuraConfig, AuraError};

/// Builder for an [`AuraApp`].
///
/// # Example
///
/// ```rust,no_run
/// use aura::{AuraApp, AuraConfig};
///
/// # fn run() -> Result<(), aura::AuraError> {
/// let app = AuraApp::builder()
///     .config(AuraConfig::default().with_api_base_url("https://aura.example"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AuraAppBuilder {
    config: AuraConfig,
}

impl AuraAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AuraConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds an app that talks HTTP to `config.api_base_url`.
    ///
    /// # Errors
    /// [`AuraError::Config`] for a bad base URL, or a transport error if
    /// the HTTP client cannot be created.
    pub fn build(self) -> Result<AuraApp<HttpBackend>, AuraError> {
        let base_url = self.config.base_url()?;
        let backend = HttpBackend::with_timeout(base_url, self.config.request_timeout)?;
        tracing::info!(api = %self.config.api_base_url, "aura client configured");
        Ok(self.build_with_backend(backend))
    }

    /// Builds an app over any backend (scripted backends in tests).
    pub fn build_with_backend<B: Backend>(self, backend: B) -> AuraApp<B> {
        let api = Arc::new(ApiClient::new(backend));
        let auth = Arc::new(AuthSessionManager::new(
            Arc::clone(&api),
            SessionConfig {
                bootstrap_retry: self.config.bootstrap_retry,
            },
        ));
        AuraApp {
            api,
            auth,
            guard: RouteGuard::new(self.config.routes.clone()),
            config: self.config,
        }
    }
}

/// The client core for one user agent.
pub struct AuraApp<B> {
    api: Arc<ApiClient<B>>,
    auth: Arc<AuthSessionManager<B>>,
    guard: RouteGuard,
    config: AuraConfig,
}

impl AuraApp<HttpBackend> {
    pub fn builder() -> AuraAppBuilder {
        AuraAppBuilder::new()
    }
}

impl<B: Backend> AuraApp<B> {
    pub fn config(&self) -> &AuraConfig {
        &self.config
    }

    /// Restores any existing session. Call once at start-up.
    pub async fn start(&self) -> Session {
        self.auth.bootstrap().await
    }

    /// The session manager, for login, register, logout, and profile
    /// changes.
    pub fn auth(&self) -> &AuthSessionManager<B> {
        &self.auth
    }

    pub fn session(&self) -> SessionReader {
        self.auth.reader()
    }

    /// Where a navigation to `path` should land right now.
    pub fn navigate(&self, path: &str) -> RouteDecision {
        self.guard.decide(&self.auth.session(), path)
    }

    /// A fresh predictor for the signed-in user.
    pub fn predictor(&self) -> PredictorWorkflow<B, Arc<AuthSessionManager<B>>> {
        PredictorWorkflow::new(
            Arc::clone(&self.api),
            Arc::clone(&self.auth),
            PredictorConfig {
                check_retry: self.config.check_retry,
            },
        )
    }

    /// Switches a banter-gated user back to the home club.
    pub async fn leave_banter_gate(&self) -> Result<UserProfile, AuraError> {
        Ok(self.auth.update_favorite_club(DEFAULT_CLUB).await?)
    }

    // -- info archive -------------------------------------------------------

    pub async fn honors(&self) -> Result<Vec<Honor>, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move { api.honors(&token).await }).await?)
    }

    pub async fn timeline(&self) -> Result<Vec<TimelineItem>, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move { api.timeline(&token).await }).await?)
    }

    pub async fn info_links(&self) -> Result<Vec<InfoLink>, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move {
            api.info_links(&token).await
        })
        .await?)
    }

    // -- generator and chat pass-through ------------------------------------

    pub async fn generator_modes(&self) -> Result<Vec<GeneratorMode>, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move { api.modes(&token).await }).await?)
    }

    pub async fn players(&self) -> Result<Vec<Player>, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move { api.players(&token).await }).await?)
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move {
            api.generate(&token, request).await
        })
        .await?)
    }

    pub async fn chat(&self, message: &str) -> Result<String, AuraError> {
        let api = &*self.api;
        Ok(with_renewal(&*self.auth, move |token| async move {
            api.chat(&token, message).await
        })
        .await?)
    }
}
