//! The auth session manager: the only writer of session state.
//!
//! Every operation ends in exactly one of two places: a success value, or
//! a [`SessionError`] the caller can render. Nothing here panics and
//! nothing leaves the store half-written.
//!
//! # Concurrency note
//!
//! Operations are not serialized against each other. Racing `login`
//! against `logout`, or two `update_favorite_club` calls, is the
//! caller's problem; the store only guarantees that each individual write
//! is atomic and that readers never see a profile without a token.

use std::sync::Arc;

use aura_protocol::{AccessToken, ApiClient, ApiError, ErrorKind, UserProfile};
use aura_transport::Backend;

use crate::auth::with_renewal;
use crate::{CredentialSource, Session, SessionConfig, SessionError, SessionReader, SessionStore};

/// Orchestrates login, registration, silent refresh, logout, and profile
/// changes.
///
/// ```text
/// bootstrap() ──→ [SignedIn] ──→ logout() ──→ [SignedOut] ──→ login() ──→ [SignedIn]
///      │                                           ↑
///      └──────────(refresh rejected)───────────────┘
/// ```
pub struct AuthSessionManager<B> {
    api: Arc<ApiClient<B>>,
    store: SessionStore,
    config: SessionConfig,
}

impl<B: Backend> AuthSessionManager<B> {
    /// Creates a manager in the [`Session::Loading`] state. Call
    /// [`bootstrap`](Self::bootstrap) once at start-up.
    pub fn new(api: Arc<ApiClient<B>>, config: SessionConfig) -> Self {
        Self {
            api,
            store: SessionStore::new(),
            config,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient<B>> {
        &self.api
    }

    /// A read-only handle for the route guard, the predictor, or the UI.
    pub fn reader(&self) -> SessionReader {
        self.store.reader()
    }

    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    /// Silently restores a session from the ambient refresh cookie.
    ///
    /// Refreshes the access token, then loads the profile. Network
    /// failures are retried per [`SessionConfig::bootstrap_retry`]; any
    /// other failure is final. Whatever happens, exactly one write leaves
    /// the store out of [`Session::Loading`], and the resulting session
    /// is returned. Failure is an expected outcome here (first visit, or
    /// an expired cookie), so it is logged, never returned.
    pub async fn bootstrap(&self) -> Session {
        let outcome = self
            .config
            .bootstrap_retry
            .run(
                || self.restore(),
                |e: &ApiError| e.kind() == ErrorKind::Network,
            )
            .await;

        let next = match outcome {
            Ok((access, user)) => {
                tracing::info!(user_id = %user.id, "session restored");
                Session::SignedIn { access, user }
            }
            Err(e) => {
                tracing::info!(error = %e, "no session to restore");
                Session::SignedOut
            }
        };
        self.store.set(next.clone());
        next
    }

    async fn restore(&self) -> Result<(AccessToken, UserProfile), ApiError> {
        let access = self.api.refresh().await?;
        let user = self.api.me(&access).await?;
        Ok((access, user))
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the token and profile are stored in one write. On
    /// failure the session is untouched. Wrong credentials come back as
    /// [`SessionError::Validation`] with the server's message, since the
    /// user needs to see it rather than be sent to a login page they are
    /// already on.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        match self.api.login(email, password).await {
            Ok(login) => {
                tracing::info!(user_id = %login.user.id, "logged in");
                let user = login.user.clone();
                self.store.set(Session::SignedIn {
                    access: login.access,
                    user: login.user,
                });
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                Err(match e {
                    ApiError::Rejected { status: 401, message } => {
                        SessionError::Validation(message)
                    }
                    other => other.into(),
                })
            }
        }
    }

    /// Creates an account without signing in.
    ///
    /// The caller logs in separately afterwards. A taken email surfaces
    /// as a [`SessionError::Validation`] for which
    /// [`is_duplicate_email`](SessionError::is_duplicate_email) holds.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        favorite_club: &str,
    ) -> Result<UserProfile, SessionError> {
        let user = self
            .api
            .register(email, password, favorite_club)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "registration failed"))?;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Forgets the session. Local only; the server is not told.
    pub fn logout(&self) {
        self.store.set(Session::SignedOut);
        tracing::info!("logged out");
    }

    /// Changes the favorite club and adopts the server's recomputed
    /// profile (including `banter_mode`).
    ///
    /// Fails fast with [`SessionError::Unauthenticated`] when nobody is
    /// signed in. A rejected token is renewed once.
    pub async fn update_favorite_club(&self, club: &str) -> Result<UserProfile, SessionError> {
        let api = &self.api;
        let user = with_renewal(self, move |token| async move {
            api.update_profile(&token, club).await
        })
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "profile update failed"))?;

        // A logout that landed while the request was in flight wins.
        if let Some(access) = self.store.snapshot().access_token().cloned() {
            self.store.set(Session::SignedIn {
                access,
                user: user.clone(),
            });
        }
        tracing::info!(user_id = %user.id, banter_mode = user.banter_mode, "favorite club updated");
        Ok(user)
    }

    /// Replaces a rejected access token using the refresh cookie.
    ///
    /// A rejected refresh signs the user out. A network failure leaves the
    /// session as it was.
    pub async fn renew(&self) -> Result<AccessToken, SessionError> {
        let Some(user) = self.store.snapshot().current_user().cloned() else {
            return Err(SessionError::Unauthenticated);
        };

        match self.api.refresh().await {
            Ok(access) => {
                tracing::debug!(user_id = %user.id, "access token renewed");
                self.store.set(Session::SignedIn {
                    access: access.clone(),
                    user,
                });
                Ok(access)
            }
            Err(e) if e.kind() == ErrorKind::Network => Err(e.into()),
            Err(e) => {
                tracing::info!(error = %e, "renewal rejected, signing out");
                self.store.set(Session::SignedOut);
                Err(SessionError::Unauthenticated)
            }
        }
    }
}

impl<B: Backend> CredentialSource for AuthSessionManager<B> {
    fn access_token(&self) -> Option<AccessToken> {
        self.store.snapshot().access_token().cloned()
    }

    async fn renew(&self) -> Result<AccessToken, SessionError> {
        AuthSessionManager::renew(self).await
    }
}
