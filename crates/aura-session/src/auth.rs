//! The credential seam.
//!
//! Anything that needs to call the API on the user's behalf (the
//! predictor, the generator pass-through) asks a [`CredentialSource`] for
//! the current access token instead of reading the session store. When
//! the server rejects a token, [`with_renewal`] asks the source for a
//! fresh one and retries once.

use std::future::Future;
use std::sync::Arc;

use aura_protocol::{AccessToken, ApiError, ErrorKind};

use crate::SessionError;

/// Supplies and renews the access token.
///
/// Implemented by [`AuthSessionManager`](crate::AuthSessionManager).
/// Tests can implement it with a fixed token.
///
/// ```rust
/// use aura_protocol::AccessToken;
/// use aura_session::{CredentialSource, SessionError};
///
/// struct FixedToken(AccessToken);
///
/// impl CredentialSource for FixedToken {
///     fn access_token(&self) -> Option<AccessToken> {
///         Some(self.0.clone())
///     }
///
///     async fn renew(&self) -> Result<AccessToken, SessionError> {
///         Err(SessionError::Unauthenticated)
///     }
/// }
/// ```
pub trait CredentialSource: Send + Sync + 'static {
    /// The current token, or `None` when nobody is signed in.
    fn access_token(&self) -> Option<AccessToken>;

    /// Obtains a replacement for a token the server just rejected.
    ///
    /// # Errors
    /// [`SessionError::Unauthenticated`] when no replacement can be had;
    /// the implementation is expected to have signed the user out.
    fn renew(&self) -> impl Future<Output = Result<AccessToken, SessionError>> + Send;
}

impl<T: CredentialSource> CredentialSource for Arc<T> {
    fn access_token(&self) -> Option<AccessToken> {
        (**self).access_token()
    }

    fn renew(&self) -> impl Future<Output = Result<AccessToken, SessionError>> + Send {
        (**self).renew()
    }
}

/// Runs an authenticated call, renewing the token once on a 401.
///
/// Fails fast with [`SessionError::Unauthenticated`] (no network call)
/// when the source has no token.
pub async fn with_renewal<S, T, F, Fut>(source: &S, mut call: F) -> Result<T, SessionError>
where
    S: CredentialSource,
    F: FnMut(AccessToken) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let token = source
        .access_token()
        .ok_or(SessionError::Unauthenticated)?;

    match call(token).await {
        Err(e) if e.kind() == ErrorKind::Unauthenticated => {
            tracing::debug!("access token rejected, renewing");
            let renewed = source.renew().await?;
            Ok(call(renewed).await?)
        }
        other => Ok(other?),
    }
}
