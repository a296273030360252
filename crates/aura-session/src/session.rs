//! Session types.

use aura_protocol::{AccessToken, UserProfile};
use aura_transport::RetryPolicy;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Tunables for [`AuthSessionManager`](crate::AuthSessionManager).
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Retry policy for the silent refresh at start-up. Only network
    /// failures are retried; a rejected refresh cookie is final.
    pub bootstrap_retry: RetryPolicy,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The client's view of authentication.
///
/// ```text
///   Loading ──(bootstrap ok)──→ SignedIn ──(logout / renewal fails)──→ SignedOut
///      │                           ↑                                      │
///      └──(bootstrap fails)──→ SignedOut ──────────(login)────────────────┘
/// ```
///
/// A user profile only ever exists next to an access token: there is no
/// variant that carries one without the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// Start-up refresh has not finished yet.
    #[default]
    Loading,

    SignedOut,

    SignedIn {
        access: AccessToken,
        user: UserProfile,
    },
}

impl Session {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        match self {
            Self::SignedIn { access, .. } => Some(access),
            _ => None,
        }
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn { user, .. } => Some(user),
            _ => None,
        }
    }
}
