//! Session management for Arsenal Aura.
//!
//! This crate owns the client's notion of "who is signed in":
//!
//! 1. **Session state** ([`Session`]) published through a single-writer
//!    [`SessionStore`] that hands out cheap [`SessionReader`]s
//! 2. **Lifecycle** ([`AuthSessionManager`]): silent bootstrap, login,
//!    register, logout, profile changes, token renewal
//! 3. **Access gating** ([`RouteGuard`]): a pure decision per navigation
//! 4. **Credential seam** ([`CredentialSource`]) through which other
//!    crates borrow the access token without touching the store
//!
//! # How it fits in the stack
//!
//! ```text
//! Predictor / App (above)  ← read sessions, borrow credentials
//!     ↕
//! Session Layer (this crate)  ← the only writer of session state
//!     ↕
//! Protocol Layer (below)  ← typed API calls
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod error;
mod guard;
mod manager;
mod session;
mod store;

pub use auth::{CredentialSource, with_renewal};
pub use error::SessionError;
pub use guard::{RouteDecision, RouteGuard, RouteTable};
pub use manager::AuthSessionManager;
pub use session::{Session, SessionConfig};
pub use store::{SessionReader, SessionStore};
