//! # Aura
//!
//! Client core for Arsenal Aura.
//!
//! [`AuraApp`] wires the layers together: an HTTP backend, the typed API
//! client, the auth session manager, the route guard, and predictor
//! workflows that borrow the session's credentials.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aura::prelude::*;
//!
//! # async fn run() -> Result<(), AuraError> {
//! let app = AuraApp::builder()
//!     .config(AuraConfig::from_env()?)
//!     .build()?;
//!
//! app.start().await;
//! match app.navigate("/predictor") {
//!     RouteDecision::Redirect(to) => println!("go to {to}"),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
mod logging;

pub use app::{AuraApp, AuraAppBuilder};
pub use config::{AuraConfig, DEFAULT_API_BASE_URL};
pub use error::AuraError;
pub use logging::init_tracing;

pub use aura_predictor as predictor;
pub use aura_protocol as protocol;
pub use aura_session as session;
pub use aura_transport as transport;

pub mod prelude {
    pub use crate::{AuraApp, AuraAppBuilder, AuraConfig, AuraError, init_tracing};
    pub use aura_predictor::{
        CheckOutcome, FixtureSlot, PredictorError, PredictorState, PredictorWorkflow,
    };
    pub use aura_protocol::{
        CLUBS, Fixture, FixtureFeed, Honor, InfoLink, Intensity, Prediction,
        ReconciliationResult, Scoreline, Severity, TimelineItem, UserProfile,
    };
    pub use aura_session::{
        AuthSessionManager, RouteDecision, RouteGuard, Session, SessionError, SessionReader,
    };
}
