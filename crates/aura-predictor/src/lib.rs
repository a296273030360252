//! The match predictor workflow.
//!
//! [`PredictorWorkflow`] drives three operations over one user's
//! fixture/prediction pair:
//!
//! ```text
//! load_context() ──→ save_prediction() ──→ check_result() ──→ Pending ─┐
//!                                                │                     │
//!                                                └──→ Settled  ←───────┘ (later)
//! ```
//!
//! State only ever reflects what the server confirmed. Credentials come
//! from a [`CredentialSource`](aura_session::CredentialSource), never
//! from the session store directly.

mod error;
mod state;
mod workflow;

pub use error::PredictorError;
pub use state::{CheckOutcome, DEFAULT_DRAFT, FixtureSlot, PredictorState};
pub use workflow::{PredictorConfig, PredictorWorkflow};
