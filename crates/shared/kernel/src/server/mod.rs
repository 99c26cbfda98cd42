//! Shared Axum plumbing: application state, JSON envelopes and system routes.

mod health;
mod response;
pub mod router;
mod state;

pub use response::{MessageResponse, not_found_fallback};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
