//! HTTP front end for the cardiovascular risk scorer.
//!
//! The model artifact is loaded once at startup into [`AppState`] and shared
//! read-only by every request.

pub mod commands;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ModelArgs, ServeArgs, DEFAULT_ALLOWED_ORIGINS};
pub use cors::cors_layer;
pub use error::ApiError;
pub use routes::{app, HOME_MESSAGE, UNAVAILABLE_REASON};
pub use state::{load_scorer, AppState, ScorerSlot};
