//! litejson HTTP API
//!
//! Exposes the conversion pipeline over HTTP: a multipart upload endpoint, a health
//! probe and the application setup that wires them together.

mod handlers;
mod telemetry;

pub mod error;
pub mod setup;
pub mod state;

pub use error::EnvelopeResponse;
pub use state::AppState;
