//! Core service foundations
//!
//! Configuration, the crate error type and the shared application state
//! handed to every request handler.

pub mod app_state;
pub mod config;
pub mod error;

// Re-export commonly used items
pub use app_state::{create_app_state, AppState, SharedState};
pub use config::Config;
pub use error::{Error, FieldViolation, Result};
