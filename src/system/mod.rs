//! System-level services
//!
//! Metrics collection exposed on `/metrics`.

pub mod metrics;

pub use metrics::{Metrics, WriteOperation};
