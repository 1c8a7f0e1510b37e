//! # API Module
//!
//! HTTP interface for the portfolio backend.
//!
//! ## Endpoints Overview
//!
//! ### Collections (`projects`, `skills`, `experience`, `services`)
//! - `GET /api/<resource>` - List records, with optional filters
//! - `GET /api/<resource>/{id}` - Get record by ID
//! - `POST /api/<resource>` - Create record (admin)
//! - `PUT /api/<resource>/{id}` - Merge fields into a record (admin)
//! - `DELETE /api/<resource>/{id}` - Delete record (admin)
//!
//! ### Auth
//! - `POST /api/auth/login` - Exchange email and password for a token
//! - `GET /api/auth/me` - Current user (bearer token)
//!
//! ### Singletons
//! - `GET /api/profile`, `PUT /api/profile` (admin)
//! - `GET /api/analytics`, `PUT /api/analytics` (admin)
//! - `POST /api/analytics/pageview` - Count a page view
//! - `POST /api/analytics/project/{projectId}` - Count a project view
//!
//! ### System
//! - `GET /api/health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod extract;
pub mod handlers;
pub mod response;
pub mod server;

// Re-export commonly used items
pub use extract::{JsonRequest, PathParams, QueryParams};
pub use response::{ErrorResponse, MessageResponse, SuccessResponse};
pub use server::{create_app, start_server};
