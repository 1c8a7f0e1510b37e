//! HTTP request handlers

pub mod analytics;
pub mod auth;
pub mod profile;
pub mod resources;
pub mod system;

pub use resources::{Experience, Projects, Resource, Services, Skills};
