//! Application State Management
//!
//! The central [`AppState`] holds every service a handler may need. It is
//! built once by [`create_app_state`] and shared behind an `Arc`; tests build
//! as many independent instances as they like.

use crate::auth::{hash_password, Authenticator};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::{populate, AdminAccount, Store};
use crate::system::Metrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// State shared by all request handlers
pub type SharedState = Arc<AppState>;

/// Central application state holding all services and components
pub struct AppState {
    /// Portfolio content
    pub store: Store,

    /// Login and token verification
    pub auth: Authenticator,

    /// Prometheus metrics
    pub metrics: Metrics,

    /// Application configuration
    pub config: Config,

    started_at: Instant,
}

impl AppState {
    /// Build the services for `config` and seed the store
    pub fn new(config: Config) -> Result<Self> {
        let secret = config.auth.jwt_secret()?;
        let auth = Authenticator::new(secret, config.auth.token_ttl, config.auth.bcrypt_cost)?;

        let store = Store::new();
        let admin = AdminAccount {
            email: config.auth.admin_email.clone(),
            password_hash: hash_password(&config.auth.admin_password, config.auth.bcrypt_cost)?,
        };
        populate(&store, &admin);

        Ok(Self {
            store,
            auth,
            metrics: Metrics::new()?,
            config,
            started_at: Instant::now(),
        })
    }

    /// Time since the state was built
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Create the shared application state
pub fn create_app_state(config: Config) -> Result<SharedState> {
    let state = AppState::new(config)?;
    info!(admin = %state.config.auth.admin_email, "Application state initialized");
    Ok(Arc::new(state))
}
