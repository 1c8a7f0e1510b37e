//! Prometheus metrics for the portfolio API
//!
//! Each application instance owns its own [`Registry`], so parallel test
//! apps never collide on metric names.

use crate::core::error::Result;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Store write operations tracked per collection
#[derive(Debug, Clone, Copy)]
pub enum WriteOperation {
    /// Record appended
    Create,
    /// Record merged
    Update,
    /// Record removed
    Delete,
}

impl WriteOperation {
    fn label(self) -> &'static str {
        match self {
            WriteOperation::Create => "create",
            WriteOperation::Update => "update",
            WriteOperation::Delete => "delete",
        }
    }
}

/// Centralized metrics collection
pub struct Metrics {
    registry: Registry,
    /// Store writes by collection and operation
    pub store_writes: IntCounterVec,
    /// Rejected requests at the auth gate, by reason
    pub auth_failures: IntCounterVec,
    /// Recorded page views
    pub page_views: IntCounter,
    /// Login attempts by outcome
    pub logins: IntCounterVec,
}

impl Metrics {
    /// Create and register every metric in a fresh registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let store_writes = IntCounterVec::new(
            Opts::new("portfolio_store_writes_total", "Store write operations"),
            &["collection", "operation"],
        )?;
        let auth_failures = IntCounterVec::new(
            Opts::new("portfolio_auth_failures_total", "Requests rejected by the auth gate"),
            &["reason"],
        )?;
        let page_views = IntCounter::new("portfolio_page_views_total", "Recorded page views")?;
        let logins = IntCounterVec::new(
            Opts::new("portfolio_logins_total", "Login attempts"),
            &["outcome"],
        )?;

        registry.register(Box::new(store_writes.clone()))?;
        registry.register(Box::new(auth_failures.clone()))?;
        registry.register(Box::new(page_views.clone()))?;
        registry.register(Box::new(logins.clone()))?;

        Ok(Self {
            registry,
            store_writes,
            auth_failures,
            page_views,
            logins,
        })
    }

    /// Count a store write. Singleton writes use their domain name as the
    /// collection label.
    pub fn record_write(&self, collection: &str, operation: WriteOperation) {
        self.store_writes
            .with_label_values(&[collection, operation.label()])
            .inc();
    }

    /// Count a request rejected at the auth gate
    pub fn record_auth_failure(&self, reason: &str) {
        self.auth_failures.with_label_values(&[reason]).inc();
    }

    /// Count a login attempt
    pub fn record_login(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.logins.with_label_values(&[outcome]).inc();
    }

    /// Render every metric in the Prometheus text format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        Ok(encoder.encode_to_string(&self.registry.gather())?)
    }
}
