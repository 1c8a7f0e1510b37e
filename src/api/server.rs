//! HTTP server for the portfolio API

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use super::handlers::{self, analytics, auth, profile, resources, system, Resource};
use super::response::handle_panic;
use crate::auth::require_admin;
use crate::core::app_state::SharedState;
use crate::core::error::Result;

/// Creates the main application router with all routes and middleware
pub fn create_app(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let admin_analytics = Router::new()
        .route(
            "/api/analytics",
            get(analytics::get_analytics).put(analytics::update_analytics),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        // System routes
        .route("/api/health", get(system::health))
        .route("/metrics", get(system::metrics))
        // Auth routes
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Singletons
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/analytics/pageview", post(analytics::record_page_view))
        .route(
            "/api/analytics/project/{project_id}",
            post(analytics::record_project_view),
        )
        .merge(admin_analytics)
        // Collections
        .merge(resource_routes::<handlers::Projects>("/api/projects"))
        .merge(resource_routes::<handlers::Skills>("/api/skills"))
        .merge(resource_routes::<handlers::Experience>("/api/experience"))
        .merge(resource_routes::<handlers::Services>("/api/services"))
        // Only reaches routes registered above
        .method_not_allowed_fallback(system::method_not_allowed)
        .fallback(system::route_not_found)
        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

/// List, fetch, create, update and delete routes for one resource
fn resource_routes<R: Resource>(base: &str) -> Router<SharedState> {
    Router::new()
        .route(base, get(resources::list::<R>).post(resources::create::<R>))
        .route(
            &format!("{}/{{id}}", base),
            get(resources::get_one::<R>)
                .put(resources::update::<R>)
                .delete(resources::delete::<R>),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Start the HTTP server and serve until Ctrl+C or SIGTERM
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = state.config.server.http_addr;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Health check available at http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on the first shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    warn!("Initiating graceful shutdown...");
}
