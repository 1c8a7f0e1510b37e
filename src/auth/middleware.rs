//! Bearer token gate for protected routes
//!
//! [`AuthUser`] accepts any valid token. [`AdminUser`] runs the same check
//! first and then requires the admin role, so the role check can never be
//! reached without a verified token.

use crate::auth::token::Claims;
use crate::core::app_state::SharedState;
use crate::core::error::Error;
use axum::extract::{FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

const BEARER_PREFIX: &str = "Bearer ";

/// Claims of a request carrying a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// Claims of a request carrying a valid admin token
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        // Already verified earlier in this request, e.g. by `require_admin`.
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            state.metrics.record_auth_failure("missing_token");
            return Err(Error::unauthorized("Authorization token required"));
        };

        let claims = state.auth.verify(token).inspect_err(|_| {
            warn!(path = %parts.uri.path(), "Rejected invalid bearer token");
            state.metrics.record_auth_failure("invalid_token");
        })?;

        parts.extensions.insert(claims.clone());
        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<SharedState> for AdminUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            warn!(user_id = %claims.id, path = %parts.uri.path(), "Non-admin token on admin route");
            state.metrics.record_auth_failure("forbidden");
            return Err(Error::Forbidden);
        }

        Ok(AdminUser(claims))
    }
}

/// Middleware admitting only admin tokens. Used as a `route_layer` on route
/// groups where every method is admin-only.
pub async fn require_admin(_admin: AdminUser, request: Request, next: Next) -> Response {
    next.run(request).await
}
