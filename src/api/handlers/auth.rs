//! Login and current-user handlers

use crate::api::extract::JsonRequest;
use crate::auth::{AuthUser, LoginOutcome};
use crate::core::app_state::SharedState;
use crate::core::error::{Error, Result};
use crate::storage::{Collection, Record};
use crate::validation::{validate, Mode, LOGIN_RULES};
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<SharedState>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<LoginOutcome>> {
    let credentials = Record::try_from(body)?;
    validate(&credentials, LOGIN_RULES, Mode::Submit)?;

    let email = credentials.get_str("email").unwrap_or_default();
    let password = credentials.get_str("password").unwrap_or_default();

    let result = state.auth.login(&state.store, email, password).await;
    state.metrics.record_login(result.is_ok());

    result.map(Json)
}

/// `GET /api/auth/me`: the caller's user record without its password hash
pub async fn me(AuthUser(claims): AuthUser, State(state): State<SharedState>) -> Result<Json<Record>> {
    let mut user = state
        .store
        .find_by_id(Collection::Users, &claims.id)
        .ok_or_else(|| Error::not_found("User not found"))?;

    user.remove("password");
    Ok(Json(user))
}
