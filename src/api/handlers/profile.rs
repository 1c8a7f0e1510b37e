//! Profile singleton handlers

use crate::api::extract::JsonRequest;
use crate::auth::AdminUser;
use crate::core::app_state::SharedState;
use crate::core::error::Result;
use crate::storage::Record;
use crate::system::WriteOperation;
use crate::validation::{validate, Mode, PROFILE_RULES};
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// `GET /api/profile`
pub async fn get_profile(State(state): State<SharedState>) -> Json<Record> {
    Json(state.store.get_profile())
}

/// `PUT /api/profile` (admin): shallow merge into the profile
pub async fn update_profile(
    AdminUser(_claims): AdminUser,
    State(state): State<SharedState>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<Record>> {
    let patch = Record::try_from(body)?;
    validate(&patch, PROFILE_RULES, Mode::Update)?;

    let profile = state.store.update_profile(patch);
    state.metrics.record_write("profile", WriteOperation::Update);

    Ok(Json(profile))
}
