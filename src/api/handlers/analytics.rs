//! Analytics singleton handlers
//!
//! Reading and overwriting analytics is admin-only and gated by the
//! `require_admin` route layer. The two counter endpoints are public.

use crate::api::extract::{JsonRequest, PathParams};
use crate::api::response::SuccessResponse;
use crate::core::app_state::SharedState;
use crate::core::error::Result;
use crate::storage::Record;
use crate::system::WriteOperation;
use crate::validation::{validate, validate_project_id, Mode, ANALYTICS_RULES};
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// `GET /api/analytics` (admin)
pub async fn get_analytics(State(state): State<SharedState>) -> Json<Record> {
    Json(state.store.get_analytics())
}

/// `PUT /api/analytics` (admin)
pub async fn update_analytics(
    State(state): State<SharedState>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<Record>> {
    let patch = Record::try_from(body)?;
    validate(&patch, ANALYTICS_RULES, Mode::Update)?;

    let analytics = state.store.update_analytics(patch);
    state.metrics.record_write("analytics", WriteOperation::Update);

    Ok(Json(analytics))
}

/// `POST /api/analytics/pageview`
pub async fn record_page_view(State(state): State<SharedState>) -> Json<SuccessResponse> {
    state.store.record_page_view();
    state.metrics.page_views.inc();
    Json(SuccessResponse::ok())
}

/// `POST /api/analytics/project/{project_id}`
pub async fn record_project_view(
    State(state): State<SharedState>,
    PathParams(project_id): PathParams<String>,
) -> Result<Json<SuccessResponse>> {
    validate_project_id(&project_id)?;

    state.store.record_project_view(&project_id);
    state.metrics.record_write("analytics", WriteOperation::Update);

    Ok(Json(SuccessResponse::ok()))
}
