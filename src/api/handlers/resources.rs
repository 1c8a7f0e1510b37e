//! CRUD handlers shared by the four collection resources
//!
//! Each resource is a zero-sized type implementing [`Resource`]; the router
//! instantiates the generic handlers once per resource.

use crate::api::extract::{JsonRequest, PathParams, QueryParams};
use crate::api::response::MessageResponse;
use crate::auth::AdminUser;
use crate::core::app_state::SharedState;
use crate::core::error::{Error, Result};
use crate::storage::{Collection, Record};
use crate::system::WriteOperation;
use crate::validation::{
    validate, FieldRule, Mode, EXPERIENCE_RULES, PROJECT_RULES, SERVICE_RULES, SKILL_RULES,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Reverse;

/// Optional list filters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Keep only records whose `featured` equals this value
    pub featured: Option<bool>,
    /// Keep only records whose `category` equals this value
    pub category: Option<String>,
}

/// A collection exposed as a REST resource
pub trait Resource: Send + Sync + 'static {
    /// Backing collection
    const COLLECTION: Collection;
    /// Field rules for create and update bodies
    const RULES: &'static [FieldRule];

    /// Filter and order a listing. Insertion order by default.
    fn arrange(records: Vec<Record>, _query: &ListQuery) -> Vec<Record> {
        records
    }
}

/// `/api/projects`
pub struct Projects;
/// `/api/skills`
pub struct Skills;
/// `/api/experience`
pub struct Experience;
/// `/api/services`
pub struct Services;

impl Resource for Projects {
    const COLLECTION: Collection = Collection::Projects;
    const RULES: &'static [FieldRule] = PROJECT_RULES;

    fn arrange(records: Vec<Record>, query: &ListQuery) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| match query.featured {
                Some(featured) => record.get("featured") == Some(&Value::Bool(featured)),
                None => true,
            })
            .filter(|record| matches_category(record, query))
            .collect()
    }
}

impl Resource for Skills {
    const COLLECTION: Collection = Collection::Skills;
    const RULES: &'static [FieldRule] = SKILL_RULES;

    /// Highest level first. Ties keep insertion order.
    fn arrange(records: Vec<Record>, query: &ListQuery) -> Vec<Record> {
        let mut skills: Vec<Record> = records
            .into_iter()
            .filter(|record| matches_category(record, query))
            .collect();
        skills.sort_by_key(|record| Reverse(record.get("level").and_then(Value::as_i64).unwrap_or(i64::MIN)));
        skills
    }
}

impl Resource for Experience {
    const COLLECTION: Collection = Collection::Experience;
    const RULES: &'static [FieldRule] = EXPERIENCE_RULES;

    /// Most recent `startDate` first
    fn arrange(mut records: Vec<Record>, _query: &ListQuery) -> Vec<Record> {
        records.sort_by(|a, b| b.get_str("startDate").cmp(&a.get_str("startDate")));
        records
    }
}

impl Resource for Services {
    const COLLECTION: Collection = Collection::Services;
    const RULES: &'static [FieldRule] = SERVICE_RULES;
}

fn matches_category(record: &Record, query: &ListQuery) -> bool {
    match &query.category {
        Some(category) => record.get_str("category") == Some(category.as_str()),
        None => true,
    }
}

fn not_found<R: Resource>() -> Error {
    Error::not_found(format!("{} not found", R::COLLECTION.resource_label()))
}

/// `GET /api/<resource>`
pub async fn list<R: Resource>(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Json<Vec<Record>> {
    let records = state.store.find_all(R::COLLECTION);
    Json(R::arrange(records, &query))
}

/// `GET /api/<resource>/{id}`
pub async fn get_one<R: Resource>(
    State(state): State<SharedState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<Record>> {
    state
        .store
        .find_by_id(R::COLLECTION, &id)
        .map(Json)
        .ok_or_else(not_found::<R>)
}

/// `POST /api/<resource>` (admin)
pub async fn create<R: Resource>(
    AdminUser(_claims): AdminUser,
    State(state): State<SharedState>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<(StatusCode, Json<Record>)> {
    let input = Record::try_from(body)?;
    validate(&input, R::RULES, Mode::Create)?;

    let record = state.store.create(R::COLLECTION, input)?;
    state.metrics.record_write(R::COLLECTION.name(), WriteOperation::Create);

    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /api/<resource>/{id}` (admin)
pub async fn update<R: Resource>(
    AdminUser(_claims): AdminUser,
    State(state): State<SharedState>,
    PathParams(id): PathParams<String>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<Record>> {
    if state.store.find_by_id(R::COLLECTION, &id).is_none() {
        return Err(not_found::<R>());
    }

    let patch = Record::try_from(body)?;
    validate(&patch, R::RULES, Mode::Update)?;

    let record = state
        .store
        .update(R::COLLECTION, &id, patch)
        .ok_or_else(not_found::<R>)?;
    state.metrics.record_write(R::COLLECTION.name(), WriteOperation::Update);

    Ok(Json(record))
}

/// `DELETE /api/<resource>/{id}` (admin)
pub async fn delete<R: Resource>(
    AdminUser(_claims): AdminUser,
    State(state): State<SharedState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<MessageResponse>> {
    if state.store.find_by_id(R::COLLECTION, &id).is_none() {
        return Err(not_found::<R>());
    }

    if !state.store.remove(R::COLLECTION, &id) {
        return Err(Error::internal(format!(
            "{} '{}' vanished before it could be removed",
            R::COLLECTION.resource_label(),
            id
        )));
    }
    state.metrics.record_write(R::COLLECTION.name(), WriteOperation::Delete);

    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        R::COLLECTION.resource_label()
    ))))
}
