//! Request extractors that report failures in the JSON error envelope

use crate::core::error::Error;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::warn;

/// JSON body extractor whose rejections become 400 error envelopes
pub struct JsonRequest<T>(pub T);

impl<T, S> FromRequest<S> for JsonRequest<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonRequest(value)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(_) => "Invalid JSON data",
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON",
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing or invalid Content-Type header. Expected 'application/json'"
                    }
                    JsonRejection::BytesRejection(_) => "Failed to read request body",
                    _ => "Invalid JSON request",
                };

                warn!("JSON parsing error: {}", message);
                Err(Error::bad_request(message))
            }
        }
    }
}

/// Query string extractor whose rejections become 400 error envelopes
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|rejection: QueryRejection| {
                warn!("Query string error: {}", rejection.body_text());
                Error::bad_request("Invalid query parameters")
            })
    }
}

/// Path parameter extractor whose rejections become 400 error envelopes
pub struct PathParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParams(value))
            .map_err(|rejection: PathRejection| {
                warn!(path = %parts.uri.path(), "Path parameter error: {}", rejection.body_text());
                Error::bad_request("Invalid path parameters")
            })
    }
}
