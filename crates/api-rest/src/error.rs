use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clinic_core::{ResolveError, StoreError};
use serde::Serialize;
use utoipa::ToSchema;

/// Failure body shared by every route.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub message: String,
}

/// Handler failure mapped onto a status code and a client message.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    /// A query string or body the route could not extract.
    BadRequest(StatusCode, String),
    NotFound(&'static str),
    Internal(&'static str),
}

impl ApiError {
    /// Maps a resolver failure, logging datastore errors.
    pub fn from_resolve(context: &str, err: ResolveError, message: &'static str) -> Self {
        match err {
            ResolveError::NotFound(id) => {
                tracing::warn!("{} not found: {}", context, id);
                Self::NotFound("Patient not found")
            }
            ResolveError::ResolutionFailed(e) => {
                tracing::error!("{} error: {:?}", context, e);
                Self::Internal(message)
            }
        }
    }

    pub fn from_store(context: &str, err: StoreError, message: &'static str) -> Self {
        tracing::error!("{} error: {:?}", context, err);
        Self::Internal(message)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Not Authorized Login Again".to_string(),
            ),
            Self::BadRequest(status, message) => (status, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()),
        };
        let body = ErrorRes {
            success: false,
            message,
        };
        (status, Json(body)).into_response()
    }
}
