//! HTTP error mapping.
//!
//! # Invariants
//! - Every error body is `{"detail": ..., "code": ...}`.
//! - Validation details are a list of `{field, message}` so clients can
//!   point at the offending input.
//! - Internal failures never echo storage error text to the client.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hospital_crm_core::{FieldIssue, RepoError};
use log::error;
use serde::Serialize;
use serde_json::Value;

pub const OVERLAP_DETAIL: &str = "Time slot overlaps with another appointment";

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldIssue>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: Value,
    code: &'static str,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err.issues().to_vec()),
            RepoError::NotFound { collection, .. } => {
                Self::NotFound(format!("{} not found", capitalize(collection)))
            }
            RepoError::Overlap { .. } => Self::Conflict(OVERLAP_DETAIL.to_string()),
            err @ (RepoError::Db(_) | RepoError::InvalidData(_)) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(vec![FieldIssue {
            field: "body".to_string(),
            message: value.body_text(),
        }])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let detail = match self {
            Self::Validation(issues) => serde_json::to_value(issues).unwrap_or(Value::Null),
            Self::Internal(message) => {
                error!("event=http_request module=server status=error code={code} error={message}");
                Value::String("Internal server error".to_string())
            }
            Self::BadRequest(message) | Self::NotFound(message) | Self::Conflict(message) => {
                Value::String(message)
            }
        };
        (status, Json(ErrorBody { detail, code })).into_response()
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
