//! JSON envelope helpers and the error type returned by every handler.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use shared::ApiResponse;
use tracing::error;

use crate::domain::DomainError;

/// Handler failure rendered as `{status: false, date, error}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            DomainError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message),
            DomainError::Conflict(message) => Self::new(StatusCode::CONFLICT, message),
            DomainError::Unauthorized(message) => Self::new(StatusCode::UNAUTHORIZED, message),
            other => {
                error!("Request failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::failure(self.message))).into_response()
    }
}

/// `Json` extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections use the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

pub type ApiResult = Result<Response, ApiError>;

pub fn ok<T: Serialize>(data: T) -> ApiResult {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))).into_response())
}

pub fn created<T: Serialize>(data: T) -> ApiResult {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))).into_response())
}

pub fn ok_empty() -> ApiResult {
    Ok((StatusCode::OK, Json(ApiResponse::<()>::empty())).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (DomainError::Conflict("taken".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("who".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_persistence_details_are_hidden() {
        let err = ApiError::from(DomainError::Persistence(StorageError::Corrupt("secret table".into())));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret table"));
    }
}
