use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::domain::InvalidFlavorId;
use crate::services::FlavorError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Attached to error responses so the request logger can tag the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind(pub &'static str);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorKind(self.kind()));
        response
    }
}

impl From<FlavorError> for ApiError {
    fn from(err: FlavorError) -> Self {
        match err {
            FlavorError::NotFound(id) => Self::not_found("Flavor", id),
            FlavorError::Validation(msg) => Self::validation(msg),
            FlavorError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<InvalidFlavorId> for ApiError {
    fn from(err: InvalidFlavorId) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::DatabaseError(_) => "database",
            ApiError::ValidationError(_) => "validation",
        }
    }

    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlavorId;

    #[test]
    fn test_flavor_error_mapping() {
        let id = FlavorId::new(9).unwrap();
        let response = ApiError::from(FlavorError::NotFound(id)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(FlavorError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(FlavorError::Database("locked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_id_is_client_error() {
        let err = "abc".parse::<FlavorId>().unwrap_err();
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_kind_travels_with_response() {
        let response = ApiError::validation("Flavor name is required").into_response();
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind("validation"))
        );

        let response = ApiError::from(FlavorError::Database("locked".into())).into_response();
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind("database"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::not_found("Flavor", 3).to_string(),
            "Not found: Flavor 3 not found"
        );
    }
}
