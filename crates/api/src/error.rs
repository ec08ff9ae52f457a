//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),

    /// A use-case rejected the request.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => domain_status(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Order(order_err) => match order_err {
            OrderError::CancelledOrderIsFinal { .. } => StatusCode::CONFLICT,
            OrderError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            OrderError::Validation(_)
            | OrderError::ItemValidation(_)
            | OrderError::OfferRequired => StatusCode::BAD_REQUEST,
        },
        DomainError::Validation(_) | DomainError::IllegalArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::OrderNotFound(_)
        | DomainError::OfferNotFound(_)
        | DomainError::CustomerNotFound(_)
        | DomainError::UserNotFound(_)
        | DomainError::CategoryNotFound(_)
        | DomainError::SupplierNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
