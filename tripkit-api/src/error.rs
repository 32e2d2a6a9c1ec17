use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tripkit_alert::AlertError;
use tripkit_catalog::PricingError;
use tripkit_core::CoreError;
use tripkit_order::BookingError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::StateError(msg) => AppError::ConflictError(msg),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<AlertError> for AppError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Storage(inner) => inner.into(),
        }
    }
}
