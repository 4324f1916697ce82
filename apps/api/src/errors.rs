use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::document::FieldError;
use crate::models::template::ColorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("An export is already in progress")]
    ExportBusy,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::IndexOutOfRange { .. } => AppError::NotFound(e.to_string()),
            FieldError::UnknownField { .. } | FieldError::TypeMismatch { .. } => {
                AppError::Validation(e.to_string())
            }
        }
    }
}

impl From<ColorError> for AppError {
    fn from(e: ColorError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ConfirmationRequired(msg) => {
                (StatusCode::CONFLICT, "CONFIRMATION_REQUIRED", msg.clone())
            }
            AppError::ExportBusy => (StatusCode::CONFLICT, "EXPORT_BUSY", self.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_map_to_status() {
        let missing: AppError = FieldError::IndexOutOfRange {
            section: "skills",
            index: 4,
        }
        .into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let bad: AppError = FieldError::UnknownField {
            section: "skills",
            field: "color".into(),
        }
        .into();
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflicts() {
        assert_eq!(
            AppError::ExportBusy.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ConfirmationRequired("clear".into())
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
    }
}
