//! `AppError` and the JSON error envelope it renders to

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every handler: a code, a message, optional details.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Structured context (offending field, violated constraint, limits)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// A required text field was missing or blank.
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    /// Same response for unknown email and wrong password.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ApiResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }
        (self.http_status(), axum::Json(ApiResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee not found");
        assert_eq!(err.to_string(), "Employee not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_required_field_detail() {
        let err = AppError::required("email");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "email is required");
        assert_eq!(err.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_envelope_shape() {
        let err = AppError::new(ErrorCode::ApplicantNotFound).with_detail("id", 7);
        let json = serde_json::to_value(ApiResponse::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": 5101,
                "message": "Applicant not found",
                "details": {"id": 7}
            })
        );

        let json = serde_json::to_value(ApiResponse::from(&AppError::invalid_credentials()))
            .unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorCode::DepartmentNameExists).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response = AppError::new(ErrorCode::SalaryCryptoFailed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
