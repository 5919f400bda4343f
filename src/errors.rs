use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

use crate::api_errors::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    ForbiddenAccess,
    Backend(String),
    Unavailable(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::ForbiddenAccess => write!(f, "Forbidden access"),
            AppError::Backend(msg) => write!(f, "{}", msg),
            AppError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenAccess => StatusCode::FORBIDDEN,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationError(field_errors)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(_) => AppError::UnauthorizedAccess,
            ApiError::Backend { status: 403, .. } => AppError::ForbiddenAccess,
            ApiError::Backend { status: 404, message } => AppError::NotFound(message),
            ApiError::Backend { status: 409, message } => AppError::Conflict(message),
            ApiError::Backend { status: 503, message } => AppError::Unavailable(message),
            ApiError::Backend { message, .. } => AppError::Backend(message),
            ApiError::Network(msg) => AppError::Unavailable(msg),
            ApiError::Decode(msg) | ApiError::Invalid(msg) => AppError::InternalError(msg),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: "password".to_string(),
            message: err.to_string(),
        }])
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }

    /// Single-field validation failure for checks the derive cannot express.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Password must be at least {_0} characters")]
    TooShort(usize),

    #[display("Password requires uppercase, lowercase, digit, and special character")]
    InsufficientComplexity,

    #[display("Password is too weak: {_0}")]
    WeakWithFeedback(String),

    #[display("Passwords do not match")]
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_statuses_map_onto_app_errors() {
        let not_found = ApiError::Backend { status: 404, message: "Post not found".into() };
        assert_eq!(AppError::from(not_found), AppError::NotFound("Post not found".into()));

        let teapot = ApiError::Backend { status: 418, message: "nope".into() };
        assert_eq!(AppError::from(teapot), AppError::Backend("nope".into()));

        assert_eq!(
            AppError::from(ApiError::Unauthorized("expired".into())),
            AppError::UnauthorizedAccess
        );
    }

    #[test]
    fn validation_error_renders_as_bad_request() {
        let err = AppError::invalid_field("slug", "Slug cannot be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "validation error: slug:Slug cannot be empty");
    }
}
