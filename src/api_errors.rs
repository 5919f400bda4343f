use derive_more::Display;
use reqwest::StatusCode;

/// Errors produced while talking to the backend REST API.
///
/// `Clone` so a single refresh outcome can be handed to every caller that
/// waited on it.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ApiError {
    #[display("Network error: {}", _0)]
    Network(String),

    #[display("Decode error: {}", _0)]
    Decode(String),

    #[display("{}", _0)]
    Unauthorized(String),

    #[display("{message}")]
    Backend { status: u16, message: String },

    #[display("Invalid request: {}", _0)]
    Invalid(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Builds an error from a non-2xx response body, preferring the backend's
    /// `detail` string and falling back to the status text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = backend_detail(body).unwrap_or_else(|| status_text(status));

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Backend {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message a form should show verbatim.
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Backend { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

fn backend_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_backend_detail_when_present() {
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"detail":"Slug already exists"}"#);
        assert_eq!(err, ApiError::Backend { status: 409, message: "Slug already exists".into() });
        assert_eq!(err.message(), "Slug already exists");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.message(), "Bad Gateway");

        let err = ApiError::from_response(StatusCode::NOT_FOUND, r#"{"detail":["not","a","string"]}"#);
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn unauthorized_is_its_own_variant() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, r#"{"detail":"Token expired"}"#);
        assert_eq!(err, ApiError::Unauthorized("Token expired".into()));
        assert_eq!(err.status(), Some(401));
    }
}
