use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials, or a token the backend no longer accepts.
    #[error("authentication failed: check your credentials or sign in again")]
    Authentication,

    /// The request never completed (DNS, connect, TLS, reset...).
    #[error("could not reach the library server: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend rejected the payload. `message` is the backend's own
    /// wording when it sent one.
    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A success response whose body was not the JSON we expected.
    #[error("unexpected response from the library server: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED.as_u16() {
            return ApiError::Authentication;
        }
        let message = extract_message(body).unwrap_or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("request failed")
                .to_string()
        });
        if (400..500).contains(&status) {
            ApiError::Validation { status, message }
        } else {
            ApiError::Server { status, message }
        }
    }

    pub(crate) fn from_body_error(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Network(err)
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication)
    }

    /// HTTP status of a rejected request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"message": "..."}`, `{"message": ["...", ...]}` (first
/// entry wins) and `{"error": "..."}`; otherwise falls back to a short
/// plain-text body.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let from_field = |key: &str| match value.get(key) {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Array(items)) => {
                    items.iter().find_map(|v| v.as_str().map(str::to_string))
                }
                _ => None,
            };
            from_field("message").or_else(|| from_field("error"))
        }
        Err(_) if body.len() <= 200 && !body.starts_with('<') => Some(body.to_string()),
        Err(_) => None,
    }
}
