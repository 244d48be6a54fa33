//! API error taxonomy and response classification.
//!
//! ERROR HANDLING
//! ==============
//! Only two classes mutate client state: `Unauthorized` (session torn down,
//! redirect to login) and `ForbiddenCsrf` (token dropped so the next
//! protected call re-issues one). Everything else is surfaced to the calling
//! form for display; network failures and 5xx never touch session state.

/// Failure classes for API calls, keyed on what the caller may do about them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response received; the request may or may not have been processed.
    #[error("network unreachable: {0}")]
    Network(String),
    /// 401 — the session cookie is invalid or expired.
    #[error("unauthorized")]
    Unauthorized,
    /// 403 rejected by CSRF validation.
    #[error("csrf rejected: {message}")]
    ForbiddenCsrf { message: String },
    /// 403 for any non-CSRF reason.
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    /// 404 — the resource does not exist.
    #[error("not found")]
    NotFound,
    /// 5xx — backend fault, safe to retry later.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// Any other non-success status (400/409/422 validation failures etc.).
    #[error("request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Whether a 403 error message indicates a CSRF validation failure.
pub(crate) fn is_csrf_message(message: &str) -> bool {
    message.to_ascii_lowercase().contains("csrf")
}

/// Map a non-success HTTP status and its error message to an `ApiError`.
pub(crate) fn classify_status(status: u16, message: String) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 if is_csrf_message(&message) => ApiError::ForbiddenCsrf { message },
        403 => ApiError::Forbidden { message },
        404 => ApiError::NotFound,
        500..=599 => ApiError::Server { status, message },
        _ => ApiError::Api { status, message },
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend sends `{ "message": "..." }`; fall back to the raw body for
/// proxies and non-JSON error pages.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_owned();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
