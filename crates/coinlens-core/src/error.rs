//! Error types for the coinlens client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API-level, and input validation failures,
//! plus the normalized error-body representation shared by all of them.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Field name to messages, as produced by server-side form validation.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The unified error type for coinlens operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success API responses other than the handled 401.
    #[error("api error: {0}")]
    Api(#[from] ApiFailure),

    /// Input validation errors (malformed API base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error, including undecodable response bodies.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No stored credential is available for an authenticated call.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session is no longer usable: the access token was rejected and
    /// the silent refresh failed or was itself rejected.
    #[error("session expired")]
    SessionExpired,

    /// The token-refresh endpoint rejected the refresh token.
    #[error("refresh token rejected")]
    RefreshRejected,
}

/// A non-2xx API response, with the body normalized into [`ErrorBody`].
#[derive(Debug, Clone)]
pub struct ApiFailure {
    /// HTTP status code.
    pub status: u16,
    /// Normalized error payload.
    pub body: ErrorBody,
}

impl ApiFailure {
    /// Create a new API failure.
    pub fn new(status: u16, body: ErrorBody) -> Self {
        Self { status, body }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Check if this is a server-side failure (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        match &self.body {
            ErrorBody::Message(message) => write!(f, ": {}", message),
            ErrorBody::Validation(fields) => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                write!(f, ": invalid fields [{}]", names.join(", "))
            }
            ErrorBody::Empty => Ok(()),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Normalized server error payload.
///
/// The server reports failures in several shapes depending on the endpoint
/// and failure kind: a field-to-messages object, a bare message string, an
/// array of messages, or an `{"errors": ...}` / `{"message": ...}` envelope.
/// All of them are folded into this tagged form at the response boundary, so
/// callers only ever inspect one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// Field-level validation messages, keyed by field name.
    Validation(FieldErrors),
    /// A single server-provided message.
    Message(String),
    /// No usable payload.
    Empty,
}

impl ErrorBody {
    /// Normalize a raw JSON error payload.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.trim().is_empty() => Self::Message(s.trim().to_string()),
            Value::Array(_) => match collect_messages(value) {
                Some(messages) => Self::Message(messages.join("; ")),
                None => Self::Empty,
            },
            Value::Object(map) => {
                // Unwrap the common envelope first.
                if let Some(inner) = map.get("errors") {
                    return Self::from_json(inner);
                }
                for key in ["message", "error", "msg"] {
                    if let Some(Value::String(s)) = map.get(key) {
                        if !s.trim().is_empty() {
                            return Self::Message(s.trim().to_string());
                        }
                    }
                }
                let mut fields = FieldErrors::new();
                for (name, messages) in map {
                    if let Some(messages) = collect_messages(messages) {
                        fields.insert(name.clone(), messages);
                    }
                }
                if fields.is_empty() {
                    Self::Empty
                } else {
                    Self::Validation(fields)
                }
            }
            _ => Self::Empty,
        }
    }

    /// A flat list of all messages, for display contexts without field labels.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Self::Validation(fields) => fields
                .values()
                .flat_map(|messages| messages.iter().map(String::as_str))
                .collect(),
            Self::Message(message) => vec![message.as_str()],
            Self::Empty => Vec::new(),
        }
    }
}

/// Extract a message list from a string or an array of strings.
fn collect_messages(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                    _ => None,
                })
                .collect();
            if messages.is_empty() { None } else { Some(messages) }
        }
        _ => None,
    }
}

/// Outcome of a form submission: either accepted by the server, or rejected
/// with a normalized error payload the caller displays inline.
///
/// Rejections are ordinary values, not `Err` - only transport and session
/// failures escalate through `Result`.
#[derive(Debug, Clone)]
pub enum FormOutcome<T> {
    /// The server accepted the submission.
    Accepted(T),
    /// The server (or a local pre-check) rejected the submission.
    Rejected(ErrorBody),
}

impl<T> FormOutcome<T> {
    /// Returns the accepted value, if any.
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_field_map() {
        let body = ErrorBody::from_json(&json!({
            "email": ["Email is required"],
            "password": ["Password is required"]
        }));
        match body {
            ErrorBody::Validation(fields) => {
                assert_eq!(fields["email"], vec!["Email is required"]);
                assert_eq!(fields["password"], vec!["Password is required"]);
            }
            other => panic!("expected validation body, got {:?}", other),
        }
    }

    #[test]
    fn normalizes_errors_envelope() {
        let body = ErrorBody::from_json(&json!({
            "errors": { "name": ["The name is required", "too short"] }
        }));
        assert_eq!(
            body,
            ErrorBody::Validation(FieldErrors::from([(
                "name".to_string(),
                vec!["The name is required".to_string(), "too short".to_string()]
            )]))
        );
    }

    #[test]
    fn normalizes_field_with_bare_string_message() {
        let body = ErrorBody::from_json(&json!({ "_schema": "Invalid email or password." }));
        assert_eq!(
            body,
            ErrorBody::Validation(FieldErrors::from([(
                "_schema".to_string(),
                vec!["Invalid email or password.".to_string()]
            )]))
        );
    }

    #[test]
    fn normalizes_bare_string() {
        let body = ErrorBody::from_json(&json!("Something went wrong"));
        assert_eq!(body, ErrorBody::Message("Something went wrong".to_string()));
    }

    #[test]
    fn normalizes_array_of_messages() {
        let body = ErrorBody::from_json(&json!(["Failed to connect", "try again"]));
        assert_eq!(
            body,
            ErrorBody::Message("Failed to connect; try again".to_string())
        );
    }

    #[test]
    fn normalizes_message_envelope() {
        let body = ErrorBody::from_json(&json!({ "message": "token revoked" }));
        assert_eq!(body, ErrorBody::Message("token revoked".to_string()));
        let body = ErrorBody::from_json(&json!({ "error": "Coin data not found" }));
        assert_eq!(body, ErrorBody::Message("Coin data not found".to_string()));
    }

    #[test]
    fn unusable_payloads_become_empty() {
        assert_eq!(ErrorBody::from_json(&json!(null)), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_json(&json!(42)), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_json(&json!({})), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_json(&json!({ "count": 3 })), ErrorBody::Empty);
    }

    #[test]
    fn failure_display_includes_status() {
        let failure = ApiFailure::new(503, ErrorBody::Empty);
        assert_eq!(failure.to_string(), "HTTP 503");
        assert!(failure.is_server_error());
        assert!(!failure.is_unauthorized());
    }

    #[test]
    fn unauthorized_detection() {
        let failure = ApiFailure::new(401, ErrorBody::Message("expired".to_string()));
        assert!(failure.is_unauthorized());
    }
}
