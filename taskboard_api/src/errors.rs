//! Error types for the API client.

use serde_json::Value;

/// Message used when an error body carries validation errors but no message.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Base URL and endpoint path did not combine into a valid URL.
    #[error("Invalid request URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request never produced a response, or its body could not be read.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error(transparent)]
    Http(#[from] ApiError),
    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    /// A successful response body was not the expected JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Returns the normalized HTTP error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Http(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code of a normalized error.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }
}

/// A non-2xx response, normalized into a message, the status code, and any
/// field-level validation detail the server sent back.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message, always populated.
    pub message: String,
    /// Numeric HTTP status code.
    pub status: u16,
    /// The body's `errors` value, only when the body supplied one.
    pub errors: Option<Value>,
}

impl ApiError {
    /// Builds the error from a failed response's status line and raw body.
    ///
    /// The message falls back to `HTTP <status>: <status text>` whenever the
    /// body is empty, not JSON, or carries neither `errors` nor `message`.
    pub fn from_parts(status: u16, status_text: &str, body: &str) -> Self {
        let mut message = format!("HTTP {}: {}", status, status_text);
        let mut errors = None;

        // A body that is not JSON keeps the status-line message.
        if let Ok(parsed) = serde_json::from_str::<Value>(body) {
            if let Some(validation) = field(&parsed, "errors") {
                errors = Some(validation.clone());
                message = field(&parsed, "message")
                    .map(message_text)
                    .unwrap_or_else(|| VALIDATION_FAILED.to_string());
            } else if let Some(msg) = field(&parsed, "message") {
                message = message_text(msg);
            }
        }

        Self {
            message,
            status,
            errors,
        }
    }

    /// True when the server reported field-level validation errors.
    pub fn is_validation(&self) -> bool {
        self.errors.is_some()
    }

    /// Flattens `errors` into `(field, message)` pairs for display.
    ///
    /// Accepts `{"field": "msg"}`, `{"field": ["msg", ...]}` and
    /// `[{"field": "f", "message": "msg"}]` shapes. Anything else is
    /// rendered as a single entry with an empty field name.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Some(errors) = &self.errors else {
            return Vec::new();
        };
        match errors {
            Value::Object(map) => map
                .iter()
                .flat_map(|(name, detail)| match detail {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| (name.clone(), message_text(item)))
                        .collect::<Vec<_>>(),
                    other => vec![(name.clone(), message_text(other))],
                })
                .collect(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    let name = item
                        .get("field")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let detail = item
                        .get("message")
                        .or_else(|| item.get("defaultMessage"))
                        .map(message_text)
                        .unwrap_or_else(|| message_text(item));
                    (name, detail)
                })
                .collect(),
            other => vec![(String::new(), message_text(other))],
        }
    }
}

/// Looks up `key` on a JSON object, treating `null`, `false`, `0` and `""`
/// as missing.
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_from_body() {
        let err = ApiError::from_parts(404, "Not Found", r#"{"message":"User not found with id: 7"}"#);
        assert_eq!(err.message, "User not found with id: 7");
        assert_eq!(err.status, 404);
        assert!(err.errors.is_none());
    }

    #[test]
    fn validation_errors_with_message() {
        let body = r#"{"errors":{"name":["required"]},"message":"Validation failed"}"#;
        let err = ApiError::from_parts(422, "Unprocessable Entity", body);
        assert_eq!(err.message, "Validation failed");
        assert_eq!(err.status, 422);
        assert_eq!(err.errors, Some(json!({"name": ["required"]})));
        assert!(err.is_validation());
    }

    #[test]
    fn validation_errors_take_custom_message() {
        let body = r#"{"errors":{"email":"Email must be valid"},"message":"Check the form"}"#;
        let err = ApiError::from_parts(400, "Bad Request", body);
        assert_eq!(err.message, "Check the form");
    }

    #[test]
    fn validation_errors_without_message() {
        let err = ApiError::from_parts(400, "Bad Request", r#"{"errors":{"name":"Name is required"}}"#);
        assert_eq!(err.message, VALIDATION_FAILED);
        assert_eq!(err.errors, Some(json!({"name": "Name is required"})));
    }

    #[test]
    fn empty_message_with_errors_falls_back() {
        let err = ApiError::from_parts(400, "Bad Request", r#"{"errors":["bad"],"message":""}"#);
        assert_eq!(err.message, VALIDATION_FAILED);
    }

    #[test]
    fn empty_body_uses_status_line() {
        let err = ApiError::from_parts(404, "Not Found", "");
        assert_eq!(err.message, "HTTP 404: Not Found");
        assert_eq!(err.status, 404);
        assert!(err.errors.is_none());
    }

    #[test]
    fn non_json_body_uses_status_line() {
        let err = ApiError::from_parts(502, "Bad Gateway", "<html>upstream down</html>");
        assert_eq!(err.message, "HTTP 502: Bad Gateway");
        assert!(err.errors.is_none());
    }

    #[test]
    fn json_without_known_fields_uses_status_line() {
        let err = ApiError::from_parts(500, "Internal Server Error", r#"{"error":"boom"}"#);
        assert_eq!(err.message, "HTTP 500: Internal Server Error");

        let err = ApiError::from_parts(500, "Internal Server Error", r#"["boom"]"#);
        assert_eq!(err.message, "HTTP 500: Internal Server Error");
    }

    #[test]
    fn null_errors_are_ignored() {
        let err = ApiError::from_parts(409, "Conflict", r#"{"errors":null,"message":"Email already in use"}"#);
        assert_eq!(err.message, "Email already in use");
        assert!(err.errors.is_none());
    }

    #[test]
    fn non_string_message_is_rendered_as_json() {
        let err = ApiError::from_parts(400, "Bad Request", r#"{"message":42}"#);
        assert_eq!(err.message, "42");
    }

    #[test]
    fn display_is_the_message() {
        let err = ApiError::from_parts(404, "Not Found", "");
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(Error::Http(err).to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn field_errors_from_map_of_lists() {
        let err = ApiError::from_parts(
            422,
            "Unprocessable Entity",
            r#"{"errors":{"name":["required","too short"],"email":"Email must be valid"}}"#,
        );
        let mut fields = err.field_errors();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("email".to_string(), "Email must be valid".to_string()),
                ("name".to_string(), "required".to_string()),
                ("name".to_string(), "too short".to_string()),
            ]
        );
    }

    #[test]
    fn field_errors_from_spring_field_list() {
        let err = ApiError::from_parts(
            400,
            "Bad Request",
            r#"{"errors":[{"field":"title","defaultMessage":"Title is required"}]}"#,
        );
        assert_eq!(
            err.field_errors(),
            vec![("title".to_string(), "Title is required".to_string())]
        );
    }

    #[test]
    fn field_errors_empty_without_errors() {
        let err = ApiError::from_parts(500, "Internal Server Error", "");
        assert!(err.field_errors().is_empty());
        assert!(!err.is_validation());
    }

    #[test]
    fn error_accessors() {
        let err = Error::Http(ApiError::from_parts(403, "Forbidden", ""));
        assert_eq!(err.status(), Some(403));
        assert!(err.api_error().is_some());

        let decode = serde_json::from_str::<Value>("{").unwrap_err();
        let err = Error::Decode(decode);
        assert_eq!(err.status(), None);
    }
}
