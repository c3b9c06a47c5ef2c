use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unexpected status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Maps a non-success backend status and its (possibly empty) JSON body.
    pub fn from_status(code: u16, body: &Value) -> Self {
        match code {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(
                detail(body).unwrap_or_else(|| "Permission denied".to_string()),
            ),
            404 => ApiError::NotFound,
            400 => ApiError::Validation(
                first_field_error(body).unwrap_or_else(|| "Invalid request".to_string()),
            ),
            _ => ApiError::Status {
                code,
                message: detail(body).unwrap_or_else(|| "Backend request failed".to_string()),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

fn detail(body: &Value) -> Option<String> {
    body.get("detail").and_then(Value::as_str).map(str::to_string)
}

/// First field-level message of a backend error payload such as
/// `{"username": ["already taken"]}`, falling back to `detail`.
pub fn first_field_error(body: &Value) -> Option<String> {
    let fields = body.as_object()?;

    fields
        .iter()
        .filter(|(field, _)| field.as_str() != "detail")
        .find_map(|(_, value)| match value {
            Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
            Value::String(message) => Some(message.clone()),
            _ => None,
        })
        .or_else(|| detail(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_error_preferred_over_generic() {
        let body = json!({ "username": ["A user with that username already exists."] });
        assert_eq!(
            ApiError::from_status(400, &body),
            ApiError::Validation("A user with that username already exists.".into())
        );
    }

    #[test]
    fn first_field_follows_payload_order() {
        let body: Value = serde_json::from_str(
            r#"{"username": ["username taken"], "email": ["bad email"]}"#,
        )
        .unwrap();

        assert_eq!(first_field_error(&body).as_deref(), Some("username taken"));
    }

    #[test]
    fn falls_back_to_detail_then_generic() {
        let body = json!({ "detail": "Bad payload" });
        assert_eq!(first_field_error(&body).as_deref(), Some("Bad payload"));

        assert_eq!(
            ApiError::from_status(400, &Value::Null),
            ApiError::Validation("Invalid request".into())
        );
    }

    #[test]
    fn unauthorized_is_distinct_from_other_statuses() {
        assert!(ApiError::from_status(401, &Value::Null).is_unauthorized());
        assert!(!ApiError::from_status(403, &Value::Null).is_unauthorized());
        assert!(matches!(
            ApiError::from_status(502, &Value::Null),
            ApiError::Status { code: 502, .. }
        ));
    }
}
