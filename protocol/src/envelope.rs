//! Response envelopes returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope: `{ success, data, token?, message? }`.
///
/// Login responses carry the issued `token` next to the user record in
/// `data`; every other endpoint leaves it empty. List endpoints may add a
/// `count` and a `pagination` block, both kept opaque.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T = Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Value>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("backend reported failure: {0}")]
    Unsuccessful(String),

    #[error("response envelope carries no data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            token: None,
            message: None,
            count: None,
            pagination: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Unwraps `data`, rejecting envelopes flagged `success: false`.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Unsuccessful(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}

/// Failure body: `{ success: false, message }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable text in the body, if any.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_login_envelope_with_token() {
        let raw = json!({
            "success": true,
            "data": { "id": "u1" },
            "token": "tok1"
        });

        let envelope: ApiEnvelope = serde_json::from_value(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.token.as_deref(), Some("tok1"));
        assert_eq!(envelope.data, Some(json!({ "id": "u1" })));
    }

    #[test]
    fn decodes_envelope_without_data() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.into_data(), Err(EnvelopeError::MissingData));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert_eq!(
            envelope.into_data(),
            Err(EnvelopeError::Unsuccessful("nope".to_string()))
        );
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"success":false,"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.text(), Some("Invalid credentials"));

        let blank: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(blank.text(), None);
    }
}
