use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP response metadata as received from MSG91.
pub struct RawResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`; empty when the code has none.
    pub status_text: String,
    pub url: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Response data handed to a completion callback next to the error slot.
pub enum ResponseData {
    /// Parsed JSON payload. An empty body is reported as `{}`.
    Json(Value),
    /// Body that could not be parsed as JSON.
    Raw(String),
    /// No response was received.
    None,
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Typed view of the usual MSG91 OTP payload: `{"message": "...", "type": "success"}`.
///
/// MSG91 reports some failures (e.g. a wrong OTP on verify) as a 200 with `"type": "error"`;
/// those pass through the executor as success and are only visible here.
pub struct OtpResponse {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ResponseType,
}

impl OtpResponse {
    pub fn from_payload(payload: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(payload)
    }

    pub fn is_success(&self) -> bool {
        self.kind == ResponseType::Success
    }
}
