use serde_json::{Map, Value};

use crate::domain::ResponseData;

/// Field MSG91 uses to report request-level errors inside the payload.
const ERRORS_FIELD: &str = "errors";

#[derive(Debug)]
pub enum Failure {
    /// Non-empty body that is not JSON.
    Parse(serde_json::Error),
    /// Payload carries an `errors` field; holds its raw content.
    Application(Value),
    /// Status outside `200..=299`.
    HttpStatus,
}

#[derive(Debug)]
pub enum Classified {
    Success(Value),
    Failure { failure: Failure, data: ResponseData },
}

/// Classify a received response.
///
/// Precedence: parse failure, then an `errors` field, then the HTTP status.
/// An empty body counts as `{}`.
pub fn classify_response(status: u16, body: &str) -> Classified {
    let payload = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        match serde_json::from_str::<Value>(body) {
            Ok(payload) => payload,
            Err(err) => {
                return Classified::Failure {
                    failure: Failure::Parse(err),
                    data: ResponseData::Raw(body.to_owned()),
                };
            }
        }
    };

    let failure = if let Some(errors) = payload.get(ERRORS_FIELD) {
        Failure::Application(errors.clone())
    } else if !(200..=299).contains(&status) {
        Failure::HttpStatus
    } else {
        return Classified::Success(payload);
    };

    Classified::Failure {
        failure,
        data: ResponseData::Json(payload),
    }
}
