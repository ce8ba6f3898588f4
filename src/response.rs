use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Envelope code and message substring that identify a duplicate upload
const DUPLICATE_CODE: i32 = 409;
const DUPLICATE_MESSAGE: &str = "This photo already exists";

/// Decoded response envelope.
///
/// Every server reply wraps its payload as
/// `{"code": <int>, "message": <string>, "result": <any>}`, independent of
/// the HTTP status line.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Status code reported by the server (authoritative over the HTTP status)
    pub code: i32,
    /// Human-readable status message
    pub message: String,
    /// Endpoint-specific payload
    #[serde(default)]
    pub result: Value,
}

/// Decode a response body, enforcing the error taxonomy.
///
/// The 404 check runs before JSON parsing and wins even over a valid
/// envelope. Once parsing succeeds the envelope's own `code` is
/// authoritative: an HTTP/envelope mismatch is resolved in the envelope's
/// favor.
pub(crate) fn process_response(status: StatusCode, body: &str) -> Result<Envelope> {
    if status == StatusCode::NOT_FOUND {
        return Err(Error::not_found(status));
    }

    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            if status.is_success() {
                // A successful transport returning a non-envelope body is a
                // server contract violation, surfaced as the raw parse error
                return Err(Error::Json(err));
            }
            return Err(Error::from_status(status));
        }
    };

    if (200..300).contains(&envelope.code) {
        Ok(envelope)
    } else if envelope.code == DUPLICATE_CODE && envelope.message.contains(DUPLICATE_MESSAGE) {
        Err(Error::Duplicate {
            code: envelope.code,
            message: envelope.message,
        })
    } else {
        Err(Error::Api {
            code: envelope.code,
            message: envelope.message,
        })
    }
}

/// Normalize a list-shaped `result` payload.
///
/// The server reports "no items" either as an empty/absent result or as a
/// single placeholder row carrying `"totalRows": 0`; both become an empty
/// vector. Anything else passes through untouched.
pub fn result_to_list(result: Value) -> Vec<Value> {
    match result {
        Value::Array(items) => {
            let total_rows = items
                .first()
                .and_then(|item| item.get("totalRows"))
                .and_then(Value::as_i64);
            if total_rows == Some(0) {
                Vec::new()
            } else {
                items
            }
        }
        _ => Vec::new(),
    }
}
