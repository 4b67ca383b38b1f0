//! Turns failed responses into [`ApiError`]s
//!
//! Success is decided from the status class alone. Failure bodies are expected
//! to carry `{"error": {"status": 404, "message": "..."}}`. Bodies that don't
//! match still produce a readable message.

use crate::error::{ApiError, Error, Result};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Cap on how much of an undecodable body is echoed into the message
pub const MAX_ERROR_BODY_BYTES: usize = 512;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: u16,
}

/// Pass 2xx responses through; read and decode everything else
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.map_err(Error::Http)?;
    Err(Error::Api(decode_error(status, &body)))
}

/// Build the error for a failed response from its status and full body
pub fn decode_error(status: StatusCode, body: &[u8]) -> ApiError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown Status");

    if body.is_empty() {
        return ApiError::new(code, format!("HTTP {code}: {reason} (body empty)"));
    }

    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return ApiError::new(
            code,
            format!(
                "couldn't decode error: ({}) [{}]",
                body.len(),
                truncate_body(body)
            ),
        );
    };

    let status = match envelope.error.status {
        0 => code,
        s => s,
    };

    // A useful status with no message happens e.g. when the query string
    // grows too long; the caller would otherwise see nothing.
    if envelope.error.message.trim().is_empty() {
        return ApiError::new(
            status,
            format!("unexpected HTTP {code}: {reason} (empty error)"),
        );
    }

    ApiError::new(status, envelope.error.message)
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_ERROR_BODY_BYTES {
        return text.into_owned();
    }

    let mut end = MAX_ERROR_BODY_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
