use http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error carrying an HTTP status and a client-facing JSON payload
///
/// Route handlers return this (boxed) to pick the exact response the
/// caller sees. The JSON representation is `{"message": ..}` merged with
/// any additional fields; the plain-text representation is the message
/// alone. The status is echoed verbatim — whether it is actually sent to
/// the client is decided by the normalization layer's exposure policy,
/// not by this type.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Rejection {
    status: StatusCode,
    message: String,
    fields: Map<String, Value>,
}

impl Rejection {
    /// Create a rejection with a status and a human-readable message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: Map::new(),
        }
    }

    /// Attach one additional field to the JSON payload
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attach additional fields to the JSON payload
    ///
    /// Later keys win: a field literally named `"message"` overrides the
    /// base message in the payload.
    #[must_use]
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Intended HTTP status
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable summary, doubling as the plain-text body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Merged JSON payload: the base message plus any additional fields,
    /// with fields winning on a key collision
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("message".to_owned(), Value::String(self.message.clone()));
        for (key, value) in &self.fields {
            payload.insert(key.clone(), value.clone());
        }
        payload
    }
}

/// Error carrying an HTTP status but no JSON payload
///
/// The minimal status-bearing error: normalization echoes the status and
/// sends the message as plain text, never as JSON. Useful for failures
/// that have a clear status but no structured body worth building.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StatusError {
    status: StatusCode,
    message: String,
}

impl StatusError {
    /// Create a status-bearing error with a plain message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Intended HTTP status
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Plain-text message
    pub fn message(&self) -> &str {
        &self.message
    }
}
