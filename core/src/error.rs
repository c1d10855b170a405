//! Error types for the client.
//!
//! # Design
//! Two failure kinds exist: the transport itself failing to complete an
//! exchange, and a strict terminal call observing an unsuccessful status.
//! Both carry a [`RequestError`] with as much of {status, body, headers} as
//! was available at failure time; a pure transport failure synthesizes
//! `status = 0`, a `Null` body, and empty headers. Non-strict calls never
//! fail on status — an unsuccessful response comes back as an ordinary
//! [`Response`](crate::Response) for the caller to inspect.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by terminal calls.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport collaborator failed to complete the exchange.
    #[error("transport failed: {0}")]
    Transport(RequestError),

    /// A strict terminal call observed a response outside the 100-399
    /// success range.
    #[error("unsuccessful response: {0}")]
    Unsuccessful(RequestError),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// The status code attached to the failure, if a response existed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(e) | Error::Unsuccessful(e) if e.status != 0 => Some(e.status),
            _ => None,
        }
    }
}

/// Details of a failed request: status, body, and headers as available at
/// the moment of failure, plus a human-readable message.
#[derive(Debug, Clone)]
pub struct RequestError {
    pub status: u16,
    pub body: Value,
    pub headers: HashMap<String, String>,
    pub message: String,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == 0 {
            f.write_str(&self.message)
        } else {
            write!(f, "HTTP {}: {}", self.status, self.message)
        }
    }
}

/// Failure signaled by a [`Transport`](crate::Transport) implementation.
///
/// `status`/`body`/`headers` are populated when the failure produced a
/// partial exchange the transport could still observe; a failure before any
/// response existed carries the message alone.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub headers: Option<HashMap<String, String>>,
}

impl TransportError {
    /// A transport failure with no observable exchange behind it.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
            headers: None,
        }
    }
}

impl From<TransportError> for RequestError {
    fn from(e: TransportError) -> Self {
        RequestError {
            status: e.status.unwrap_or(0),
            body: e.body.unwrap_or(Value::Null),
            headers: e.headers.unwrap_or_default(),
            message: e.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_transport_failure_lowers_to_defaults() {
        let err = RequestError::from(TransportError::message_only("connection refused"));
        assert_eq!(err.status, 0);
        assert_eq!(err.body, Value::Null);
        assert!(err.headers.is_empty());
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn transport_failure_keeps_partial_exchange_data() {
        let err = RequestError::from(TransportError {
            message: "bad gateway".to_string(),
            status: Some(502),
            body: Some(Value::String("upstream down".to_string())),
            headers: None,
        });
        assert_eq!(err.status, 502);
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }

    #[test]
    fn error_status_is_none_without_a_response() {
        let err = Error::Transport(RequestError::from(TransportError::message_only("timed out")));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_status_comes_from_the_response() {
        let err = Error::Unsuccessful(RequestError {
            status: 404,
            body: Value::Null,
            headers: HashMap::new(),
            message: "null".to_string(),
        });
        assert_eq!(err.status(), Some(404));
    }
}
