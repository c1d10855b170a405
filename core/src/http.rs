//! HTTP exchange types and the transport seam.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. The client builds
//! an `HttpRequest` with a fully serialized URL and hands it to a
//! [`Transport`] implementation, which performs the round-trip and returns
//! an `HttpResponse`. Everything below the trait — sockets, TLS, connection
//! reuse, timeouts — is the transport's concern; the core never sees it.
//!
//! All fields use owned types (`String`, `HashMap`, `Value`) so exchanges
//! can be captured, logged, and compared in tests without lifetime plumbing.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`Client`](crate::Client) at terminal-call time. `url` is the
/// already-serialized request URL; no further escaping or rewriting is
/// expected from the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

/// An HTTP response described as plain data.
///
/// Produced by a [`Transport`] after executing an `HttpRequest`. `body`
/// holds the parsed JSON value when the payload was JSON, the raw text as
/// `Value::String` when it was not, and `Value::Null` for an empty payload.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
    pub headers: HashMap<String, String>,
}

/// What the client requires of an HTTP transport.
///
/// One blocking attempt per call; no retries, timeouts, or redirects are
/// expected at this layer. Implementations must return `Ok` for any
/// completed exchange regardless of status code — status interpretation
/// belongs to the caller — and `Err` only when the exchange itself could
/// not be completed.
pub trait Transport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
