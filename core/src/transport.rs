//! Default blocking transport backed by ureq.
//!
//! # Design
//! The agent is configured with `http_status_as_error(false)` so 4xx/5xx
//! responses come back as data rather than `Err` — status interpretation
//! belongs to the client, not the transport. Request headers are applied
//! verbatim. A `Null` or empty-object body means "no payload"; anything
//! else is sent as compact JSON text.

use std::collections::HashMap;

use log::trace;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Method, Transport};

/// [`Transport`] implementation using a blocking [`ureq::Agent`].
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let payload = payload(&request.body);

        let result = match request.method {
            Method::Get | Method::Delete => {
                let mut builder = match request.method {
                    Method::Get => self.agent.get(&request.url),
                    _ => self.agent.delete(&request.url),
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match payload {
                    Some(body) => builder.force_send_body().send(body.as_bytes()),
                    None => builder.call(),
                }
            }
            Method::Post | Method::Put | Method::Patch => {
                let mut builder = match request.method {
                    Method::Post => self.agent.post(&request.url),
                    Method::Put => self.agent.put(&request.url),
                    _ => self.agent.patch(&request.url),
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match payload {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::message_only(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError {
                message: e.to_string(),
                status: Some(status),
                body: None,
                headers: Some(headers.clone()),
            })?;
        trace!("{} -> {} ({} bytes)", request.url, status, text.len());

        Ok(HttpResponse {
            status,
            body: parse_body(&text),
            headers,
        })
    }
}

/// JSON text to send, or `None` when the body carries nothing.
fn payload(body: &Value) -> Option<String> {
    match body {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Parse the body as JSON when possible, keep the raw text otherwise.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
