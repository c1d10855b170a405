//! Immutable wrapper around one completed HTTP exchange.

use std::collections::HashMap;
use std::ops::Index;

use serde_json::Value;

/// Status, parsed body, and headers of a completed exchange.
///
/// `body` is the parsed JSON value when the payload was JSON, the raw text
/// as `Value::String` otherwise, and `Value::Null` for an empty payload.
/// Indexing forwards to the body, so `response["key"]` and `response[0]`
/// read straight into the JSON (missing keys yield `Value::Null`).
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    body: Value,
    headers: HashMap<String, String>,
}

impl Response {
    pub fn new(status: u16, body: Value, headers: HashMap<String, String>) -> Self {
        Self {
            status,
            body,
            headers,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Whether the status falls in the 100-399 range.
    ///
    /// Wider than the conventional 2xx/3xx: informational and redirect
    /// responses count as successful here. Callers wanting the narrow
    /// interpretation must check `status()` themselves.
    pub fn is_successful(&self) -> bool {
        (100..=399).contains(&self.status)
    }
}

impl<I> Index<I> for Response
where
    I: serde_json::value::Index,
{
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        &self.body[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16) -> Response {
        Response::new(status, json!({"key": "value"}), HashMap::new())
    }

    #[test]
    fn statuses_from_100_through_399_are_successful() {
        assert!(response(100).is_successful());
        assert!(response(200).is_successful());
        assert!(response(302).is_successful());
        assert!(response(399).is_successful());
    }

    #[test]
    fn statuses_outside_the_range_are_not() {
        assert!(!response(99).is_successful());
        assert!(!response(400).is_successful());
        assert!(!response(500).is_successful());
    }

    #[test]
    fn indexing_forwards_to_the_body() {
        let res = response(200);
        assert_eq!(res["key"], json!("value"));
    }

    #[test]
    fn indexing_a_missing_key_yields_null() {
        let res = response(200);
        assert_eq!(res["missing"], Value::Null);
    }

    #[test]
    fn array_bodies_index_by_position() {
        let res = Response::new(200, json!(["a", "b"]), HashMap::new());
        assert_eq!(res[1], json!("b"));
    }
}
