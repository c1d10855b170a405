//! Fluent request builder and terminal execution.
//!
//! # Design
//! `Client` holds one logical request under construction: append-only path
//! fragments, insertion-ordered query state, and the options set at
//! construction. Chain methods mutate and return the same builder; the ten
//! terminal verb methods serialize the accumulated state into a URL and
//! delegate the exchange to the [`Transport`] collaborator. Nothing resets
//! after a terminal call — reusing a builder keeps accumulating onto the
//! prior URL, which is the caller's responsibility to avoid.
//!
//! Path segments are explicit calls: `fragment`/`fragment_with` append
//! segments, `query`/`raw_query` add parameters, and any mix of the four
//! can interleave freely within one chain.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, RequestError, Result};
use crate::http::{HttpRequest, Method, Transport};
use crate::response::Response;
use crate::transport::UreqTransport;

/// Configuration applied to every request a client performs.
///
/// `json = true` merges `Content-Type: application/json` and
/// `Accept: application/json` into the explicit headers at execution time;
/// the JSON pair wins on conflicting keys.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub headers: HashMap<String, String>,
    pub json: bool,
}

/// One query-string entry, in insertion order.
///
/// `Pair` entries overwrite in place when their key is re-added; the single
/// `Raw` entry accumulates pre-encoded fragments and keeps the position of
/// the first raw addition.
#[derive(Debug, Clone, PartialEq)]
enum QueryEntry {
    Pair { key: String, value: String },
    Raw(Vec<String>),
}

/// Fluent HTTP client: chain fragments and parameters, then finish with one
/// of the terminal verb calls.
///
/// ```no_run
/// use restchain_core::{Client, Options};
///
/// let mut client = Client::new("https://api.example.com", Options::default());
/// let response = client
///     .fragment_with("posts", [7])
///     .fragment("comments")
///     .query("page", 2)
///     .get()?;
/// assert!(response.is_successful());
/// # Ok::<(), restchain_core::Error>(())
/// ```
pub struct Client {
    base_uri: String,
    options: Options,
    fragments: Vec<String>,
    query: Vec<QueryEntry>,
    transport: Box<dyn Transport>,
}

impl Client {
    /// A client using the default [`UreqTransport`].
    pub fn new(base_uri: impl Into<String>, options: Options) -> Self {
        Self::with_transport(base_uri, options, Box::new(UreqTransport::new()))
    }

    /// A client delegating exchanges to the given transport.
    pub fn with_transport(
        base_uri: impl Into<String>,
        options: Options,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            base_uri: base_uri.into().trim_end_matches('/').to_string(),
            options,
            fragments: Vec::new(),
            query: Vec::new(),
            transport,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Append one path segment.
    ///
    /// Double underscores in `name` become hyphens (`sub__path` →
    /// `sub-path`); that is the only transform applied, in a single pass.
    pub fn fragment(&mut self, name: &str) -> &mut Self {
        self.fragment_with(name, std::iter::empty::<&str>())
    }

    /// Append one path segment followed by slash-joined positional values,
    /// forming a single combined component (`("posts", [7, 2])` →
    /// `posts/7/2`).
    pub fn fragment_with<I>(&mut self, name: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut component = name.replace("__", "-");
        for arg in args {
            component.push('/');
            component.push_str(&arg.to_string());
        }
        component.push('/');
        self.fragments.push(component);
        self
    }

    /// Add one plain query parameter, scoped to the whole request.
    ///
    /// Re-adding an existing key overwrites its value in place; the entry
    /// keeps its original position in the query string.
    pub fn query(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        for entry in &mut self.query {
            if let QueryEntry::Pair { key: k, value: v } = entry {
                if *k == key {
                    *v = value;
                    return self;
                }
            }
        }
        self.query.push(QueryEntry::Pair { key, value });
        self
    }

    /// Append one raw, pre-encoded query fragment.
    ///
    /// Raw fragments accumulate across calls and are embedded in the query
    /// string verbatim, joined by `&`, at the position of the first raw
    /// addition. The caller supplies ready `key=value` text; nothing is
    /// escaped or re-encoded.
    pub fn raw_query(&mut self, raw: impl Into<String>) -> &mut Self {
        let raw = raw.into();
        for entry in &mut self.query {
            if let QueryEntry::Raw(fragments) = entry {
                fragments.push(raw);
                return self;
            }
        }
        self.query.push(QueryEntry::Raw(vec![raw]));
        self
    }

    /// Serialize the accumulated state into the request URL.
    ///
    /// Pure function of the current state: fragments concatenate in
    /// insertion order (each already carries its trailing slash), query
    /// entries emit in insertion order joined by `&`. No percent-encoding
    /// is performed anywhere.
    pub fn url(&self) -> String {
        let path: String = self.fragments.concat();
        let pieces: Vec<String> = self
            .query
            .iter()
            .map(|entry| match entry {
                QueryEntry::Pair { key, value } => format!("{key}={value}"),
                QueryEntry::Raw(fragments) => fragments.join("&"),
            })
            .collect();
        let query_string = if pieces.is_empty() {
            String::new()
        } else {
            format!("?{}", pieces.join("&"))
        };
        format!("{}/{}{}", self.base_uri, path, query_string)
    }

    pub fn get(&self) -> Result<Response> {
        self.execute(Method::Get, empty_body())
    }

    pub fn delete(&self) -> Result<Response> {
        self.execute(Method::Delete, empty_body())
    }

    pub fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute(Method::Post, to_body(body)?)
    }

    pub fn put<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute(Method::Put, to_body(body)?)
    }

    pub fn patch<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute(Method::Patch, to_body(body)?)
    }

    /// Like [`get`](Self::get), but errors when the response is outside the
    /// 100-399 success range.
    pub fn get_strict(&self) -> Result<Response> {
        self.execute_strict(Method::Get, empty_body())
    }

    pub fn delete_strict(&self) -> Result<Response> {
        self.execute_strict(Method::Delete, empty_body())
    }

    pub fn post_strict<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute_strict(Method::Post, to_body(body)?)
    }

    pub fn put_strict<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute_strict(Method::Put, to_body(body)?)
    }

    pub fn patch_strict<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.execute_strict(Method::Patch, to_body(body)?)
    }

    /// Generic terminal call for any verb/body combination (e.g. a GET
    /// carrying a body).
    pub fn send<B: Serialize + ?Sized>(&self, method: Method, body: &B) -> Result<Response> {
        self.execute(method, to_body(body)?)
    }

    /// Strict variant of [`send`](Self::send).
    pub fn send_strict<B: Serialize + ?Sized>(&self, method: Method, body: &B) -> Result<Response> {
        self.execute_strict(method, to_body(body)?)
    }

    fn execute(&self, method: Method, body: Value) -> Result<Response> {
        let request = HttpRequest {
            method,
            url: self.url(),
            headers: self.request_headers(),
            body,
        };
        debug!("{} {}", request.method, request.url);
        match self.transport.perform(&request) {
            Ok(raw) => {
                trace!("{} {} -> {}", request.method, request.url, raw.status);
                Ok(Response::new(raw.status, raw.body, raw.headers))
            }
            Err(e) => Err(Error::Transport(RequestError::from(e))),
        }
    }

    fn execute_strict(&self, method: Method, body: Value) -> Result<Response> {
        let response = self.execute(method, body)?;
        if !response.is_successful() {
            let stringified = response.body().to_string();
            return Err(Error::Unsuccessful(RequestError {
                status: response.status(),
                body: Value::String(stringified.clone()),
                headers: response.headers().clone(),
                message: stringified,
            }));
        }
        Ok(response)
    }

    fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = self.options.headers.clone();
        if self.options.json {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
            headers.insert("Accept".to_string(), "application/json".to_string());
        }
        headers
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_uri", &self.base_uri)
            .field("options", &self.options)
            .field("fragments", &self.fragments)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| Error::Serialization(e.to_string()))
}
