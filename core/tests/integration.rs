//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the echo server on a random port, then drives the client through
//! real HTTP using the default ureq transport. The echo payload reports the
//! method, path, query string, headers, and body the server actually
//! received, so these tests pin the exact bytes-on-the-wire URL the builder
//! produced; `/status/{code}` routes drive the strict and non-strict
//! failure paths.

use std::collections::HashMap;

use restchain_core::{Client, Error, Method, Options, Response, Service, ServiceClient};

/// Boot the mock server on a random port and return its base URI.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base: &str) -> Client {
    Client::new(base, Options::default())
}

fn assert_echo(response: &Response, method: &str, path: &str, query: &str) {
    assert_eq!(response.status(), 200);
    assert_eq!(response["method"], method, "method");
    assert_eq!(response["path"], path, "path");
    assert_eq!(response["query"], query, "query string");
}

// --- URL construction over the wire ---

#[test]
fn chained_fragments_and_params_reach_the_server() {
    let base = spawn_server();
    let mut c = client(&base);

    let response = c
        .fragment_with("posts", [7])
        .fragment("comments")
        .query("page", 2)
        .get()
        .unwrap();

    assert_echo(&response, "GET", "/posts/7/comments/", "page=2");
}

#[test]
fn bare_terminal_call_hits_the_root() {
    let base = spawn_server();
    let response = client(&base).get().unwrap();
    assert_echo(&response, "GET", "/", "");
}

#[test]
fn raw_query_fragments_arrive_verbatim() {
    let base = spawn_server();
    let mut c = client(&base);

    let response = c
        .fragment("search")
        .raw_query("key=1&key=2")
        .query("param", "value")
        .get()
        .unwrap();

    assert_echo(&response, "GET", "/search/", "key=1&key=2&param=value");
}

#[test]
fn post_body_round_trips_as_json() {
    let base = spawn_server();
    let mut c = client(&base);

    let response = c
        .fragment("items")
        .post(&serde_json::json!({"title": "hello"}))
        .unwrap();

    assert_echo(&response, "POST", "/items/", "");
    assert_eq!(response["body"]["title"], "hello");
}

#[test]
fn put_patch_and_delete_dispatch_their_verbs() {
    let base = spawn_server();
    let mut c = client(&base);
    c.fragment("items");

    let body = serde_json::json!({"done": true});
    assert_eq!(c.put(&body).unwrap()["method"], "PUT");
    assert_eq!(c.patch(&body).unwrap()["method"], "PATCH");
    assert_eq!(c.delete().unwrap()["method"], "DELETE");
}

#[test]
fn send_carries_a_body_on_get() {
    let base = spawn_server();
    let response = client(&base)
        .send(Method::Get, &serde_json::json!({"q": "term"}))
        .unwrap();

    assert_eq!(response["method"], "GET");
    assert_eq!(response["body"]["q"], "term");
}

// --- headers ---

#[test]
fn json_option_sets_content_type_and_accept() {
    let base = spawn_server();
    let options = Options {
        json: true,
        ..Options::default()
    };
    let response = Client::new(&base, options).get().unwrap();

    // Header names echo lowercased on the wire.
    assert_eq!(response["headers"]["content-type"], "application/json");
    assert_eq!(response["headers"]["accept"], "application/json");
}

#[test]
fn explicit_headers_reach_the_server() {
    let base = spawn_server();
    let mut headers = HashMap::new();
    headers.insert("X-Request-Id".to_string(), "abc-123".to_string());
    let options = Options {
        headers,
        json: false,
    };
    let response = Client::new(&base, options).get().unwrap();

    assert_eq!(response["headers"]["x-request-id"], "abc-123");
}

// --- failure paths ---

#[test]
fn non_strict_call_hands_back_the_failed_response() {
    let base = spawn_server();
    let mut c = client(&base);

    let response = c.fragment_with("status", [500]).get().unwrap();
    assert!(!response.is_successful());
    assert_eq!(response.status(), 500);
    assert_eq!(response["error"], "simulated 500");
}

#[test]
fn strict_call_errors_on_a_500() {
    let base = spawn_server();
    let mut c = client(&base);

    let err = c.fragment_with("status", [500]).get_strict().unwrap_err();
    match err {
        Error::Unsuccessful(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(
                e.body,
                serde_json::Value::String(r#"{"error":"simulated 500"}"#.to_string())
            );
            assert!(e.headers.contains_key("content-type"));
        }
        other => panic!("expected Unsuccessful, got {other:?}"),
    }
}

#[test]
fn strict_call_passes_a_redirect_status_through() {
    // 399 is inside the deliberately wide 100-399 success range.
    let base = spawn_server();
    let mut c = client(&base);

    let response = c.fragment_with("status", [399]).get_strict().unwrap();
    assert_eq!(response.status(), 399);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so the port is closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let c = client(&format!("http://{addr}"));
    match c.get().unwrap_err() {
        Error::Transport(e) => assert_eq!(e.status, 0),
        other => panic!("expected Transport, got {other:?}"),
    }
}

// --- service wrapper ---

struct EchoService {
    base: String,
}

impl Service for EchoService {
    fn base_uri(&self) -> String {
        self.base.clone()
    }

    fn options(&self) -> Options {
        Options {
            json: true,
            ..Options::default()
        }
    }
}

#[test]
fn service_wrapper_is_interchangeable_with_a_raw_client() {
    let base = spawn_server();
    let mut svc = ServiceClient::new(EchoService { base });

    let response = svc.fragment("users").query("active", true).get().unwrap();
    assert_echo(&response, "GET", "/users/", "active=true");
    assert_eq!(response["headers"]["content-type"], "application/json");
}
