use axum::{
    body::Bytes,
    extract::{Path, Request},
    http::StatusCode,
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// Echo server for exercising HTTP clients end-to-end.
///
/// Every request falls through to an echo handler that reports method,
/// path, query string, headers, and body as JSON, so a test can assert the
/// exact URL and payload a client produced on the wire. `/status/{code}`
/// instead answers with that status and a small JSON error body, driving
/// clients' failure paths.
pub fn app() -> Router {
    // Chained clients emit trailing slashes; register both shapes since
    // axum does not redirect between them.
    Router::new()
        .route("/status/{code}", any(simulate_status))
        .route("/status/{code}/", any(simulate_status))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(req: Request) -> Json<Value> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let mut headers = Map::new();
    for (name, value) in &parts.headers {
        headers.insert(
            name.as_str().to_string(),
            Value::String(value.to_str().unwrap_or_default().to_string()),
        );
    }

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query().unwrap_or(""),
        "headers": headers,
        "body": body_to_value(&bytes),
    }))
}

async fn simulate_status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": format!("simulated {code}") })))
}

/// Request bodies echo back as parsed JSON when possible, raw text
/// otherwise, and null when empty.
fn body_to_value(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(bytes).into_owned())
    })
}
