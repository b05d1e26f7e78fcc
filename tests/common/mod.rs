//! Shared utilities for integration testing.

use std::net::SocketAddr;

use foundry_function::config::RunnerConfig;
use foundry_function::http::HttpServer;
use foundry_function::{Logger, Request, Response, Route, Router};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub fn test_config() -> Value {
    json!({"a": "b"})
}

fn body_of(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn do_request1(req: Request) -> Response {
    Response::with_body(200, body_of(json!({"req": req.body})))
}

fn do_request2(req: Request, config: &Value) -> Response {
    Response::with_body(200, body_of(json!({"config": config, "req": req.body})))
}

fn do_request3(req: Request, config: &Value, logger: &Logger) -> Response {
    Response::with_body(
        200,
        body_of(json!({"config": config, "logger": logger.name(), "req": req.body})),
    )
}

fn do_request4(req: Request) -> Response {
    Response::with_body(
        200,
        body_of(json!({
            "req_body": req.body,
            "req_headers": req.params.header,
            "req_query": req.params.query,
        })),
    )
}

fn do_files(req: Request) -> Response {
    let names: Vec<&String> = req.files.keys().collect();
    let text: Vec<String> = req
        .files
        .values()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .collect();
    Response::with_body(200, body_of(json!({"names": names, "allText": text.join(" ")})))
}

fn do_errors(_req: Request) -> Response {
    let mut response = Response::with_errors(vec![
        foundry_function::APIError::new(404, "missing"),
        foundry_function::APIError::new(409, "conflict"),
    ]);
    response.add_header("x-handler", "yes");
    response
}

/// Router with one handler per arity plus a few behaviour checks.
pub fn test_router() -> Router<Value> {
    let mut router = Router::new(test_config());
    router.register(Route::new("POST", "/request1", do_request1)).unwrap();
    router.register(Route::new("POST", "/request2", do_request2)).unwrap();
    router.register(Route::new("POST", "/request3", do_request3)).unwrap();
    router.register(Route::new("POST", "/request4", do_request4)).unwrap();
    router.register(Route::new("POST", "/files", do_files)).unwrap();
    router.register(Route::new("GET", "/errors", do_errors)).unwrap();
    router
}

pub fn test_logger() -> Logger {
    Logger::new("test-logger")
}

/// Start the HTTP adapter on an ephemeral local port.
#[allow(dead_code)]
pub async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(test_router(), RunnerConfig::default(), test_logger());

    tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });
    addr
}
