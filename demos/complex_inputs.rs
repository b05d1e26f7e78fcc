//! Multiple inputs, some of them files.
//!
//! The handler echoes the uploaded files back, trimmed and joined with
//! spaces, next to a greeting built from the JSON body.
//!
//! ```text
//! cargo run --example complex_inputs -- \
//!     -d request.json -H "Content-Type: multipart/form-data" -f a.txt -f b.txt
//! ```

use foundry_function::config::FileSystemConfigLoader;
use foundry_function::{Function, Logger, Request, Response};
use serde_json::{json, Map, Value};

const MAX_TEXT: usize = 10_000;

fn field(body: &Map<String, Value>, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "<unknown>".to_string(),
    }
}

fn complex_handler(request: Request, _config: &Option<Value>, logger: &Logger) -> Response {
    let greeting = format!(
        "Welcome {}, age {}",
        field(&request.body, "name"),
        field(&request.body, "age")
    );

    let contents: Vec<String> = request
        .files
        .values()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .collect();
    let all_text: String = contents.join(" ").chars().take(MAX_TEXT).collect();

    logger.info(format_args!("received {} file(s)", request.files.len()));

    let mut body = Map::new();
    body.insert("allText".into(), json!(all_text));
    body.insert("greeting".into(), json!(greeting));
    Response::with_body(200, body)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loader = FileSystemConfigLoader::<Value>::from_env();
    let mut function = Function::from_loader(&loader)?;
    function.handler("POST", "/complex-test", complex_handler)?;
    function.run().await?;
    Ok(())
}
