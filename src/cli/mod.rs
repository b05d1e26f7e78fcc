//! Offline runner: invoke a handler from a request file, no server.
//!
//! # Data Flow
//! ```text
//! --data request.json  ─┐
//! --header "Name: v"   ─┼─→ Request (mapping) → Router::route
//! --file path          ─┘        → mapping::shape_response → text on stdout
//! ```
//!
//! # Design Decisions
//! - Argument problems are reported as `CliError`, never as a shaped response
//! - Headers given on the command line replace the file's values for that key

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;

use crate::context;
use crate::error::CliError;
use crate::mapping::{canonicalize_header, dict_to_request, shape_response, WireResponse, CONTENT_TYPE_JSON};
use crate::model::Request;
use crate::observability::Logger;
use crate::routing::Router;

/// Command-line arguments of the offline runner.
#[derive(Debug, Clone, Parser)]
#[command(
    about = "Invoke the function handler with the provided input without starting an HTTP server",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a JSON file containing "method", "url", and optionally "body" and "params"
    #[arg(short = 'd', long = "data")]
    pub data: PathBuf,

    /// HTTP request header made available to the handler, "<Name>: <value>"
    #[arg(short = 'H', long = "header")]
    pub header: Vec<String>,

    /// File input; requires -H "Content-Type: multipart/form-data"
    #[arg(short = 'f', long = "file")]
    pub file: Vec<PathBuf>,
}

/// Split a `"<Name>: <value>"` argument.
///
/// The name is trimmed and lower-cased, the value trimmed.
pub fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [name, value] = parts.as_slice() else {
        return Err(CliError::InvalidHeader(raw.to_string()));
    };
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(CliError::InvalidHeader(raw.to_string()));
    }
    Ok((name, value.trim().to_string()))
}

/// Runs one request from the command line against a router.
#[derive(Debug, Clone)]
pub struct CliRunner {
    args: CliArgs,
    headers: BTreeMap<String, Vec<String>>,
}

impl CliRunner {
    /// Validate parsed arguments.
    pub fn new(args: CliArgs) -> Result<Self, CliError> {
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for raw in &args.header {
            let (name, value) = parse_header(raw)?;
            headers.entry(name).or_default().push(value);
        }

        let runner = Self { args, headers };
        if !runner.args.file.is_empty() && !runner.is_multipart() {
            return Err(CliError::MultipartRequired);
        }
        Ok(runner)
    }

    /// Parse and validate arguments; the first item is the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::new(CliArgs::try_parse_from(args)?)
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|values| values.first())
            .map_or(CONTENT_TYPE_JSON, String::as_str)
    }

    fn is_multipart(&self) -> bool {
        self.content_type()
            .to_ascii_lowercase()
            .starts_with("multipart/form-data")
    }

    /// Build the request from the data file, headers and files.
    pub fn read_request(&self) -> Result<Request, CliError> {
        let path = self.args.data.display().to_string();
        let raw = std::fs::read(&self.args.data).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let payload = match serde_json::from_slice(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(CliError::NotAnObject(path)),
            Err(source) => return Err(CliError::Json { path, source }),
        };

        let mut request = dict_to_request(payload)?;
        for (name, values) in &self.headers {
            request
                .params
                .header
                .insert(canonicalize_header(name), values.clone());
        }

        if self.is_multipart() {
            for file in &self.args.file {
                let key = file.display().to_string();
                let bytes = std::fs::read(file).map_err(|source| CliError::Read {
                    path: key.clone(),
                    source,
                })?;
                request.files.insert(key, bytes);
            }
        }

        Ok(request)
    }

    /// Execute the request and write the shaped response to `out`.
    pub fn run<C>(&self, router: &Router<C>, logger: &Logger, out: &mut impl Write) -> Result<(), CliError> {
        logger.info("Running without HTTP server");

        let wire = match self.read_request() {
            Ok(request) => dispatch(router, logger, request),
            Err(CliError::Mapping(e)) => shape_response(&BTreeMap::new(), Err(e)),
            Err(e) => return Err(e),
        };

        tracing::info!(code = wire.status, "Request handled");
        write_response(out, &wire)?;
        Ok(())
    }
}

fn dispatch<C>(router: &Router<C>, logger: &Logger, request: Request) -> WireResponse {
    let header = request.params.header.clone();

    let slot = Arc::new(request.clone());
    let outcome = context::scope(slot, || router.route(request, logger));

    shape_response(&header, outcome)
}

/// Write a shaped response as the runner's text report.
pub fn write_response(out: &mut impl Write, wire: &WireResponse) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Status code: {}", wire.status)?;
    writeln!(out, "Response Header: Content-Length: {}", wire.content_length())?;
    writeln!(out, "Response Header: Content-Type: {CONTENT_TYPE_JSON}")?;
    for (key, value) in &wire.headers {
        writeln!(out, "Response Header: {key}: {value}")?;
    }
    writeln!(out, "Response Payload:")?;
    writeln!(out, "{}", wire.payload)?;
    out.flush()
}
