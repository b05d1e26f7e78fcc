//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app: one handler for every path
//! - Wire up middleware (tracing, body limit)
//! - Bind server to listener
//! - Dispatch requests to the function router
//! - Exit the process on a termination signal

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use super::request::read_request;
use super::response::into_http;
use crate::config::RunnerConfig;
use crate::context;
use crate::error::{FnError, ServerError};
use crate::lifecycle;
use crate::mapping::shape_response;
use crate::model::{Request, Response};
use crate::observability::Logger;
use crate::routing::{Router, SUPPORTED_METHODS};

/// Application state injected into the dispatch handler.
pub struct AppState<C> {
    pub router: Arc<Router<C>>,
    pub logger: Logger,
    pub max_body_size: usize,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            logger: self.logger.clone(),
            max_body_size: self.max_body_size,
        }
    }
}

/// Network server adapter for a function.
pub struct HttpServer<C> {
    router: Arc<Router<C>>,
    config: RunnerConfig,
    logger: Logger,
}

impl<C> HttpServer<C>
where
    C: Send + Sync + 'static,
{
    pub fn new(router: impl Into<Arc<Router<C>>>, config: RunnerConfig, logger: Logger) -> Self {
        Self {
            router: router.into(),
            config,
            logger,
        }
    }

    /// Build the Axum app with all middleware layers.
    pub fn app(&self) -> axum::Router {
        let state = AppState {
            router: Arc::clone(&self.router),
            logger: self.logger.clone(),
            max_body_size: self.config.max_body_size,
        };

        axum::Router::new()
            .fallback(dispatch::<C>)
            .with_state(state)
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on the given listener until the listener fails.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.router.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app()).await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Bind the configured address and serve until a termination signal,
    /// which exits the process without draining.
    pub async fn run(self) -> Result<(), ServerError> {
        self.config.validate()?;
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;

        tokio::select! {
            result = self.serve(listener) => result,
            signal = lifecycle::wait_for_termination() => lifecycle::exit_now(signal),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

/// Handle one inbound call: read, route, shape, write.
async fn dispatch<C>(
    State(state): State<AppState<C>>,
    request: axum::extract::Request,
) -> axum::response::Response
where
    C: Send + Sync + 'static,
{
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "fn_request",
        request_id = %request_id,
        http_method = %request.method(),
    );

    async move {
        tracing::debug!("Received request");

        if !SUPPORTED_METHODS.contains(&request.method().as_str()) {
            tracing::warn!("Unsupported HTTP method");
            let error = FnError::NotImplemented(request.method().to_string());
            return into_http(shape_response(&BTreeMap::new(), Err(error)));
        }

        let fn_request = match read_request(request, &state, state.max_body_size).await {
            Ok(fn_request) => fn_request,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read request");
                return into_http(shape_response(&BTreeMap::new(), Err(e)));
            }
        };

        let header = fn_request.params.header.clone();
        let method = fn_request.method.clone();
        let url = fn_request.url.clone();

        let outcome = invoke(&state, fn_request).await;
        let wire = shape_response(&header, outcome);

        tracing::info!(method = %method, url = %url, code = wire.status, "Request handled");
        into_http(wire)
    }
    .instrument(span)
    .await
}

/// Run the router off the async workers, inside the request slot.
///
/// The slot holds the full request, files included. A handler panic is
/// resumed on this task.
async fn invoke<C>(state: &AppState<C>, request: Request) -> Result<Response, FnError>
where
    C: Send + Sync + 'static,
{
    let slot = Arc::new(request.clone());

    let router = Arc::clone(&state.router);
    let logger = state.logger.clone();
    let task = tokio::task::spawn_blocking(move || {
        context::scope(slot, || router.route(request, &logger))
    });

    match task.await {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(FnError::InternalResponseType(format!(
            "Handler did not complete: {e}"
        ))),
    }
}
