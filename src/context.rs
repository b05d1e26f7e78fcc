//! Request-scoped ambient context.
//!
//! # Responsibilities
//! - Hold the inbound `Request` for the duration of one dispatch
//! - Give code outside the handler's parameter list (logging, helpers that
//!   need the caller's token) read access to it
//!
//! # Design Decisions
//! - One slot per task via `tokio::task_local!`, never a process-wide global
//! - The slot is set by the transport adapter before the router is called and
//!   disappears when the dispatch returns

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::model::Request;

tokio::task_local! {
    static CURRENT_REQUEST: Arc<Request>;
}

/// Errors reading the ambient request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no request is in scope")]
    NoRequest,

    #[error("request must have an access token")]
    MissingAccessToken,
}

/// Run `f` synchronously with `request` as the current request.
pub fn scope<F, R>(request: Arc<Request>, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT_REQUEST.sync_scope(request, f)
}

/// Run a future with `request` as the current request.
pub async fn scope_async<F>(request: Arc<Request>, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_REQUEST.scope(request, future).await
}

/// The request being handled by the current task, if any, files included.
pub fn current_request() -> Option<Arc<Request>> {
    CURRENT_REQUEST.try_with(Arc::clone).ok()
}

/// The caller's access token.
///
/// Fails outside a request scope or when the token is blank. The token is
/// passed through as received; it is not validated.
pub fn access_token() -> Result<String, ContextError> {
    let request = current_request().ok_or(ContextError::NoRequest)?;
    let token = request.access_token.trim();
    if token.is_empty() {
        return Err(ContextError::MissingAccessToken);
    }
    Ok(token.to_string())
}
