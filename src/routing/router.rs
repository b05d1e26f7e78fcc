//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes keyed by path, then method
//! - Reject unsupported verbs and duplicate (method, path) pairs
//! - Look up the route for a request and invoke its handler
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards (shared without locks)
//! - Paths are compared by exact string equality, never normalized
//! - Explicit NotFound / MethodNotAllowed rather than a silent default

use std::collections::HashMap;

use crate::error::FnError;
use crate::model::{Request, Response};
use crate::observability::Logger;

use super::route::Route;

/// HTTP verbs a route may be registered for.
pub const SUPPORTED_METHODS: [&str; 7] = ["DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT"];

/// Upper-case and trim a method name.
pub fn normalize_method(method: &str) -> String {
    method.trim().to_uppercase()
}

/// Route table plus the configuration handed to handlers.
pub struct Router<C> {
    config: C,
    routes: HashMap<String, HashMap<String, Route<C>>>,
}

impl<C> Router<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            routes: HashMap::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Register a route.
    pub fn register(&mut self, mut route: Route<C>) -> Result<(), FnError> {
        route.method = normalize_method(&route.method);
        if !SUPPORTED_METHODS.contains(&route.method.as_str()) {
            return Err(FnError::UnsupportedMethod(route.method));
        }

        let methods = self.routes.entry(route.path.clone()).or_default();
        if methods.contains_key(&route.method) {
            return Err(FnError::DuplicateRoute {
                method: route.method,
                path: route.path,
            });
        }

        tracing::debug!(
            method = %route.method,
            path = %route.path,
            arity = ?route.arity(),
            "Route registered"
        );
        methods.insert(route.method.clone(), route);
        Ok(())
    }

    /// Dispatch a request to its registered handler.
    ///
    /// The handler's response is returned untouched; shaping it for the wire
    /// is left to the transport adapter.
    pub fn route(&self, request: Request, logger: &Logger) -> Result<Response, FnError> {
        let method = normalize_method(&request.method);

        let Some(methods) = self.routes.get(&request.url) else {
            return Err(FnError::NotFound {
                method,
                url: request.url,
            });
        };
        let Some(route) = methods.get(&method) else {
            return Err(FnError::MethodNotAllowed { method });
        };

        tracing::debug!(method = %method, path = %route.path, "Dispatching request");
        Ok(route.handler.call(request, &self.config, logger))
    }
}

impl<C> std::fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<_> = self.routes.values().flat_map(HashMap::values).collect();
        routes.sort_by(|a, b| (&a.path, &a.method).cmp(&(&b.path, &b.method)));
        f.debug_struct("Router").field("routes", &routes).finish()
    }
}
