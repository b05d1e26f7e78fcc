//! Route definitions and handler arity classification.
//!
//! # Design Decisions
//! - Arity is fixed once, when the handler is turned into a `Handler`, from
//!   the handler's parameter list; dispatch is a plain match on the variant
//! - `IntoHandler` is implemented for every supported signature, so plain
//!   functions register without naming their arity

use std::fmt;

use crate::model::{Request, Response};
use crate::observability::Logger;

/// Which of {request, config, logger} a handler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    RequestOnly,
    RequestConfig,
    RequestConfigLogger,
}

type RequestFn = dyn Fn(Request) -> Response + Send + Sync;
type RequestConfigFn<C> = dyn Fn(Request, &C) -> Response + Send + Sync;
type RequestConfigLoggerFn<C> = dyn Fn(Request, &C, &Logger) -> Response + Send + Sync;

/// A type-erased function handler tagged by its arity.
pub enum Handler<C> {
    RequestOnly(Box<RequestFn>),
    RequestConfig(Box<RequestConfigFn<C>>),
    RequestConfigLogger(Box<RequestConfigLoggerFn<C>>),
}

impl<C> Handler<C> {
    pub fn arity(&self) -> Arity {
        match self {
            Handler::RequestOnly(_) => Arity::RequestOnly,
            Handler::RequestConfig(_) => Arity::RequestConfig,
            Handler::RequestConfigLogger(_) => Arity::RequestConfigLogger,
        }
    }

    pub(crate) fn call(&self, request: Request, config: &C, logger: &Logger) -> Response {
        match self {
            Handler::RequestOnly(f) => f(request),
            Handler::RequestConfig(f) => f(request, config),
            Handler::RequestConfigLogger(f) => f(request, config, logger),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.arity()).finish()
    }
}

/// Conversion of a function into a `Handler`.
///
/// `Args` only disambiguates the supported signatures and is inferred.
pub trait IntoHandler<C, Args> {
    fn into_handler(self) -> Handler<C>;
}

impl<C, F> IntoHandler<C, (Request,)> for F
where
    F: Fn(Request) -> Response + Send + Sync + 'static,
{
    fn into_handler(self) -> Handler<C> {
        Handler::RequestOnly(Box::new(self))
    }
}

impl<C, F> IntoHandler<C, (Request, C)> for F
where
    F: Fn(Request, &C) -> Response + Send + Sync + 'static,
{
    fn into_handler(self) -> Handler<C> {
        Handler::RequestConfig(Box::new(self))
    }
}

impl<C, F> IntoHandler<C, (Request, C, Logger)> for F
where
    F: Fn(Request, &C, &Logger) -> Response + Send + Sync + 'static,
{
    fn into_handler(self) -> Handler<C> {
        Handler::RequestConfigLogger(Box::new(self))
    }
}

impl<C> IntoHandler<C, Handler<C>> for Handler<C> {
    fn into_handler(self) -> Handler<C> {
        self
    }
}

/// A (method, path, handler) binding.
///
/// The method is stored as given; the router normalizes it on registration.
pub struct Route<C> {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) handler: Handler<C>,
}

impl<C> Route<C> {
    pub fn new<H, Args>(method: impl Into<String>, path: impl Into<String>, handler: H) -> Self
    where
        H: IntoHandler<C, Args>,
    {
        Self {
            method: method.into(),
            path: path.into(),
            handler: handler.into_handler(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn arity(&self) -> Arity {
        self.handler.arity()
    }
}

impl<C> fmt::Debug for Route<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("arity", &self.arity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_request(_: Request) -> Response {
        Response::with_body(200, Default::default())
    }

    fn with_config(_: Request, _: &String) -> Response {
        Response::with_body(200, Default::default())
    }

    fn with_config_and_logger(_: Request, _: &String, _: &Logger) -> Response {
        Response::with_body(200, Default::default())
    }

    #[test]
    fn arity_follows_signature() {
        let r: Route<String> = Route::new("GET", "/a", only_request);
        assert_eq!(r.arity(), Arity::RequestOnly);

        let r: Route<String> = Route::new("GET", "/b", with_config);
        assert_eq!(r.arity(), Arity::RequestConfig);

        let r: Route<String> = Route::new("GET", "/c", with_config_and_logger);
        assert_eq!(r.arity(), Arity::RequestConfigLogger);
    }

    #[test]
    fn closures_register() {
        let r: Route<u32> = Route::new("POST", "/d", |req: Request, cfg: &u32| {
            let mut resp = Response::with_body(200, req.body);
            resp.add_header("X-Config", cfg.to_string());
            resp
        });
        assert_eq!(r.arity(), Arity::RequestConfig);

        let resp = r.handler.call(Request::default(), &7, &Logger::default());
        assert_eq!(resp.header["X-Config"], vec!["7"]);
    }

    #[test]
    fn debug_hides_handler() {
        let r: Route<()> = Route::new("GET", "/a", only_request);
        assert_eq!(
            format!("{r:?}"),
            "Route { method: \"GET\", path: \"/a\", arity: RequestOnly }"
        );
    }
}
