//! Function facade: register handlers once, then run under either adapter.
//!
//! # Data Flow
//! ```text
//! Function::new(config) / Function::from_loader(loader)
//!     → handler(method, path, f) ...     (route table built once)
//!     → run()
//!         args present → cli::CliRunner  (one request, report on stdout)
//!         no args      → http::HttpServer (until a termination signal)
//! ```

use std::ffi::OsString;

use crate::cli::CliRunner;
use crate::config::{ConfigError, ConfigLoader, RunnerConfig};
use crate::error::{CliError, FnError, RunError, ServerError};
use crate::http::HttpServer;
use crate::observability::{init_logging, Logger};
use crate::routing::{IntoHandler, Route, Router};

/// A set of handlers sharing one configuration value.
pub struct Function<C> {
    router: Router<C>,
    logger: Logger,
    runner_config: Option<RunnerConfig>,
}

impl<C> Function<C>
where
    C: Send + Sync + 'static,
{
    pub fn new(config: C) -> Self {
        Self {
            router: Router::new(config),
            logger: Logger::default(),
            runner_config: None,
        }
    }

    /// Create a function whose configuration comes from `loader`.
    pub fn from_loader<L>(loader: &L) -> Result<Self, ConfigError>
    where
        L: ConfigLoader<Config = C>,
    {
        Ok(Self::new(loader.load()?))
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Use fixed runner settings instead of reading them from the environment.
    pub fn with_runner_config(mut self, config: RunnerConfig) -> Self {
        self.runner_config = Some(config);
        self
    }

    /// Register a handler for `(method, path)`.
    pub fn handler<H, Args>(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handler: H,
    ) -> Result<&mut Self, FnError>
    where
        H: IntoHandler<C, Args>,
    {
        self.router.register(Route::new(method, path, handler))?;
        Ok(self)
    }

    pub fn router(&self) -> &Router<C> {
        &self.router
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run with the process arguments: the offline runner when any are
    /// given, the HTTP server otherwise.
    pub async fn run(self) -> Result<(), RunError> {
        let runner_config = match &self.runner_config {
            Some(config) => config.clone(),
            None => RunnerConfig::from_env()?,
        };
        init_logging(runner_config.log_level.as_deref());

        let args: Vec<OsString> = std::env::args_os().collect();
        if args.len() > 1 {
            self.run_cli(args)?;
            return Ok(());
        }

        self.with_runner_config(runner_config).serve().await?;
        Ok(())
    }

    /// Run one request described by command-line `args`, reporting on stdout.
    pub fn run_cli<I, T>(&self, args: I) -> Result<(), CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let runner = CliRunner::from_args(args)?;
        let stdout = std::io::stdout();
        runner.run(&self.router, &self.logger, &mut stdout.lock())
    }

    /// Serve over HTTP until a termination signal.
    pub async fn serve(self) -> Result<(), ServerError> {
        let runner_config = match self.runner_config {
            Some(config) => config,
            None => RunnerConfig::from_env()?,
        };
        self.logger.info(format_args!("starting server at {}", runner_config.bind_address()));
        HttpServer::new(self.router, runner_config, self.logger).run().await
    }
}

impl<C> std::fmt::Debug for Function<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("router", &self.router)
            .field("logger", &self.logger.name())
            .finish()
    }
}
