//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl+C) or SIGTERM
//! - Terminate the process immediately afterwards
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - No connection draining: in-flight requests are dropped on exit

use std::fmt;

/// The signal that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Interrupt,
    Terminate,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Interrupt => f.write_str("SIGINT"),
            Termination::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolve once the process is asked to terminate.
///
/// If a handler cannot be installed the corresponding branch never resolves.
pub async fn wait_for_termination() -> Termination {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => Termination::Interrupt,
        _ = terminate => Termination::Terminate,
    }
}

/// Log the signal and exit the process without draining.
pub fn exit_now(signal: Termination) -> ! {
    tracing::info!(signal = %signal, "Shutdown signal received, exiting now");
    std::process::exit(0)
}
