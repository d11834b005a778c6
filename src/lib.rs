//! Diagnostic HTTP service that emits log lines on demand and on a timer.
//!
//! The service exists to exercise log collection and alerting pipelines:
//! - `GET /{level}/{message}/{count}` writes a chosen line at a chosen level
//! - `GET /crash/` and `GET /crash/fail` produce a contained and an uncaught
//!   fault respectively
//! - a background heartbeat writes one configured line per interval
//!
//! Both sides write through a shared [`LogSink`]; the binary uses
//! [`TracingSink`], tests substitute [`MemorySink`].

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod fault;
pub mod heartbeat;
pub mod models;
mod routes;
pub mod sink;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

pub use config::{Config, ConfigError};
pub use heartbeat::{Heartbeat, HeartbeatConfig};
pub use models::{Level, LogRequest};
pub use sink::{LogSink, MemorySink, TracingSink};
pub use state::AppState;

// ---

/// Build the application router around `config` and `sink`.
pub fn app(config: Arc<Config>, sink: Arc<dyn LogSink>) -> Router {
    routes::router(AppState::new(config, sink))
}

/// Serve `app` on an already bound listener until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    // ---
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Start the heartbeat and the HTTP server for a validated configuration.
///
/// Emissions go to the process-wide `tracing` subscriber.
pub async fn run(config: Config) -> Result<()> {
    // ---
    let config = Arc::new(config);
    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    let heartbeat = Heartbeat::new(config.heartbeat.clone(), Arc::clone(&sink))?;

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let heartbeat = heartbeat.start();
    let result = serve(listener, app(config, sink)).await;
    heartbeat.abort();
    result
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
