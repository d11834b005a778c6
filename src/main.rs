//! Application entry point for the `codemetal-logger-service` binary.
//!
//! This binary orchestrates the startup sequence:
//! - Loading `.env`, then flags and environment variables
//! - Initializing structured logging/tracing
//! - Validating the configuration (fatal on error, before binding)
//! - Starting the periodic heartbeat and the Axum HTTP server
//!
//! # Environment Variables
//! See `--help` for the full list. Logging itself is tuned with:
//! - `RUST_LOG` (optional) – overrides the default filter
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
//! - `FORCE_COLOR` (optional) – force ANSI colors on or off
use std::{env, io::IsTerminal};

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use codemetal_logger_service::{
    config::{Args, LogFormat},
    Config,
};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    let args = Args::parse();
    init_tracing(args.debug, args.log_format);

    let cfg = Config::from_args(args).inspect_err(|e| tracing::error!("{}", e))?;
    cfg.log_config();

    codemetal_logger_service::run(cfg).await
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `AXUM_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log filter from `RUST_LOG`, otherwise `debug` everywhere when `debug`
///   is set, otherwise `info` with requested emissions let through at every
///   level
/// - `compact` or `json` line format
///
/// This should be called once at application startup before any logging
/// or tracing macros are invoked.
fn init_tracing(debug: bool, format: LogFormat) {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    // Determine if we should use colors
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(codemetal_logger_service::sink::default_filter(debug))
    };

    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter);

    match format {
        LogFormat::Compact => builder.with_ansi(use_color).compact().init(),
        LogFormat::Json => builder.with_ansi(false).json().init(),
    }
}
