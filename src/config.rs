//! Configuration loader for the `codemetal-logger-service` binary.
//!
//! This module centralizes all runtime configuration values and their
//! defaults. Every setting can be given as a long flag or as an environment
//! variable (with optional `.env` file support provided by the caller). Raw
//! values are collected by [`Args`] and validated once into the immutable
//! [`Config`] that the router and the heartbeat receive.
use std::time::Duration;

use axum::http::StatusCode;
use clap::{builder::BoolishValueParser, ArgAction, Parser, ValueEnum};

use crate::{heartbeat::HeartbeatConfig, models::Level};

/// Output format of the process log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    // ---
    /// One human readable line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Command line flags and their environment variable fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "logger-service", version, about)]
pub struct Args {
    // ---
    /// Severity level for periodic logs (debug, info, warning, error, critical)
    #[arg(long, env = "PERIODIC_LOG_LEVEL", default_value = "info")]
    pub periodic_log_level: String,

    /// Message for periodic logs
    #[arg(long, env = "PERIODIC_LOG_MESSAGE", default_value = "System heartbeat")]
    pub periodic_log_message: String,

    /// Interval in seconds between periodic logs
    #[arg(
        long,
        env = "PERIODIC_LOG_INTERVAL",
        default_value = "10",
        allow_hyphen_values = true
    )]
    pub periodic_log_interval: String,

    /// Host for the HTTP server
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Enable debug logging for every component
    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub debug: bool,

    /// Format of the log output
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Largest repeat count accepted by /{level}/{message}/{count}
    #[arg(long, env = "MAX_EMIT_COUNT", default_value_t = 10_000)]
    pub max_emit_count: u32,

    /// HTTP status returned by the contained crash route
    #[arg(long, env = "HANDLED_CRASH_STATUS", default_value_t = 200)]
    pub handled_crash_status: u16,
}

/// Invalid startup configuration. Fatal: the server is never started.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    // ---
    #[error("Invalid PERIODIC_LOG_LEVEL: {0}. Must be one of: {tokens}", tokens = Level::valid_tokens())]
    UnknownLevel(String),

    #[error("Invalid PERIODIC_LOG_INTERVAL: {0} is not a number of seconds")]
    InvalidInterval(String),

    #[error("Invalid PERIODIC_LOG_INTERVAL: {0} must be greater than zero")]
    NonPositiveInterval(String),

    #[error("Invalid MAX_EMIT_COUNT: must be greater than zero")]
    InvalidMaxEmitCount,

    #[error("Invalid HANDLED_CRASH_STATUS: {0} is not an HTTP status code")]
    InvalidStatus(u16),
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Host name or address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Verbose logging for every component.
    pub debug: bool,

    /// Log line format.
    pub log_format: LogFormat,

    /// Periodic heartbeat settings.
    pub heartbeat: HeartbeatConfig,

    /// Upper bound on the repeat count of a single request.
    pub max_emit_count: u32,

    /// Status answered by the contained crash route.
    pub handled_crash_status: StatusCode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            log_format: LogFormat::Compact,
            heartbeat: HeartbeatConfig::default(),
            max_emit_count: 10_000,
            handled_crash_status: StatusCode::OK,
        }
    }
}

impl Config {
    // ---
    /// Validate raw arguments into a configuration.
    ///
    /// Flag syntax errors never get here: clap reports them and exits.
    pub fn from_args(args: Args) -> Result<Config, ConfigError> {
        // ---
        let level = parse_heartbeat_level(&args.periodic_log_level)?;
        let interval = parse_interval(&args.periodic_log_interval)?;

        if args.max_emit_count == 0 {
            return Err(ConfigError::InvalidMaxEmitCount);
        }
        let handled_crash_status = StatusCode::from_u16(args.handled_crash_status)
            .map_err(|_| ConfigError::InvalidStatus(args.handled_crash_status))?;

        Ok(Config {
            host: args.host,
            port: args.port,
            debug: args.debug,
            log_format: args.log_format,
            heartbeat: HeartbeatConfig {
                level,
                message: args.periodic_log_message,
                interval,
            },
            max_emit_count: args.max_emit_count,
            handled_crash_status,
        })
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!(
            start_time = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            version = env!("CARGO_PKG_VERSION"),
            "Configuration loaded:"
        );
        tracing::info!("  PERIODIC_LOG_LEVEL    : {}", self.heartbeat.level);
        tracing::info!("  PERIODIC_LOG_MESSAGE  : {}", self.heartbeat.message);
        tracing::info!(
            "  PERIODIC_LOG_INTERVAL : {}s",
            self.heartbeat.interval.as_secs_f64()
        );
        tracing::info!("  HOST                  : {}", self.host);
        tracing::info!("  PORT                  : {}", self.port);
        tracing::info!("  DEBUG                 : {}", self.debug);
        tracing::info!("  LOG_FORMAT            : {:?}", self.log_format);
        tracing::info!("  MAX_EMIT_COUNT        : {}", self.max_emit_count);
        tracing::info!(
            "  HANDLED_CRASH_STATUS  : {}",
            self.handled_crash_status.as_u16()
        );
    }
}

/// Configuration levels are matched case-insensitively, so `INFO` works.
fn parse_heartbeat_level(raw: &str) -> Result<Level, ConfigError> {
    raw.trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| ConfigError::UnknownLevel(raw.to_string()))
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    // ---
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInterval(raw.to_string()))?;

    if secs.is_nan() || secs <= 0.0 {
        return Err(ConfigError::NonPositiveInterval(raw.to_string()));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidInterval(raw.to_string()))
}

#[cfg(test)]
mod tests {
    // ---
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    fn args(extra: &[&str]) -> Args {
        // ---
        let argv = std::iter::once("logger-service").chain(extra.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_flags() {
        // ---
        let cfg = assert_ok!(Config::from_args(args(&[
            "--periodic-log-level",
            "error",
            "--periodic-log-message",
            "tick",
            "--periodic-log-interval",
            "2.5",
            "--host",
            "127.0.0.1",
            "--port",
            "8081",
            "--debug",
            "--log-format",
            "json",
            "--max-emit-count",
            "50",
            "--handled-crash-status",
            "500",
        ])));

        assert_eq!(cfg.heartbeat.level, Level::Error);
        assert_eq!(cfg.heartbeat.message, "tick");
        assert_eq!(cfg.heartbeat.interval, Duration::from_millis(2_500));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8081);
        assert!(cfg.debug);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.max_emit_count, 50);
        assert_eq!(cfg.handled_crash_status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_debug_accepts_boolish_values() {
        // ---
        assert!(args(&["--debug", "yes"]).debug);
        assert!(args(&["--debug=1"]).debug);
        assert!(!args(&["--debug", "false"]).debug);
    }

    #[test]
    fn test_level_is_case_insensitive() {
        // ---
        let cfg = assert_ok!(Config::from_args(args(&["--periodic-log-level", "CRITICAL"])));
        assert_eq!(cfg.heartbeat.level, Level::Critical);

        let cfg = assert_ok!(Config::from_args(args(&["--periodic-log-level", "Warning"])));
        assert_eq!(cfg.heartbeat.level, Level::Warning);
    }

    #[test]
    fn test_unknown_level_rejected() {
        // ---
        let err = assert_err!(Config::from_args(args(&["--periodic-log-level", "trace"])));
        assert_eq!(err, ConfigError::UnknownLevel("trace".to_string()));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        // ---
        for raw in ["0", "-1", "-0.5", "0.0", "NaN"] {
            let err = assert_err!(Config::from_args(args(&["--periodic-log-interval", raw])));
            assert_eq!(err, ConfigError::NonPositiveInterval(raw.to_string()), "{raw}");
        }
    }

    #[test]
    fn test_malformed_interval_rejected() {
        // ---
        for raw in ["abc", "", "10s", "inf", "1e30"] {
            let err = assert_err!(Config::from_args(args(&["--periodic-log-interval", raw])));
            assert_eq!(err, ConfigError::InvalidInterval(raw.to_string()), "{raw}");
        }
    }

    #[test]
    fn test_zero_max_emit_count_rejected() {
        // ---
        let err = assert_err!(Config::from_args(args(&["--max-emit-count", "0"])));
        assert_eq!(err, ConfigError::InvalidMaxEmitCount);
    }

    #[test]
    fn test_invalid_status_rejected() {
        // ---
        let err = assert_err!(Config::from_args(args(&["--handled-crash-status", "42"])));
        assert_eq!(err, ConfigError::InvalidStatus(42));
    }

    #[test]
    fn test_default_config() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert!(!cfg.debug);
        assert_eq!(cfg.heartbeat, HeartbeatConfig::default());
        assert_eq!(cfg.handled_crash_status, StatusCode::OK);
    }
}
