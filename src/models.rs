//! Request-scoped data models for the logger service.
//!
//! A [`LogRequest`] is built from the path segments of `/{level}/{message}/{count}`
//! and validated before anything is written to the log sink.

use std::{fmt, str::FromStr};

use crate::error::AppError;

// ---

/// Severity of an emitted log line, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    // ---
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    // ---
    /// Every recognized level, in ascending order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Lower-case token as it appears in request paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    /// Upper-case name used in confirmations and the `severity` log field.
    pub fn as_upper(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Comma separated list of the accepted tokens, for error messages.
    pub fn valid_tokens() -> String {
        Level::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A level token that is not one of [`Level::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid log level: {0}. Must be one of: {tokens}", tokens = Level::valid_tokens())]
pub struct InvalidLevel(pub String);

impl FromStr for Level {
    type Err = InvalidLevel;

    /// Exact, case-sensitive match against the five tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        Level::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| InvalidLevel(s.to_string()))
    }
}

/// A validated request to emit `message` at `level`, `count` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    // ---
    pub level: Level,
    pub message: String,
    pub count: u32,
}

impl LogRequest {
    // ---
    /// Build a request from raw path segments.
    ///
    /// The level is checked first, then the count. An absent count means 1;
    /// otherwise it must parse as an integer in `1..=max_count`.
    pub fn from_segments(
        level: &str,
        message: String,
        count: Option<&str>,
        max_count: u32,
    ) -> Result<Self, AppError> {
        // ---
        let level: Level = level.parse()?;
        let count = match count {
            None => 1,
            Some(raw) => parse_count(raw, max_count)?,
        };

        Ok(LogRequest {
            level,
            message,
            count,
        })
    }
}

fn parse_count(raw: &str, max_count: u32) -> Result<u32, AppError> {
    // ---
    let invalid = |reason: String| AppError::InvalidCount {
        value: raw.to_string(),
        reason,
    };

    // Plain decimal digits only; `u32::from_str` would also take a leading '+'
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("must be a positive integer".to_string()));
    }
    // All digits, so the only parse failure left is overflow
    let count: u32 = raw
        .parse()
        .map_err(|_| invalid(format!("must not exceed {max_count}")))?;

    if count == 0 {
        return Err(invalid("must be a positive integer".to_string()));
    }
    if count > max_count {
        return Err(invalid(format!("must not exceed {max_count}")));
    }
    Ok(count)
}
