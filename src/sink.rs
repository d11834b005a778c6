//! The log sink shared by the request handlers and the heartbeat.
//!
//! [`TracingSink`] forwards every emission to the process-wide `tracing`
//! subscriber as a single event. [`MemorySink`] records emissions instead,
//! so callers can count exactly what a request or a timer produced.

use std::{
    error::Error as StdError,
    fmt,
    sync::{Mutex, PoisonError},
};

use crate::models::Level;

/// Target attached to every emitted event, independent of the calling module.
pub const EMIT_TARGET: &str = "codemetal_logger_service::emit";

/// Log filter used when `RUST_LOG` is unset.
///
/// Emissions pass at every level, so a requested `debug` line is never
/// dropped even while the rest of the process logs at `info`.
pub fn default_filter(debug: bool) -> String {
    if debug {
        "debug".to_string()
    } else {
        format!("info,{EMIT_TARGET}=debug")
    }
}

/// Where an emission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    // ---
    Request,
    Heartbeat,
    Crash,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Request => "request",
            Origin::Heartbeat => "heartbeat",
            Origin::Crash => "crash",
        })
    }
}

/// One log line: severity, text and optional fault context.
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    // ---
    pub level: Level,
    pub message: &'a str,
    pub origin: Origin,
    pub fault: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> LogEvent<'a> {
    // ---
    pub fn new(level: Level, message: &'a str, origin: Origin) -> Self {
        LogEvent {
            level,
            message,
            origin,
            fault: None,
        }
    }

    /// Attach the error being reported.
    pub fn with_fault(mut self, fault: &'a (dyn StdError + 'static)) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// Destination for emitted log lines.
///
/// Implementations must accept concurrent calls from request handlers and
/// the heartbeat task and must keep each emission a single atomic entry.
pub trait LogSink: Send + Sync {
    fn emit(&self, event: &LogEvent<'_>);
}

/// Render an error and all of its sources, outermost first.
pub fn fault_chain(fault: &(dyn StdError + 'static)) -> String {
    // ---
    let mut chain = fault.to_string();
    let mut source = fault.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

// ---

/// Sink backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! dispatch {
    ($level:expr, $event:expr, $chain:expr) => {
        tracing::event!(
            target: EMIT_TARGET,
            $level,
            severity = $event.level.as_upper(),
            origin = %$event.origin,
            fault = $event.fault.map(tracing::field::display),
            fault_chain = $chain,
            "{}",
            $event.message
        )
    };
}

impl LogSink for TracingSink {
    fn emit(&self, event: &LogEvent<'_>) {
        // ---
        let chain = event.fault.map(fault_chain);
        let chain = chain.as_deref();

        // tracing has no level above ERROR; `severity` keeps CRITICAL visible
        match event.level {
            Level::Debug => dispatch!(tracing::Level::DEBUG, event, chain),
            Level::Info => dispatch!(tracing::Level::INFO, event, chain),
            Level::Warning => dispatch!(tracing::Level::WARN, event, chain),
            Level::Error | Level::Critical => dispatch!(tracing::Level::ERROR, event, chain),
        }
    }
}

// ---

/// An emission captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub level: Level,
    pub message: String,
    pub origin: Origin,
    pub fault: Option<String>,
}

/// Sink that keeps every emission in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemorySink {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded emissions that came from `origin`.
    pub fn from_origin(&self, origin: Origin) -> Vec<RecordedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.origin == origin)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: &LogEvent<'_>) {
        // ---
        let recorded = RecordedEvent {
            level: event.level,
            message: event.message.to_string(),
            origin: event.origin,
            fault: event.fault.map(fault_chain),
        };
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);
    }
}
