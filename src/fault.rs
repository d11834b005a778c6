//! Deliberate faults raised by the crash routes.
//!
//! The same underlying error is wrapped in one of two distinct types:
//! [`HandledFault`] is reported and answered within the request, while
//! [`UnhandledFault`] can only be raised, leaving the hosting layer to turn
//! it into a 500 response.

use std::panic::Location;

/// Integer division by zero, the fault both crash routes trigger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attempted to divide {dividend} by zero")]
pub struct DivisionByZero {
    pub dividend: i64,
}

/// Checked integer division.
pub fn divide(dividend: i64, divisor: i64) -> Result<i64, DivisionByZero> {
    dividend
        .checked_div(divisor)
        .ok_or(DivisionByZero { dividend })
}

/// A fault that is caught, logged and answered by the route that raised it.
#[derive(Debug, thiserror::Error)]
#[error("handled fault at {location}")]
pub struct HandledFault {
    #[source]
    cause: DivisionByZero,
    location: &'static Location<'static>,
}

impl HandledFault {
    // ---
    #[track_caller]
    pub fn new(cause: DivisionByZero) -> Self {
        HandledFault {
            cause,
            location: Location::caller(),
        }
    }
}

/// A fault that is deliberately not caught by the service.
///
/// There is no way to turn this into a response; the only exit is
/// [`UnhandledFault::raise`].
#[derive(Debug, thiserror::Error)]
#[error("unhandled fault at {location}")]
pub struct UnhandledFault {
    #[source]
    cause: DivisionByZero,
    location: &'static Location<'static>,
}

impl UnhandledFault {
    // ---
    #[track_caller]
    pub fn new(cause: DivisionByZero) -> Self {
        UnhandledFault {
            cause,
            location: Location::caller(),
        }
    }

    /// Unwind out of the current request.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}: {}", self, self.cause)
    }
}

/// What a crash route does with the fault once it has been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashMode {
    // ---
    Contain,
    Propagate,
}

impl CrashMode {
    // ---
    /// Interpret the optional `/crash/{handle}` segment.
    ///
    /// `false`, `f`, `no`, `n` and `fail` (any case) propagate; anything else
    /// is contained.
    pub fn from_handle(handle: &str) -> Self {
        match handle.to_ascii_lowercase().as_str() {
            "false" | "f" | "no" | "n" | "fail" => CrashMode::Propagate,
            _ => CrashMode::Contain,
        }
    }
}
