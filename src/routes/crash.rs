// src/routes/crash.rs
//! Deliberate crash endpoints for exercising error monitoring.
//!
//! - `GET /crash/` raises a division by zero, logs it at critical severity
//!   and answers normally (status from `HANDLED_CRASH_STATUS`).
//! - `GET /crash/fail` (and the other propagating handles) logs the same
//!   line, then lets the fault unwind out of the handler. The catch-panic
//!   layer in the gateway answers 500 and the server keeps running.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::debug;

use crate::{
    fault::{self, CrashMode, DivisionByZero, HandledFault, UnhandledFault},
    models::Level,
    sink::{LogEvent, Origin},
    AppState,
};

const CRASH_MESSAGE: &str = "Application crash initiated due to division by zero!";

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/crash/", get(crash_contained))
        .route("/crash/{handle}", get(crash_with_handle))
}

async fn crash_contained(State(state): State<AppState>) -> Response {
    crash(&state, CrashMode::Contain)
}

async fn crash_with_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Response {
    crash(&state, CrashMode::from_handle(&handle))
}

fn crash(state: &AppState, mode: CrashMode) -> Response {
    // ---
    debug!(?mode, "GET /crash - triggering fault");

    let cause: DivisionByZero = match fault::divide(1, 0) {
        Ok(_) => {
            return (
                StatusCode::OK,
                "This should not be returned as crash is intended",
            )
                .into_response()
        }
        Err(cause) => cause,
    };

    match mode {
        CrashMode::Contain => {
            let fault = HandledFault::new(cause);
            report(state, &fault);
            (
                state.config.handled_crash_status,
                "Crash endpoint triggered! Check server logs for division by zero error.",
            )
                .into_response()
        }
        CrashMode::Propagate => {
            let fault = UnhandledFault::new(cause);
            report(state, &fault);
            fault.raise()
        }
    }
}

fn report(state: &AppState, fault: &(dyn std::error::Error + 'static)) {
    state
        .sink
        .emit(&LogEvent::new(Level::Critical, CRASH_MESSAGE, Origin::Crash).with_fault(fault));
}
