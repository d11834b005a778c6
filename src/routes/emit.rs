// src/routes/emit.rs
//! On-demand log emission.
//!
//! `GET /{level}/{message}/` writes `message` once at `level`;
//! `GET /{level}/{message}/{count}` writes it `count` times in a row. Input is
//! validated completely before the first line is written, so a rejected
//! request never reaches the sink.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::debug;

use crate::{
    error::AppError,
    models::LogRequest,
    sink::{LogEvent, Origin},
    AppState,
};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/{level}/{message}/", get(emit_once))
        .route("/{level}/{message}/{count}", get(emit_repeated))
}

async fn emit_once(
    State(state): State<AppState>,
    Path((level, message)): Path<(String, String)>,
) -> Result<String, AppError> {
    // ---
    emit(&state, &level, message, None)
}

async fn emit_repeated(
    State(state): State<AppState>,
    Path((level, message, count)): Path<(String, String, String)>,
) -> Result<String, AppError> {
    // ---
    emit(&state, &level, message, Some(&count))
}

fn emit(
    state: &AppState,
    level: &str,
    message: String,
    count: Option<&str>,
) -> Result<String, AppError> {
    // ---
    let request = LogRequest::from_segments(level, message, count, state.config.max_emit_count)?;
    debug!(
        emit_level = %request.level,
        count = request.count,
        "GET /{{level}}/{{message}} - emitting"
    );

    let event = LogEvent::new(request.level, &request.message, Origin::Request);
    for _ in 0..request.count {
        state.sink.emit(&event);
    }

    Ok(format!(
        "Emitted {} logs at level {} with message: {}",
        request.count,
        request.level.as_upper(),
        request.message
    ))
}
