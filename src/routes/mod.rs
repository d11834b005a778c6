use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::AppState;

mod crash;
mod emit;
mod health;
mod home;

// ---

/// Build the full router. A panicking handler answers 500 instead of tearing
/// down the connection.
pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(home::router())
        .merge(crash::router())
        .merge(emit::router())
        .merge(health::router())
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
