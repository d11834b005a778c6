//! Shared application state handed to every route.

use std::sync::Arc;

use crate::{config::Config, sink::LogSink};

/// Immutable configuration plus the log sink. Cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sink: Arc<dyn LogSink>,
}

impl AppState {
    pub fn new(config: Arc<Config>, sink: Arc<dyn LogSink>) -> Self {
        AppState { config, sink }
    }
}
