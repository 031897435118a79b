//! Application state for the service

use crate::JobTracker;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub tracker: JobTracker,
}

impl AppState {
    pub fn new(tracker: JobTracker) -> Self {
        Self { tracker }
    }
}
