//! Application state.
//!
//! Shared state for all request handlers.

use mark_engine::MarkEngine;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Request dispatcher for the served site.
    pub(crate) engine: MarkEngine,
    /// Log every dispatch outcome at info level.
    pub(crate) verbose: bool,
}
