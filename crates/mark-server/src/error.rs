//! Error types for the HTTP server.

use std::net::AddrParseError;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Body returned when a page cannot be produced.
const INTERNAL_ERROR_BODY: &str = "<h1>Error 500</h1><p>Internal server error.</p>";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page or template failure from the engine.
    #[error("Render error: {0}")]
    Engine(#[from] mark_engine::EngineError),

    /// Invalid listen address.
    #[error("Invalid address: {0}")]
    Address(#[from] AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            INTERNAL_ERROR_BODY,
        )
            .into_response()
    }
}
