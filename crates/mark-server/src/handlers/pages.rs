//! Page endpoint.
//!
//! Dispatches every GET request to the engine and returns its HTML with the
//! status the engine chose.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use mark_engine::{BufferedResponse, DispatchOutcome, Status};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET for any path.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let mut response = BufferedResponse::new();

    if let Ok(path) = percent_decode_str(uri.path()).decode_utf8() {
        let outcome = state.engine.dispatch_path(&path, &mut response)?;
        if state.verbose {
            match outcome {
                DispatchOutcome::Rendered(source) => {
                    tracing::info!(path = %path, source = %source.display(), "Rendered page");
                }
                DispatchOutcome::NotFound => tracing::info!(path = %path, "Page not found"),
            }
        }
    } else {
        tracing::debug!(path = %uri.path(), "Request path is not valid UTF-8");
        state.engine.not_found(uri.path(), &mut response)?;
    }

    let (status, body) = response.into_parts();
    Ok((
        status_code(status),
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response())
}

fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::NotFound => StatusCode::NOT_FOUND,
    }
}
