//! 404 responses.

use std::path::PathBuf;

use crate::error::EngineError;
use crate::response::{ResponseSink, Status};
use crate::site::join_below;
use crate::state::EngineState;
use crate::template::TemplateRenderer;

/// Not-found page name, looked up in the templates root and then the pages
/// root.
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Body used when no not-found page exists.
pub const BUILTIN_NOT_FOUND: &str = "<h1>Error 404</h1><p>Requested page not found.</p>";

/// Candidate not-found pages in lookup order.
pub fn candidates(state: &EngineState<'_>) -> [PathBuf; 2] {
    let site = state.site();
    [
        join_below(&site.absolute_templates_path(), NOT_FOUND_PAGE),
        join_below(&site.absolute_pages_path(), NOT_FOUND_PAGE),
    ]
}

/// Emit a 404 response.
///
/// The status is only set if no output has been written yet. The first
/// existing candidate is rendered as a template; the built-in body is used
/// when none exist.
///
/// # Errors
///
/// Returns `EngineError::Template` if an existing not-found page fails to
/// render.
pub fn respond(
    state: &EngineState<'_>,
    templates: &dyn TemplateRenderer,
    sink: &mut dyn ResponseSink,
) -> Result<(), EngineError> {
    if !sink.headers_sent() {
        sink.send_status(Status::NotFound);
    }

    match candidates(state).into_iter().find(|path| path.is_file()) {
        Some(path) => {
            let body = templates.render(&path, &state.view())?;
            sink.write(&body);
        }
        None => sink.write(BUILTIN_NOT_FOUND),
    }
    Ok(())
}
