//! Rendering of a resolved markdown page.

use std::path::Path;

use crate::directive;
use crate::error::EngineError;
use crate::response::ResponseSink;
use crate::site::join_below;
use crate::state::EngineState;
use crate::template::TemplateRenderer;
use crate::transform::Transformer;

/// Template emitted before the page body, relative to the templates root.
pub const HEADER_TEMPLATE: &str = "header.html";
/// Template emitted after the page body, relative to the templates root.
pub const FOOTER_TEMPLATE: &str = "footer.html";

/// Render the page at `source_path` into `sink`.
///
/// Directives are extracted before transformation, so a `@title` always
/// takes precedence over a title derived from the document. Header and
/// footer templates are optional. All parts are rendered before anything is
/// written, so a failure leaves the sink untouched.
///
/// # Errors
///
/// Returns `EngineError::Io` if the source cannot be read and
/// `EngineError::Template` if an existing header or footer fails to render.
pub fn render(
    source_path: &Path,
    state: &mut EngineState<'_>,
    transformer: &dyn Transformer,
    templates: &dyn TemplateRenderer,
    sink: &mut dyn ResponseSink,
) -> Result<(), EngineError> {
    let bytes = std::fs::read(source_path).map_err(|e| EngineError::Io {
        path: source_path.to_path_buf(),
        source: e,
    })?;
    let source = decode_source(bytes);

    let cleaned = directive::extract(&source, state);
    let transformed = transformer.transform(&cleaned);

    if state.current_title().is_empty()
        && let Some(title) = transformed.title.filter(|t| !t.is_empty())
    {
        state.set_current_title(title);
    }

    let templates_root = state.site().absolute_templates_path();
    let header = render_optional(&join_below(&templates_root, HEADER_TEMPLATE), state, templates)?;
    let footer = render_optional(&join_below(&templates_root, FOOTER_TEMPLATE), state, templates)?;

    if let Some(header) = header {
        sink.write(&header);
    }
    sink.write(&transformed.html);
    if let Some(footer) = footer {
        sink.write(&footer);
    }
    Ok(())
}

/// Decode page source as UTF-8, falling back to Latin-1.
///
/// Every byte sequence is valid Latin-1, so a readable page always renders.
fn decode_source(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect())
}

/// Render a template if it exists as a regular file.
fn render_optional(
    path: &Path,
    state: &EngineState<'_>,
    templates: &dyn TemplateRenderer,
) -> Result<Option<String>, EngineError> {
    if !path.is_file() {
        return Ok(None);
    }
    templates.render(path, &state.view()).map(Some)
}
