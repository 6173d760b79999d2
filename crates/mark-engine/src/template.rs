//! Template rendering for header, footer, and not-found pages.

use std::path::Path;

use minijinja::{Environment, path_loader};

use crate::error::EngineError;
use crate::view::TemplateView;

/// Renders a template file with the read-only request view.
pub trait TemplateRenderer: Send + Sync {
    /// Render the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Template` if the template cannot be loaded or
    /// rendered.
    fn render(&self, path: &Path, view: &TemplateView<'_>) -> Result<String, EngineError>;
}

/// Jinja-style templates loaded from disk with `minijinja`.
///
/// Each template is loaded from its own directory, so `{% include %}` and
/// `{% extends %}` resolve relative to it. Output is HTML-escaped for `.html`
/// files unless marked `|safe`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JinjaTemplates;

impl JinjaTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for JinjaTemplates {
    fn render(&self, path: &Path, view: &TemplateView<'_>) -> Result<String, EngineError> {
        let template_error = |source| EngineError::Template {
            path: path.to_path_buf(),
            source,
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                template_error(minijinja::Error::new(
                    minijinja::ErrorKind::TemplateNotFound,
                    "template path has no UTF-8 file name",
                ))
            })?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut env = Environment::new();
        env.set_loader(path_loader(dir.to_path_buf()));
        let template = env.get_template(name).map_err(template_error)?;
        template.render(view).map_err(template_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteConfig;
    use crate::state::EngineState;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_view_variables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.html");
        fs::write(
            &path,
            "<title>{{ meta_title }}</title><meta name=\"keywords\" content=\"{{ meta_keywords }}\">",
        )
        .unwrap();

        let site = SiteConfig::new(dir.path()).with_default_title("My Site");
        let mut state = EngineState::new(&site, "/");
        state.set_current_title("Home");
        state.set_meta_keywords("rust, markdown");

        let html = JinjaTemplates::new().render(&path, &state.view()).unwrap();
        assert_eq!(
            html,
            "<title>Home | My Site</title><meta name=\"keywords\" content=\"rust, markdown\">"
        );
    }

    #[test]
    fn test_render_escapes_html() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.html");
        fs::write(&path, "<title>{{ current_title }}</title>").unwrap();

        let site = SiteConfig::new(dir.path());
        let mut state = EngineState::new(&site, "/");
        state.set_current_title("Fish & Chips");

        let html = JinjaTemplates::new().render(&path, &state.view()).unwrap();
        assert_eq!(html, "<title>Fish &amp; Chips</title>");
    }

    #[test]
    fn test_render_include_from_same_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nav.html"), "<nav>{{ current_title }}</nav>").unwrap();
        let path = dir.path().join("header.html");
        fs::write(&path, "<header>{% include \"nav.html\" %}</header>").unwrap();

        let site = SiteConfig::new(dir.path());
        let mut state = EngineState::new(&site, "/guide/");
        state.set_current_title("Guide");

        let html = JinjaTemplates::new().render(&path, &state.view()).unwrap();
        assert_eq!(html, "<header><nav>Guide</nav></header>");
    }

    #[test]
    fn test_render_syntax_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("footer.html");
        fs::write(&path, "{% if %}").unwrap();

        let site = SiteConfig::new(dir.path());
        let state = EngineState::new(&site, "/");

        let err = JinjaTemplates::new()
            .render(&path, &state.view())
            .unwrap_err();
        assert!(matches!(err, EngineError::Template { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
