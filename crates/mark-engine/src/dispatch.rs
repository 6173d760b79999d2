//! Request dispatch: resolve, then render or answer 404.

use std::path::PathBuf;

use mark_renderer::MarkdownRenderer;

use crate::error::EngineError;
use crate::not_found;
use crate::page;
use crate::resolve::{self, Lookup};
use crate::response::ResponseSink;
use crate::site::SiteConfig;
use crate::state::EngineState;
use crate::template::{JinjaTemplates, TemplateRenderer};
use crate::transform::Transformer;

/// Terminal state of a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The page at this path was rendered.
    Rendered(PathBuf),
    /// A 404 response was emitted.
    NotFound,
}

/// Request dispatcher for one site.
///
/// Holds only shared, immutable parts: the site configuration, the
/// markdown transformer, and the template renderer. Every call creates a
/// fresh [`EngineState`], so one engine can serve concurrent requests.
pub struct MarkEngine {
    site: SiteConfig,
    transformer: Box<dyn Transformer>,
    templates: Box<dyn TemplateRenderer>,
}

impl MarkEngine {
    /// Create an engine using pulldown-cmark markdown and minijinja templates.
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            transformer: Box::new(MarkdownRenderer::new().with_title_extraction()),
            templates: Box::new(JinjaTemplates::new()),
        }
    }

    /// Replace the markdown transformer.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    /// Replace the template renderer.
    #[must_use]
    pub fn with_templates(mut self, templates: impl TemplateRenderer + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Fresh request state for a raw request URI.
    pub fn state_for(&self, raw_uri: &str) -> EngineState<'_> {
        EngineState::new(&self.site, raw_uri)
    }

    /// Handle one request.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if an existing page cannot be read or a template
    /// fails to render. A missing page is not an error.
    pub fn dispatch(
        &self,
        raw_uri: &str,
        sink: &mut dyn ResponseSink,
    ) -> Result<DispatchOutcome, EngineError> {
        let mut state = self.state_for(raw_uri);
        self.dispatch_state(&mut state, sink)
    }

    /// Handle one request for a path without query string.
    ///
    /// The path is used as is, so a percent-decoded `?` or `#` stays part of
    /// the file name.
    ///
    /// # Errors
    ///
    /// See [`MarkEngine::dispatch`].
    pub fn dispatch_path(
        &self,
        path: &str,
        sink: &mut dyn ResponseSink,
    ) -> Result<DispatchOutcome, EngineError> {
        let mut state = EngineState::from_path(&self.site, path);
        self.dispatch_state(&mut state, sink)
    }

    /// Handle one request with caller-provided state.
    ///
    /// The state is left holding the page metadata, which lets callers
    /// inspect the title after rendering.
    ///
    /// # Errors
    ///
    /// See [`MarkEngine::dispatch`].
    pub fn dispatch_state(
        &self,
        state: &mut EngineState<'_>,
        sink: &mut dyn ResponseSink,
    ) -> Result<DispatchOutcome, EngineError> {
        match resolve::lookup(&self.site, state.request_uri()) {
            Lookup::Found(path) => {
                tracing::debug!(uri = %state.request_uri(), path = %path.display(), "Rendering page");
                page::render(
                    &path,
                    state,
                    self.transformer.as_ref(),
                    self.templates.as_ref(),
                    sink,
                )?;
                Ok(DispatchOutcome::Rendered(path))
            }
            Lookup::Missing(path) => {
                tracing::debug!(uri = %state.request_uri(), path = %path.display(), "Page not found");
                self.respond_not_found(state, sink)?;
                Ok(DispatchOutcome::NotFound)
            }
            Lookup::Rejected(path) => {
                tracing::warn!(uri = %state.request_uri(), path = %path.display(), "Rejected path outside pages root");
                self.respond_not_found(state, sink)?;
                Ok(DispatchOutcome::NotFound)
            }
        }
    }

    /// Emit a 404 for a request without resolving it.
    ///
    /// Used by hosts for requests that cannot be mapped to a path at all.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Template` if a not-found page fails to render.
    pub fn not_found(&self, raw_uri: &str, sink: &mut dyn ResponseSink) -> Result<(), EngineError> {
        let state = self.state_for(raw_uri);
        self.respond_not_found(&state, sink)
    }

    fn respond_not_found(
        &self,
        state: &EngineState<'_>,
        sink: &mut dyn ResponseSink,
    ) -> Result<(), EngineError> {
        not_found::respond(state, self.templates.as_ref(), sink)
    }
}

impl std::fmt::Debug for MarkEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkEngine")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::not_found::BUILTIN_NOT_FOUND;
    use crate::response::{BufferedResponse, Status};
    use crate::transform::Transformed;
    use crate::view::TemplateView;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn site_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages/blog")).unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        dir
    }

    /// Sink that counts status changes and writes.
    #[derive(Default)]
    struct CountingSink {
        inner: BufferedResponse,
        statuses: usize,
        writes: usize,
    }

    impl ResponseSink for CountingSink {
        fn headers_sent(&self) -> bool {
            self.inner.headers_sent()
        }

        fn send_status(&mut self, status: Status) {
            self.statuses += 1;
            self.inner.send_status(status);
        }

        fn write(&mut self, chunk: &str) {
            self.writes += 1;
            self.inner.write(chunk);
        }
    }

    struct CountingTransformer(Arc<AtomicUsize>);

    impl Transformer for CountingTransformer {
        fn transform(&self, text: &str) -> Transformed {
            self.0.fetch_add(1, Ordering::SeqCst);
            Transformed {
                html: text.to_owned(),
                title: None,
            }
        }
    }

    /// Templates that print their file name and the current title.
    struct NamedTemplates;

    impl TemplateRenderer for NamedTemplates {
        fn render(&self, path: &Path, view: &TemplateView<'_>) -> Result<String, EngineError> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            Ok(format!("[{name} {}]", view.current_title()))
        }
    }

    #[test]
    fn test_blog_post_scenario() {
        let dir = site_dir();
        fs::write(
            dir.path().join("pages/blog/post.md"),
            "@title First Post\n# Heading\nBody text",
        )
        .unwrap();
        fs::write(
            dir.path().join("templates/header.html"),
            "<title>{{ meta_title }}</title>",
        )
        .unwrap();

        let engine = MarkEngine::new(SiteConfig::new(dir.path()).with_default_title("My Site"));
        let mut state = engine.state_for("/blog/post.html");
        let mut sink = BufferedResponse::new();
        let outcome = engine.dispatch_state(&mut state, &mut sink).unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Rendered(dir.path().join("pages/blog/post.md"))
        );
        assert_eq!(state.meta_title(), "First Post | My Site");
        let (status, body) = sink.into_parts();
        assert_eq!(status, Status::Ok);
        assert!(body.starts_with("<title>First Post | My Site</title>"));
        assert!(body.contains("<h1>Heading</h1>"));
        assert!(!body.contains("@title"));
    }

    #[test]
    fn test_directory_index() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/index.md"), "# Home").unwrap();
        fs::write(dir.path().join("pages/blog/index.md"), "# Blog").unwrap();

        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();
        assert_eq!(
            engine.dispatch("/", &mut sink).unwrap(),
            DispatchOutcome::Rendered(dir.path().join("pages/index.md"))
        );
        let mut sink = BufferedResponse::new();
        assert_eq!(
            engine.dispatch("/blog/?page=2", &mut sink).unwrap(),
            DispatchOutcome::Rendered(dir.path().join("pages/blog/index.md"))
        );
        assert!(sink.body().contains("<h1>Blog</h1>"));
    }

    #[test]
    fn test_missing_page_emits_one_not_found() {
        let dir = site_dir();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = CountingSink::default();

        let outcome = engine.dispatch("/nope.html", &mut sink).unwrap();

        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert_eq!(sink.statuses, 1);
        assert_eq!(sink.writes, 1);
        assert_eq!(
            sink.inner.into_parts(),
            (Status::NotFound, BUILTIN_NOT_FOUND.to_owned())
        );
    }

    #[test]
    fn test_extensionless_path_is_not_found() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/about.md"), "About").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();

        assert_eq!(
            engine.dispatch("/about", &mut sink).unwrap(),
            DispatchOutcome::NotFound
        );
        assert_eq!(sink.status(), Status::NotFound);
    }

    #[test]
    fn test_traversal_is_not_found() {
        let dir = site_dir();
        fs::write(dir.path().join("templates/secret.md"), "secret").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();

        assert_eq!(
            engine.dispatch("/../templates/secret.html", &mut sink).unwrap(),
            DispatchOutcome::NotFound
        );
        assert!(!sink.body().contains("secret"));
    }

    #[test]
    fn test_custom_not_found_page_sees_request() {
        let dir = site_dir();
        fs::write(
            dir.path().join("templates/404.html"),
            "<p>No page called {{ request_uri }}</p>",
        )
        .unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();

        engine.dispatch("missing", &mut sink).unwrap();
        assert_eq!(
            sink.into_parts(),
            (Status::NotFound, "<p>No page called missing</p>".to_owned())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_page_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = site_dir();
        let page = dir.path().join("pages/locked.md");
        fs::write(&page, "# Locked").unwrap();
        fs::set_permissions(&page, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&page).is_ok() {
            // Mode bits are not enforced for this user (e.g. root).
            return;
        }
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();

        let err = engine.dispatch("/locked.html", &mut sink).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
        assert!(!sink.headers_sent());
    }

    #[test]
    fn test_latin1_page_is_rendered() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/cafe.md"), b"# Caf\xe9\n\nMen\xfc").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()).with_default_title("My Site"));
        let mut state = engine.state_for("/cafe.html");
        let mut sink = BufferedResponse::new();

        let outcome = engine.dispatch_state(&mut state, &mut sink).unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Rendered(dir.path().join("pages/cafe.md"))
        );
        assert_eq!(state.meta_title(), "Caf\u{e9} | My Site");
        assert_eq!(sink.status(), Status::Ok);
        assert!(sink.body().contains("<p>Men\u{fc}</p>"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dispatch_path_keeps_question_mark() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/why?.md"), "# Why").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));

        let mut sink = BufferedResponse::new();
        assert_eq!(
            engine.dispatch_path("/why?.html", &mut sink).unwrap(),
            DispatchOutcome::Rendered(dir.path().join("pages/why?.md"))
        );
        assert!(sink.body().contains("<h1>Why</h1>"));

        let mut sink = BufferedResponse::new();
        assert_eq!(
            engine.dispatch("/why?.html", &mut sink).unwrap(),
            DispatchOutcome::NotFound
        );
    }

    #[test]
    fn test_custom_templates() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/index.md"), "@title Home\nBody").unwrap();
        fs::write(dir.path().join("templates/header.html"), "ignored").unwrap();
        fs::write(dir.path().join("templates/404.html"), "ignored").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()))
            .with_templates(NamedTemplates);

        let mut sink = BufferedResponse::new();
        engine.dispatch("/", &mut sink).unwrap();
        assert_eq!(sink.body(), "[header.html Home]<p>Body</p>\n");

        let mut sink = BufferedResponse::new();
        engine.dispatch("/missing.html", &mut sink).unwrap();
        assert_eq!(
            sink.into_parts(),
            (Status::NotFound, "[404.html ]".to_owned())
        );
    }

    #[test]
    fn test_custom_transformer() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/raw.md"), "@keywords a\n*raw*").unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = MarkEngine::new(SiteConfig::new(dir.path()))
            .with_transformer(CountingTransformer(Arc::clone(&calls)));
        let mut sink = BufferedResponse::new();

        engine.dispatch("/raw.htm", &mut sink).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.body(), "\n*raw*");
    }

    #[test]
    fn test_state_is_per_request() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/a.md"), "@title A\nA").unwrap();
        fs::write(dir.path().join("pages/b.md"), "B").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));

        let mut first = engine.state_for("/a.html");
        engine
            .dispatch_state(&mut first, &mut BufferedResponse::new())
            .unwrap();
        let mut second = engine.state_for("/b.html");
        engine
            .dispatch_state(&mut second, &mut BufferedResponse::new())
            .unwrap();

        assert_eq!(first.current_title(), "A");
        assert_eq!(second.current_title(), "");
    }

    #[test]
    fn test_not_found_without_resolving() {
        let dir = site_dir();
        fs::write(dir.path().join("pages/index.md"), "home").unwrap();
        let engine = MarkEngine::new(SiteConfig::new(dir.path()));
        let mut sink = BufferedResponse::new();

        engine.not_found("/", &mut sink).unwrap();
        assert_eq!(sink.status(), Status::NotFound);
    }
}
