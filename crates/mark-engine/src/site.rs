//! Site-wide configuration shared by every request.

use std::path::{Path, PathBuf};

/// Default pages directory, relative to the site root.
pub const DEFAULT_PAGES_PATH: &str = "/pages";
/// Default templates directory, relative to the site root.
pub const DEFAULT_TEMPLATES_PATH: &str = "/templates";

/// Immutable site configuration.
///
/// Built once before serving and then shared read-only by all requests.
/// The root path can only be set at construction; the remaining settings are
/// adjusted with the `with_*` builder methods before dispatch begins.
///
/// # Example
///
/// ```
/// use mark_engine::SiteConfig;
///
/// let site = SiteConfig::new("/srv/site")
///     .with_pages_path("/content")
///     .with_default_title("My Site");
///
/// assert_eq!(site.absolute_pages_path(), std::path::Path::new("/srv/site/content"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    root_path: PathBuf,
    pages_path: String,
    templates_path: String,
    default_title: String,
    base_uri: String,
}

impl SiteConfig {
    /// Create a site rooted at `root_path` with default directories.
    #[must_use]
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            pages_path: DEFAULT_PAGES_PATH.to_owned(),
            templates_path: DEFAULT_TEMPLATES_PATH.to_owned(),
            default_title: String::new(),
            base_uri: String::new(),
        }
    }

    /// Set the pages directory, relative to the root.
    #[must_use]
    pub fn with_pages_path(mut self, pages_path: impl Into<String>) -> Self {
        self.pages_path = pages_path.into();
        self
    }

    /// Set the templates directory, relative to the root.
    #[must_use]
    pub fn with_templates_path(mut self, templates_path: impl Into<String>) -> Self {
        self.templates_path = templates_path.into();
        self
    }

    /// Set the site-wide title suffix.
    #[must_use]
    pub fn with_default_title(mut self, default_title: impl Into<String>) -> Self {
        self.default_title = default_title.into();
        self
    }

    /// Set the URL prefix exposed to templates.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn pages_path(&self) -> &str {
        &self.pages_path
    }

    pub fn templates_path(&self) -> &str {
        &self.templates_path
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Absolute directory holding markdown pages.
    pub fn absolute_pages_path(&self) -> PathBuf {
        join_below(&self.root_path, &self.pages_path)
    }

    /// Absolute directory holding templates.
    pub fn absolute_templates_path(&self) -> PathBuf {
        join_below(&self.root_path, &self.templates_path)
    }
}

/// Join a slash-prefixed relative path below `base`.
///
/// `Path::join` replaces the base when given an absolute path, so leading
/// separators are dropped first.
pub(crate) fn join_below(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.trim_start_matches('/'))
}
