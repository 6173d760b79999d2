//! Per-request engine state.

use crate::site::SiteConfig;
use crate::view::TemplateView;

/// Metadata and request data for a single request.
///
/// One value is created per incoming request and dropped once the response
/// has been produced. The site configuration and the request URI are fixed
/// for the lifetime of the state; page metadata starts empty and is filled
/// in by directives or by the heading-derived title.
#[derive(Clone, Debug)]
pub struct EngineState<'a> {
    site: &'a SiteConfig,
    request_uri: String,
    current_title: String,
    meta_keywords: String,
    meta_description: String,
}

impl<'a> EngineState<'a> {
    /// Create the state for a raw request URI.
    ///
    /// Any query string or fragment is stripped. An empty URI is treated as
    /// the site root `/`.
    pub fn new(site: &'a SiteConfig, raw_uri: &str) -> Self {
        Self {
            site,
            request_uri: strip_query(raw_uri).to_owned(),
            current_title: String::new(),
            meta_keywords: String::new(),
            meta_description: String::new(),
        }
    }

    /// Create the state for a request path that has no query string.
    ///
    /// Used by hosts that split off the query before percent-decoding, where
    /// a decoded `?` or `#` belongs to the path. An empty path is treated as
    /// the site root `/`.
    pub fn from_path(site: &'a SiteConfig, path: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        Self {
            site,
            request_uri: path.to_owned(),
            current_title: String::new(),
            meta_keywords: String::new(),
            meta_description: String::new(),
        }
    }

    pub fn site(&self) -> &'a SiteConfig {
        self.site
    }

    /// Request path without query string.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn set_current_title(&mut self, title: impl Into<String>) {
        self.current_title = title.into();
    }

    pub fn meta_keywords(&self) -> &str {
        &self.meta_keywords
    }

    pub fn set_meta_keywords(&mut self, keywords: impl Into<String>) {
        self.meta_keywords = keywords.into();
    }

    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    pub fn set_meta_description(&mut self, description: impl Into<String>) {
        self.meta_description = description.into();
    }

    /// Full page title: `"<current> | <default>"`, or the current title
    /// alone when no site default is configured.
    pub fn meta_title(&self) -> String {
        compose_title(&self.current_title, self.site.default_title())
    }

    /// Read-only snapshot handed to templates.
    pub fn view(&self) -> TemplateView<'_> {
        TemplateView::new(self)
    }
}

/// Compose the page title with the site default.
pub(crate) fn compose_title(current: &str, default: &str) -> String {
    if default.is_empty() {
        current.to_owned()
    } else {
        format!("{current} | {default}")
    }
}

/// Strip query string and fragment from a request URI.
fn strip_query(raw_uri: &str) -> &str {
    let end = raw_uri.find(['?', '#']).unwrap_or(raw_uri.len());
    match &raw_uri[..end] {
        "" => "/",
        path => path,
    }
}
