//! Data exposed to header, footer, and not-found templates.

use serde::Serialize;

use crate::state::EngineState;

/// Read-only view of request state passed to templates.
///
/// Templates see these fields as top-level variables, e.g.
/// `{{ meta_title }}` or `{{ base_uri }}/static/site.css`.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateView<'a> {
    current_title: &'a str,
    meta_title: String,
    meta_keywords: &'a str,
    meta_description: &'a str,
    default_title: &'a str,
    base_uri: &'a str,
    request_uri: &'a str,
}

impl<'a> TemplateView<'a> {
    pub(crate) fn new(state: &'a EngineState<'_>) -> Self {
        let site = state.site();
        Self {
            current_title: state.current_title(),
            meta_title: state.meta_title(),
            meta_keywords: state.meta_keywords(),
            meta_description: state.meta_description(),
            default_title: site.default_title(),
            base_uri: site.base_uri(),
            request_uri: state.request_uri(),
        }
    }

    pub fn current_title(&self) -> &str {
        self.current_title
    }

    pub fn meta_title(&self) -> &str {
        &self.meta_title
    }

    pub fn meta_keywords(&self) -> &str {
        self.meta_keywords
    }

    pub fn meta_description(&self) -> &str {
        self.meta_description
    }

    pub fn default_title(&self) -> &str {
        self.default_title
    }

    pub fn base_uri(&self) -> &str {
        self.base_uri
    }

    pub fn request_uri(&self) -> &str {
        self.request_uri
    }
}
