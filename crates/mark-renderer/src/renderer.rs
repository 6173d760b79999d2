//! Markdown renderer producing HTML.

use pulldown_cmark::{Options, Parser, html};

use crate::title::TitleState;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if `extract_title` was enabled).
    pub title: Option<String>,
}

/// Markdown renderer.
///
/// The renderer holds configuration only, so a single instance can be shared
/// between threads and reused for any number of documents.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    extract_title: bool,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extract_title: false,
            gfm: true,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered into the HTML output.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Heading attributes (`# Title {#anchor}`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
                | Options::ENABLE_HEADING_ATTRIBUTES
        } else {
            Options::empty()
        }
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text to HTML.
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let mut title = TitleState::default();
        let extract_title = self.extract_title;
        let events = self.create_parser(markdown).inspect(|event| {
            if extract_title {
                title.observe(event);
            }
        });

        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, events);

        RenderResult {
            html: output,
            title: title.take_title(),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
