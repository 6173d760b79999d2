//! Markdown-to-HTML seam.

use mark_renderer::MarkdownRenderer;

/// HTML produced from page source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transformed {
    pub html: String,
    /// Title derived from the document, if any.
    pub title: Option<String>,
}

/// Converts cleaned page source into HTML.
pub trait Transformer: Send + Sync {
    fn transform(&self, text: &str) -> Transformed;
}

impl Transformer for MarkdownRenderer {
    fn transform(&self, text: &str) -> Transformed {
        let result = self.render_markdown(text);
        Transformed {
            html: result.html,
            title: result.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_renderer_transform() {
        let renderer = MarkdownRenderer::new().with_title_extraction();
        let out = renderer.transform("# Heading\n\nBody text");
        assert_eq!(out.title.as_deref(), Some("Heading"));
        assert_eq!(out.html, "<h1>Heading</h1>\n<p>Body text</p>\n");
    }
}
