//! Markdown to HTML transformer.
//!
//! This crate provides [`MarkdownRenderer`], a thin layer over `pulldown-cmark`
//! that produces HTML and, optionally, the document title taken from the
//! first H1 heading.
//!
//! # Example
//!
//! ```
//! use mark_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown("# Hello\n\n**Bold** text");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod renderer;
mod title;

pub use renderer::{MarkdownRenderer, RenderResult};
