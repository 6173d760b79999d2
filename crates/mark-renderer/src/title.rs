//! Title capture from the first H1 heading.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

/// Tracks the first H1 heading while events stream past.
///
/// Only the first H1 is considered. Its plain text (text and inline code,
/// without markup) becomes the title. An empty first H1 yields no title.
#[derive(Default)]
pub(crate) struct TitleState {
    /// Whether we're currently inside the first H1.
    in_first_h1: bool,
    /// Whether the first H1 has been completed.
    seen_first_h1: bool,
    /// Plain text buffer for the heading being captured.
    text: String,
    /// Captured title.
    title: Option<String>,
}

impl TitleState {
    /// Inspect one event without consuming it.
    pub(crate) fn observe(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if !self.seen_first_h1 => {
                self.in_first_h1 = true;
                self.text.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if self.in_first_h1 => {
                self.in_first_h1 = false;
                self.seen_first_h1 = true;
                let text = self.text.trim();
                if !text.is_empty() {
                    self.title = Some(text.to_owned());
                }
            }
            Event::Text(text) | Event::Code(text) if self.in_first_h1 => {
                self.text.push_str(text);
            }
            Event::SoftBreak | Event::HardBreak if self.in_first_h1 => {
                self.text.push(' ');
            }
            _ => {}
        }
    }

    /// Take the captured title.
    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }
}
