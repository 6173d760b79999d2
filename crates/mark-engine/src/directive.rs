//! Line-based `@key value` directives embedded in page sources.
//!
//! A directive occupies a whole line: `@`, an ASCII word key, one space, and a
//! non-empty value running to the end of the line. Recognized keys update
//! page metadata; every matched line is blanked in the output, including
//! lines with unknown keys. Lines that do not fit the grammar are left alone.
//!
//! Extraction is two-phase: [`scan`] collects directives with their byte
//! spans, then [`apply`] updates state in document order and [`strip`]
//! removes the spans.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::state::EngineState;

// CRLF mode keeps `\r` out of both `.` and the `$` anchor.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^@([0-9A-Za-z_]+) (.+)$").unwrap());

/// Metadata field targeted by a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKey {
    Title,
    Keywords,
    Description,
    /// Key with no effect on metadata.
    Unknown,
}

impl DirectiveKey {
    fn from_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "keywords" => Self::Keywords,
            "description" => Self::Description,
            _ => Self::Unknown,
        }
    }
}

/// A directive found in page source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    name: &'a str,
    value: &'a str,
    span: Range<usize>,
}

impl<'a> Directive<'a> {
    /// Key as written in the source.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn key(&self) -> DirectiveKey {
        DirectiveKey::from_name(self.name)
    }

    /// Value verbatim, without the line terminator.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Byte range of the directive line, excluding its terminator.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Collect all directives in document order.
pub fn scan(text: &str) -> Vec<Directive<'_>> {
    DIRECTIVE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Directive {
                name: caps.get(1)?.as_str(),
                value: caps.get(2)?.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Apply directive effects to request state.
///
/// Directives are applied in order, so the last occurrence of a key wins.
pub fn apply(directives: &[Directive<'_>], state: &mut EngineState<'_>) {
    for directive in directives {
        match directive.key() {
            DirectiveKey::Title => state.set_current_title(directive.value),
            DirectiveKey::Keywords => state.set_meta_keywords(directive.value),
            DirectiveKey::Description => state.set_meta_description(directive.value),
            DirectiveKey::Unknown => {}
        }
    }
}

/// Remove directive lines from `text`, keeping their line terminators.
///
/// `directives` must come from [`scan`] on the same text.
pub fn strip(text: &str, directives: &[Directive<'_>]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for directive in directives {
        output.push_str(&text[last..directive.span.start]);
        last = directive.span.end;
    }
    output.push_str(&text[last..]);
    output
}

/// Extract directives from `text` into `state` and return the cleaned text.
pub fn extract(text: &str, state: &mut EngineState<'_>) -> String {
    let directives = scan(text);
    if directives.is_empty() {
        return text.to_owned();
    }
    apply(&directives, state);
    strip(text, &directives)
}
