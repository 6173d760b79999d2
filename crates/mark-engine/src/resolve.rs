//! Mapping of request paths to markdown sources below the pages root.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::site::{SiteConfig, join_below};

/// File served for request paths ending in `/`.
pub const DIRECTORY_INDEX: &str = "index.md";

static HTML_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^(.+\.)(?:php|html?)$").unwrap());

/// Outcome of looking up a request path on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// A regular file inside the pages root.
    Found(PathBuf),
    /// No regular file at the candidate path.
    Missing(PathBuf),
    /// The candidate escapes the pages root.
    Rejected(PathBuf),
}

/// Rewrite a request path into a path relative to the pages root.
///
/// Directory paths get [`DIRECTORY_INDEX`] appended. A trailing `.php`,
/// `.html`, or `.htm` extension (any case) becomes `.md`. Anything else is
/// returned unchanged.
///
/// # Example
///
/// ```
/// use mark_engine::resolve::rewrite;
///
/// assert_eq!(rewrite("/docs/"), "/docs/index.md");
/// assert_eq!(rewrite("/blog/post.html"), "/blog/post.md");
/// assert_eq!(rewrite("/feed.xml"), "/feed.xml");
/// ```
pub fn rewrite(request_uri: &str) -> Cow<'_, str> {
    if request_uri.ends_with('/') {
        return Cow::Owned(format!("{request_uri}{DIRECTORY_INDEX}"));
    }
    HTML_EXTENSION_RE.replace(request_uri, "${1}md")
}

/// Candidate source path for a request path.
///
/// Does not touch the filesystem and does not normalize `..`; see [`lookup`].
pub fn resolve(site: &SiteConfig, request_uri: &str) -> PathBuf {
    join_below(&site.absolute_pages_path(), &rewrite(request_uri))
}

/// Resolve a request path and check the candidate on disk.
///
/// Candidates with `..` components are rejected before any filesystem access.
/// Existing candidates are canonicalized and must stay inside the canonical
/// pages root, so symlinks pointing elsewhere are rejected too. Directories
/// and other non-regular files count as missing.
pub fn lookup(site: &SiteConfig, request_uri: &str) -> Lookup {
    let pages_root = site.absolute_pages_path();
    let relative = rewrite(request_uri);
    let candidate = join_below(&pages_root, &relative);

    if !is_contained(Path::new(relative.trim_start_matches('/'))) {
        return Lookup::Rejected(candidate);
    }
    if !candidate.is_file() {
        return Lookup::Missing(candidate);
    }

    let (Ok(canonical), Ok(canonical_root)) = (candidate.canonicalize(), pages_root.canonicalize())
    else {
        return Lookup::Missing(candidate);
    };
    if canonical.starts_with(&canonical_root) {
        Lookup::Found(candidate)
    } else {
        Lookup::Rejected(candidate)
    }
}

/// Whether a relative path only descends.
fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
