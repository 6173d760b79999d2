//! Request resolution and page rendering for MarkEngine.
//!
//! This crate maps a request path to a markdown file under the site's pages
//! directory, extracts `@title` / `@keywords` / `@description` directives,
//! renders the page to HTML, and wraps it in optional header and footer
//! templates. Requests with no matching page get a 404 response from a
//! not-found template or a built-in body.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mark_engine::{BufferedResponse, MarkEngine, SiteConfig};
//!
//! let site = SiteConfig::new("/srv/site").with_default_title("My Site");
//! let engine = MarkEngine::new(site);
//!
//! let mut response = BufferedResponse::new();
//! engine.dispatch("/blog/post.html", &mut response)?;
//! let (status, body) = response.into_parts();
//! # Ok(())
//! # }
//! ```
//!
//! Site layout:
//!
//! ```text
//! root/
//! ├── pages/          # markdown sources, `404.html`
//! └── templates/      # `header.html`, `footer.html`, `404.html`
//! ```

pub mod directive;
mod dispatch;
mod error;
pub mod not_found;
pub mod page;
pub mod resolve;
mod response;
mod site;
mod state;
mod template;
mod transform;
mod view;

pub use dispatch::{DispatchOutcome, MarkEngine};
pub use error::EngineError;
pub use response::{BufferedResponse, ResponseSink, Status};
pub use site::{DEFAULT_PAGES_PATH, DEFAULT_TEMPLATES_PATH, SiteConfig};
pub use state::EngineState;
pub use template::{JinjaTemplates, TemplateRenderer};
pub use transform::{Transformed, Transformer};
pub use view::TemplateView;
