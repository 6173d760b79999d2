//! `mark render` command implementation.

use clap::Args;
use console::Term;
use mark_engine::{BufferedResponse, DispatchOutcome, MarkEngine};
use mark_server::site_config_from_config;

use super::SiteArgs;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Request path to render (e.g. `/blog/post.html`).
    path: String,

    #[command(flatten)]
    site: SiteArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// The response body is written to stdout even for a 404, which is then
    /// reported as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the page cannot be rendered,
    /// or no page exists for the path.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.site.load(None, None)?;
        let engine = MarkEngine::new(site_config_from_config(&config));

        let (outcome, body) = render_path(&engine, &self.path)?;
        Term::stdout().write_str(&body)?;

        match outcome {
            DispatchOutcome::Rendered(source) => {
                tracing::debug!(source = %source.display(), "Rendered page");
                Ok(())
            }
            DispatchOutcome::NotFound => Err(CliError::NotFound(self.path)),
        }
    }
}

/// Dispatch one path and collect the body.
fn render_path(engine: &MarkEngine, path: &str) -> Result<(DispatchOutcome, String), CliError> {
    let mut response = BufferedResponse::new();
    let outcome = engine.dispatch(path, &mut response)?;
    let (_, body) = response.into_parts();
    Ok((outcome, body))
}
