//! `mark serve` command implementation.

use clap::Args;
use mark_server::{run_server, server_config_from_config};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (log every request).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(self.host, self.port)?;
        let server_config = server_config_from_config(&config, self.verbose);

        output.highlight(&format!(
            "Starting server on http://{}:{}",
            server_config.host, server_config.port
        ));
        output.info(&format!(
            "Pages: {}",
            server_config.site.absolute_pages_path().display()
        ));
        output.info(&format!(
            "Templates: {}",
            server_config.site.absolute_templates_path().display()
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        run_server(server_config).await?;
        Ok(())
    }
}
