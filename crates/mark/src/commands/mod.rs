//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use mark_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

/// Site selection shared by all commands.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover mark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory containing pages/ and templates/ (overrides config).
    #[arg(short, long, env = "MARK_ROOT")]
    root: Option<PathBuf>,

    /// Site-wide title appended to page titles (overrides config).
    #[arg(short, long)]
    title: Option<String>,
}

impl SiteArgs {
    /// Load configuration with these arguments and the given server overrides.
    fn load(self, host: Option<String>, port: Option<u16>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            root: self.root,
            default_title: self.title,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
