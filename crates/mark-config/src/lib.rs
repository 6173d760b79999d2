//! Configuration management for MarkEngine.
//!
//! Parses `mark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.default_title`
//! - `site.base_uri`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site root directory.
    pub root: Option<PathBuf>,
    /// Override default page title.
    pub default_title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mark.toml";

const DEFAULT_PAGES_PATH: &str = "/pages";
const DEFAULT_TEMPLATES_PATH: &str = "/templates";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration as written in TOML.
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root: Option<String>,
    pages_path: Option<String>,
    templates_path: Option<String>,
    default_title: Option<String>,
    base_uri: Option<String>,
}

/// Resolved site configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Absolute site root. Pages and templates live below it.
    pub root: PathBuf,
    /// Pages directory, relative to `root` (e.g. `/pages`).
    pub pages_path: String,
    /// Templates directory, relative to `root` (e.g. `/templates`).
    pub templates_path: String,
    /// Site-wide title appended to every page title.
    pub default_title: String,
    /// URL prefix templates use to build links.
    pub base_uri: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.default_title`").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a directory setting to stay below the site root.
fn require_contained(value: &str, field: &str) -> Result<(), ConfigError> {
    if Path::new(value)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain '..'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.root {
            self.site_resolved.root = std::path::absolute(root)?;
        }
        if let Some(title) = &settings.default_title {
            self.site_resolved.default_title.clone_from(title);
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            site_resolved: SiteSettings {
                root: base.to_path_buf(),
                pages_path: DEFAULT_PAGES_PATH.to_owned(),
                templates_path: DEFAULT_TEMPLATES_PATH.to_owned(),
                default_title: String::new(),
                base_uri: String::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(&std::path::absolute(config_dir)?);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_contained(&site.pages_path, "site.pages_path")?;
        require_contained(&site.templates_path, "site.templates_path")?;

        let base_uri = site.base_uri.as_str();
        if !base_uri.is_empty() {
            if !base_uri.starts_with('/')
                && !base_uri.starts_with("http://")
                && !base_uri.starts_with("https://")
            {
                return Err(ConfigError::Validation(
                    "site.base_uri must start with '/', http:// or https://".to_owned(),
                ));
            }
            if base_uri.ends_with('/') {
                return Err(ConfigError::Validation(
                    "site.base_uri cannot end with '/'".to_owned(),
                ));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref title) = self.site.default_title {
            self.site.default_title = Some(expand::expand_env(title, "site.default_title")?);
        }
        if let Some(ref base_uri) = self.site.base_uri {
            self.site.base_uri = Some(expand::expand_env(base_uri, "site.base_uri")?);
        }

        Ok(())
    }

    /// Resolve the site root relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let site = &self.site;
        self.site_resolved = SiteSettings {
            root: site
                .root
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |root| config_dir.join(root)),
            pages_path: site
                .pages_path
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGES_PATH.to_owned()),
            templates_path: site
                .templates_path
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPLATES_PATH.to_owned()),
            default_title: site.default_title.clone().unwrap_or_default(),
            base_uri: site.base_uri.clone().unwrap_or_default(),
        };
    }
}
