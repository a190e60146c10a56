//! Configuration management for c2g.
//!
//! Parses `c2g.toml` configuration files with serde and provides
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
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.api_token`
//! - `gdrive.access_token`
//! - `gdrive.folder_id`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override export profile name.
    pub profile: Option<String>,
    /// Override target Google Drive folder.
    pub folder_id: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "c2g.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,
    /// Google Drive configuration.
    pub gdrive: Option<GDriveConfig>,
    /// Export configuration (paths are relative strings from TOML).
    export: ExportConfigRaw,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
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
            port: 3000,
        }
    }
}

/// Confluence configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence site base URL (page `webui` paths are appended to it).
    pub base_url: String,
    /// Atlassian account name.
    pub username: String,
    /// Atlassian API token.
    pub api_token: String,
    /// Space key used when none is given.
    #[serde(default = "default_space")]
    pub default_space: String,
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;
        require_non_empty(&self.default_space, "confluence.default_space")?;
        Ok(())
    }
}

fn default_space() -> String {
    "NL".to_owned()
}

/// Google Drive configuration.
#[derive(Debug, Deserialize)]
pub struct GDriveConfig {
    /// OAuth access token sent as a bearer token.
    pub access_token: String,
    /// Target folder that mirrors the export root.
    pub folder_id: String,
}

impl GDriveConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.access_token, "gdrive.access_token")?;
        require_non_empty(&self.folder_id, "gdrive.folder_id")?;
        Ok(())
    }
}

/// Raw export configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    root_dir: Option<String>,
    profile: Option<String>,
}

/// Resolved export configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Directory holding one export folder per profile.
    pub root_dir: PathBuf,
    /// Active profile name.
    pub profile: String,
}

impl ExportConfig {
    /// Export folder for the active profile (`<root_dir>/<profile>`).
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.root_dir.join(&self.profile)
    }
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
        /// Config field path (e.g., "`gdrive.access_token`").
        field: String,
        /// Error message (e.g., "${`GDRIVE_ACCESS_TOKEN`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a profile name usable as a folder name.
///
/// Profile names must start with a letter and must not contain path separators.
fn require_profile_name(profile: &str) -> Result<(), ConfigError> {
    if !profile.chars().next().is_some_and(char::is_alphabetic) {
        return Err(ConfigError::Validation(format!(
            "export.profile `{profile}` must start with a letter"
        )));
    }
    if profile.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "export.profile `{profile}` cannot contain path separators"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `c2g.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the overridden values are invalid.
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
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(profile) = &settings.profile {
            self.export_resolved.profile.clone_from(profile);
        }
        if let Some(folder_id) = &settings.folder_id
            && let Some(gdrive) = self.gdrive.as_mut()
        {
            gdrive.folder_id.clone_from(folder_id);
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Get validated Google Drive configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_gdrive(&self) -> Result<&GDriveConfig, ConfigError> {
        let gdrive = self.gdrive.as_ref().ok_or_else(|| {
            ConfigError::Validation("[gdrive] section required in config".into())
        })?;
        gdrive.validate()?;
        Ok(gdrive)
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            confluence: None,
            gdrive: None,
            export: ExportConfigRaw::default(),
            export_resolved: ExportConfig {
                root_dir: base.join("exports"),
                profile: "default".to_owned(),
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
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Sections that commands require on demand (`[confluence]`, `[gdrive]`)
    /// are validated by [`Config::require_confluence`] and [`Config::require_gdrive`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        require_profile_name(&self.export_resolved.profile)?;
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

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.api_token =
                expand::expand_env(&confluence.api_token, "confluence.api_token")?;
        }

        if let Some(ref mut gdrive) = self.gdrive {
            gdrive.access_token = expand::expand_env(&gdrive.access_token, "gdrive.access_token")?;
            gdrive.folder_id = expand::expand_env(&gdrive.folder_id, "gdrive.folder_id")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.export_resolved = ExportConfig {
            root_dir: config_dir.join(self.export.root_dir.as_deref().unwrap_or("exports")),
            profile: self
                .export
                .profile
                .clone()
                .unwrap_or_else(|| "default".to_owned()),
        };
    }
}
