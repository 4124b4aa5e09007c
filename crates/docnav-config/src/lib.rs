//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. One file describes
//! one site build: its static sidebar, the OpenAPI schemas spliced into it
//! and where its pages live.
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
//! - `site.url`
//! - `content.source_dir`
//! - `content.build_dir`
//! - `openapi[].schema`

mod expand;

use std::path::{Path, PathBuf};

use docnav_openapi::OpenApiSource;
use docnav_tree::{NavEntry, SplicePoint, ValidateOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override built output directory.
    pub build_dir: Option<PathBuf>,
    /// Override in-content link extraction.
    pub content_links: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

/// Content directory used when `content.source_dir` is not set.
const DEFAULT_SOURCE_DIR: &str = "src/content/docs";

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Content locations (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Link validation settings.
    pub validate: ValidateConfig,
    /// Static sidebar entries, in display order.
    pub sidebar: Vec<NavEntry>,
    /// OpenAPI schemas as written in TOML.
    openapi: Vec<OpenApiConfigRaw>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved OpenAPI sources (set after loading).
    #[serde(skip)]
    pub openapi_resolved: Vec<OpenApiSource>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Public site URL.
    pub url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            url: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    build_dir: Option<String>,
}

/// Resolved content locations.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Markdown content directory.
    pub source_dir: PathBuf,
    /// Built site output, when validating against a finished build.
    pub build_dir: Option<PathBuf>,
}

/// Link validation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Target prefixes exempt from the missing-page check.
    pub ignore: Vec<String>,
    /// Extract and check links inside content files.
    pub content_links: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            content_links: true,
        }
    }
}

impl ValidateConfig {
    /// Options for [`docnav_tree::validate_with`].
    #[must_use]
    pub fn options(&self) -> ValidateOptions {
        ValidateOptions {
            ignore_prefixes: self.ignore.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OpenApiConfigRaw {
    schema: String,
    base: String,
    label: Option<String>,
    splice: Option<String>,
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
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(build_dir) = &settings.build_dir {
            self.content_resolved.build_dir = Some(build_dir.clone());
        }
        if let Some(content_links) = settings.content_links {
            self.validate.content_links = content_links;
        }
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            validate: ValidateConfig::default(),
            sidebar: Vec::new(),
            openapi: Vec::new(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                build_dir: None,
            },
            openapi_resolved: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            sidebar = config.sidebar.len(),
            openapi = config.openapi_resolved.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }

        for (i, source) in self.openapi_resolved.iter().enumerate() {
            require_non_empty(&source.base, &format!("openapi[{i}].base"))?;
            require_non_empty(
                &source.schema.to_string_lossy(),
                &format!("openapi[{i}].schema"),
            )?;
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }

        if let Some(dir) = &self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }
        if let Some(dir) = &self.content.build_dir {
            self.content.build_dir = Some(expand::expand_env(dir, "content.build_dir")?);
        }

        for (i, openapi) in self.openapi.iter_mut().enumerate() {
            openapi.schema = expand::expand_env(&openapi.schema, &format!("openapi[{i}].schema"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    ///
    /// Parses each `openapi.splice` so a bad splice point is reported as a
    /// configuration error naming its entry.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(
                self.content
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
            build_dir: self.content.build_dir.as_deref().map(|d| config_dir.join(d)),
        };

        self.openapi_resolved = self
            .openapi
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let splice = match raw.splice.as_deref() {
                    Some(name) => name.parse::<SplicePoint>().map_err(|e| {
                        ConfigError::Validation(format!("openapi[{i}].splice: {e}"))
                    })?,
                    None => SplicePoint::default(),
                };
                Ok(OpenApiSource {
                    schema: config_dir.join(&raw.schema),
                    base: raw.base.clone(),
                    label: raw.label.clone(),
                    splice,
                })
            })
            .collect::<Result<_, ConfigError>>()?;

        Ok(())
    }
}
