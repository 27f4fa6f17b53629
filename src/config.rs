//! Application Settings
//!
//! Process-wide configuration consumed by context processors and management
//! commands. Loaded once, read-only afterwards, and injected into consumers
//! rather than accessed as an ambient global. Supports layered sources with
//! later sources overriding earlier ones.

use crate::error::CommandError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One entry of the language catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Sitemap settings for the `ping_google` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Sitemap location: absolute URL or site-relative path.
    pub url: Option<String>,

    /// Site base URL, prepended to a relative sitemap path.
    pub base_url: Option<String>,

    /// Search-engine ping endpoint.
    #[serde(default = "default_ping_endpoint")]
    pub ping_endpoint: String,
}

fn default_ping_endpoint() -> String {
    "https://www.google.com/ping".to_string()
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            url: None,
            base_url: None,
            ping_endpoint: default_ping_endpoint(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Debug mode; gates the debug context processor.
    #[serde(default)]
    pub debug: bool,

    /// Addresses allowed to see debug context (allow-list).
    #[serde(default)]
    pub internal_ips: Vec<IpAddr>,

    /// Default language code.
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Available languages.
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// URL prefix for static assets.
    #[serde(default = "default_static_url")]
    pub static_url: String,

    /// URL prefix for user-uploaded media.
    #[serde(default = "default_media_url")]
    pub media_url: String,

    /// Context processors applied to every render, in order. The CSRF
    /// processor always runs first and need not be listed.
    #[serde(default = "default_context_processors")]
    pub context_processors: Vec<String>,

    /// Name of the test runner resolved by the `test` command.
    #[serde(default = "default_test_runner")]
    pub test_runner: String,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_language_code() -> String {
    "en-us".to_string()
}

fn default_languages() -> Vec<Language> {
    vec![Language {
        code: "en".to_string(),
        name: "English".to_string(),
    }]
}

fn default_static_url() -> String {
    "/static/".to_string()
}

fn default_media_url() -> String {
    "/media/".to_string()
}

fn default_context_processors() -> Vec<String> {
    ["debug", "i18n", "static", "media", "request"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_test_runner() -> String {
    "default".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            internal_ips: Vec::new(),
            language_code: default_language_code(),
            languages: default_languages(),
            static_url: default_static_url(),
            media_url: default_media_url(),
            context_processors: default_context_processors(),
            test_runner: default_test_runner(),
            sitemap: SitemapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Template(String),
    Sitemap(String),
    System(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Template(msg) => write!(f, "Template: {}", msg),
            ValidationError::Sitemap(msg) => write!(f, "Sitemap: {}", msg),
            ValidationError::System(msg) => write!(f, "System: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.language_code.is_empty() {
            errors.push(ValidationError::Template(
                "language_code cannot be empty".to_string(),
            ));
        }
        if !self.static_url.ends_with('/') {
            errors.push(ValidationError::Template(format!(
                "static_url must end with '/': {}",
                self.static_url
            )));
        }
        if !self.media_url.ends_with('/') {
            errors.push(ValidationError::Template(format!(
                "media_url must end with '/': {}",
                self.media_url
            )));
        }

        if !is_http_url(&self.sitemap.ping_endpoint) {
            errors.push(ValidationError::Sitemap(format!(
                "ping_endpoint must be an http(s) URL: {}",
                self.sitemap.ping_endpoint
            )));
        }
        if let Some(ref base) = self.sitemap.base_url {
            if !is_http_url(base) {
                errors.push(ValidationError::Sitemap(format!(
                    "base_url must be an http(s) URL: {}",
                    base
                )));
            }
        }

        if self.test_runner.is_empty() {
            errors.push(ValidationError::System(
                "test_runner cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration loader: defaults, then global file, then workspace files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path to the global config file: `~/.config/plinth/config.toml`.
    pub fn global_config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("plinth")
                .join("config.toml")
        })
    }

    /// Load layered configuration for a workspace.
    /// Precedence (lowest to highest): defaults, global config file,
    /// `config/config.toml`, `config/{PLINTH_ENV}.toml`.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, CommandError> {
        let mut builder = Config::builder();
        builder = Self::add_global_source(builder);
        builder = Self::add_workspace_sources(builder, workspace_root);
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from a single explicit file, no layering.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, CommandError> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn add_global_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        let Some(global_path) = Self::global_config_path() else {
            return builder;
        };
        if global_path.exists() {
            builder.add_source(File::from(global_path).required(false))
        } else {
            warn!(
                config_path = %global_path.display(),
                "Global configuration file not found; using defaults"
            );
            builder
        }
    }

    fn add_workspace_sources(
        mut builder: ConfigBuilder<DefaultState>,
        workspace_root: &Path,
    ) -> ConfigBuilder<DefaultState> {
        let config_dir = workspace_root.join("config");
        let env_name = std::env::var("PLINTH_ENV").unwrap_or_else(|_| "development".to_string());

        let base_path = config_dir.join("config.toml");
        if base_path.exists() {
            builder = builder.add_source(File::from(base_path).required(false));
        }

        let env_path = config_dir.join(format!("{}.toml", env_name));
        if env_path.exists() {
            builder = builder.add_source(File::from(env_path).required(false));
        }

        builder
    }
}
