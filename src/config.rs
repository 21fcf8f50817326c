//! Configuration for the trip planner.
//!
//! Supports both environment variables and YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{NavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// LLM configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the LLM API (e.g., "https://api.openai.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Model name (e.g., "gpt-4o")
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Places lookup service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Base URL for the places API (e.g., "https://maps.googleapis.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_places_timeout")]
    pub timeout_secs: u64,
}

fn default_places_timeout() -> u64 {
    10
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_base: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: default_places_timeout(),
        }
    }
}

/// Place resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How many candidates may be resolved at once. 1 resolves strictly in order.
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    /// Address to bind, as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM settings
    pub llm: LlmConfig,
    /// Places lookup settings
    pub places: PlacesConfig,
    /// Resolver settings
    pub resolver: ResolverConfig,
    /// Web server settings
    pub server: ServerConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileSection>,
    places: Option<PlacesFileSection>,
    resolver: Option<ResolverFileSection>,
    server: Option<ServerFileSection>,
    logging: Option<LoggingFileSection>,
}

#[derive(Debug, Deserialize)]
struct LlmFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlacesFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ResolverFileSection {
    concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ServerFileSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct LoggingFileSection {
    level: Option<String>,
    format: Option<String>,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];
const MAX_CONCURRENCY: usize = 16;

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LLM_API_KEY, PLACES_API_KEY, SERVER_PORT, ...)
    /// 2. Config file (`path`, or ~/.config/naivigator/config.yaml)
    /// 3. Default values
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::config_file_path() {
                Some(default_path) if default_path.exists() => {
                    Self::load_from_file(&default_path)?
                }
                _ => Config::default(),
            },
        };

        config.apply_env(|key| env::var(key).ok());

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NavigatorError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Build configuration from YAML text, filling gaps with defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let file_config: ConfigFile = serde_yaml::from_str(content)
            .map_err(|e| NavigatorError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(llm) = file_config.llm {
            if let Some(api_base) = llm.api_base {
                config.llm.api_base = api_base;
            }
            if let Some(api_key) = llm.api_key {
                config.llm.api_key = api_key;
            }
            if let Some(model) = llm.model {
                config.llm.model = model;
            }
            if let Some(timeout) = llm.timeout_secs {
                config.llm.timeout_secs = timeout;
            }
        }

        if let Some(places) = file_config.places {
            if let Some(api_base) = places.api_base {
                config.places.api_base = api_base;
            }
            if let Some(api_key) = places.api_key {
                config.places.api_key = api_key;
            }
            if let Some(timeout) = places.timeout_secs {
                config.places.timeout_secs = timeout;
            }
        }

        if let Some(concurrency) = file_config.resolver.and_then(|r| r.concurrency) {
            config.resolver.concurrency = concurrency;
        }

        if let Some(server) = file_config.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }

        if let Some(logging) = file_config.logging {
            if let Some(level) = logging.level {
                config.logging.level = level;
            }
            if let Some(format) = logging.format {
                config.logging.format = format;
            }
        }

        Ok(config)
    }

    /// Override values from environment-style variables.
    ///
    /// Values that fail to parse are ignored and the current value stays.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = var("LLM_API_BASE") {
            self.llm.api_base = api_base;
        }
        if let Some(api_key) = var("LLM_API_KEY").or_else(|| var("OPENAI_KEY")) {
            self.llm.api_key = api_key;
        }
        if let Some(model) = var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(timeout) = var("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.llm.timeout_secs = timeout;
        }

        if let Some(api_base) = var("PLACES_API_BASE") {
            self.places.api_base = api_base;
        }
        if let Some(api_key) = var("PLACES_API_KEY").or_else(|| var("GOOGLE_MAPS_API_KEY")) {
            self.places.api_key = api_key;
        }
        if let Some(timeout) = var("PLACES_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.places.timeout_secs = timeout;
        }

        if let Some(concurrency) = var("RESOLVER_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.resolver.concurrency = concurrency;
        }

        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(format) = var("LOG_FORMAT") {
            self.logging.format = format.to_lowercase();
        }
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "naivigator")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present and in range.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.is_empty() {
            return Err(NavigatorError::Config(
                "LLM API key is required. Set LLM_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.places.api_key.is_empty() {
            return Err(NavigatorError::Config(
                "Places API key is required. Set PLACES_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.model.is_empty() {
            return Err(NavigatorError::Config(
                "LLM model is required. Set LLM_MODEL environment variable or add to config file."
                    .to_string(),
            ));
        }

        for (name, url) in [
            ("LLM", &self.llm.api_base),
            ("Places", &self.places.api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NavigatorError::Config(format!(
                    "{} API base URL must be an HTTP or HTTPS URL, got '{}'",
                    name, url
                )));
            }
        }

        for (name, timeout) in [
            ("LLM", self.llm.timeout_secs),
            ("Places", self.places.timeout_secs),
        ] {
            if timeout == 0 {
                return Err(NavigatorError::Config(format!(
                    "{} timeout_secs must be greater than zero",
                    name
                )));
            }
        }

        if self.resolver.concurrency == 0 || self.resolver.concurrency > MAX_CONCURRENCY {
            return Err(NavigatorError::Config(format!(
                "Resolver concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY, self.resolver.concurrency
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(NavigatorError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(NavigatorError::Config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }

    /// Create a config from explicit service values (useful for testing).
    pub fn with_services(
        llm_api_base: impl Into<String>,
        llm_api_key: impl Into<String>,
        places_api_base: impl Into<String>,
        places_api_key: impl Into<String>,
    ) -> Self {
        Self {
            llm: LlmConfig {
                api_base: llm_api_base.into(),
                api_key: llm_api_key.into(),
                ..Default::default()
            },
            places: PlacesConfig {
                api_base: places_api_base.into(),
                api_key: places_api_key.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
