//! Configuration management for Weather Explorer
//!
//! Settings come from an optional TOML file and then from plain process
//! environment variables (`PORT`, `OPENWEATHER_API_KEY`, ...), which win.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};

use crate::ExplorerError;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "weather-explorer.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Port the proxy listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Address the proxy binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Provider credential, required to serve
    #[serde(default)]
    pub openweather_api_key: Option<String>,
    /// Provider base URL (endpoint paths are appended)
    #[serde(default = "default_openweather_base_url")]
    pub openweather_base_url: String,
    /// Provider request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_seconds: u32,
    /// Directory with a built frontend to serve for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// OTLP/HTTP collector endpoint; tracing export is off when unset
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    /// Proxy URL used by the `show` client
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
}

fn default_port() -> u16 {
    5000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_upstream_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_proxy_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            openweather_api_key: None,
            openweather_base_url: default_openweather_base_url(),
            upstream_timeout_seconds: default_upstream_timeout(),
            static_dir: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
            otlp_endpoint: None,
            proxy_url: default_proxy_url(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from the default file (if present) and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given file (if present) and the process environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_from_sources(config_path.as_deref(), None)
    }

    /// Load configuration from a file and an environment map.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from_sources(
        config_path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        } else if config_path.is_some() {
            return Err(ExplorerError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        builder = builder.add_source(Environment::default().try_parsing(true).source(env));

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ExplorerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.bind_address.is_empty() {
            self.bind_address = default_bind_address();
        }
        if self.openweather_base_url.is_empty() {
            self.openweather_base_url = default_openweather_base_url();
        }
        if self.upstream_timeout_seconds == 0 {
            self.upstream_timeout_seconds = default_upstream_timeout();
        }
        if self.log_level.is_empty() {
            self.log_level = default_log_level();
        }
        if self.log_format.is_empty() {
            self.log_format = default_log_format();
        }
        if self.proxy_url.is_empty() {
            self.proxy_url = default_proxy_url();
        }
        self.openweather_base_url = self.openweather_base_url.trim_end_matches('/').to_string();
        self.proxy_url = self.proxy_url.trim_end_matches('/').to_string();
    }

    /// Validate settings shared by every subcommand
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the provider credential; only the proxy needs it
    pub fn validate_api_key(&self) -> Result<&str> {
        match self.openweather_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            Some(_) => Err(ExplorerError::config(
                "OPENWEATHER_API_KEY is set but empty. Provide a valid OpenWeatherMap API key.",
            )
            .into()),
            None => Err(ExplorerError::config(
                "OPENWEATHER_API_KEY is not set. The proxy needs an OpenWeatherMap API key.",
            )
            .into()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.upstream_timeout_seconds > 120 {
            return Err(
                ExplorerError::config("Upstream timeout cannot exceed 120 seconds").into(),
            );
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.log_format.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.log_format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("OPENWEATHER_BASE_URL", &self.openweather_base_url),
            ("PROXY_URL", &self.proxy_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ExplorerError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
