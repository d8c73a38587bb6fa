//! Configuration management for `marine-telex`
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::TelexError;
use crate::i18n::Catalog;
use crate::imagery::DEFAULT_OUTPUT_DIR;
use crate::stations::StationTable;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelexConfig {
    /// Report language and catalog
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Station index table
    #[serde(default)]
    pub stations: StationsConfig,
    /// HTTP settings for the currents and imagery fetchers
    #[serde(default)]
    pub network: NetworkConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Built-in catalog to use (en, ru)
    #[serde(default = "default_language")]
    pub language: String,
    /// External JSON catalog; overrides `language` when set
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationsConfig {
    /// External station table; the built-in one is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Where downloaded imagery is written
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

const BUILTIN_LANGUAGES: [&str; 2] = ["en", "ru"];

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_user_agent() -> String {
    crate::http::DEFAULT_USER_AGENT.to_string()
}

fn default_images_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            catalog_path: None,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            images_dir: default_images_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TelexConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // MARINE_TELEX_LOGGING__LEVEL=debug
        builder = builder.add_source(
            Environment::with_prefix("MARINE_TELEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TelexConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("marine-telex").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.locale.language.is_empty() {
            self.locale.language = default_language();
        }
        if self.network.user_agent.is_empty() {
            self.network.user_agent = default_user_agent();
        }
        if self.network.images_dir.is_empty() {
            self.network.images_dir = default_images_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.locale.catalog_path.is_none()
            && !BUILTIN_LANGUAGES.contains(&self.locale.language.as_str())
        {
            return Err(TelexError::config(format!(
                "Unsupported language '{}'. Must be one of: {} (or set locale.catalog_path)",
                self.locale.language,
                BUILTIN_LANGUAGES.join(", ")
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TelexError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TelexError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Label catalog selected by this configuration
    pub fn catalog(&self) -> crate::Result<Catalog> {
        match &self.locale.catalog_path {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(&self.locale.language),
        }
    }

    /// Station table selected by this configuration
    pub fn station_table(&self) -> crate::Result<StationTable> {
        match &self.stations.path {
            Some(path) => StationTable::load(path),
            None => Ok(StationTable::builtin()),
        }
    }
}
