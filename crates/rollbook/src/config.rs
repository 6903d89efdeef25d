//! Configuration management for rollbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "rollbook";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROLLBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROLLBOOK_`, sections split on `__`,
///    e.g. `ROLLBOOK_API__BASE_URL`)
/// 2. TOML config file at `~/.config/rollbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote attendance service.
    pub api: ApiConfig,
    /// Attendance form layout.
    pub form: FormConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the service, without the resource segment.
    pub base_url: String,
    /// Name of the attendance resource under the base URL.
    pub resource: String,
}

/// Form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fields shown, blank, in a create-mode form.
    pub fields: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            resource: "attendance".to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: vec!["name".to_string(), "date".to_string(), "present".to_string()],
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        let resource = self.api.resource.trim();
        if resource.is_empty() {
            return Err(Error::ConfigValidation {
                message: "api.resource must not be empty".to_string(),
            });
        }
        if resource.contains('/') {
            return Err(Error::ConfigValidation {
                message: format!("api.resource must be a single path segment: {resource}"),
            });
        }

        if self.form.fields.is_empty() {
            return Err(Error::ConfigValidation {
                message: "form.fields must name at least one field".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for field in &self.form.fields {
            if field.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "form.fields contains a blank name".to_string(),
                });
            }
            if !seen.insert(field.as_str()) {
                return Err(Error::ConfigValidation {
                    message: format!("form.fields lists '{field}' more than once"),
                });
            }
        }

        Ok(())
    }

    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn base_url(&self) -> Result<Url> {
        let raw = &self.api.base_url;
        let url = Url::parse(raw).map_err(|err| Error::InvalidBaseUrl {
            url: raw.clone(),
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url: raw.clone(),
                message: "scheme must be http or https".to_string(),
            });
        }
        Ok(url)
    }

    /// URL of the attendance collection, e.g. `http://localhost:5000/api/attendance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn collection_url(&self) -> Result<Url> {
        let mut url = self.base_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.api.base_url.clone(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(self.api.resource.trim());
        Ok(url)
    }
}
