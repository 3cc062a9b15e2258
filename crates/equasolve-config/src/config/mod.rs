//! Configuration loading for Equasolve.
//! Reads equasolve.toml (or .yaml/.yml) from the current directory or the path
//! in the EQUASOLVE_CONFIG env var. Every key has a default, so a missing
//! equasolve.toml in the current directory is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV: &str = "EQUASOLVE_CONFIG";
pub const API_URL_ENV: &str = "EQUASOLVE_API_URL";
pub const BIND_ENV: &str = "EQUASOLVE_BIND";
const DEFAULT_CONFIG_FILE: &str = "equasolve.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub form: FormDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as the `Origin` header when set.
    #[serde(default)]
    pub origin: Option<String>,
    /// Unset means requests wait for the API indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub extra_allowed_hosts: Vec<String>,
}

fn default_base_url() -> String { "http://localhost:9090".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: None,
            timeout_secs: None,
            extra_allowed_hosts: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Parsed base origin. Only http(s) URLs with a host are accepted.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("api.base_url {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!("api.base_url {} has no host", url)));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3001".to_string() }

impl Default for WebConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Initial values of the solver form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefaults {
    #[serde(default = "default_equation")]
    pub equation: String,
    #[serde(default = "default_method_id")]
    pub method_id: u32,
    #[serde(default = "default_start")]
    pub start: f64,
    #[serde(default = "default_end")]
    pub end: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_equation()  -> String { "sin(x)".to_string() }
fn default_method_id() -> u32    { 1 }
fn default_start()     -> f64    { -10.0 }
fn default_end()       -> f64    { 10.0 }
fn default_step()      -> f64    { 0.1 }
fn default_tolerance() -> f64    { 0.0001 }

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            equation: default_equation(),
            method_id: default_method_id(),
            start: default_start(),
            end: default_end(),
            step: default_step(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when RUST_LOG is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "equasolve=debug,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

mod tests;

impl Config {
    /// Load configuration.
    /// Checks EQUASOLVE_CONFIG first, then equasolve.toml in the current directory,
    /// then applies EQUASOLVE_API_URL / EQUASOLVE_BIND overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => {
                info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load a file, picking the format from its extension (TOML unless .yaml/.yml).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(PathBuf::from(path)));
        }

        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        debug!(path = %path.display(), "Configuration file parsed");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`, which maps a variable
    /// name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            self.web.bind = bind.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.api.base_url()?;
        equasolve_common::methods::method_by_id(self.form.method_id)
            .map_err(|e| ConfigError::Invalid(format!("form.method_id: {}", e)))?;

        for (name, value) in [
            ("form.start", self.form.start),
            ("form.end", self.form.end),
            ("form.step", self.form.step),
            ("form.tolerance", self.form.tolerance),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite", name)));
            }
        }
        Ok(())
    }
}
