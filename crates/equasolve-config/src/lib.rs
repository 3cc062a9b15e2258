//! equasolve-config — Configuration loading for Equasolve.

pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, FormDefaults, LoggingConfig, WebConfig};
pub use error::{ConfigError, Result};
