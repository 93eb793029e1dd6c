//! CLI configuration management
//!
//! Values come from defaults, then an optional `pricer.toml`, then
//! `PRICER_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file, read when present.
pub const DEFAULT_CONFIG_FILE: &str = "pricer.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `log_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Pricer configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    /// Directory for written results
    pub output_dir: PathBuf,
    /// Default finite-difference step
    pub shock_size: f64,
    /// Default put-call parity tolerance
    pub parity_tolerance: f64,
    /// Default tracing filter
    pub log_level: LogLevel,
    /// Emit the `value -> result` sweep trace
    pub trace_sweeps: bool,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            shock_size: 0.5,
            parity_tolerance: 0.05,
            log_level: LogLevel::Info,
            trace_sweeps: true,
        }
    }
}

impl PricerConfig {
    /// Loads configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Builds the effective configuration.
    ///
    /// An explicit `path` must exist; without one, `pricer.toml` in the
    /// working directory is read if present. Environment variables override
    /// file values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PRICER_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("PRICER_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("PRICER_SHOCK_SIZE") {
            self.shock_size = parse_number("shock_size", &value)?;
        }
        if let Some(value) = lookup("PRICER_PARITY_TOLERANCE") {
            self.parity_tolerance = parse_number("parity_tolerance", &value)?;
        }
        if let Some(value) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.shock_size > 0.0 && self.shock_size.is_finite()) {
            return Err(ConfigError::InvalidValue {
                key: "shock_size",
                value: self.shock_size.to_string(),
            });
        }
        if !(self.parity_tolerance > 0.0 && self.parity_tolerance.is_finite()) {
            return Err(ConfigError::InvalidValue {
                key: "parity_tolerance",
                value: self.parity_tolerance.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PricerConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.shock_size, 0.5);
        assert_eq!(config.parity_tolerance, 0.05);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.trace_sweeps);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shock_size = 0.25\nlog_level = \"debug\"\ntrace_sweeps = false").unwrap();

        let config = PricerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shock_size, 0.25);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.trace_sweeps);
        // untouched keys keep their defaults
        assert_eq!(config.parity_tolerance, 0.05);
    }

    #[test]
    fn test_from_file_rejects_unknown_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shock = 0.25").unwrap();
        assert!(matches!(
            PricerConfig::from_file(file.path()),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(PricerConfig::load(Some(Path::new("/nonexistent/pricer.toml"))).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PricerConfig::default();
        config
            .apply_overrides(lookup(&[
                ("PRICER_OUTPUT_DIR", "/tmp/results"),
                ("PRICER_SHOCK_SIZE", "0.01"),
                ("PRICER_PARITY_TOLERANCE", " 0.1 "),
                ("PRICER_LOG_LEVEL", "warn"),
            ]))
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/results"));
        assert_eq!(config.shock_size, 0.01);
        assert_eq!(config.parity_tolerance, 0.1);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_env_override_bad_number() {
        let mut config = PricerConfig::default();
        let err = config
            .apply_overrides(lookup(&[("PRICER_SHOCK_SIZE", "small")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "shock_size", .. }));
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let config = PricerConfig {
            shock_size: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PricerConfig {
            parity_tolerance: -0.05,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
