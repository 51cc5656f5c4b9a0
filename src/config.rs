//! TOML-based application configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults, so a missing or partial file yields a
/// runnable configuration. Load with [`AppConfig::from_toml_file`] or use
/// [`AppConfig::default_config`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Model artifact registry parameters.
    pub models: ModelsConfig,
    /// Forecast defaults.
    pub forecast: ForecastConfig,
    /// Battery ratings used for dispatch.
    pub bess: BessConfig,
    /// API server parameters.
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig::default(),
            forecast: ForecastConfig::default(),
            bess: BessConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Model artifact registry parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsConfig {
    /// Directory holding `<name>.bin` artifacts.
    pub dir: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: "models".to_string(),
        }
    }
}

/// Forecast defaults applied when the CLI gives no override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Forecast horizon in days (must be >= 1).
    pub horizon_days: u32,
    /// Requested model name; unrecognized names fall back to the baseline.
    pub model_name: String,
    /// Optional noise seed for reproducible forecasts.
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 1,
            model_name: "ensemble".to_string(),
            seed: None,
        }
    }
}

/// Battery ratings used for dispatch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BessConfig {
    /// Maximum charge/discharge power (MW, must be > 0).
    pub power_mw: f64,
    /// Usable energy capacity (MWh, must be > 0).
    pub energy_mwh: f64,
}

impl Default for BessConfig {
    fn default() -> Self {
        Self {
            power_mw: 1.0,
            energy_mwh: 2.0,
        }
    }
}

/// API server parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port the API binds to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

/// A single configuration constraint violation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"bess.power_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Returns the built-in default configuration.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the TOML is malformed or contains
    /// unknown fields.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Reads and parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "file".to_string(),
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.forecast.horizon_days == 0 {
            errors.push(ConfigError {
                field: "forecast.horizon_days".into(),
                message: "must be >= 1".into(),
            });
        }
        if self.bess.power_mw <= 0.0 {
            errors.push(ConfigError {
                field: "bess.power_mw".into(),
                message: "must be > 0".into(),
            });
        }
        if self.bess.energy_mwh <= 0.0 {
            errors.push(ConfigError {
                field: "bess.energy_mwh".into(),
                message: "must be > 0".into(),
            });
        }
        if self.models.dir.is_empty() {
            errors.push(ConfigError {
                field: "models.dir".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default_config();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(cfg.forecast.horizon_days, 1);
        assert_eq!(cfg.forecast.model_name, "ensemble");
        assert_eq!(cfg.server.port, 8000);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[models]
dir = "artifacts"

[forecast]
horizon_days = 3
model_name = "xgboost"
seed = 42

[bess]
power_mw = 5.0
energy_mwh = 20.0

[server]
port = 9100
"#;
        let cfg = AppConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.models.dir), Some("artifacts"));
        assert_eq!(cfg.as_ref().map(|c| c.forecast.horizon_days), Some(3));
        assert_eq!(cfg.as_ref().map(|c| c.forecast.seed), Some(Some(42)));
        assert_eq!(cfg.as_ref().map(|c| c.bess.energy_mwh), Some(20.0));
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(9100));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[bess]
power_mw = 2.5
"#;
        let cfg = AppConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.bess.power_mw), Some(2.5));
        // energy kept default
        assert_eq!(cfg.as_ref().map(|c| c.bess.energy_mwh), Some(2.0));
        // other sections kept default
        assert_eq!(cfg.as_ref().map(|c| &*c.models.dir), Some("models"));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[forecast]
horizon_days = 2
bogus_field = true
"#;
        let result = AppConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_horizon() {
        let mut cfg = AppConfig::default_config();
        cfg.forecast.horizon_days = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "forecast.horizon_days"));
    }

    #[test]
    fn validation_catches_non_positive_ratings() {
        let mut cfg = AppConfig::default_config();
        cfg.bess.power_mw = 0.0;
        cfg.bess.energy_mwh = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "bess.power_mw"));
        assert!(errors.iter().any(|e| e.field == "bess.energy_mwh"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = AppConfig::from_toml_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.err();
        assert_eq!(err.as_ref().map(|e| &*e.field), Some("file"));
    }
}
