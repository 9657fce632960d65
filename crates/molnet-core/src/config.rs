//! Configuration for molnet
//!
//! Centralized settings for correlation computation and graph layout.
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! [correlation]
//! method = "spearman"
//!
//! [layout]
//! kind = "cluster"
//! seed = 7
//! ```

use std::fmt;
use std::path::Path;

use molnet_stats::{CorrelationMethod, MissingValue};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MolnetConfig {
    /// Correlation engine settings
    pub correlation: CorrelationConfig,
    /// Layout engine settings
    pub layout: LayoutSettings,
}

/// Correlation engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Method used for edge values driving filters and layout
    pub method: CorrelationMethod,
    /// How absent readings are represented before filtering
    pub missing_value: MissingValue,
}

/// Available layout strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Evenly spaced on a circle
    Circle,
    /// Correlation-driven relaxation
    #[default]
    Cluster,
    /// Force-directed springs
    Spring,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Circle => write!(f, "circle"),
            LayoutKind::Cluster => write!(f, "cluster"),
            LayoutKind::Spring => write!(f, "spring"),
        }
    }
}

/// Layout engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Which strategy to run
    pub kind: LayoutKind,
    /// Pass budget is `iteration_factor · max(width, height)`
    pub iteration_factor: u32,
    /// Fixed radius adjustment per relaxation step, in layout units
    pub nudge_step: f64,
    /// PRNG seed; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Wall-clock budget for one layout run, checked between passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Edges with `|correlation|` below this are left out of the layout
    pub edge_threshold: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            kind: LayoutKind::default(),
            iteration_factor: 4,
            nudge_step: 1.0,
            seed: None,
            timeout_ms: None,
            edge_threshold: 0.0,
        }
    }
}

impl MolnetConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a `.toml` or `.json` file, picked by extension (TOML otherwise)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;

        if layout.iteration_factor == 0 {
            return Err(ConfigError::OutOfRange(
                "iteration_factor must be positive".to_string(),
            ));
        }

        if !(layout.nudge_step.is_finite() && layout.nudge_step > 0.0) {
            return Err(ConfigError::OutOfRange(
                "nudge_step must be a positive number".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&layout.edge_threshold) {
            return Err(ConfigError::OutOfRange(
                "edge_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if layout.timeout_ms == Some(0) {
            return Err(ConfigError::OutOfRange(
                "timeout_ms must be positive when set".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MolnetConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.kind, LayoutKind::Cluster);
        assert_eq!(config.correlation.missing_value, MissingValue::Zero);
    }

    #[test]
    fn test_partial_toml() {
        let config = MolnetConfig::from_toml(
            r#"
            [correlation]
            method = "kendall"
            missing_value = "nan"

            [layout]
            kind = "spring"
            seed = 11
            "#,
        )
        .unwrap();

        assert_eq!(config.correlation.method, CorrelationMethod::Kendall);
        assert_eq!(config.correlation.missing_value, MissingValue::NaN);
        assert_eq!(config.layout.kind, LayoutKind::Spring);
        assert_eq!(config.layout.seed, Some(11));
        assert_eq!(config.layout.iteration_factor, 4);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = MolnetConfig::default();
        config.layout.seed = Some(3);
        let text = config.to_toml().unwrap();
        assert_eq!(MolnetConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_json_serialization() {
        let config = MolnetConfig::default();
        let json = config.to_json().unwrap();
        let parsed = MolnetConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = MolnetConfig::default();
        config.layout.nudge_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = MolnetConfig::default();
        config.layout.edge_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = MolnetConfig::default();
        config.layout.iteration_factor = 0;
        assert!(config.validate().is_err());

        assert!(MolnetConfig::from_toml("[layout]\ntimeout_ms = 0").is_err());
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(MolnetConfig::from_toml("[correlation]\nmethod = \"cosine\"").is_err());
    }
}
