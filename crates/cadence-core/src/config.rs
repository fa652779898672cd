//! Loop configuration
//!
//! A `LoopConfig` is supplied once when a loop is constructed and never
//! mutated afterwards. On disk it lives under a `[loop]` table:
//!
//! ```toml
//! [loop]
//! target_rate = 60
//! idle_threshold = 1.0
//! ```

use crate::error::{CadenceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for a fixed-step loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Simulation steps per second. The fixed step duration is `1 / target_rate`.
    pub target_rate: u32,
    /// Longest gap (seconds) between two clock reads that still counts as
    /// normal progress. Larger gaps are treated as a stall and discarded.
    pub idle_threshold: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_rate: 60,
            idle_threshold: 1.0,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(rename = "loop", default)]
    game_loop: LoopConfig,
}

impl LoopConfig {
    pub fn new(target_rate: u32, idle_threshold: f64) -> Self {
        Self {
            target_rate,
            idle_threshold,
        }
    }

    /// Check the configuration before any loop is built from it
    pub fn validate(&self) -> Result<()> {
        if self.target_rate == 0 {
            return Err(CadenceError::InvalidConfig(
                "target_rate must be greater than zero".into(),
            ));
        }

        if !self.idle_threshold.is_finite() || self.idle_threshold < 0.0 {
            return Err(CadenceError::ValueOutOfRange {
                field: "idle_threshold".into(),
                min: 0.0,
                max: f64::INFINITY,
                value: self.idle_threshold,
            });
        }

        Ok(())
    }

    /// Duration of one simulation step in seconds.
    ///
    /// Only meaningful on a config that passed [`LoopConfig::validate`].
    pub fn fixed_step(&self) -> f64 {
        1.0 / f64::from(self.target_rate)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.game_loop.validate()?;
        Ok(file.game_loop)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize as a `[loop]` table
    pub fn to_toml_string(&self) -> Result<String> {
        let file = ConfigFile { game_loop: *self };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Write the config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoopConfig::default();
        assert_eq!(config.target_rate, 60);
        assert!((config.idle_threshold - 1.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_step() {
        let config = LoopConfig::new(10, 1.0);
        assert!((config.fixed_step() - 0.1).abs() < 1e-10);

        let config = LoopConfig::new(60, 1.0);
        assert!((config.fixed_step() - 1.0 / 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = LoopConfig::new(0, 1.0).validate().unwrap_err();
        assert!(matches!(err, CadenceError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_idle_threshold_rejected() {
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            let err = LoopConfig::new(60, bad).validate().unwrap_err();
            assert!(matches!(err, CadenceError::ValueOutOfRange { .. }));
            assert!(err.to_string().contains("between 0 and inf"));
        }
    }

    #[test]
    fn test_zero_idle_threshold_allowed() {
        assert!(LoopConfig::new(60, 0.0).validate().is_ok());
    }

    #[test]
    fn test_parse_loop_table() {
        let config = LoopConfig::from_toml_str(
            r#"
[loop]
target_rate = 30
idle_threshold = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config, LoopConfig::new(30, 0.5));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = LoopConfig::from_toml_str("[loop]\ntarget_rate = 120\n").unwrap();
        assert_eq!(config.target_rate, 120);
        assert!((config.idle_threshold - 1.0).abs() < 1e-10);

        let config = LoopConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoopConfig::default());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = LoopConfig::from_toml_str("[loop]\ntarget_rate = 0\n").unwrap_err();
        assert!(matches!(err, CadenceError::InvalidConfig(_)));

        let err = LoopConfig::from_toml_str("[loop]\ntarget_rate = \"fast\"\n").unwrap_err();
        assert!(matches!(err, CadenceError::TomlParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("cadence_config_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("loop.toml");

        let config = LoopConfig::new(144, 0.25);
        config.save(&path).expect("save failed");

        let loaded = LoopConfig::load(&path).expect("load failed");
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("cadence_config_test_missing.toml");
        let _ = std::fs::remove_file(&path);
        let err = LoopConfig::load(&path).unwrap_err();
        assert!(matches!(err, CadenceError::IoError(_)));
    }
}
