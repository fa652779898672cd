//! Error types for Cadence

use thiserror::Error;

/// The main error type for Cadence operations
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Missing capability: {0}")]
    MissingCapability(String),

    #[error("Loop already terminated")]
    LoopTerminated,

    #[error("Capability error: {0}")]
    CapabilityError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

impl From<toml::de::Error> for CadenceError {
    fn from(err: toml::de::Error) -> Self {
        CadenceError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CadenceError {
    fn from(err: toml::ser::Error) -> Self {
        CadenceError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = CadenceError::ValueOutOfRange {
            field: "idle_threshold".into(),
            min: 0.0,
            max: f64::INFINITY,
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Value out of range: idle_threshold"));
        assert!(msg.contains("between 0 and inf"));
        assert!(msg.ends_with("got -1"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: CadenceError = parse_err.into();
        assert!(matches!(err, CadenceError::TomlParseError(_)));
    }
}
