//! Error types for contagion_core.
//!
//! Configuration loading and live parameter changes are the only fallible
//! operations of the simulation; everything else is infallible arithmetic.

use thiserror::Error;

/// Main error type for contagion_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A parameter name did not match any tunable
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// A parameter value could not be parsed or is out of range
    #[error("Invalid value for {parameter}: {value}")]
    InvalidValue { parameter: String, value: String },

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Result type alias for contagion_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a new invalid value error.
    #[must_use]
    pub fn invalid_value<P: Into<String>, V: Into<String>>(parameter: P, value: V) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}
