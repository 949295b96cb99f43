//! Error types for request validation and configuration.

use thiserror::Error;

/// Result type alias for bounding box validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type alias for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Usage hint returned when a coordinate is missing or not a number.
pub const USAGE: &str = "Usage: ?north=<lat>&south=<lat>&east=<lon>&west=<lon>\n   \
                         or: ?n=<lat>&s=<lat>&e=<lon>&w=<lon>\n\
                         order is not important";

/// Reasons a bounding box query is rejected.
///
/// The `Display` text is the plain-text body sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", USAGE)]
    MalformedInput,

    #[error("North must be north of south; east must be east of west")]
    InvertedBox,

    #[error("Latitudes must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitudes must be between -180 and 180")]
    LongitudeOutOfRange,
}

/// Errors in the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("cannot resolve bind address {host}:{port}: {reason}")]
    InvalidBindAddr {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("relay {0} must be greater than zero")]
    InvalidRelay(&'static str),
}
