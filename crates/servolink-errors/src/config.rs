//! Motor configuration errors.

/// Motor configuration could not be loaded or is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Document format (`json`, `yaml`)
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// File extension does not map to a known format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// A limit is inverted, empty or non-finite
    #[error("Invalid {field} limits: {reason}")]
    InvalidLimits {
        /// Channel name
        field: &'static str,
        /// Why the limits were rejected
        reason: &'static str,
    },
}
