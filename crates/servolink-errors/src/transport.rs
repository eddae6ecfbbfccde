//! Bus transport errors.

/// Failure reported by a frame transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Transport used before `open` or after `close`
    #[error("Transport is not open")]
    NotOpen,

    /// Opening the underlying interface failed
    #[error("Failed to open transport: {0}")]
    OpenFailed(String),

    /// A frame could not be written
    #[error("Frame write failed: {0}")]
    WriteFailed(String),

    /// Reading from the bus failed
    #[error("Frame read failed: {0}")]
    ReadFailed(String),

    /// Operating-system level I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::WriteFailed("bus off".to_string());
        assert_eq!(err.to_string(), "Frame write failed: bus off");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "can0 not found");
        let err: TransportError = io_err.into();
        assert!(matches!(err, TransportError::Io(_)));
    }
}
