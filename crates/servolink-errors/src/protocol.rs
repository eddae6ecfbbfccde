//! Frame decoding errors.

/// A received frame could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Fewer payload bytes than the frame layout requires
    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Required payload length
        expected: usize,
        /// Received payload length
        actual: usize,
    },

    /// Reply carries a different actuator id than the one addressed
    #[error("Unexpected actuator id: expected {expected}, got {actual}")]
    UnexpectedId {
        /// Addressed id
        expected: u8,
        /// Id found in the reply
        actual: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::Truncated {
            expected: 6,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Truncated frame: expected 6 bytes, got 3");
    }
}
