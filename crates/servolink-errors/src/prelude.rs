//! Convenience re-exports.

pub use crate::{
    ConfigError, ConfigResult, ControlError, ControlResult, Outcome, ProtocolError,
    ProtocolResult, StatusCode, TransportError, TransportResult,
};
