//! Actuator and motion-profile errors.

use crate::{ProtocolError, StatusCode, TransportError};

/// Failure of a control operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    /// Operation requires the actuator to be in motor mode
    #[error("Motor is not switched on")]
    MotorNotSwitchedOn,

    /// The transport rejected a frame
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A reply could not be decoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A precondition on an argument does not hold
    #[error("Invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// No feedback frame was available on the bus
    #[error("No feedback frame available")]
    NoFeedback,

    /// A motion profile was cancelled between two sends
    #[error("Motion profile cancelled after {sent} setpoints")]
    Cancelled {
        /// Setpoints written before cancellation
        sent: u32,
    },

    /// A profile task could not be joined
    #[error("Profile task failed: {0}")]
    Task(String),
}

impl ControlError {
    /// Shorthand for [`ControlError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: &'static str) -> Self {
        ControlError::InvalidParameter { name, reason }
    }

    /// Four-code classification; everything except `MotorNotSwitchedOn` is `Fail`.
    pub fn status(&self) -> StatusCode {
        match self {
            ControlError::MotorNotSwitchedOn => StatusCode::MotorNotSwitchedOn,
            _ => StatusCode::Fail,
        }
    }

    /// True when the failure originated in the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, ControlError::Transport(_))
    }
}
