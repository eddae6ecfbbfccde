//! Non-error outcomes and the flat four-code status view.

use core::fmt;

use crate::ControlResult;

/// Successful result of a control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The operation ran and every frame it issued was written.
    Success,
    /// Target already equals the current state; nothing was sent.
    AlreadyDone,
}

impl Outcome {
    /// True for [`Outcome::AlreadyDone`].
    pub fn is_noop(self) -> bool {
        matches!(self, Outcome::AlreadyDone)
    }
}

/// Flat classification of a control result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    /// Operation completed.
    Success = 0,
    /// Transport, protocol or precondition failure.
    Fail = 1,
    /// Nothing to do; target equals current state.
    AlreadyDone = 2,
    /// Operation attempted while the actuator is disarmed.
    MotorNotSwitchedOn = 3,
}

impl StatusCode {
    /// Classify a control result.
    pub fn from_result(result: &ControlResult) -> Self {
        match result {
            Ok(outcome) => (*outcome).into(),
            Err(err) => err.status(),
        }
    }

    /// Numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for `Success` and `AlreadyDone`.
    pub fn is_ok(self) -> bool {
        matches!(self, StatusCode::Success | StatusCode::AlreadyDone)
    }
}

impl From<Outcome> for StatusCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => StatusCode::Success,
            Outcome::AlreadyDone => StatusCode::AlreadyDone,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Success => write!(f, "SUCCESS"),
            StatusCode::Fail => write!(f, "FAIL"),
            StatusCode::AlreadyDone => write!(f, "ALREADY_DONE"),
            StatusCode::MotorNotSwitchedOn => write!(f, "MOTOR_NOT_SWITCHED_ON"),
        }
    }
}
