//! Convenience re-exports.

pub use crate::{
    CancelToken, Controller, DirectPositionController, DirectTorqueController,
    DirectVelocityController, Pacer, PositionStepController, PositionUserLimits, ProfileTask,
    RampUserLimits, RecordingPacer, StepUserLimits, SwitchOnMode, ThreadPacer, TorqueUserLimits,
    VelocityRampController, VelocityUserLimits,
};
pub use servolink_errors::{ControlError, ControlResult, Outcome, StatusCode};
