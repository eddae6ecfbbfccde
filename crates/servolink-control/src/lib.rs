//! Controllers and motion-profile generators.
//!
//! Every controller owns a [`Motor`](servolink_motor::Motor) and implements
//! [`Controller`] for the shared switch-on/off/reset contract:
//!
//! - [`DirectPositionController`], [`DirectVelocityController`],
//!   [`DirectTorqueController`]: one clamped setpoint per call
//! - [`VelocityRampController`]: constant-acceleration velocity ramps
//! - [`PositionStepController`]: stepped position moves with a final
//!   correction
//!
//! Profiles are planned first ([`RampPlan`], [`StepPlan`]) and then sent one
//! setpoint at a time, paced by a [`Pacer`]. Sending blocks the caller;
//! [`ProfileTask`] runs the same loop on a blocking worker and can be
//! cancelled between sends.
//!
//! ```
//! use servolink_control::prelude::*;
//! use servolink_motor::{Motor, MotorInfo};
//! use servolink_protocol::{Frame, Transport};
//! use servolink_errors::TransportResult;
//! use servolink_units::AngularVelocity;
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl Transport for Counter {
//!     fn write(&mut self, _frame: &Frame) -> TransportResult {
//!         self.0 += 1;
//!         Ok(())
//!     }
//!     fn read(&mut self) -> TransportResult<Option<Frame>> {
//!         Ok(None)
//!     }
//! }
//!
//! let motor = Motor::new(Counter::default(), 1, 0, MotorInfo::generic());
//! let mut ramp = VelocityRampController::new(motor, RampUserLimits::default())
//!     .with_pacer(RecordingPacer::new());
//! ramp.switch_on(SwitchOnMode::ReturnToPreviousZero)?;
//! // 2 rad/s at 1 rad/s² and 10 Hz: 20 setpoints
//! ramp.ramp_to(AngularVelocity::new(2.0))?;
//! assert_eq!(ramp.motor().transport().0, 21);
//! # Ok::<(), servolink_errors::ControlError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod cancel;
pub mod controller;
pub mod direct;
pub mod pacing;
pub mod prelude;
pub mod ramp;
pub mod step;
pub mod task;

pub use cancel::CancelToken;
pub use controller::{Controller, SwitchOnMode, switch_on};
pub use direct::{
    DirectPositionController, DirectTorqueController, DirectVelocityController,
    PositionUserLimits, TorqueUserLimits, VelocityUserLimits,
};
pub use pacing::{
    FREQ_1KHZ, FREQ_1MHZ, FREQ_10HZ, FREQ_100HZ, ONE_SENDING_TIME, Pacer, RecordingPacer,
    ThreadPacer,
};
pub use ramp::{
    DEFAULT_ACCELERATION, DEFAULT_RAMP_FREQUENCY, RampPlan, RampUserLimits, VelocityRampController,
};
pub use step::{
    ACCEPTABLE_POSITION_ERROR, DEFAULT_STEP_FREQUENCY, PositionStepController, StepPlan,
    StepUserLimits, default_step,
};
pub use task::{Cancellable, ProfileTask};
