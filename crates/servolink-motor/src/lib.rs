//! Actuator state machine and command channel.
//!
//! A [`Motor`] tracks whether the actuator is armed, holds the five commanded
//! setpoints and transmits them through a [`Transport`]. Every operation
//! returns a [`ControlResult`]; nothing is retried.
//!
//! ```
//! use servolink_motor::{Motor, MotorInfo};
//! use servolink_protocol::{Frame, Transport};
//! use servolink_errors::TransportResult;
//! use servolink_units::Torque;
//!
//! #[derive(Default)]
//! struct Loopback(Vec<Frame>);
//!
//! impl Transport for Loopback {
//!     fn write(&mut self, frame: &Frame) -> TransportResult {
//!         self.0.push(*frame);
//!         Ok(())
//!     }
//!     fn read(&mut self) -> TransportResult<Option<Frame>> {
//!         Ok(None)
//!     }
//! }
//!
//! let mut motor = Motor::new(Loopback::default(), 1, 0, MotorInfo::generic());
//! motor.enter_mode()?;
//! motor.set_torque(Torque::new(2.0));
//! motor.send_command()?;
//! assert_eq!(motor.transport().0.len(), 2);
//! # Ok::<(), servolink_errors::ControlError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod motor;

pub use config::{MotorInfo, MotorSpecification};
pub use motor::{ActivationState, Motor};
pub use servolink_errors::{ControlError, ControlResult, Outcome};
pub use servolink_protocol::{
    InputParameters, MotorLimits, OutputParameters, TorqueFeedbackRange, Transport,
};
