//! Channel values carried by command and feedback frames.

use serde::{Deserialize, Serialize};
use servolink_units::{
    Angle, AngularVelocity, Limits, RotationalDamping, RotationalStiffness, Torque, dims,
};

/// The five commanded setpoints serialized into the next command frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputParameters {
    pub position: Angle,
    pub velocity: AngularVelocity,
    pub torque: Torque,
    pub stiffness: RotationalStiffness,
    pub damper: RotationalDamping,
}

impl InputParameters {
    /// All channels at zero.
    pub const fn zeroed() -> Self {
        Self {
            position: Angle::zero(),
            velocity: AngularVelocity::zero(),
            torque: Torque::zero(),
            stiffness: RotationalStiffness::zero(),
            damper: RotationalDamping::zero(),
        }
    }

    /// Copy with every channel saturated to `limits`.
    pub fn clamped(&self, limits: &MotorLimits) -> Self {
        Self {
            position: limits.position.clamp(self.position),
            velocity: limits.velocity.clamp(self.velocity),
            torque: limits.torque.clamp(self.torque),
            stiffness: limits.stiffness.clamp(self.stiffness),
            damper: limits.damper.clamp(self.damper),
        }
    }
}

/// Last decoded feedback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputParameters {
    pub position: Angle,
    pub velocity: AngularVelocity,
    pub torque: Torque,
}

impl OutputParameters {
    pub const fn zeroed() -> Self {
        Self {
            position: Angle::zero(),
            velocity: AngularVelocity::zero(),
            torque: Torque::zero(),
        }
    }
}

/// Hardware-enforced range of every channel. These are also the
/// quantization ranges of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorLimits {
    pub position: Limits<dims::Angle>,
    pub velocity: Limits<dims::AngularVelocity>,
    pub torque: Limits<dims::Torque>,
    pub stiffness: Limits<dims::RotationalStiffness>,
    pub damper: Limits<dims::RotationalDamping>,
}

impl MotorLimits {
    /// Ranges of a generic impedance-controlled actuator.
    pub const GENERIC: MotorLimits = MotorLimits {
        position: Limits::from_values(-12.5, 12.5),
        velocity: Limits::from_values(-50.0, 50.0),
        torque: Limits::from_values(-16.0, 16.0),
        stiffness: Limits::from_values(0.0, 500.0),
        damper: Limits::from_values(0.0, 5.0),
    };
}

impl Default for MotorLimits {
    fn default() -> Self {
        Self::GENERIC
    }
}
