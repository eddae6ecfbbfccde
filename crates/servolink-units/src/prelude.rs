//! Convenience re-exports.
//!
//! ```
//! use servolink_units::prelude::*;
//!
//! let step = deg(0.1);
//! assert!(step < Angle::new(0.01));
//! ```

pub use crate::{
    Angle, AngularAcceleration, AngularVelocity, Current, Degrees, Force, Frequency, Length,
    Limits, Mass, Number, Power, Quantity, RotationalDamping, RotationalStiffness, Time, Torque,
    Velocity, Voltage, angle_to_degrees, clamp, deg, degrees_to_angle,
};
