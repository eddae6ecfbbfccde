//! Dimension-checked physical quantities for actuator control.
//!
//! Every quantity is an `f32` tagged at the type level with a dimension
//! vector. Adding torque to an angle, or comparing a stiffness against a
//! damping, is a compile error; multiplying or dividing yields the correctly
//! derived dimension. Values are expressed in coherent SI units (radians,
//! seconds, newton-metres).
//!
//! # Example
//!
//! ```
//! use servolink_units::prelude::*;
//!
//! let limits = Limits::from_values(-16.0, 16.0);
//! let torque: Torque = Force::new(40.0) * Length::new(0.5);
//! assert_eq!(limits.clamp(torque).value(), 16.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod angle;
pub mod dimension;
pub mod limits;
pub mod prelude;
pub mod quantity;

pub use angle::{DEGREES_PER_RADIAN, angle_to_degrees, deg, degrees_to_angle};
pub use dimension::{Dim, DimDiv, DimInv, DimMul, Dimension, dims};
pub use limits::{Limits, clamp, clamp_optional, clamp_with};
pub use quantity::Quantity;

pub type Number = Quantity<dims::Dimensionless>;
pub type Length = Quantity<dims::Length>;
pub type Mass = Quantity<dims::Mass>;
pub type Time = Quantity<dims::Time>;
pub type Current = Quantity<dims::Current>;
pub type Temperature = Quantity<dims::Temperature>;
pub type LuminousIntensity = Quantity<dims::LuminousIntensity>;
pub type AmountOfSubstance = Quantity<dims::AmountOfSubstance>;
/// Plane angle in radians.
pub type Angle = Quantity<dims::Angle>;
/// Plane angle in degrees; a distinct dimension from [`Angle`].
pub type Degrees = Quantity<dims::Degrees>;

pub type Velocity = Quantity<dims::Velocity>;
pub type Acceleration = Quantity<dims::Acceleration>;
pub type AngularVelocity = Quantity<dims::AngularVelocity>;
pub type AngularAcceleration = Quantity<dims::AngularAcceleration>;
pub type Force = Quantity<dims::Force>;
pub type Torque = Quantity<dims::Torque>;
pub type Energy = Torque;
pub type TranslationalStiffness = Quantity<dims::TranslationalStiffness>;
pub type RotationalStiffness = Quantity<dims::RotationalStiffness>;
pub type TranslationalDamping = Quantity<dims::TranslationalDamping>;
pub type RotationalDamping = Quantity<dims::RotationalDamping>;
pub type Power = Quantity<dims::Power>;
pub type Voltage = Quantity<dims::Voltage>;
pub type Resistance = Quantity<dims::Resistance>;
pub type Frequency = Quantity<dims::Frequency>;
