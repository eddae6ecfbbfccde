//! Radian/degree conversions.

use crate::{Angle, Degrees};

/// Degrees per radian (`180 / π`).
pub const DEGREES_PER_RADIAN: f32 = 180.0 / core::f32::consts::PI;

#[inline]
pub fn angle_to_degrees(angle: Angle) -> Degrees {
    Degrees::new(angle.value() * DEGREES_PER_RADIAN)
}

#[inline]
pub fn degrees_to_angle(degrees: Degrees) -> Angle {
    Angle::new(degrees.value() / DEGREES_PER_RADIAN)
}

/// Shorthand for `degrees_to_angle(Degrees::new(value))`.
#[inline]
pub fn deg(value: f32) -> Angle {
    degrees_to_angle(Degrees::new(value))
}
