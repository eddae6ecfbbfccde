//! Range bounds and saturation.

use crate::quantity::Quantity;

/// Saturate `value` into `[min, max]`.
///
/// Computed as `max(min(value, max), min)`:
/// - when `min > max` the result is always `min`;
/// - a NaN `value` is returned unchanged.
///
/// ```
/// use servolink_units::{Torque, clamp};
///
/// let lo = Torque::new(-1.0);
/// let hi = Torque::new(1.0);
/// assert_eq!(clamp(Torque::new(3.0), lo, hi), hi);
/// assert_eq!(clamp(Torque::new(0.5), lo, hi).value(), 0.5);
/// // inverted bounds collapse onto the lower bound
/// assert_eq!(clamp(Torque::new(0.0), hi, lo), hi);
/// ```
#[inline]
pub fn clamp<D>(value: Quantity<D>, min: Quantity<D>, max: Quantity<D>) -> Quantity<D> {
    let upper = if value > max { max } else { value };
    if upper < min { min } else { upper }
}

/// Closed interval bounding a quantity of dimension `D`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct Limits<D> {
    pub min: Quantity<D>,
    pub max: Quantity<D>,
}

impl<D> Limits<D> {
    pub const fn new(min: Quantity<D>, max: Quantity<D>) -> Self {
        Self { min, max }
    }

    /// Build limits from raw values in the coherent SI unit of `D`.
    pub const fn from_values(min: f32, max: f32) -> Self {
        Self::new(Quantity::new(min), Quantity::new(max))
    }

    /// Symmetric limits `[-bound, bound]`.
    pub fn symmetric(bound: Quantity<D>) -> Self {
        let bound = bound.abs();
        Self::new(-bound, bound)
    }

    /// See [`clamp`].
    #[inline]
    pub fn clamp(&self, value: Quantity<D>) -> Quantity<D> {
        clamp(value, self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: Quantity<D>) -> bool {
        value >= self.min && value <= self.max
    }

    /// `max - min`; negative for inverted limits.
    #[inline]
    pub fn span(&self) -> Quantity<D> {
        self.max - self.min
    }

    /// True when `min <= max` and both bounds are finite.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl<D> Clone for Limits<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Limits<D> {}

impl<D> PartialEq for Limits<D> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<D> core::fmt::Debug for Limits<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Clamp against `user` when present, otherwise against `fallback`.
#[inline]
pub fn clamp_with<D>(
    value: Quantity<D>,
    user: Option<&Limits<D>>,
    fallback: &Limits<D>,
) -> Quantity<D> {
    user.unwrap_or(fallback).clamp(value)
}

/// Clamp against `limits` when present, otherwise pass `value` through.
#[inline]
pub fn clamp_optional<D>(value: Quantity<D>, limits: Option<&Limits<D>>) -> Quantity<D> {
    match limits {
        Some(limits) => limits.clamp(value),
        None => value,
    }
}
