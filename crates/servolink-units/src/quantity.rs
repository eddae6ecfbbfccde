//! The [`Quantity`] value type and its dimension-checked arithmetic.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::dimension::{BASE_SYMBOLS, DimDiv, DimInv, DimMul, Dimension};

/// A scalar tagged with a dimension vector `D`.
///
/// Addition, subtraction and comparison require identical dimensions;
/// multiplication and division compute a new dimension at compile time.
///
/// ```
/// use servolink_units::{AngularAcceleration, AngularVelocity, Time};
///
/// let v0 = AngularVelocity::new(1.0);
/// let accel = AngularAcceleration::new(2.0);
/// let v: AngularVelocity = v0 + accel * Time::new(0.5);
/// assert_eq!(v.value(), 2.0);
/// ```
///
/// Mixing dimensions is rejected by the compiler:
///
/// ```compile_fail
/// use servolink_units::{Angle, Time};
///
/// let _ = Angle::new(1.0) + Time::new(1.0);
/// ```
#[repr(transparent)]
pub struct Quantity<D> {
    value: f32,
    dimension: PhantomData<D>,
}

impl<D> Quantity<D> {
    /// Wrap a raw value expressed in the coherent SI unit of `D`.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            dimension: PhantomData,
        }
    }

    /// The zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0)
    }

    /// Raw value in the coherent SI unit of `D`.
    #[inline]
    pub const fn value(self) -> f32 {
        self.value
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Sign of the value as `-1.0`, `0.0` or `1.0`.
    ///
    /// Unlike [`f32::signum`], zero maps to `0.0`.
    #[inline]
    pub fn signum(self) -> f32 {
        if self.value > 0.0 {
            1.0
        } else if self.value < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    /// Smaller of two quantities; `other` wins when `self` is NaN.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    /// Larger of two quantities; `other` wins when `self` is NaN.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.value.max(other.value))
    }
}

impl<D: Dimension> Quantity<D> {
    /// Exponents of the dimension vector, in base-dimension order.
    pub fn exponents() -> [i8; crate::dimension::BASE_DIMENSIONS] {
        D::EXPONENTS
    }
}

impl<D> Clone for Quantity<D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Quantity<D> {}

impl<D> Default for Quantity<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D> PartialEq for Quantity<D> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<D> PartialOrd for Quantity<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<D: Dimension> fmt::Debug for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        for (symbol, exponent) in BASE_SYMBOLS.iter().zip(D::EXPONENTS) {
            match exponent {
                0 => {}
                1 => write!(f, " {symbol}")?,
                e => write!(f, " {symbol}^{e}")?,
            }
        }
        Ok(())
    }
}

impl<D> fmt::Display for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<D> Neg for Quantity<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<D> Add for Quantity<D> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<D> Sub for Quantity<D> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<D> AddAssign for Quantity<D> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<D> SubAssign for Quantity<D> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<D1, D2> Mul<Quantity<D2>> for Quantity<D1>
where
    D1: DimMul<D2>,
{
    type Output = Quantity<<D1 as DimMul<D2>>::Output>;

    #[inline]
    fn mul(self, rhs: Quantity<D2>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<D1, D2> Div<Quantity<D2>> for Quantity<D1>
where
    D1: DimDiv<D2>,
{
    type Output = Quantity<<D1 as DimDiv<D2>>::Output>;

    #[inline]
    fn div(self, rhs: Quantity<D2>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

impl<D> Mul<f32> for Quantity<D> {
    type Output = Self;

    #[inline]
    fn mul(self, k: f32) -> Self {
        Self::new(self.value * k)
    }
}

impl<D> Mul<Quantity<D>> for f32 {
    type Output = Quantity<D>;

    #[inline]
    fn mul(self, q: Quantity<D>) -> Quantity<D> {
        Quantity::new(self * q.value)
    }
}

impl<D> Div<f32> for Quantity<D> {
    type Output = Self;

    #[inline]
    fn div(self, k: f32) -> Self {
        Self::new(self.value / k)
    }
}

impl<D: DimInv> Div<Quantity<D>> for f32 {
    type Output = Quantity<<D as DimInv>::Output>;

    #[inline]
    fn div(self, q: Quantity<D>) -> Self::Output {
        Quantity::new(self / q.value)
    }
}

impl<D> MulAssign<f32> for Quantity<D> {
    #[inline]
    fn mul_assign(&mut self, k: f32) {
        self.value *= k;
    }
}

impl<D> DivAssign<f32> for Quantity<D> {
    #[inline]
    fn div_assign(&mut self, k: f32) {
        self.value /= k;
    }
}

impl From<Quantity<crate::dimension::dims::Dimensionless>> for f32 {
    fn from(q: Quantity<crate::dimension::dims::Dimensionless>) -> f32 {
        q.value
    }
}

#[cfg(feature = "serde")]
impl<D> serde::Serialize for Quantity<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.value)
    }
}

#[cfg(feature = "serde")]
impl<'de, D> serde::Deserialize<'de> for Quantity<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        <f32 as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}
