//! Type-level dimension vectors.
//!
//! A dimension is a tuple of nine integer exponents over the base dimensions
//! (length, mass, time, current, temperature, luminous intensity, amount of
//! substance, radian, degree). The exponents are `typenum` integers so that
//! multiplying or dividing two quantities computes the resulting dimension at
//! compile time. Adding quantities whose dimensions differ does not type-check.

use core::marker::PhantomData;
use core::ops::{Add, Neg, Sub};

use typenum::{Diff, Integer, N1, N2, N3, Negate, P1, P2, Sum, Z0};

/// Dimension vector marker.
///
/// Parameters, in order: length (m), mass (kg), time (s), current (A),
/// temperature (K), luminous intensity (cd), amount of substance (mol),
/// plane angle in radians, plane angle in degrees.
pub struct Dim<L, M, T, I, Th, J, N, R, Dg>(PhantomData<(L, M, T, I, Th, J, N, R, Dg)>);

/// Number of base dimensions tracked by [`Dim`].
pub const BASE_DIMENSIONS: usize = 9;

/// Symbols of the base dimensions, in [`Dim`] parameter order.
pub const BASE_SYMBOLS: [&str; BASE_DIMENSIONS] = ["m", "kg", "s", "A", "K", "cd", "mol", "rad", "deg"];

/// Implemented by every well-formed [`Dim`].
pub trait Dimension: 'static {
    /// Exponents of each base dimension, in [`BASE_SYMBOLS`] order.
    const EXPONENTS: [i8; BASE_DIMENSIONS];

    /// True when every exponent is zero.
    fn is_dimensionless() -> bool {
        Self::EXPONENTS.iter().all(|e| *e == 0)
    }
}

impl<L, M, T, I, Th, J, N, R, Dg> Dimension for Dim<L, M, T, I, Th, J, N, R, Dg>
where
    L: Integer + 'static,
    M: Integer + 'static,
    T: Integer + 'static,
    I: Integer + 'static,
    Th: Integer + 'static,
    J: Integer + 'static,
    N: Integer + 'static,
    R: Integer + 'static,
    Dg: Integer + 'static,
{
    const EXPONENTS: [i8; BASE_DIMENSIONS] = [
        L::I8,
        M::I8,
        T::I8,
        I::I8,
        Th::I8,
        J::I8,
        N::I8,
        R::I8,
        Dg::I8,
    ];
}

/// Dimension of a product: exponents are summed.
pub trait DimMul<Rhs> {
    /// Resulting dimension.
    type Output;
}

/// Dimension of a quotient: exponents are subtracted.
pub trait DimDiv<Rhs> {
    /// Resulting dimension.
    type Output;
}

/// Dimension of a reciprocal: exponents are negated.
pub trait DimInv {
    /// Resulting dimension.
    type Output;
}

impl<L1, M1, T1, I1, Th1, J1, N1_, R1, Dg1, L2, M2, T2, I2, Th2, J2, N2_, R2, Dg2>
    DimMul<Dim<L2, M2, T2, I2, Th2, J2, N2_, R2, Dg2>> for Dim<L1, M1, T1, I1, Th1, J1, N1_, R1, Dg1>
where
    L1: Add<L2>,
    M1: Add<M2>,
    T1: Add<T2>,
    I1: Add<I2>,
    Th1: Add<Th2>,
    J1: Add<J2>,
    N1_: Add<N2_>,
    R1: Add<R2>,
    Dg1: Add<Dg2>,
{
    type Output = Dim<
        Sum<L1, L2>,
        Sum<M1, M2>,
        Sum<T1, T2>,
        Sum<I1, I2>,
        Sum<Th1, Th2>,
        Sum<J1, J2>,
        Sum<N1_, N2_>,
        Sum<R1, R2>,
        Sum<Dg1, Dg2>,
    >;
}

impl<L1, M1, T1, I1, Th1, J1, N1_, R1, Dg1, L2, M2, T2, I2, Th2, J2, N2_, R2, Dg2>
    DimDiv<Dim<L2, M2, T2, I2, Th2, J2, N2_, R2, Dg2>> for Dim<L1, M1, T1, I1, Th1, J1, N1_, R1, Dg1>
where
    L1: Sub<L2>,
    M1: Sub<M2>,
    T1: Sub<T2>,
    I1: Sub<I2>,
    Th1: Sub<Th2>,
    J1: Sub<J2>,
    N1_: Sub<N2_>,
    R1: Sub<R2>,
    Dg1: Sub<Dg2>,
{
    type Output = Dim<
        Diff<L1, L2>,
        Diff<M1, M2>,
        Diff<T1, T2>,
        Diff<I1, I2>,
        Diff<Th1, Th2>,
        Diff<J1, J2>,
        Diff<N1_, N2_>,
        Diff<R1, R2>,
        Diff<Dg1, Dg2>,
    >;
}

impl<L, M, T, I, Th, J, N, R, Dg> DimInv for Dim<L, M, T, I, Th, J, N, R, Dg>
where
    L: Neg,
    M: Neg,
    T: Neg,
    I: Neg,
    Th: Neg,
    J: Neg,
    N: Neg,
    R: Neg,
    Dg: Neg,
{
    type Output = Dim<
        Negate<L>,
        Negate<M>,
        Negate<T>,
        Negate<I>,
        Negate<Th>,
        Negate<J>,
        Negate<N>,
        Negate<R>,
        Negate<Dg>,
    >;
}

/// Named dimension vectors.
pub mod dims {
    use super::*;

    pub type Dimensionless = Dim<Z0, Z0, Z0, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Length = Dim<P1, Z0, Z0, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Mass = Dim<Z0, P1, Z0, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Time = Dim<Z0, Z0, P1, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Current = Dim<Z0, Z0, Z0, P1, Z0, Z0, Z0, Z0, Z0>;
    pub type Temperature = Dim<Z0, Z0, Z0, Z0, P1, Z0, Z0, Z0, Z0>;
    pub type LuminousIntensity = Dim<Z0, Z0, Z0, Z0, Z0, P1, Z0, Z0, Z0>;
    pub type AmountOfSubstance = Dim<Z0, Z0, Z0, Z0, Z0, Z0, P1, Z0, Z0>;
    pub type Angle = Dim<Z0, Z0, Z0, Z0, Z0, Z0, Z0, P1, Z0>;
    pub type Degrees = Dim<Z0, Z0, Z0, Z0, Z0, Z0, Z0, Z0, P1>;

    pub type Velocity = Dim<P1, Z0, N1, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Acceleration = Dim<P1, Z0, N2, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type AngularVelocity = Dim<Z0, Z0, N1, Z0, Z0, Z0, Z0, P1, Z0>;
    pub type AngularAcceleration = Dim<Z0, Z0, N2, Z0, Z0, Z0, Z0, P1, Z0>;
    pub type Force = Dim<P1, P1, N2, Z0, Z0, Z0, Z0, Z0, Z0>;
    /// Force times length; also the dimension of energy.
    pub type Torque = Dim<P2, P1, N2, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type TranslationalStiffness = Dim<Z0, P1, N2, Z0, Z0, Z0, Z0, Z0, Z0>;
    /// Torque per radian.
    pub type RotationalStiffness = Dim<P2, P1, N2, Z0, Z0, Z0, Z0, N1, Z0>;
    pub type TranslationalDamping = Dim<Z0, P1, N1, Z0, Z0, Z0, Z0, Z0, Z0>;
    /// Torque times time per radian.
    pub type RotationalDamping = Dim<P2, P1, N1, Z0, Z0, Z0, Z0, N1, Z0>;
    pub type Power = Dim<P2, P1, N3, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Voltage = Dim<P2, P1, N3, N1, Z0, Z0, Z0, Z0, Z0>;
    pub type Resistance = Dim<P2, P1, N3, typenum::N2, Z0, Z0, Z0, Z0, Z0>;
    pub type Frequency = Dim<Z0, Z0, N1, Z0, Z0, Z0, Z0, Z0, Z0>;
}
