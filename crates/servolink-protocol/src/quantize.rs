//! Linear fixed-point mapping between a bounded real range and `bits`-wide
//! unsigned integers.

use servolink_units::{Limits, Quantity};

/// Field width of the position channel.
pub const POSITION_BITS: u8 = 16;
/// Field width of the velocity, torque, stiffness and damper channels.
pub const CHANNEL_BITS: u8 = 12;

#[inline]
fn levels(bits: u8) -> f64 {
    let bits = bits.clamp(1, 16);
    f64::from((1u32 << bits) - 1)
}

/// `round((x - min) * (2^bits - 1) / (max - min))`, saturated to the field.
///
/// An empty or inverted range maps everything to zero. `bits` is capped at 16.
pub fn quantize(x: f32, min: f32, max: f32, bits: u8) -> u16 {
    let span = f64::from(max) - f64::from(min);
    if !(span > 0.0) {
        return 0;
    }
    let levels = levels(bits);
    let scaled = ((f64::from(x) - f64::from(min)) * levels / span).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, levels) as u16
}

/// `u * (max - min) / (2^bits - 1) + min`.
pub fn dequantize(u: u16, min: f32, max: f32, bits: u8) -> f32 {
    let span = f64::from(max) - f64::from(min);
    (f64::from(u) * span / levels(bits) + f64::from(min)) as f32
}

/// [`quantize`] over a typed quantity and its limits.
#[inline]
pub fn quantize_quantity<D>(x: Quantity<D>, limits: &Limits<D>, bits: u8) -> u16 {
    quantize(x.value(), limits.min.value(), limits.max.value(), bits)
}

/// [`dequantize`] into a typed quantity.
#[inline]
pub fn dequantize_quantity<D>(u: u16, limits: &Limits<D>, bits: u8) -> Quantity<D> {
    Quantity::new(dequantize(u, limits.min.value(), limits.max.value(), bits))
}

/// Size of one quantization step for a range.
pub fn resolution(min: f32, max: f32, bits: u8) -> f32 {
    ((f64::from(max) - f64::from(min)) / levels(bits)) as f32
}
