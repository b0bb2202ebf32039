//! Fixed-precision rounding shared by the engines

/// Decimal places kept for allocated values.
pub const VALUE_PRECISION: i32 = 4;

/// Decimal places kept for variance percentages.
pub const VARIANCE_PRECISION: i32 = 2;

/// Largest drift a single rounded child may contribute to its parent's sum.
pub const SUM_TOLERANCE: f64 = 1e-4;

/// 2^52: from here on an `f64` has no fractional digits.
const MAX_FRACTIONAL: f64 = 4_503_599_627_370_496.0;

/// Round half away from zero to `places` decimal places.
///
/// Magnitudes too large to carry `places` fractional digits come back
/// unchanged. Negative zero is normalized to `0.0` so it never renders as `-0`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() || value.abs() >= MAX_FRACTIONAL / factor {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Allowed gap between a parent and the sum of `children` rounded children.
///
/// Grows with `magnitude` once float spacing exceeds the rounding step.
pub fn sum_tolerance(magnitude: f64, children: usize) -> f64 {
    (SUM_TOLERANCE + magnitude.abs() * f64::EPSILON) * children as f64
}
