//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
///
/// A `NaN` value is mapped to zero (clamped into the range), since a `NaN`
/// demand must never reach an actuator.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret.is_nan() {
        ret = T::zero();
    }
    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}
