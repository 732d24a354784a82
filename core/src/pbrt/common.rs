//! Common

use num_traits::Num;
use std::ops::Neg;

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Shadow rays stop this fraction short of their target.
pub const SHADOW_EPSILON: Float = 0.0001;

/// Offset applied along the surface normal when spawning rays.
pub const RAY_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value to the closed interval [low, high].
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Convert degrees to radians.
///
/// * `deg` - Angle in degrees.
#[inline(always)]
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Returns gamma corrected values for use in 8-bit images.
///
/// * `value` - Value to correct.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
/// Returns the last index `i` in `[0, size - 2]` for which `pred(i)` holds.
///
/// * `size` - Size of array.
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    debug_assert!(size >= 2);
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first.saturating_sub(1), 0, size - 2)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn find_interval_edges() {
        let cdf = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.0), 0);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.3), 1);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.999), 2);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 1.0), 2);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= -1.0), 0);
    }

    proptest! {
        #[test]
        fn find_interval_brackets_value(u in 0.0..1.0f32) {
            let cdf = [0.0, 0.1, 0.35, 0.6, 0.61, 1.0];
            let i = find_interval(cdf.len(), |i| cdf[i] <= u);
            prop_assert!(cdf[i] <= u);
            prop_assert!(u < cdf[i + 1]);
        }

        #[test]
        fn clamp_stays_in_range(v in -100.0..100.0f32) {
            let c = clamp(v, -1.0, 1.0);
            prop_assert!((-1.0..=1.0).contains(&c));
        }
    }
}
