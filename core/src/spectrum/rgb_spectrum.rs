//! RGB Spectrum.

use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Sub};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents an spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// Unit value across all wavelengths.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v; RGB_SAMPLES] }
    }

    /// Create a new `RGBSpectrum` from red, green and blue components.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns the RGB coefficients.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Returns true if all samples are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any sample is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|v| v.is_finite())
    }

    /// Returns true if any sample is negative.
    pub fn has_negatives(&self) -> bool {
        self.c.iter().any(|&v| v < 0.0)
    }

    /// Returns the y-coefficient of XYZ colour (luminance).
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Clamps the sample values to the given range.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: self.c.map(|v| clamp(v, low, high)),
        }
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [self.c[0] + other.c[0], self.c[1] + other.c[1], self.c[2] + other.c[2]],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [self.c[0] - other.c[0], self.c[1] - other.c[1], self.c[2] - other.c[2]],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies component-wise with the given spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [self.c[0] * other.c[0], self.c[1] * other.c[1], self.c[2] * other.c[2]],
        }
    }
}

impl MulAssign for RGBSpectrum {
    /// Performs the `*=` operation with another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the spectrum.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self { c: self.c.map(|v| v * f) }
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Scales the spectrum.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the spectrum.
    ///
    /// * `s` - The spectrum.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the spectrum by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Scales the spectrum by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Returns the sample value at the given index.
    ///
    /// * `i` - Sample index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn luminance_of_white_is_one() {
        assert!(approx_eq!(f32, RGBSpectrum::ONE.y(), 1.0, epsilon = 1e-5));
        assert_eq!(RGBSpectrum::ZERO.y(), 0.0);
    }

    #[test]
    fn finiteness_checks() {
        assert!(RGBSpectrum::ZERO.is_black());
        assert!(RGBSpectrum::new(1.0).is_finite());
        assert!(!RGBSpectrum::from_rgb(1.0, Float::INFINITY, 0.0).is_finite());
        assert!(RGBSpectrum::from_rgb(Float::NAN, 0.0, 0.0).has_nans());
        assert!(RGBSpectrum::from_rgb(0.0, -0.5, 0.0).has_negatives());
    }

    #[test]
    fn arithmetic() {
        let a = RGBSpectrum::from_rgb(1.0, 2.0, 3.0);
        let b = RGBSpectrum::new(2.0);
        assert_eq!((a * b).to_rgb(), [2.0, 4.0, 6.0]);
        assert_eq!((a + b).to_rgb(), [3.0, 4.0, 5.0]);
        assert_eq!((a / 2.0).to_rgb(), [0.5, 1.0, 1.5]);
    }
}
