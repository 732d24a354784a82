//! 3-D normals

use super::common::*;
use crate::geometry::*;
use crate::pbrt::*;
use num_traits::Num;
use std::fmt;
use std::ops::{Mul, Neg};

/// A 3-D normal containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D normal containing `Float` values.
pub type Normal3f = Normal3<Float>;

impl<T: Num> Normal3<T> {
    /// Creates a new 3-D normal.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Normal3f {
    /// Returns the unit normal.
    pub fn normalize(&self) -> Self {
        let v = Vector3f::from(*self).normalize();
        Self::new(v.x, v.y, v.z)
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with another normal.
    ///
    /// * `other` - The other normal.
    fn dot(&self, other: &Normal3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with a vector.
    ///
    /// * `other` - The vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Vector3<T>> for Normal3<T> {}
impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Normal3<T>> for Normal3<T> {}

impl<T: Num + Copy> Mul<T> for Normal3<T> {
    type Output = Self;

    /// Scale the normal.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Normal3<T> {
    type Output = Self;

    /// Flip the normal's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> From<Vector3<T>> for Normal3<T> {
    /// Convert a 3-D vector to a 3-D surface normal.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl<T: fmt::Display> fmt::Display for Normal3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_forward_flips_into_hemisphere() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let v = Vector3f::new(0.0, 0.5, -1.0);
        assert_eq!(n.face_forward(&v), Normal3f::new(-0.0, -0.0, -1.0));
        assert_eq!(n.face_forward(&-v), n);
    }
}
