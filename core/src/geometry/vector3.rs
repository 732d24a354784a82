//! 3-D vectors

use super::common::*;
use crate::geometry::*;
use crate::pbrt::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D vector containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num> Vector3<T> {
    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero vector.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with a normal.
    ///
    /// * `other` - The normal.
    fn dot(&self, other: &Normal3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Copy> Cross<Vector3<T>> for Vector3<T> {
    type Output = Self;

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    fn cross(&self, other: &Vector3<T>) -> Self::Output {
        Self::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

/// Construct a local coordinate system given only a single 3-D vector. Returns two vectors that are perpendicular to
/// each other and to `v1`.
///
/// * `v1` - The input vector; assumed to be normalized.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    (v2, v1.cross(&v2))
}

impl<T: Num> Add for Vector3<T> {
    type Output = Self;

    /// Adds the given vector and returns the result.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign for Vector3<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> Sub for Vector3<T> {
    type Output = Self;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> SubAssign for Vector3<T> {
    /// Performs the `-=` operation.
    ///
    /// * `other` - The vector to subtract.
    fn sub_assign(&mut self, other: Self) {
        *self = Self::new(self.x - other.x, self.y - other.y, self.z - other.z);
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: T) {
        *self = Self::new(f * self.x, f * self.y, f * self.z);
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    /// Scale the vector.
    ///
    /// * `v` - The vector.
    fn mul(self, v: Vector3f) -> Self::Output {
        Vector3f::new(self * v.x, self * v.y, self * v.z)
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self::Output {
        debug_assert!(!f.is_zero());
        let inv = T::one() / f;
        Self::new(inv * self.x, inv * self.y, inv * self.z)
    }
}

impl<T: Num + Copy> DivAssign<T> for Vector3<T> {
    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: T) {
        debug_assert!(!f.is_zero());
        let inv = T::one() / f;
        *self = Self::new(inv * self.x, inv * self.y, inv * self.z);
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    /// Flip the vector's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    /// Index the vector by an axis to get the immutable coordinate axis value.
    ///
    /// * `i` - A 3-D coordinate axis.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for Vector3"),
        }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    /// Convert a 3-D normal to a 3-D vector.
    ///
    /// * `n` - 3-D normal.
    fn from(n: Normal3<T>) -> Self {
        Self { x: n.x, y: n.y, z: n.z }
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    /// Convert a 3-D point to a 3-D vector.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3<T>) -> Self {
        Self { x: p.x, y: p.y, z: p.z }
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_vector() {
        assert!(Vector3::new(0, 0, 0) == Vector3::zero());
        assert!(Vector3::new(0.0, 0.0, 0.0) == Vector3f::ZERO);
    }

    #[test]
    fn has_nans() {
        assert!(!Vector3::new(0.0, 0.0, 0.0).has_nans());
        assert!(Vector3::new(f32::NAN, 0.0, 0.0).has_nans());
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        let y = Vector3f::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3f::new(0.0, 0.0, 1.0));
    }

    prop_compose! {
        fn unit_vector3f()(x in -1.0..1.0f32, y in -1.0..1.0f32, z in -1.0..1.0f32)
            -> Vector3f {
            let v = Vector3f::new(x, y, z);
            if v.length_squared() < 1e-4 {
                Vector3f::new(0.0, 0.0, 1.0)
            } else {
                v.normalize()
            }
        }
    }

    proptest! {
        #[test]
        fn coordinate_system_is_orthonormal(v in unit_vector3f()) {
            let (v2, v3) = coordinate_system(&v);
            prop_assert!(approx_eq!(f32, v.dot(&v2), 0.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, v.dot(&v3), 0.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, v2.dot(&v3), 0.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, v2.length(), 1.0, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, v3.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn dot_is_commutative(v1 in unit_vector3f(), v2 in unit_vector3f()) {
            prop_assert_eq!(v1.dot(&v2), v2.dot(&v1));
        }
    }
}
