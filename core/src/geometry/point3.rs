//! 3-D Points

use crate::geometry::*;
use crate::pbrt::*;
use num_traits::Num;
use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Point3f {
    /// Returns the squared distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> Float {
        (*self - *other).length_squared()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        (*self - *other).length()
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns a point with the component-wise minimum coordinates.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(min(self.x, other.x), min(self.y, other.y), min(self.z, other.z))
    }

    /// Returns a point with the component-wise maximum coordinates.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(max(self.x, other.x), max(self.y, other.y), max(self.z, other.z))
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the given vector.
    ///
    /// * `v` - The vector to add.
    fn add(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    /// Adds the given point and returns the result. Used for weighted sums.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Subtracts the given point and returns the vector between them.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the negated vector.
    ///
    /// * `v` - The vector to subtract.
    fn sub(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Self;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `i` - A 3-D coordinate axis.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for Point3"),
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn distance_between_points() {
        let p1 = Point3f::new(1.0, 2.0, 3.0);
        let p2 = Point3f::new(4.0, 6.0, 3.0);
        assert!(approx_eq!(f32, p1.distance(&p2), 5.0));
        assert!(approx_eq!(f32, p1.distance_squared(&p2), 25.0));
    }
}
