//! 2-D Points

use crate::pbrt::*;
use num_traits::Num;
use std::fmt;
use std::ops::{Add, Index, Sub};

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

/// 2-D point containing `Int` values.
pub type Point2i = Point2<Int>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point2f {
    /// Returns the integer pixel containing this continuous raster position.
    pub fn floor(&self) -> Point2i {
        Point2i::new(self.x.floor() as Int, self.y.floor() as Int)
    }
}

impl<T: Num> Add for Point2<T> {
    type Output = Self;

    /// Adds the given point and returns the result.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num> Sub for Point2<T> {
    type Output = Self;

    /// Subtracts the given point and returns the result.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `i` - A 2-D coordinate axis.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis for Point2"),
        }
    }
}

impl From<Point2i> for Point2f {
    /// Convert a 2-D integer point to a 2-D floating point one.
    ///
    /// * `p` - 2-D integer point.
    fn from(p: Point2i) -> Self {
        Self::new(p.x as Float, p.y as Float)
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
