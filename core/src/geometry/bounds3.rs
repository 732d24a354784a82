//! 3-D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;

/// 3-D Axis Aligned Bounding Box containing `Float` values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty box whose union with any point is that point.
    fn default() -> Self {
        Self {
            p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
            p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
        }
    }
}

impl Bounds3f {
    /// Creates a new bounding box enclosing two points.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box encloses nothing.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns the union with a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the union with another box.
    ///
    /// * `other` - The other bounding box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns the vector from minimum to maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the center and radius of a sphere enclosing the box.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        if self.is_empty() {
            return (Point3f::default(), 0.0);
        }
        let center = (self.p_min + self.p_max) * 0.5;
        (center, center.distance(&self.p_max))
    }
}
