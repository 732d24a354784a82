//! 2-D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;

/// 2-D Axis Aligned Bounding Box containing `Int` values. Used for pixel
/// ranges; `p_max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bounds2i {
    /// Minimum bounds.
    pub p_min: Point2i,

    /// Maximum bounds (exclusive).
    pub p_max: Point2i,
}

impl Bounds2i {
    /// Creates a new bounding box from two corners.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point2i, p2: Point2i) -> Self {
        Self {
            p_min: Point2i::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            p_max: Point2i::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    /// Returns the vector from minimum to maximum corner.
    pub fn diagonal(&self) -> Point2i {
        self.p_max - self.p_min
    }

    /// Returns the number of pixels covered.
    pub fn area(&self) -> Int {
        let d = self.diagonal();
        d.x * d.y
    }

    /// Returns true if the point lies inside, excluding the maximum edges.
    ///
    /// * `p` - The point.
    pub fn contains_exclusive(&self, p: &Point2i) -> bool {
        p.x >= self.p_min.x && p.x < self.p_max.x && p.y >= self.p_min.y && p.y < self.p_max.y
    }

    /// Returns the intersection with another box.
    ///
    /// * `other` - The other box.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            p_min: Point2i::new(self.p_min.x.max(other.p_min.x), self.p_min.y.max(other.p_min.y)),
            p_max: Point2i::new(self.p_max.x.min(other.p_max.x), self.p_max.y.min(other.p_max.y)),
        }
    }

    /// Returns an iterator over the pixels in scanline order.
    pub fn iter(&self) -> impl Iterator<Item = Point2i> {
        let b = *self;
        (b.p_min.y..b.p_max.y).flat_map(move |y| (b.p_min.x..b.p_max.x).map(move |x| Point2i::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_scanline_order() {
        let b = Bounds2i::new(Point2i::new(1, 1), Point2i::new(3, 2));
        let pts: Vec<Point2i> = b.iter().collect();
        assert_eq!(pts, vec![Point2i::new(1, 1), Point2i::new(2, 1)]);
        assert_eq!(b.area(), 2);
    }

    #[test]
    fn intersect_clips_to_image() {
        let img = Bounds2i::new(Point2i::new(0, 0), Point2i::new(10, 10));
        let tile = Bounds2i::new(Point2i::new(8, 8), Point2i::new(16, 16));
        let clipped = tile.intersect(&img);
        assert_eq!(clipped.p_max, Point2i::new(10, 10));
        assert!(clipped.contains_exclusive(&Point2i::new(9, 9)));
        assert!(!clipped.contains_exclusive(&Point2i::new(10, 9)));
    }
}
