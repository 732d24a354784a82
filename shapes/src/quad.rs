//! Quads

use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;

/// A one-sided parallelogram spanned by two edges from a corner. The normal
/// is `normalize(e1 x e2)`.
#[derive(Clone, Debug)]
pub struct Quad {
    /// Corner.
    pub p0: Point3f,

    /// First edge.
    pub e1: Vector3f,

    /// Second edge.
    pub e2: Vector3f,

    /// Unit normal.
    n: Normal3f,

    /// `(e1 x e2) / |e1 x e2|^2`; used to recover edge coordinates of a hit.
    w: Vector3f,

    /// Surface area.
    area: Float,
}

impl Quad {
    /// Create a new quad.
    ///
    /// * `p0` - Corner.
    /// * `e1` - First edge.
    /// * `e2` - Second edge.
    pub fn new(p0: Point3f, e1: Vector3f, e2: Vector3f) -> Self {
        let c = e1.cross(&e2);
        let area = c.length();
        assert!(area > 0.0, "Degenerate quad with edges {e1} and {e2}");
        Self {
            p0,
            e1,
            e2,
            n: Normal3f::from(c / area),
            w: c / (area * area),
            area,
        }
    }

    /// Returns the unit normal.
    pub fn normal(&self) -> Normal3f {
        self.n
    }
}

impl Shape for Quad {
    fn get_type(&self) -> &'static str {
        "quad"
    }

    fn world_bound(&self) -> Bounds3f {
        Bounds3f::new(self.p0, self.p0 + self.e1 + self.e2)
            .union_point(&(self.p0 + self.e1))
            .union_point(&(self.p0 + self.e2))
    }

    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        let denom = self.n.dot(&r.d);
        if denom == 0.0 {
            return None;
        }

        let t = self.n.dot(&(self.p0 - r.o)) / denom;
        if !(t > 0.0 && t < r.t_max) {
            return None;
        }

        // Edge coordinates of the hit point on the plane.
        let p = r.at(t);
        let h = p - self.p0;
        let alpha = self.w.dot(&h.cross(&self.e2));
        let beta = self.w.dot(&self.e1.cross(&h));
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return None;
        }

        Some(ShapeHit { t, p, n: self.n })
    }

    fn area(&self) -> Float {
        self.area
    }

    fn sample_area(&self, u: &Point2f) -> (ShapeSample, Float) {
        let p = self.p0 + self.e1 * u[0] + self.e2 * u[1];
        (ShapeSample { p, n: self.n }, 1.0 / self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn floor() -> Quad {
        // Unit square at y=0 facing +y.
        Quad::new(
            Point3f::new(-0.5, 0.0, -0.5),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn normal_follows_edge_order() {
        let q = floor();
        assert!(approx_eq!(f32, q.normal().y, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, q.area(), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn hits_from_both_sides() {
        let q = floor();
        let down = Ray::new(Point3f::new(0.1, 2.0, 0.2), Vector3f::new(0.0, -1.0, 0.0), INFINITY);
        let hit = q.intersect(&down).unwrap();
        assert!(approx_eq!(f32, hit.t, 2.0, epsilon = 1e-6));
        let up = Ray::new(Point3f::new(0.1, -1.0, 0.2), Vector3f::new(0.0, 1.0, 0.0), INFINITY);
        assert!(q.intersect_p(&up));
    }

    #[test]
    fn misses_outside_edges_and_parallel_rays() {
        let q = floor();
        let outside = Ray::new(Point3f::new(0.6, 2.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), INFINITY);
        assert!(q.intersect(&outside).is_none());
        let parallel = Ray::new(Point3f::new(-2.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), INFINITY);
        assert!(q.intersect(&parallel).is_none());
        let behind = Ray::new(Point3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), INFINITY);
        assert!(q.intersect(&behind).is_none());
    }

    #[test]
    fn solid_angle_pdf_matches_sample() {
        let q = floor();
        let p_ref = Point3f::new(0.0, 1.0, 0.0);
        let (ss, pdf) = q.sample_solid_angle(&p_ref, &Point2f::new(0.3, 0.7));
        let wi = (ss.p - p_ref).normalize();
        let pdf2 = q.pdf_solid_angle(&p_ref, &wi);
        assert!(approx_eq!(f32, pdf, pdf2, epsilon = 1e-4 * pdf));
    }

    proptest! {
        #[test]
        fn samples_hit_the_quad(u0 in 0.01..0.99f32, u1 in 0.01..0.99f32) {
            let q = floor();
            let (ss, _) = q.sample_area(&Point2f::new(u0, u1));
            let r = Ray::new(Point3f::new(ss.p.x, 1.0, ss.p.z), Vector3f::new(0.0, -1.0, 0.0), INFINITY);
            let hit = q.intersect(&r);
            prop_assert!(hit.is_some());
        }
    }
}
