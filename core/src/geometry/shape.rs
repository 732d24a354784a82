//! Shapes

use crate::geometry::*;
use crate::pbrt::*;

/// Geometric details of a ray-shape intersection.
#[derive(Copy, Clone, Debug)]
pub struct ShapeHit {
    /// Parametric distance along the ray.
    pub t: Float,

    /// Hit point.
    pub p: Point3f,

    /// Geometric surface normal (unit length, shape orientation).
    pub n: Normal3f,
}

/// A point sampled on the surface of a shape.
#[derive(Copy, Clone, Debug)]
pub struct ShapeSample {
    /// Sampled point.
    pub p: Point3f,

    /// Surface normal at the sampled point.
    pub n: Normal3f,
}

/// Shape common functions
pub trait Shape: Send + Sync {
    /// Returns the shape type. Usually these are behind `Arc<dyn Shape>` and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape within
    /// `(0, r.t_max)`. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point uniformly on the surface and return the PDF with respect
    /// to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (ShapeSample, Float);

    /// Return the PDF with respect to area. By default it is 1/area.
    fn pdf_area(&self) -> Float {
        1.0 / self.area()
    }

    /// Sample a point on the shape as seen from a reference point and return
    /// the PDF with respect to the solid angle from the reference point.
    ///
    /// * `p_ref` - Reference point.
    /// * `u`     - Sample value to use.
    fn sample_solid_angle(&self, p_ref: &Point3f, u: &Point2f) -> (ShapeSample, Float) {
        let (ss, pdf_area) = self.sample_area(u);
        let wi = ss.p - *p_ref;
        if wi.length_squared() == 0.0 {
            return (ss, 0.0);
        }

        // Convert from area measure to solid angle measure.
        let wi = wi.normalize();
        let pdf = pdf_area * p_ref.distance_squared(&ss.p) / ss.n.abs_dot(&(-wi));
        (ss, if pdf.is_finite() { pdf } else { 0.0 })
    }

    /// Returns the PDF with respect to solid angle of sampling direction `wi`
    /// from a reference point.
    ///
    /// * `p_ref` - Reference point.
    /// * `wi`    - The incident direction.
    fn pdf_solid_angle(&self, p_ref: &Point3f, wi: &Vector3f) -> Float {
        match self.intersect(&Ray::new(*p_ref, *wi, INFINITY)) {
            Some(hit) => {
                let pdf = p_ref.distance_squared(&hit.p) / (hit.n.abs_dot(&(-*wi)) * self.area());
                if pdf.is_finite() {
                    pdf
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }
}
