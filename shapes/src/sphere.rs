//! Spheres

use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampling::*;

/// A full sphere in world space with outward facing normals.
#[derive(Clone, Debug)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center` - Center of the sphere.
    /// * `radius` - Radius of sphere.
    pub fn new(center: Point3f, radius: Float) -> Self {
        assert!(radius > 0.0, "Sphere radius must be positive, got {radius}");
        Self { center, radius }
    }
}

impl Shape for Sphere {
    /// Returns the shape type. Usually these are behind `Arc<dyn Shape>` and
    /// harder to debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the shape within
    /// `(0, r.t_max)`. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        // Solve the quadratic in double precision to keep grazing hits stable.
        let oc = r.o - self.center;
        let (dx, dy, dz) = (r.d.x as f64, r.d.y as f64, r.d.z as f64);
        let (ox, oy, oz) = (oc.x as f64, oc.y as f64, oc.z as f64);
        let radius = self.radius as f64;

        let a = dx * dx + dy * dy + dz * dz;
        let b = 2.0 * (dx * ox + dy * oy + dz * oz);
        let c = ox * ox + oy * oy + oz * oz - radius * radius;
        let discrim = b * b - 4.0 * a * c;
        if a == 0.0 || discrim < 0.0 {
            return None;
        }

        let root_discrim = discrim.sqrt();
        let q = if b < 0.0 {
            -0.5 * (b - root_discrim)
        } else {
            -0.5 * (b + root_discrim)
        };
        let (mut t0, mut t1) = (q / a, if q != 0.0 { c / q } else { q / a });
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        let t_max = r.t_max as f64;
        let t_hit = if t0 > 0.0 && t0 < t_max {
            t0
        } else if t1 > 0.0 && t1 < t_max {
            t1
        } else {
            return None;
        };
        let t_hit = t_hit as Float;

        let p = r.at(t_hit);
        let n = Normal3f::from((p - self.center) / self.radius).normalize();
        Some(ShapeHit { t: t_hit, p, n })
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Sample a point uniformly on the surface and return the PDF with respect
    /// to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (ShapeSample, Float) {
        let d = uniform_sample_sphere(u);
        let p = self.center + d * self.radius;
        let n = Normal3f::from(d).normalize();
        (ShapeSample { p, n }, 1.0 / self.area())
    }
}
