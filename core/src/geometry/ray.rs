//! Rays

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;

/// A semi-infinite line.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_max` - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Returns a ray leaving a surface point in direction `d`. The origin is
    /// nudged off the surface to the side `d` points to so the ray does not
    /// re-intersect the surface it starts on.
    ///
    /// * `p` - The surface point.
    /// * `n` - Surface normal, if any.
    /// * `d` - Direction.
    pub fn spawn(p: &Point3f, n: Option<&Normal3f>, d: &Vector3f) -> Self {
        Self::new(offset_ray_origin(p, n, d), *d, INFINITY)
    }

    /// Returns a shadow segment between two points, both nudged off their
    /// surfaces. The ray parameter spans `[0, 1 - SHADOW_EPSILON)` so the
    /// target surface itself is not reported as an occluder.
    ///
    /// * `p0` - Start point.
    /// * `n0` - Surface normal at the start point, if any.
    /// * `p1` - End point.
    /// * `n1` - Surface normal at the end point, if any.
    pub fn spawn_to(p0: &Point3f, n0: Option<&Normal3f>, p1: &Point3f, n1: Option<&Normal3f>) -> Self {
        let o = offset_ray_origin(p0, n0, &(*p1 - *p0));
        let target = offset_ray_origin(p1, n1, &(o - *p1));
        Self::new(o, target - o, 1.0 - SHADOW_EPSILON)
    }

    /// Returns the point at a given distance along the ray.
    ///
    /// * `t` - The parametric distance.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

/// Offsets a ray origin along the normal towards the hemisphere of `w`.
///
/// * `p` - The point.
/// * `n` - The surface normal, if any.
/// * `w` - The direction of the ray.
fn offset_ray_origin(p: &Point3f, n: Option<&Normal3f>, w: &Vector3f) -> Point3f {
    match n {
        Some(n) => {
            let offset = Vector3f::from(*n) * RAY_EPSILON;
            if n.dot(w) < 0.0 {
                *p - offset
            } else {
                *p + offset
            }
        }
        None => *p,
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[o={}, d={}, t_max={}]", self.o, self.d, self.t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_offsets_towards_direction() {
        let p = Point3f::new(0.0, 0.0, 0.0);
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let up = Ray::spawn(&p, Some(&n), &Vector3f::new(0.0, 1.0, 0.0));
        assert!(up.o.y > 0.0);
        let down = Ray::spawn(&p, Some(&n), &Vector3f::new(0.0, -1.0, 0.0));
        assert!(down.o.y < 0.0);
        let free = Ray::spawn(&p, None, &Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(free.o, p);
    }

    #[test]
    fn spawn_to_stops_short_of_target() {
        let p0 = Point3f::new(0.0, 0.0, 0.0);
        let p1 = Point3f::new(0.0, 0.0, 2.0);
        let r = Ray::spawn_to(&p0, None, &p1, None);
        assert!(r.t_max < 1.0);
        assert!(r.at(r.t_max).z < 2.0);
    }
}
