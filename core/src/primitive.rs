//! Primitive

use crate::geometry::*;
use crate::interaction::*;
use std::sync::Arc;

/// Primitive interface. This is the intersector the integrators query: it is
/// only read during rendering and must be safe for concurrent queries.
pub trait Primitive: Send + Sync {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns details of the nearest intersection and shrinks `r.t_max` to
    /// the hit distance. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceHit<'_>>;

    /// Returns `true` if the ray hits anything within `(0, r.t_max)`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool;
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive>;
