//! Primitive List

use crate::geometry::*;
use crate::interaction::*;
use crate::primitive::*;

/// An aggregate that tests every primitive in turn. Suitable for the small
/// scenes the renderer is used with.
pub struct PrimitiveList {
    /// The primitives.
    primitives: Vec<ArcPrimitive>,

    /// Union of the primitive bounds.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new aggregate.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::default(), |b, p| b.union(&p.world_bound()));
        Self { primitives, bounds }
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &mut Ray) -> Option<SurfaceHit<'_>> {
        // Each hit shrinks `r.t_max`, so the last hit is the nearest one.
        let mut nearest = None;
        for primitive in self.primitives.iter() {
            if let Some(hit) = primitive.intersect(r) {
                nearest = Some(hit);
            }
        }
        nearest
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r))
    }
}
