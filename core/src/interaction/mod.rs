//! Interactions

use crate::geometry::*;
use crate::light::*;
use crate::material::*;
use crate::reflection::*;
use crate::spectrum::*;

/// Stores the geometry and surface properties at a ray-surface intersection.
/// References borrow from the scene for as long as the hit is alive.
#[derive(Copy, Clone)]
pub struct SurfaceHit<'scene> {
    /// Hit point.
    pub p: Point3f,

    /// Unit surface normal.
    pub n: Normal3f,

    /// Unit direction back along the incoming ray.
    pub wo: Vector3f,

    /// Material; `None` marks a surface that does not scatter light.
    pub material: Option<&'scene dyn Material>,

    /// Emission when the surface belongs to an area light.
    pub area_light: Option<&'scene dyn AreaLight>,

    /// Index of `area_light` in the scene's light list when it can be sampled
    /// directly.
    pub light_index: Option<usize>,
}

impl<'scene> SurfaceHit<'scene> {
    /// Returns the scattering functions at the hit, if the surface has a
    /// material.
    pub fn bsdf(&self) -> Option<BSDF<'scene>> {
        self.material.map(|m| m.compute_scattering_functions(&self.n))
    }

    /// Returns the radiance emitted from the hit in direction `w`.
    ///
    /// * `w` - Outgoing direction.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        self.area_light
            .map_or(Spectrum::ZERO, |light| light.l(&self.n, w))
    }

    /// Returns true if the surface emits light.
    pub fn is_emitter(&self) -> bool {
        self.area_light.is_some()
    }

    /// Returns a ray leaving the hit in direction `d`.
    ///
    /// * `d` - Direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::spawn(&self.p, Some(&self.n), d)
    }
}
