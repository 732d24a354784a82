//! Geometric Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::material::*;
use crate::primitive::*;
use std::sync::Arc;

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: Arc<dyn Shape>,

    /// The material.
    pub material: Option<Arc<dyn Material>>,

    /// Optional area light that describes emission characteristics if it
    /// emits light.
    pub area_light: Option<Arc<dyn AreaLight>>,

    /// Position of `area_light` in the scene's light list, if registered.
    pub light_index: Option<usize>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`    - The shape.
    /// * `material` - The material.
    pub fn new(shape: Arc<dyn Shape>, material: Option<Arc<dyn Material>>) -> Self {
        Self {
            shape,
            material,
            area_light: None,
            light_index: None,
        }
    }

    /// Attach emission to the primitive.
    ///
    /// * `area_light`  - The area light.
    /// * `light_index` - Position of the light in the scene's light list, or
    ///                   `None` if the light cannot be sampled directly.
    pub fn with_area_light(mut self, area_light: Arc<dyn AreaLight>, light_index: Option<usize>) -> Self {
        self.area_light = Some(area_light);
        self.light_index = light_index;
        self
    }
}

impl Primitive for GeometricPrimitive {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    /// Returns geometric details if a ray intersects the primitive and updates
    /// the t_max parameter of the ray. If there is no intersection, `None` is
    /// returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceHit<'_>> {
        let it = self.shape.intersect(r)?;
        r.t_max = it.t;

        Some(SurfaceHit {
            p: it.p,
            n: it.n,
            wo: -r.d.normalize(),
            material: self.material.as_deref(),
            area_light: self.area_light.as_deref(),
            light_index: self.light_index,
        })
    }

    /// Returns `true` if a ray-primitive intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.shape.intersect_p(r)
    }
}
