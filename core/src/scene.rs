//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::primitive::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Scene.
#[derive(Clone)]
pub struct Scene {
    /// An aggregate of all primitives in the scene.
    pub aggregate: ArcPrimitive,

    /// All light sources in the scene that can be sampled directly.
    pub lights: Vec<Arc<dyn Light>>,

    /// Indices into `lights` of the infinite light sources.
    pub infinite_lights: Vec<usize>,

    /// The bounding box of the scene geometry.
    pub world_bound: Bounds3f,
}

impl Scene {
    /// Creates a new `Scene` and preprocesses its lights.
    ///
    /// * `aggregate` - An aggregate of all primitives in the scene.
    /// * `lights`    - All light sources in the scene.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<Arc<dyn Light>>) -> Self {
        let world_bound = aggregate.world_bound();
        for light in lights.iter() {
            light.preprocess(&world_bound);
        }

        let infinite_lights = lights
            .iter()
            .enumerate()
            .filter(|(_, l)| l.get_type().is_infinite_light())
            .map(|(i, _)| i)
            .collect();

        Self {
            aggregate,
            lights,
            infinite_lights,
            world_bound,
        }
    }

    /// Traces the ray into the scene and returns the nearest `SurfaceHit` if
    /// an intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &mut Ray) -> Option<SurfaceHit<'_>> {
        self.aggregate.intersect(ray)
    }

    /// Traces the ray into the scene and returns whether or not an intersection
    /// occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.aggregate.intersect_p(ray)
    }

    /// Returns true if the scene contains infinite lights.
    pub fn has_infinite_lights(&self) -> bool {
        !self.infinite_lights.is_empty()
    }

    /// Returns the sum of radiance from infinite lights along an escaping ray.
    ///
    /// * `ray` - The ray.
    pub fn infinite_le(&self, ray: &Ray) -> Spectrum {
        self.infinite_lights
            .iter()
            .fold(Spectrum::ZERO, |acc, &i| acc + self.lights[i].le(ray))
    }
}
