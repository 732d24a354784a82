//! Uniform Light Distribution.

use super::LightDistribution;
use crate::sampling::*;
use crate::scene::*;

/// Returns a uniform distribution over all light sources. Works well for
/// scenes with only a handful of lights.
pub struct UniformLightDistribution {
    distrib: Option<Distribution1D>,
}

impl UniformLightDistribution {
    /// Create a new instance of `UniformLightDistribution`.
    ///
    /// * `scene` - The scene.
    pub fn new(scene: &Scene) -> Self {
        let distrib = if scene.lights.is_empty() {
            None
        } else {
            Some(Distribution1D::new(vec![1.0; scene.lights.len()]))
        };
        Self { distrib }
    }
}

impl LightDistribution for UniformLightDistribution {
    fn distribution(&self) -> Option<&Distribution1D> {
        self.distrib.as_ref()
    }
}
