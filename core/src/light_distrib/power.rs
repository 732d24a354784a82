//! Power Light Distribution.

use super::LightDistribution;
use crate::pbrt::*;
use crate::sampling::*;
use crate::scene::*;

/// Returns a distribution with sampling probability proportional to the
/// total emitted power of each light. Lights with zero power are never
/// chosen; if every light has zero power the distribution is uniform.
pub struct PowerLightDistribution {
    distrib: Option<Distribution1D>,
}

impl PowerLightDistribution {
    /// Create a new instance of `PowerLightDistribution`.
    ///
    /// * `scene` - The scene.
    pub fn new(scene: &Scene) -> Self {
        Self {
            distrib: compute_light_power_distribution(scene),
        }
    }
}

impl LightDistribution for PowerLightDistribution {
    fn distribution(&self) -> Option<&Distribution1D> {
        self.distrib.as_ref()
    }
}

/// Returns a distribution over the scene lights weighted by the luminance of
/// their power, or `None` if there are no lights.
///
/// * `scene` - The scene.
pub fn compute_light_power_distribution(scene: &Scene) -> Option<Distribution1D> {
    if scene.lights.is_empty() {
        return None;
    }

    let light_power: Vec<Float> = scene
        .lights
        .iter()
        .map(|light| {
            let y = light.power().y();
            if y.is_finite() && y > 0.0 {
                y
            } else {
                0.0
            }
        })
        .collect();
    Some(Distribution1D::new(light_power))
}
