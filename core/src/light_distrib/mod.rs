//! Light Distribution.

mod power;
mod uniform;

pub use power::*;
pub use uniform::*;

use crate::pbrt::*;
use crate::sampling::*;
use crate::scene::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightSampleStrategy {
    /// Sample all light sources uniformly.
    Uniform,

    /// Samples light sources according to their emitted power.
    #[default]
    Power,
}

impl FromStr for LightSampleStrategy {
    type Err = String;

    /// Returns a `LightSampleStrategy` given a string name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "uniform" => Ok(Self::Uniform),
            "power" => Ok(Self::Power),
            _ => Err(format!("Light sample distribution type '{name}' unknown.")),
        }
    }
}

impl fmt::Display for LightSampleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Power => write!(f, "power"),
        }
    }
}

/// Interface of light distribution implementations that provide a discrete
/// probability distribution for choosing the light that starts a light
/// subpath. The distribution is built once and shared read-only.
pub trait LightDistribution: Send + Sync {
    /// Returns the underlying distribution; `None` if the scene has no lights.
    fn distribution(&self) -> Option<&Distribution1D>;

    /// Chooses a light. Returns its index and the discrete probability with
    /// which it was chosen, or `None` if there are no lights or the chosen
    /// light cannot be sampled.
    ///
    /// * `u` - Uniform random value in [0, 1).
    fn sample(&self, u: Float) -> Option<(usize, Float)> {
        let (index, pdf) = self.distribution()?.sample_discrete(u);
        if pdf > 0.0 {
            Some((index, pdf))
        } else {
            None
        }
    }

    /// Returns the probability of choosing a light.
    ///
    /// * `index` - Index of the light in the scene's light list.
    fn pdf(&self, index: usize) -> Float {
        self.distribution()
            .filter(|d| index < d.count())
            .map_or(0.0, |d| d.discrete_pdf(index))
    }
}

/// Atomic reference counted `LightDistribution`.
pub type ArcLightDistribution = Arc<dyn LightDistribution>;

/// Returns a smart pointer to a new `LightDistribution` implementation.
///
/// * `strategy` - The strategy to use for light sampling.
/// * `scene`    - The scene.
pub fn create_light_sample_distribution(strategy: LightSampleStrategy, scene: &Scene) -> ArcLightDistribution {
    let strategy = if scene.lights.len() == 1 {
        LightSampleStrategy::Uniform
    } else {
        strategy
    };
    debug!("Light sampling strategy '{strategy}' over {} lights", scene.lights.len());
    match strategy {
        LightSampleStrategy::Uniform => Arc::new(UniformLightDistribution::new(scene)),
        LightSampleStrategy::Power => Arc::new(PowerLightDistribution::new(scene)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::*;
    use crate::light::*;
    use crate::primitives::*;
    use crate::spectrum::*;
    use float_cmp::approx_eq;

    struct FixedPowerLight(Float);

    impl Light for FixedPowerLight {
        fn get_type(&self) -> LightType {
            LightType::DELTA_POSITION_LIGHT
        }

        fn power(&self) -> Spectrum {
            Spectrum::new(self.0)
        }

        fn sample_li(&self, _p_ref: &Point3f, _u: &Point2f) -> Option<Li> {
            None
        }

        fn pdf_li(&self, _p_ref: &Point3f, _wi: &Vector3f) -> Float {
            0.0
        }

        fn sample_le(&self, _u1: &Point2f, _u2: &Point2f) -> Option<Le> {
            None
        }

        fn pdf_le(&self, _ray: &Ray, _n_light: Option<&Normal3f>) -> Pdf {
            Pdf::default()
        }
    }

    fn scene_with_lights(powers: &[Float]) -> Scene {
        let lights: Vec<Arc<dyn Light>> = powers
            .iter()
            .map(|&p| Arc::new(FixedPowerLight(p)) as Arc<dyn Light>)
            .collect();
        Scene::new(Arc::new(PrimitiveList::new(vec![])), lights)
    }

    #[test]
    fn no_lights_yields_no_sample() {
        let scene = scene_with_lights(&[]);
        for strategy in [LightSampleStrategy::Uniform, LightSampleStrategy::Power] {
            let d = create_light_sample_distribution(strategy, &scene);
            assert!(d.sample(0.5).is_none());
            assert_eq!(d.pdf(0), 0.0);
        }
    }

    #[test]
    fn power_strategy_is_proportional_to_power() {
        let scene = scene_with_lights(&[1.0, 3.0, 0.0]);
        let d = create_light_sample_distribution(LightSampleStrategy::Power, &scene);
        assert!(approx_eq!(f32, d.pdf(0), 0.25, epsilon = 1e-5));
        assert!(approx_eq!(f32, d.pdf(1), 0.75, epsilon = 1e-5));
        assert_eq!(d.pdf(2), 0.0);
        let (index, pdf) = d.sample(0.9).unwrap();
        assert_eq!(index, 1);
        assert!(approx_eq!(f32, pdf, 0.75, epsilon = 1e-5));
    }

    #[test]
    fn uniform_strategy_ignores_power() {
        let scene = scene_with_lights(&[1.0, 3.0]);
        let d = create_light_sample_distribution(LightSampleStrategy::Uniform, &scene);
        assert_eq!(d.pdf(0), 0.5);
        assert_eq!(d.pdf(1), 0.5);
    }

    #[test]
    fn strategy_names() {
        assert_eq!("power".parse::<LightSampleStrategy>(), Ok(LightSampleStrategy::Power));
        assert!("spatial".parse::<LightSampleStrategy>().is_err());
        assert_eq!(LightSampleStrategy::Uniform.to_string(), "uniform");
    }
}
