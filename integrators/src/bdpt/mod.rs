//! Bi-directional Path Tracer

use bdpt_core::camera::*;
use bdpt_core::film::SplatAccumulator;
use bdpt_core::geometry::*;
use bdpt_core::light_distrib::*;
use bdpt_core::sampler::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

mod connect;
mod path;
mod vertex;

pub use connect::{mis_weight, MisDensity};
pub use path::*;
pub use vertex::*;

use connect::connect_bdpt;

/// Heuristic used to combine the weights of the connection strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MISHeuristic {
    /// Weights proportional to the sampling densities.
    #[default]
    Balance,

    /// Weights proportional to the squared sampling densities.
    Power,
}

impl FromStr for MISHeuristic {
    type Err = String;

    /// Returns a `MISHeuristic` given a string name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "balance" => Ok(Self::Balance),
            "power" => Ok(Self::Power),
            _ => Err(format!("MIS heuristic '{name}' unknown.")),
        }
    }
}

impl fmt::Display for MISHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balance => write!(f, "balance"),
            Self::Power => write!(f, "power"),
        }
    }
}

/// Integrator settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BDPTSettings {
    /// Minimum number of scattering events of a contributing path.
    pub min_bounces: usize,

    /// Maximum number of scattering events of a contributing path.
    pub max_bounces: usize,

    /// Number of vertices a subpath walk adds before Russian roulette may
    /// terminate it.
    pub rr_depth: usize,

    /// Strategy for choosing the light that starts a light subpath.
    pub light_sample_strategy: LightSampleStrategy,

    /// MIS heuristic.
    pub mis_heuristic: MISHeuristic,
}

impl Default for BDPTSettings {
    fn default() -> Self {
        Self {
            min_bounces: 0,
            max_bounces: 5,
            rr_depth: 3,
            light_sample_strategy: LightSampleStrategy::Power,
            mis_heuristic: MISHeuristic::Balance,
        }
    }
}

impl BDPTSettings {
    /// Returns the settings with inconsistent values clamped.
    pub fn validated(self) -> Self {
        let mut settings = self;
        if settings.min_bounces > settings.max_bounces {
            warn!(
                "Minimum bounces {} exceed maximum bounces {}; using {}",
                settings.min_bounces, settings.max_bounces, settings.max_bounces
            );
            settings.min_bounces = settings.max_bounces;
        }
        settings
    }
}

/// Implements the bi-directional path tracing estimator. One instance is
/// shared read-only by all rendering threads; the only state written during
/// rendering is the splat accumulator.
pub struct BDPTIntegrator {
    /// The scene.
    pub(crate) scene: Arc<Scene>,

    /// The camera.
    pub(crate) camera: Arc<dyn Camera>,

    /// Distribution for choosing the light that starts a light subpath.
    pub(crate) light_distr: ArcLightDistribution,

    /// Contributions that land on pixels other than the one being traced.
    splats: Arc<SplatAccumulator>,

    /// Settings.
    pub(crate) settings: BDPTSettings,
}

impl BDPTIntegrator {
    /// Create a new `BDPTIntegrator`.
    ///
    /// * `scene`    - The scene.
    /// * `camera`   - The camera.
    /// * `settings` - Integrator settings.
    pub fn new(scene: Arc<Scene>, camera: Arc<dyn Camera>, settings: BDPTSettings) -> Self {
        let settings = settings.validated();
        let light_distr = create_light_sample_distribution(settings.light_sample_strategy, &scene);
        let splats = Arc::new(SplatAccumulator::new(&camera.resolution()));

        info!(
            "BDPT with {} lights, bounces {}..={}, rr depth {}, {} heuristic",
            scene.lights.len(),
            settings.min_bounces,
            settings.max_bounces,
            settings.rr_depth,
            settings.mis_heuristic
        );
        if scene.lights.is_empty() {
            warn!("Scene has no lights; only emitters seen from the camera contribute");
        }

        Self {
            scene,
            camera,
            light_distr,
            splats,
            settings,
        }
    }

    /// Returns the splat accumulator.
    pub fn splats(&self) -> &Arc<SplatAccumulator> {
        &self.splats
    }

    /// Returns the settings.
    pub fn settings(&self) -> &BDPTSettings {
        &self.settings
    }

    /// Returns a new scratch arena sized for the maximum path length.
    pub fn new_arena<'a>(&self) -> PathArena<'a> {
        PathArena::new(self.settings.max_bounces)
    }

    /// Traces one sample for a pixel. It returns the radiance estimate for
    /// the pixel; contributions that project onto other pixels are added to
    /// the splat accumulator. The sampler must already be positioned at the
    /// pixel sample with `start_pixel_sample()`.
    ///
    /// * `pixel`   - The pixel.
    /// * `sampler` - The sampler.
    /// * `arena`   - Scratch storage owned by the calling thread.
    pub fn trace_sample<'a>(
        &'a self,
        pixel: &Point2i,
        sampler: &mut dyn Sampler,
        arena: &mut PathArena<'a>,
    ) -> Spectrum {
        let scene = self.scene.as_ref();
        let BDPTSettings {
            min_bounces,
            max_bounces,
            rr_depth,
            ..
        } = self.settings;

        // Trace the camera and light subpaths.
        let n_camera = generate_camera_subpath(
            scene,
            self.camera.as_ref(),
            sampler,
            pixel,
            max_bounces + 2,
            rr_depth,
            &mut arena.camera,
        );
        let n_light = generate_light_subpath(
            scene,
            self.light_distr.as_ref(),
            sampler,
            max_bounces + 1,
            rr_depth,
            &mut arena.light,
        );

        // Execute all connection strategies.
        let mut l = Spectrum::ZERO;
        for s in 0..n_camera {
            for t in 0..=n_light {
                if s == 0 && t <= 1 {
                    continue;
                }
                let bounces = s + t - 1;
                if bounces < min_bounces || bounces > max_bounces {
                    continue;
                }

                let (l_path, p_raster) = connect_bdpt(self, arena, s, t, sampler);
                if l_path.is_black() {
                    continue;
                }
                if !l_path.is_finite() || l_path.has_negatives() {
                    debug!("Discarding strategy ({s}, {t}) contribution {l_path} for pixel {pixel}");
                    continue;
                }

                match p_raster {
                    Some(pr) if pr.floor() != *pixel => self.splats.add_splat(&pr, &l_path),
                    _ => l += l_path,
                }
            }
        }

        trace!("Pixel {pixel} sample L: {l} (y: {})", l.y());
        l
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_names() {
        assert_eq!("balance".parse::<MISHeuristic>(), Ok(MISHeuristic::Balance));
        assert_eq!("power".parse::<MISHeuristic>(), Ok(MISHeuristic::Power));
        assert!("maximum".parse::<MISHeuristic>().is_err());
        assert_eq!(MISHeuristic::Power.to_string(), "power");
    }

    #[test]
    fn settings_clamp_min_bounces() {
        let settings = BDPTSettings {
            min_bounces: 7,
            max_bounces: 4,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.min_bounces, 4);
        assert_eq!(settings.max_bounces, 4);
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = BDPTSettings::default();
        assert_eq!(settings.validated(), settings);
        assert_eq!(settings.mis_heuristic, MISHeuristic::Balance);
    }
}
