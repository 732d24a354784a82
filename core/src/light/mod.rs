//! Light

mod light_type;

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

// Re-export
pub use light_type::*;

/// Stores the result of sampling incident illumination at a point.
#[derive(Copy, Clone, Debug)]
pub struct Li {
    /// Unit direction from the reference point towards the light.
    pub wi: Vector3f,

    /// Solid angle PDF with respect to the reference point.
    pub pdf: Float,

    /// Sampled point on the light.
    pub p_light: Point3f,

    /// Surface normal at `p_light`, if the light has a surface.
    pub n_light: Option<Normal3f>,

    /// Radiance arriving at the reference point (ignoring occlusion).
    pub value: Spectrum,
}

/// Stores the result of sampling a ray leaving a light.
#[derive(Copy, Clone, Debug)]
pub struct Le {
    /// Ray leaving the light.
    pub ray: Ray,

    /// Surface normal at the ray origin, if the light has a surface.
    pub n_light: Option<Normal3f>,

    /// Spatial PDF (area measure) of the ray origin.
    pub pdf_pos: Float,

    /// Directional PDF (solid angle measure) of the ray direction.
    pub pdf_dir: Float,

    /// Emitted radiance along the ray.
    pub value: Spectrum,
}

/// Stores the spatial and directional PDFs for emitting a ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pdf {
    /// Spatial PDF.
    pub pdf_pos: Float,

    /// Directional PDF.
    pub pdf_dir: Float,
}

impl Pdf {
    /// Returns a new `Pdf`.
    ///
    /// * `pdf_pos` - Spatial PDF.
    /// * `pdf_dir` - Directional PDF.
    pub fn new(pdf_pos: Float, pdf_dir: Float) -> Self {
        Self { pdf_pos, pdf_dir }
    }
}

/// Light interface.
pub trait Light: Send + Sync {
    /// Initialize the light source before rendering begins.
    ///
    /// * `world_bound` - Bounds of the scene geometry.
    fn preprocess(&self, _world_bound: &Bounds3f) {}

    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Return the total emitted power.
    fn power(&self) -> Spectrum;

    /// Samples incident radiance arriving at a reference point. Returns `None`
    /// when the sample carries no contribution.
    ///
    /// * `p_ref` - Reference point.
    /// * `u`     - Sample value for Monte Carlo integration.
    fn sample_li(&self, p_ref: &Point3f, u: &Point2f) -> Option<Li>;

    /// Returns the solid angle PDF of sampling `wi` from `p_ref` with
    /// `sample_li()`.
    ///
    /// * `p_ref` - Reference point.
    /// * `wi`    - Direction towards the light.
    fn pdf_li(&self, p_ref: &Point3f, wi: &Vector3f) -> Float;

    /// Returns emitted radiance along a ray that escapes the scene. Only
    /// infinite lights return a non-zero value.
    ///
    /// * `ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        Spectrum::ZERO
    }

    /// Samples a ray leaving the light. Returns `None` when the sample carries
    /// no contribution.
    ///
    /// * `u1` - Sample value used for the ray origin.
    /// * `u2` - Sample value used for the ray direction.
    fn sample_le(&self, u1: &Point2f, u2: &Point2f) -> Option<Le>;

    /// Returns the spatial and directional PDFs of emitting the given ray.
    ///
    /// * `ray`     - The ray.
    /// * `n_light` - Surface normal at the ray origin, if any.
    fn pdf_le(&self, ray: &Ray, n_light: Option<&Normal3f>) -> Pdf;

    /// Returns true if the light is described by a delta distribution.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }
}

/// Lights attached to the surface of geometry.
pub trait AreaLight: Light {
    /// Returns the emitted radiance at a point on the surface in a direction.
    ///
    /// * `n` - Surface normal at the point.
    /// * `w` - Outgoing direction.
    fn l(&self, n: &Normal3f, w: &Vector3f) -> Spectrum;
}
