//! Camera

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::fmt;

/// Camera interface. Besides generating primary rays, a camera used for
/// bidirectional transport must evaluate and sample its importance function
/// so light subpaths can be connected directly to the film.
pub trait Camera: Send + Sync {
    /// Returns the film resolution in pixels.
    fn resolution(&self) -> Point2i;

    /// Returns a ray corresponding to a given sample and a floating point
    /// value that affects how much the radiance arriving at the film plane
    /// along the generated ray will contribute to the final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float);

    /// Returns the normal of the lens at the camera origin.
    fn lens_normal(&self) -> Normal3f;

    /// Evaluate the importance emitted from the point on the camera in a
    /// direction, along with the raster position the ray maps to.
    ///
    /// * `ray` - The ray leaving the camera.
    fn we(&self, ray: &Ray) -> (Spectrum, Option<Point2f>);

    /// Return the spatial and directional PDFs for sampling a particular ray
    /// leaving the camera.
    ///
    /// * `ray` - The ray.
    fn pdf_we(&self, ray: &Ray) -> PDFResult;

    /// Samples a point on the lens that sees `p_ref` and returns the
    /// importance arriving at `p_ref`, with the solid angle PDF and the raster
    /// position. Returns `None` when `p_ref` is not visible to the camera.
    ///
    /// * `p_ref` - Reference point in the scene.
    /// * `u`     - Used to sample point on the lens.
    fn sample_wi(&self, p_ref: &Point3f, u: &Point2f) -> Option<CameraWiSample>;
}

/// Stores all of the sample values needed to specify a camera ray.
#[derive(Copy, Clone, Debug, Default)]
pub struct CameraSample {
    /// Point on the film to which the generated ray carries radiance.
    pub p_film: Point2f,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film to which the generated ray carries radiance.
    pub fn new(p_film: Point2f) -> Self {
        Self { p_film }
    }
}

impl fmt::Display for CameraSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraSample<p_film: {}>", self.p_film)
    }
}

/// Result of sampling the camera from a point in the scene.
#[derive(Copy, Clone, Debug)]
pub struct CameraWiSample {
    /// Importance arriving at the reference point.
    pub we: Spectrum,

    /// Unit direction from the reference point to the lens.
    pub wi: Vector3f,

    /// Solid angle PDF with respect to the reference point.
    pub pdf: Float,

    /// Raster position the connection maps to.
    pub p_raster: Point2f,

    /// Sampled point on the lens.
    pub p_lens: Point3f,

    /// Lens normal at `p_lens`.
    pub n_lens: Normal3f,
}

/// Stores the spatial and directional PDFs for sampling a ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PDFResult {
    /// Spatial PDF.
    pub pos: Float,

    /// Directional PDF.
    pub dir: Float,
}

impl PDFResult {
    /// Create a new `PDFResult`.
    ///
    /// * `pos` - Spatial PDF.
    /// * `dir` - Directional PDF.
    pub fn new(pos: Float, dir: Float) -> Self {
        Self { pos, dir }
    }
}
