//! Point Light Source

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampling::*;
use bdpt_core::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone)]
pub struct PointLight {
    /// Light source type.
    pub light_type: LightType,

    /// Position.
    pub p_light: Point3f,

    /// Emitted radiant intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`   - Position.
    /// * `intensity` - Emitted radiant intensity.
    pub fn new(p_light: Point3f, intensity: Spectrum) -> Self {
        Self {
            light_type: LightType::DELTA_POSITION_LIGHT,
            p_light,
            intensity,
        }
    }
}

impl Light for PointLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// Samples incident radiance arriving at a reference point.
    ///
    /// * `p_ref` - Reference point.
    /// * `_u`    - Sample value for Monte Carlo integration (ignored).
    fn sample_li(&self, p_ref: &Point3f, _u: &Point2f) -> Option<Li> {
        let dist2 = self.p_light.distance_squared(p_ref);
        if dist2 == 0.0 {
            return None;
        }
        Some(Li {
            wi: (self.p_light - *p_ref).normalize(),
            pdf: 1.0,
            p_light: self.p_light,
            n_light: None,
            value: self.intensity / dist2,
        })
    }

    /// A delta distribution cannot be hit by chance.
    fn pdf_li(&self, _p_ref: &Point3f, _wi: &Vector3f) -> Float {
        0.0
    }

    /// Samples a ray leaving the light.
    ///
    /// * `u1` - Sample value used for the ray direction.
    /// * `_u2` - Unused.
    fn sample_le(&self, u1: &Point2f, _u2: &Point2f) -> Option<Le> {
        let dir = uniform_sample_sphere(u1);
        Some(Le {
            ray: Ray::new(self.p_light, dir, INFINITY),
            n_light: None,
            pdf_pos: 1.0,
            pdf_dir: uniform_sphere_pdf(),
            value: self.intensity,
        })
    }

    /// Returns the spatial and directional PDFs of emitting the given ray.
    fn pdf_le(&self, _ray: &Ray, _n_light: Option<&Normal3f>) -> Pdf {
        Pdf::new(0.0, uniform_sphere_pdf())
    }
}
