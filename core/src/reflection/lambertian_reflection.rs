//! Lambertian Reflection

use super::*;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Reflectance spectrum.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions in the shading frame.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if same_hemisphere(wo, wi) {
            self.r * INV_PI
        } else {
            Spectrum::ZERO
        }
    }

    /// Samples a cosine-weighted incident direction on the side of `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        let mut wi = cosine_sample_hemisphere(u);
        if wo.z < 0.0 {
            wi.z = -wi.z;
        }
        let pdf = self.pdf(wo, &wi);
        if pdf == 0.0 {
            return None;
        }
        Some(BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type()))
    }

    /// Returns the PDF of sampling `wi` given `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if same_hemisphere(wo, wi) {
            cosine_hemisphere_pdf(abs_cos_theta(wi))
        } else {
            0.0
        }
    }
}
