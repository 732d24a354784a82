//! Specular Reflection

use super::*;

/// BRDF for physically plausible specular reflection (a perfect mirror).
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl SpecularReflection {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r` - Spectrum used to scale the reflected colour.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR
    }

    /// Samples the mirror direction. The returned value already includes the
    /// `1/|cos θi|` factor so throughput updates can treat it like any other
    /// sample.
    ///
    /// * `wo` - Outgoing direction.
    pub fn sample_f(&self, wo: &Vector3f) -> Option<BxDFSample> {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            return None;
        }
        Some(BxDFSample::new(self.r / cos, 1.0, wi, self.get_type()))
    }
}
