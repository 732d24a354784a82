//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod lambertian_reflection;
mod specular_reflection;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use lambertian_reflection::*;
pub use specular_reflection::*;

/// BxDF for BRDFs. Enumerated directly to avoid trait objects for the small
/// set of models the renderer supports.
#[derive(Copy, Clone, Debug)]
pub enum BxDF {
    LambertianReflection(LambertianReflection),
    SpecularReflection(SpecularReflection),
}

impl BxDF {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
        }
    }
}

/// Returns the absolute value of cosine of the angle θ between direction and
/// the `+z` axis of the shading frame.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns true if two vectors are in the same hemisphere of the shading
/// frame.
///
/// * `w`  - First vector.
/// * `wp` - Second vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}
