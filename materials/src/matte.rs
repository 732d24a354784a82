//! Matte Material

use bdpt_core::geometry::*;
use bdpt_core::material::*;
use bdpt_core::pbrt::*;
use bdpt_core::reflection::*;
use bdpt_core::spectrum::*;

/// Implements purely diffuse surfaces.
pub struct MatteMaterial {
    /// Lambertian BRDF built from the diffuse reflectance.
    bxdf: BxDF,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd` - Spectral diffuse reflection; clamped to be non-negative.
    pub fn new(kd: Spectrum) -> Self {
        let r = kd.clamp(0.0, INFINITY);
        Self {
            bxdf: BxDF::LambertianReflection(LambertianReflection::new(r)),
        }
    }
}

impl Material for MatteMaterial {
    /// Returns the scattering functions of the material at a surface point.
    ///
    /// * `n` - Unit surface normal at the point.
    fn compute_scattering_functions(&self, n: &Normal3f) -> BSDF<'_> {
        BSDF::new(n, &self.bxdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn reflects_albedo_over_pi_on_either_side() {
        let m = MatteMaterial::new(Spectrum::new(0.5));
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let bsdf = m.compute_scattering_functions(&n);
        let wo = Vector3f::new(0.0, 1.0, 0.0);
        let wi = Vector3f::new(0.6, 0.8, 0.0);
        assert!(approx_eq!(f32, bsdf.f(&wo, &wi)[0], 0.5 * INV_PI, epsilon = 1e-6));
        assert!(approx_eq!(f32, bsdf.f(&-wo, &-wi)[1], 0.5 * INV_PI, epsilon = 1e-6));
        assert!(bsdf.f(&wo, &-wi).is_black());
    }

    #[test]
    fn negative_reflectance_is_clamped() {
        let m = MatteMaterial::new(Spectrum::from_rgb(-1.0, 0.5, 0.5));
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let bsdf = m.compute_scattering_functions(&n);
        let w = Vector3f::new(0.0, 0.0, 1.0);
        assert!(!bsdf.f(&w, &w).has_negatives());
    }
}
