//! Mirror Material

use bdpt_core::geometry::*;
use bdpt_core::material::*;
use bdpt_core::pbrt::*;
use bdpt_core::reflection::*;
use bdpt_core::spectrum::*;

/// Implements a simple mirror, modeled with perfect specular reflection.
pub struct MirrorMaterial {
    /// Specular BRDF built from the reflectivity of the mirror.
    bxdf: BxDF,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Reflectivity of the mirror.
    pub fn new(kr: Spectrum) -> Self {
        let r = kr.clamp(0.0, INFINITY);
        Self {
            bxdf: BxDF::SpecularReflection(SpecularReflection::new(r)),
        }
    }
}

impl Material for MirrorMaterial {
    fn compute_scattering_functions(&self, n: &Normal3f) -> BSDF<'_> {
        BSDF::new(n, &self.bxdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn samples_mirror_direction() {
        let m = MirrorMaterial::new(Spectrum::new(0.9));
        let n = Normal3f::new(0.0, 1.0, 0.0);
        let bsdf = m.compute_scattering_functions(&n);
        let wo = Vector3f::new(0.6, 0.8, 0.0);
        let s = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5)).unwrap();
        assert!(s.is_specular());
        assert!(approx_eq!(f32, s.wi.x, -0.6, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.y, 0.8, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.f[0] * 0.8, 0.9, epsilon = 1e-5));

        // Delta lobes are never hit by explicit evaluation.
        assert!(bsdf.f(&wo, &s.wi).is_black());
        assert_eq!(bsdf.pdf(&wo, &s.wi), 0.0);
    }
}
