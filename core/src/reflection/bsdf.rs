//! BSDF

use super::*;

/// A BxDF placed in the local shading frame of a surface point. Directions
/// are passed in world space and converted to the frame where the surface
/// normal is the `+z` axis.
pub struct BSDF<'a> {
    /// Surface normal.
    ns: Vector3f,

    /// First tangent.
    ss: Vector3f,

    /// Second tangent.
    ts: Vector3f,

    /// The scattering model.
    bxdf: &'a BxDF,
}

impl<'a> BSDF<'a> {
    /// Returns a new BSDF for a surface point.
    ///
    /// * `n`    - Unit surface normal.
    /// * `bxdf` - The scattering model.
    pub fn new(n: &Normal3f, bxdf: &'a BxDF) -> Self {
        let ns = Vector3f::from(*n);
        let (ss, ts) = coordinate_system(&ns);
        Self { ns, ss, ts, bxdf }
    }

    /// Returns true if the BSDF only has delta lobes, so it cannot be
    /// evaluated for an arbitrary pair of directions.
    pub fn is_specular(&self) -> bool {
        self.bxdf.get_type().is_specular()
    }

    /// Convert a world-space direction to the local shading frame.
    ///
    /// * `v` - World-space direction.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Convert a local shading-frame direction to world space.
    ///
    /// * `v` - Local direction.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        self.ss * v.x + self.ts * v.y + self.ns * v.z
    }

    /// Returns the value of the distribution function for a pair of
    /// world-space directions.
    ///
    /// * `wo_w` - Outgoing direction.
    /// * `wi_w` - Incident direction.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }
        match self.bxdf {
            BxDF::LambertianReflection(bxdf) => bxdf.f(&wo, &wi),
            BxDF::SpecularReflection(_) => Spectrum::ZERO,
        }
    }

    /// Samples an incident world-space direction.
    ///
    /// * `wo_w` - Outgoing direction.
    /// * `u`    - The 2D uniform random values.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return None;
        }
        let sample = match self.bxdf {
            BxDF::LambertianReflection(bxdf) => bxdf.sample_f(&wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(&wo),
        }?;
        Some(BxDFSample {
            wi: self.local_to_world(&sample.wi),
            ..sample
        })
    }

    /// Returns the PDF of sampling `wi_w` given `wo_w`.
    ///
    /// * `wo_w` - Outgoing direction.
    /// * `wi_w` - Incident direction.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f) -> Float {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }
        match self.bxdf {
            BxDF::LambertianReflection(bxdf) => bxdf.pdf(&wo, &wi),
            BxDF::SpecularReflection(_) => 0.0,
        }
    }
}
