//! BxDF Sample

use super::*;

/// Stores the result of sampling an incident direction.
#[derive(Copy, Clone, Debug)]
pub struct BxDFSample {
    /// The value of the distribution function for the pair of directions.
    pub f: Spectrum,

    /// The PDF of the sampled direction (solid angle measure).
    pub pdf: Float,

    /// The sampled incident direction.
    pub wi: Vector3f,

    /// The type of reflection model that was sampled.
    pub bxdf_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`         - The value of the distribution function.
    /// * `pdf`       - The PDF of the sampled direction.
    /// * `wi`        - The sampled incident direction.
    /// * `bxdf_type` - The type of reflection model that was sampled.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, bxdf_type: BxDFType) -> Self {
        Self { f, pdf, wi, bxdf_type }
    }

    /// Returns true if the sample came from a delta distribution.
    pub fn is_specular(&self) -> bool {
        self.bxdf_type.is_specular()
    }
}
