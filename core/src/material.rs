//! Material

use crate::geometry::*;
use crate::reflection::*;

/// Material interface.
pub trait Material: Send + Sync {
    /// Returns the scattering functions of the material at a surface point.
    ///
    /// * `n` - Unit surface normal at the point.
    fn compute_scattering_functions(&self, n: &Normal3f) -> BSDF<'_>;
}
