//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Rendering is carried out with `RGBSpectrum`.
pub type Spectrum = RGBSpectrum;
