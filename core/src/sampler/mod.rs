//! Sampler

use crate::camera::*;
use crate::geometry::*;
use crate::pbrt::*;

/// Sampler interface. A sampler supplies the ordered stream of random values
/// consumed while tracing one pixel sample; each rendering thread owns its
/// own instance.
pub trait Sampler: Send {
    /// Returns the number of samples taken per pixel.
    fn samples_per_pixel(&self) -> usize;

    /// Generates a new instance of an initial `Sampler` for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator (if any).
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler>;

    /// Restart the random stream for the given pixel and sample index. The
    /// values that follow depend only on the sampler's seed, the pixel and
    /// the sample index.
    ///
    /// * `pixel`        - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    fn start_pixel_sample(&mut self, pixel: &Point2i, sample_index: usize);

    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f {
        let x = self.get_1d();
        let y = self.get_1d();
        Point2f::new(x, y)
    }

    /// Returns an initialized `CameraSample` for a given pixel.
    ///
    /// * `p_raster` - The pixel.
    fn get_camera_sample(&mut self, p_raster: &Point2i) -> CameraSample {
        let film_sample = self.get_2d();
        CameraSample::new(Point2f::from(*p_raster) + film_sample)
    }
}
