//! Film

use crate::geometry::*;
use crate::image_io::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::RwLock;

mod film_tile;
mod splat_accumulator;

// Re-export.
pub use film_tile::*;
pub use splat_accumulator::*;

/// Pixel data.
#[derive(Copy, Clone, Default)]
pub struct Pixel {
    /// Running sum of the primary estimates.
    pub contrib_sum: Spectrum,

    /// Sum of sample weights for the pixel.
    pub weight_sum: Float,
}

/// Models the sensing device in a simulated camera. The film holds the
/// primary per-pixel estimates; off-pixel splats are kept in a separate
/// `SplatAccumulator` and combined only when the image is read out.
pub struct Film {
    /// The overall image resolution in pixels.
    pub full_resolution: Point2i,

    /// Filename of output image.
    pub filename: String,

    /// Maximum sample luminance; brighter samples are scaled down.
    max_sample_luminance: Float,

    /// Stores the image pixels.
    pixels: RwLock<Vec<Pixel>>,
}

impl Film {
    /// Create a new `Film` instance.
    ///
    /// * `resolution`           - The overall image resolution in pixels.
    /// * `filename`             - Filename of output image.
    /// * `max_sample_luminance` - Optional maximum sample luminance. Defaults to `INFINITY`.
    pub fn new(resolution: &Point2i, filename: &str, max_sample_luminance: Option<Float>) -> Self {
        let n = (resolution.x.max(0) * resolution.y.max(0)) as usize;
        Self {
            full_resolution: *resolution,
            filename: String::from(filename),
            max_sample_luminance: max_sample_luminance.unwrap_or(INFINITY),
            pixels: RwLock::new(vec![Pixel::default(); n]),
        }
    }

    /// Returns the pixel bounds of the image.
    pub fn pixel_bounds(&self) -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), self.full_resolution)
    }

    /// Returns the offset of a pixel in the pixel buffer.
    ///
    /// * `p` - The pixel coordinates.
    fn get_pixel_offset(&self, p: &Point2i) -> usize {
        debug_assert!(self.pixel_bounds().contains_exclusive(p));
        (p.y * self.full_resolution.x + p.x) as usize
    }

    /// Returns a `FilmTile` that stores the contributions for pixels in the
    /// specified region of the image.
    ///
    /// * `sample_bounds` - Tile region in the overall image.
    pub fn get_film_tile(&self, sample_bounds: Bounds2i) -> FilmTile {
        FilmTile::new(sample_bounds.intersect(&self.pixel_bounds()), self.max_sample_luminance)
    }

    /// Merge the `FilmTile`'s pixel contribution into the image.
    ///
    /// * `tile` - The `FilmTile` to merge.
    pub fn merge_film_tile(&self, tile: &FilmTile) {
        let mut pixels = self.pixels.write().unwrap_or_else(|e| e.into_inner());
        for p in tile.get_pixel_bounds().iter() {
            let tile_pixel = tile.get_pixel(&p);
            let pixel = &mut pixels[self.get_pixel_offset(&p)];
            pixel.contrib_sum += tile_pixel.contrib_sum;
            pixel.weight_sum += tile_pixel.weight_sum;
        }
    }

    /// Returns the final RGB values in scanline order: the weighted primary
    /// estimate plus the splat readout.
    ///
    /// * `splats`            - Splat contributions for the render.
    /// * `samples_per_pixel` - Number of samples taken per pixel.
    pub fn get_rgb(&self, splats: &SplatAccumulator, samples_per_pixel: usize) -> Vec<Float> {
        let pixels = self.pixels.read().unwrap_or_else(|e| e.into_inner());
        let mut rgb = Vec::with_capacity(3 * pixels.len());
        for p in self.pixel_bounds().iter() {
            let pixel = &pixels[self.get_pixel_offset(&p)];
            let mut value = if pixel.weight_sum > 0.0 {
                pixel.contrib_sum / pixel.weight_sum
            } else {
                Spectrum::ZERO
            };
            value += splats.readout(&p, samples_per_pixel);
            rgb.extend_from_slice(&value.to_rgb());
        }
        rgb
    }

    /// Write the image to the output file.
    ///
    /// * `splats`            - Splat contributions for the render.
    /// * `samples_per_pixel` - Number of samples taken per pixel.
    pub fn write_image(&self, splats: &SplatAccumulator, samples_per_pixel: usize) -> Result<(), String> {
        info!("Converting image to RGB and computing final weighted pixel values");
        let rgb = self.get_rgb(splats, samples_per_pixel);
        write_image(&self.filename, &rgb, &self.full_resolution)
    }
}
