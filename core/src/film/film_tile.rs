//! Film Tile

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Stores accumulated primary estimates for a pixel of a tile.
#[derive(Copy, Clone, Default)]
pub struct FilmTilePixel {
    /// Sum of the weighted spectral pixel contributions.
    pub contrib_sum: Spectrum,

    /// Sum of sample weights for the pixel.
    pub weight_sum: Float,
}

/// Stores the primary estimates for a region of the image so a worker can
/// accumulate without synchronisation and merge into the `Film` when done.
pub struct FilmTile {
    /// Bounds of the pixels in the final image.
    pixel_bounds: Bounds2i,

    /// Pixels in the tile.
    pixels: Vec<FilmTilePixel>,

    /// Maximum sample luminance.
    max_sample_luminance: Float,
}

impl FilmTile {
    /// Creates a new `FilmTile`.
    ///
    /// * `pixel_bounds`         - Bounds of the pixels in the final image.
    /// * `max_sample_luminance` - Maximum sample luminance.
    pub fn new(pixel_bounds: Bounds2i, max_sample_luminance: Float) -> Self {
        Self {
            pixel_bounds,
            pixels: vec![FilmTilePixel::default(); pixel_bounds.area().max(0) as usize],
            max_sample_luminance,
        }
    }

    /// Returns the pixel bounds.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    /// Returns the offset of a pixel in the tile's pixel buffer.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    fn get_pixel_offset(&self, p: &Point2i) -> usize {
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        ((p.y - self.pixel_bounds.p_min.y) * width + (p.x - self.pixel_bounds.p_min.x)) as usize
    }

    /// Returns the accumulated data of a pixel.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    pub fn get_pixel(&self, p: &Point2i) -> &FilmTilePixel {
        &self.pixels[self.get_pixel_offset(p)]
    }

    /// Adds a primary estimate to a pixel with unit weight. Samples outside
    /// the tile are ignored.
    ///
    /// * `pixel` - The pixel.
    /// * `l`     - Radiance estimate.
    pub fn add_sample(&mut self, pixel: &Point2i, l: Spectrum) {
        if !self.pixel_bounds.contains_exclusive(pixel) {
            return;
        }

        let y = l.y();
        let l = if y > self.max_sample_luminance {
            l * (self.max_sample_luminance / y)
        } else {
            l
        };

        let offset = self.get_pixel_offset(pixel);
        let tile_pixel = &mut self.pixels[offset];
        tile_pixel.contrib_sum += l;
        tile_pixel.weight_sum += 1.0;
    }
}
