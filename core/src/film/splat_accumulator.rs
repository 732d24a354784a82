//! Splat Accumulator

use crate::geometry::*;
use crate::parallel::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::atomic::{AtomicU32, Ordering};

/// Accumulated splats of one pixel.
#[derive(Default)]
struct SplatCell {
    /// Running RGB sum.
    rgb: [AtomicFloat; 3],

    /// Number of splats received.
    count: AtomicU32,
}

/// Image-space buffer for contributions that land on a pixel other than the
/// one being traced. Any number of threads may add splats concurrently
/// through a shared reference; additions are never lost.
pub struct SplatAccumulator {
    /// Image resolution.
    resolution: Point2i,

    /// One cell per pixel in scanline order.
    cells: Vec<SplatCell>,
}

impl SplatAccumulator {
    /// Creates an empty accumulator for an image.
    ///
    /// * `resolution` - Image resolution in pixels.
    pub fn new(resolution: &Point2i) -> Self {
        let n = (resolution.x.max(0) * resolution.y.max(0)) as usize;
        let mut cells = Vec::with_capacity(n);
        cells.resize_with(n, SplatCell::default);
        Self {
            resolution: *resolution,
            cells,
        }
    }

    /// Returns the image resolution.
    pub fn resolution(&self) -> Point2i {
        self.resolution
    }

    /// Returns the cell for a pixel if it lies inside the image.
    ///
    /// * `p` - The pixel.
    fn cell(&self, p: &Point2i) -> Option<&SplatCell> {
        if p.x < 0 || p.y < 0 || p.x >= self.resolution.x || p.y >= self.resolution.y {
            None
        } else {
            self.cells.get((p.y * self.resolution.x + p.x) as usize)
        }
    }

    /// Atomically adds a contribution to the pixel containing a raster
    /// position. Values with NaNs, negative or infinite luminance and
    /// positions outside the image are rejected.
    ///
    /// * `p` - Raster position.
    /// * `v` - Contribution to add.
    pub fn add_splat(&self, p: &Point2f, v: &Spectrum) {
        if v.has_nans() {
            warn!("Ignoring splatted spectrum with NaN values at ({}, {})", p.x, p.y);
            return;
        }

        let vy = v.y();
        if vy < 0.0 {
            warn!("Ignoring splatted spectrum with negative luminance {vy} at ({}, {})", p.x, p.y);
            return;
        }
        if vy.is_infinite() {
            warn!("Ignoring splatted spectrum with infinite luminance at ({}, {})", p.x, p.y);
            return;
        }

        let Some(cell) = self.cell(&p.floor()) else {
            return;
        };
        let rgb = v.to_rgb();
        for (sum, c) in cell.rgb.iter().zip(rgb.iter()) {
            sum.add(*c);
        }
        cell.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the raw accumulated sum for a pixel.
    ///
    /// * `p` - The pixel.
    pub fn sum(&self, p: &Point2i) -> Spectrum {
        self.cell(p).map_or(Spectrum::ZERO, |cell| {
            Spectrum::from_rgb(
                cell.rgb[0].load(Ordering::Acquire),
                cell.rgb[1].load(Ordering::Acquire),
                cell.rgb[2].load(Ordering::Acquire),
            )
        })
    }

    /// Returns the number of splats a pixel received.
    ///
    /// * `p` - The pixel.
    pub fn count(&self, p: &Point2i) -> u32 {
        self.cell(p).map_or(0, |cell| cell.count.load(Ordering::Acquire))
    }

    /// Returns the average splat contribution per rendered sample. The sum is
    /// divided by the number of samples taken per pixel over the whole render,
    /// not by the number of splats the pixel received.
    ///
    /// * `p`                 - The pixel.
    /// * `samples_per_pixel` - Number of samples taken per pixel.
    pub fn readout(&self, p: &Point2i, samples_per_pixel: usize) -> Spectrum {
        if samples_per_pixel == 0 {
            return Spectrum::ZERO;
        }
        self.sum(p) / samples_per_pixel as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn rejects_invalid_splats() {
        let acc = SplatAccumulator::new(&Point2i::new(2, 2));
        acc.add_splat(&Point2f::new(0.5, 0.5), &Spectrum::from_rgb(Float::NAN, 0.0, 0.0));
        acc.add_splat(&Point2f::new(0.5, 0.5), &Spectrum::new(-1.0));
        acc.add_splat(&Point2f::new(0.5, 0.5), &Spectrum::new(Float::INFINITY));
        acc.add_splat(&Point2f::new(-0.5, 0.5), &Spectrum::new(1.0));
        acc.add_splat(&Point2f::new(2.0, 0.5), &Spectrum::new(1.0));
        for p in Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2)).iter() {
            assert_eq!(acc.count(&p), 0);
            assert!(acc.sum(&p).is_black());
        }
    }

    #[test]
    fn readout_divides_by_samples_per_pixel() {
        let acc = SplatAccumulator::new(&Point2i::new(1, 1));
        acc.add_splat(&Point2f::new(0.2, 0.9), &Spectrum::new(3.0));
        assert_eq!(acc.count(&Point2i::new(0, 0)), 1);
        assert_eq!(acc.readout(&Point2i::new(0, 0), 4).to_rgb(), [0.75; 3]);
        assert!(acc.readout(&Point2i::new(0, 0), 0).is_black());
    }

    #[test]
    fn concurrent_splats_are_not_lost() {
        let acc = SplatAccumulator::new(&Point2i::new(3, 1));
        let n_threads = 8;
        let per_thread = 500;
        thread::scope(|s| {
            for t in 0..n_threads {
                let acc = &acc;
                s.spawn(move || {
                    for i in 0..per_thread {
                        let x = ((t + i) % 3) as Float + 0.5;
                        acc.add_splat(&Point2f::new(x, 0.5), &Spectrum::new(((i % 4) + 1) as Float));
                    }
                });
            }
        });

        let mut expected = [0.0; 3];
        let mut expected_count = [0; 3];
        for t in 0..n_threads {
            for i in 0..per_thread {
                expected[(t + i) % 3] += ((i % 4) + 1) as Float;
                expected_count[(t + i) % 3] += 1;
            }
        }
        for x in 0..3 {
            let p = Point2i::new(x as Int, 0);
            assert_eq!(acc.sum(&p).to_rgb(), [expected[x]; 3]);
            assert_eq!(acc.count(&p), expected_count[x]);
        }
    }
}
