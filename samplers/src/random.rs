//! Random Sampler.

use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::rng::*;
use bdpt_core::sampler::*;

/// Implements a sampler that uses a PRNG to generate uniformly random samples.
/// Every pixel sample restarts the PRNG on a sequence derived from the seed,
/// the pixel and the sample index, so any sample can be replayed exactly
/// regardless of which thread renders it or in which order.
#[derive(Clone)]
pub struct RandomSampler {
    /// Number of samples to generate for each pixel.
    samples_per_pixel: usize,

    /// Seed mixed into every pixel sample's sequence.
    seed: u64,

    /// The random number generator.
    rng: RNG,
}

impl RandomSampler {
    /// Create a new `RandomSampler`.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    /// * `seed`              - Seed for the random number generator.
    pub fn new(samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            samples_per_pixel,
            seed,
            rng: RNG::new(seed),
        }
    }
}

impl Sampler for RandomSampler {
    /// Returns the number of samples taken per pixel.
    fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    /// Generates a new instance of an initial `Sampler` for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(self.samples_per_pixel, seed))
    }

    /// Restarts the stream for a pixel sample.
    ///
    /// * `pixel`        - The pixel.
    /// * `sample_index` - Index of the sample within the pixel.
    fn start_pixel_sample(&mut self, pixel: &Point2i, sample_index: usize) {
        let sequence = mix_bits(&[self.seed, pixel.x as u32 as u64, pixel.y as u32 as u64, sample_index as u64]);
        self.rng.set_sequence(sequence);
    }

    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f {
        let x = self.rng.uniform_float();
        let y = self.rng.uniform_float();
        Point2f::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stream(sampler: &mut dyn Sampler, n: usize) -> Vec<Float> {
        (0..n).map(|_| sampler.get_1d()).collect()
    }

    #[test]
    fn different_samples_give_different_streams() {
        let mut s = RandomSampler::new(4, 7);
        s.start_pixel_sample(&Point2i::new(1, 1), 0);
        let a = stream(&mut s, 8);
        s.start_pixel_sample(&Point2i::new(1, 1), 1);
        let b = stream(&mut s, 8);
        assert_ne!(a, b);
    }

    #[test]
    fn camera_sample_lies_in_pixel() {
        let mut s = RandomSampler::new(1, 0);
        let pixel = Point2i::new(3, 5);
        s.start_pixel_sample(&pixel, 0);
        let cs = s.get_camera_sample(&pixel);
        assert_eq!(cs.p_film.floor(), pixel);
    }

    proptest! {
        #[test]
        fn restart_replays_stream(
            seed in 0..1000u64,
            x in 0..64i32,
            y in 0..64i32,
            index in 0..32usize,
        ) {
            let mut s1 = RandomSampler::new(32, seed);
            let mut s2 = s1.clone_sampler(seed);
            let pixel = Point2i::new(x, y);

            s1.start_pixel_sample(&pixel, index);
            let _ = stream(&mut s1, 3);
            s1.start_pixel_sample(&pixel, index);
            s2.start_pixel_sample(&pixel, index);
            prop_assert_eq!(stream(&mut s1, 16), stream(s2.as_mut(), 16));
        }
    }
}
