//! Application related stuff

use crate::geometry::*;
use crate::light_distrib::*;
use crate::pbrt::*;
use clap::Parser;

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Bidirectional path tracer", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 uses all logical CPUs)."
    )]
    n_threads: usize,

    /// Samples per pixel.
    #[arg(long = "spp", short = 's', value_name = "NUM", default_value_t = 16, help = "Samples taken per pixel.")]
    pub spp: usize,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Maximum number of scattering events along a path.
    #[arg(long = "maxbounces", value_name = "NUM", default_value_t = 5, help = "Maximum number of bounces.")]
    pub max_bounces: usize,

    /// Minimum number of scattering events along a path.
    #[arg(long = "minbounces", value_name = "NUM", default_value_t = 0, help = "Minimum number of bounces.")]
    pub min_bounces: usize,

    /// Depth from which Russian roulette may terminate subpaths.
    #[arg(
        long = "rrdepth",
        value_name = "NUM",
        default_value_t = 3,
        help = "Number of bounces before Russian roulette starts."
    )]
    pub rr_depth: usize,

    /// Strategy used to pick the light that starts a light subpath.
    #[arg(
        long = "lightsamplestrategy",
        value_name = "STRATEGY",
        default_value_t = LightSampleStrategy::Power,
        help = "Light sampling strategy (uniform, power)."
    )]
    pub light_sample_strategy: LightSampleStrategy,

    /// Multiple importance sampling heuristic.
    #[arg(
        long = "mis",
        value_name = "HEURISTIC",
        default_value = "balance",
        value_parser = ["balance", "power"],
        help = "Multiple importance sampling heuristic."
    )]
    pub mis_heuristic: String,

    /// Image resolution.
    #[arg(
        long = "resolution",
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [128, 128],
        help = "Output image resolution."
    )]
    pub resolution: Vec<u32>,

    /// Maximum luminance of a primary sample.
    #[arg(
        long = "maxsampleluminance",
        value_name = "LUM",
        help = "Scale down primary samples brighter than the given luminance."
    )]
    pub max_sample_luminance: Option<Float>,

    /// Sampler seed.
    #[arg(long = "seed", value_name = "NUM", default_value_t = 0, help = "Seed for the random sampler.")]
    pub seed: u64,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "bdpt.png",
        help = "Write the final image to the given filename (.png, .tga, .exr)."
    )]
    pub image_file: String,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the validated image resolution.
    pub fn image_resolution(&self) -> Result<Point2i, String> {
        match self.resolution[..] {
            [w, h] if w > 0 && h > 0 => Ok(Point2i::new(w as i32, h as i32)),
            _ => Err(format!("Invalid resolution {:?}", self.resolution)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_options() {
        let o = Options::try_parse_from([
            "bdpt-rs",
            "--spp",
            "4",
            "--resolution",
            "32",
            "24",
            "--lightsamplestrategy",
            "uniform",
            "--mis",
            "power",
            "--maxsampleluminance",
            "8",
            "-o",
            "out.exr",
        ])
        .unwrap();
        assert_eq!(o.spp, 4);
        assert_eq!(o.image_resolution().unwrap(), Point2i::new(32, 24));
        assert_eq!(o.light_sample_strategy, LightSampleStrategy::Uniform);
        assert_eq!(o.mis_heuristic, "power");
        assert_eq!(o.image_file, "out.exr");
        assert_eq!(o.max_sample_luminance, Some(8.0));
        assert!(o.threads() >= 1);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(Options::try_parse_from(["bdpt-rs", "--lightsamplestrategy", "spatial"]).is_err());
        assert!(Options::try_parse_from(["bdpt-rs", "--mis", "max"]).is_err());
    }

    #[test]
    fn sample_luminance_is_unbounded_by_default() {
        let o = Options::try_parse_from(["bdpt-rs"]).unwrap();
        assert_eq!(o.max_sample_luminance, None);
    }

    #[test]
    fn rejects_zero_resolution() {
        let o = Options::try_parse_from(["bdpt-rs", "--resolution", "0", "10"]).unwrap();
        assert!(o.image_resolution().is_err());
    }
}
