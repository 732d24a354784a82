#[macro_use]
extern crate log;

mod render;
mod scene;

use bdpt_core::app::Options;
use clap::Parser;
use integrators::*;
use std::process;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = run(&options) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    let resolution = options.image_resolution()?;
    if options.spp == 0 {
        return Err(String::from("Samples per pixel must be at least 1"));
    }
    if let Some(lum) = options.max_sample_luminance {
        if !(lum > 0.0) {
            return Err(format!("Maximum sample luminance {lum} must be positive"));
        }
    }

    let settings = BDPTSettings {
        min_bounces: options.min_bounces,
        max_bounces: options.max_bounces,
        rr_depth: options.rr_depth,
        light_sample_strategy: options.light_sample_strategy,
        mis_heuristic: options.mis_heuristic.parse()?,
    };

    let (scene, camera) = scene::cornell_box(resolution);
    let integrator = BDPTIntegrator::new(scene, camera, settings);

    render::render(&integrator, options, resolution)
}
