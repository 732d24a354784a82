//! Tile based rendering over worker threads.

use bdpt_core::app::Options;
use bdpt_core::film::*;
use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use indicatif::{ProgressBar, ProgressStyle};
use integrators::*;
use samplers::RandomSampler;
use std::thread;

/// Renders the image and writes it to the output file. Tiles are handed to
/// the workers over a bounded channel; each worker owns a sampler and a path
/// arena and merges finished tiles into the film.
///
/// * `integrator` - The integrator.
/// * `options`    - Render options.
/// * `resolution` - Image resolution.
pub fn render(integrator: &BDPTIntegrator, options: &Options, resolution: Point2i) -> Result<(), String> {
    let film = Film::new(&resolution, &options.image_file, options.max_sample_luminance);
    let sampler = RandomSampler::new(options.spp, options.seed);
    let spp = sampler.samples_per_pixel();

    // Partition the image into tiles.
    let tile_size = options.tile_size.max(1) as Int;
    let n_tiles = Point2i::new(
        (resolution.x + tile_size - 1) / tile_size,
        (resolution.y + tile_size - 1) / tile_size,
    );
    let tile_count = (n_tiles.x * n_tiles.y) as usize;
    let n_threads = options.threads();
    info!("Rendering {}x{} tiles on {n_threads} threads, {spp} spp", n_tiles.x, n_tiles.y);

    let progress = create_progress_bar(tile_count as u64 + 1, options.quiet); // Render + image write
    progress.set_message("Rendering scene");

    thread::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded(n_threads);

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rxc = rx.clone();
            let progress = &progress;
            let film = &film;
            let sampler = &sampler;
            scope.spawn(move || {
                let mut tile_sampler = sampler.clone_sampler(options.seed);
                let mut arena = integrator.new_arena();
                for tile_idx in rxc.iter() {
                    let tile_bounds = tile_bounds(tile_idx, n_tiles, tile_size);
                    let film_tile = render_tile(integrator, tile_sampler.as_mut(), &mut arena, film, tile_bounds, spp);

                    // Merge image tile into `Film`.
                    film.merge_film_tile(&film_tile);
                    progress.inc(1);
                }
            });
        }
        drop(rx); // Drop extra rx since we've cloned one for each worker.

        // Send work.
        for tile_idx in 0..tile_count {
            tx.send(tile_idx)
                .map_err(|e| format!("Unable to schedule tile {tile_idx}: {e}"))?;
        }
        Ok::<(), String>(())
    })?;

    // Save final image after rendering.
    progress.set_message("Writing image");
    film.write_image(integrator.splats(), spp)?;
    progress.inc(1);
    progress.finish_with_message("Render complete");
    info!("Wrote '{}'", film.filename);

    Ok(())
}

/// Returns the pixel bounds of a tile.
///
/// * `tile_idx`  - Unique tile index.
/// * `n_tiles`   - Number of tiles in (x, y) direction.
/// * `tile_size` - Tile size in pixels.
fn tile_bounds(tile_idx: usize, n_tiles: Point2i, tile_size: Int) -> Bounds2i {
    let tile_x = tile_idx as Int % n_tiles.x;
    let tile_y = tile_idx as Int / n_tiles.x;
    let p_min = Point2i::new(tile_x * tile_size, tile_y * tile_size);
    Bounds2i::new(p_min, Point2i::new(p_min.x + tile_size, p_min.y + tile_size))
}

/// Render an image tile.
///
/// * `integrator`  - The integrator.
/// * `sampler`     - The worker's sampler.
/// * `arena`       - The worker's path arena.
/// * `film`        - The film.
/// * `tile_bounds` - Pixel bounds of the tile.
/// * `spp`         - Samples per pixel.
fn render_tile<'a>(
    integrator: &'a BDPTIntegrator,
    sampler: &mut dyn Sampler,
    arena: &mut PathArena<'a>,
    film: &Film,
    tile_bounds: Bounds2i,
    spp: usize,
) -> FilmTile {
    let mut film_tile = film.get_film_tile(tile_bounds);
    let pixel_bounds = film_tile.get_pixel_bounds();
    debug!("Starting image tile {:?}", pixel_bounds);

    // Loop over pixels in tile to render them.
    for pixel in pixel_bounds.iter() {
        for sample_index in 0..spp {
            sampler.start_pixel_sample(&pixel, sample_index);
            let l = integrator.trace_sample(&pixel, sampler, arena);
            film_tile.add_sample(&pixel, l);
        }
    }

    film_tile
}

/// Returns a progress bar, hidden when `quiet` is set.
///
/// * `len`   - Number of steps.
/// * `quiet` - Suppress output.
fn create_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_cover_the_image() {
        let resolution = Point2i::new(37, 20);
        let tile_size = 16;
        let n_tiles = Point2i::new(3, 2);
        let image = Bounds2i::new(Point2i::new(0, 0), resolution);

        let covered: Int = (0..6)
            .map(|i| tile_bounds(i, n_tiles, tile_size).intersect(&image).area())
            .sum();
        assert_eq!(covered, resolution.x * resolution.y);
        assert_eq!(tile_bounds(4, n_tiles, tile_size).p_min, Point2i::new(16, 16));
    }
}
