//! Subpath Construction

use super::connect::MisDensity;
use super::vertex::*;
use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::light_distrib::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;

/// Per-worker scratch storage for the camera and light subpaths of one pixel
/// sample and the density records used to weight their connections. It is
/// sized once for the maximum path length and reused for every sample.
pub struct PathArena<'a> {
    /// Camera subpath.
    pub(crate) camera: Vec<PathVertex<'a>>,

    /// Light subpath.
    pub(crate) light: Vec<PathVertex<'a>>,

    /// Densities of the camera subpath prefix of a strategy.
    pub(crate) camera_mis: Vec<MisDensity>,

    /// Densities of the light subpath prefix of a strategy.
    pub(crate) light_mis: Vec<MisDensity>,
}

impl<'a> PathArena<'a> {
    /// Returns a new arena.
    ///
    /// * `max_bounces` - Maximum number of scattering events along a path.
    pub fn new(max_bounces: usize) -> Self {
        Self {
            camera: Vec::with_capacity(max_bounces + 2),
            light: Vec::with_capacity(max_bounces + 1),
            camera_mis: Vec::with_capacity(max_bounces + 2),
            light_mis: Vec::with_capacity(max_bounces + 1),
        }
    }
}

/// Generates the camera subpath for a pixel sample into `path`. It returns
/// the number of vertices in the subpath.
///
/// * `scene`     - The scene.
/// * `camera`    - The camera.
/// * `sampler`   - The sampler.
/// * `pixel`     - The pixel being traced.
/// * `max_depth` - The maximum number of vertices.
/// * `rr_depth`  - Number of vertices after which Russian roulette applies.
/// * `path`      - The path.
#[allow(clippy::too_many_arguments)]
pub fn generate_camera_subpath<'a>(
    scene: &'a Scene,
    camera: &'a dyn Camera,
    sampler: &mut dyn Sampler,
    pixel: &Point2i,
    max_depth: usize,
    rr_depth: usize,
    path: &mut Vec<PathVertex<'a>>,
) -> usize {
    path.clear();
    if max_depth == 0 {
        return 0;
    }

    // Sample initial ray for camera subpath.
    let camera_sample = sampler.get_camera_sample(pixel);
    let (ray, weight) = camera.generate_ray(&camera_sample);
    let beta = Spectrum::new(weight);
    if !beta.is_finite() || beta.has_negatives() {
        debug!("Discarding camera ray {ray} with weight {weight}");
        return 0;
    }
    let PDFResult { pos: pdf_pos, dir: pdf_dir } = camera.pdf_we(&ray);

    // Generate first vertex on camera subpath and start random walk.
    path.push(PathVertex::camera(camera, ray.o, beta, pdf_pos));
    trace!("Starting camera subpath. Ray: {ray}, beta {beta}, pdf_pos {pdf_pos}, pdf_dir {pdf_dir}");

    let n_vertices = random_walk(
        scene,
        ray,
        sampler,
        beta,
        pdf_dir,
        max_depth - 1,
        TransportMode::Radiance,
        rr_depth,
        path,
    );

    n_vertices + 1
}

/// Generates a light subpath into `path`. It returns the number of vertices
/// in the subpath; zero when the scene has no lights or the emitted sample
/// carries no energy or an invalid value.
///
/// * `scene`       - The scene.
/// * `light_distr` - Light sampling distribution.
/// * `sampler`     - The sampler.
/// * `max_depth`   - The maximum number of vertices.
/// * `rr_depth`    - Number of vertices after which Russian roulette applies.
/// * `path`        - The path.
pub fn generate_light_subpath<'a>(
    scene: &'a Scene,
    light_distr: &dyn LightDistribution,
    sampler: &mut dyn Sampler,
    max_depth: usize,
    rr_depth: usize,
    path: &mut Vec<PathVertex<'a>>,
) -> usize {
    path.clear();
    if max_depth == 0 {
        return 0;
    }

    // Sample initial ray for light subpath.
    let Some((light_num, light_pdf)) = light_distr.sample(sampler.get_1d()) else {
        return 0;
    };
    let light = scene.lights[light_num].as_ref();
    let u1 = sampler.get_2d();
    let u2 = sampler.get_2d();
    let Some(le) = light.sample_le(&u1, &u2) else {
        return 0;
    };
    if le.pdf_pos == 0.0 || le.pdf_dir == 0.0 || le.value.is_black() {
        return 0;
    }
    if !le.value.is_finite() || le.value.has_negatives() {
        debug!("Discarding emission {} from light {light_num}", le.value);
        return 0;
    }

    // Generate first vertex on light subpath and start random walk.
    path.push(PathVertex::light(
        light,
        light_num,
        le.ray.o,
        le.n_light,
        le.value,
        le.pdf_pos * light_pdf,
    ));
    let cos = le.n_light.map_or(1.0, |n| n.abs_dot(&le.ray.d));
    let beta = le.value * cos / (light_pdf * le.pdf_pos * le.pdf_dir);
    trace!(
        "Starting light subpath. Ray: {}, le {}, beta {beta}, pdf_pos {}, pdf_dir {}",
        le.ray,
        le.value,
        le.pdf_pos,
        le.pdf_dir
    );

    let n_vertices = if beta.is_finite() && !beta.has_negatives() {
        random_walk(
            scene,
            le.ray,
            sampler,
            beta,
            le.pdf_dir,
            max_depth - 1,
            TransportMode::Importance,
            rr_depth,
            path,
        )
    } else {
        debug!("Light subpath ends at its origin with throughput {beta}");
        0
    };

    // Correct subpath sampling densities for infinite lights.
    if path[0].is_infinite_light() {
        // Spatial density of the first hit is the planar density of the
        // origin disk.
        if n_vertices > 0 {
            let cos = path[1].n.map_or(1.0, |n| n.abs_dot(&le.ray.d));
            path[1].pdf_fwd = le.pdf_pos * cos;
        }

        // The origin is expressed as a solid angle density.
        path[0].pdf_fwd = infinite_light_density(scene, light_distr, &le.ray.d);
    }

    n_vertices + 1
}

/// Extends a subpath whose origin is already in `path` by following the
/// scattering functions of the surfaces it hits. It returns the number of
/// vertices added.
///
/// * `scene`     - The scene.
/// * `ray`       - The ray leaving the last vertex of `path`.
/// * `sampler`   - The sampler.
/// * `beta`      - Path throughput weight.
/// * `pdf`       - Solid angle density of `ray.d`.
/// * `max_depth` - The maximum number of vertices to add.
/// * `mode`      - The light transport mode.
/// * `rr_depth`  - Number of vertices after which Russian roulette applies.
/// * `path`      - The path.
#[allow(clippy::too_many_arguments)]
pub fn random_walk<'a>(
    scene: &'a Scene,
    mut ray: Ray,
    sampler: &mut dyn Sampler,
    mut beta: Spectrum,
    pdf: Float,
    max_depth: usize,
    mode: TransportMode,
    rr_depth: usize,
    path: &mut Vec<PathVertex<'a>>,
) -> usize {
    if max_depth == 0 || path.is_empty() {
        return 0;
    }

    let mut bounces = 0;
    let mut pdf_fwd = pdf;

    loop {
        let prev = path.len() - 1;

        let Some(hit) = scene.intersect(&mut ray) else {
            // Capture escaped rays when tracing from the camera.
            if mode == TransportMode::Radiance && scene.has_infinite_lights() {
                path.push(PathVertex::background(&ray, beta, pdf_fwd));
                bounces += 1;
            }
            break;
        };

        let vertex = PathVertex::surface(hit, beta, pdf_fwd, &path[prev]);
        path.push(vertex);
        let current = prev + 1;
        bounces += 1;
        if bounces >= max_depth {
            break;
        }

        // Surfaces without a material absorb everything.
        let Some(bsdf) = hit.bsdf() else {
            break;
        };

        // Sample BSDF at current vertex and compute reverse probability.
        let Some(sample) = bsdf.sample_f(&hit.wo, &sampler.get_2d()) else {
            break;
        };
        if sample.f.is_black() || sample.pdf == 0.0 {
            break;
        }
        pdf_fwd = sample.pdf;
        beta *= sample.f * sample.wi.abs_dot(&hit.n) / pdf_fwd;
        let mut pdf_rev = bsdf.pdf(&sample.wi, &hit.wo);
        if sample.is_specular() {
            path[current].delta = true;
            pdf_rev = 0.0;
            pdf_fwd = 0.0;
        }

        // Compute reverse area density at preceding vertex.
        path[prev].pdf_rev = path[current].convert_density(pdf_rev, &path[prev]);

        if beta.is_black() || !beta.is_finite() || beta.has_negatives() {
            trace!("Terminating subpath with throughput {beta}");
            break;
        }

        if bounces >= rr_depth {
            match russian_roulette(beta, sampler.get_1d()) {
                Some(b) => beta = b,
                None => break,
            }
        }

        ray = hit.spawn_ray(&sample.wi);
    }

    bounces
}

/// Stochastically terminates a path with probability based on its throughput.
/// The continuation probability is `min(1, luminance)`; survivors are scaled
/// up by its inverse so the expected throughput is unchanged. Returns `None`
/// if the path is terminated.
///
/// * `beta` - Path throughput.
/// * `u`    - Uniform sample in `[0, 1)`.
pub fn russian_roulette(beta: Spectrum, u: Float) -> Option<Spectrum> {
    let q = min(1.0, beta.y());
    if q > 0.0 && u < q {
        Some(beta / q)
    } else {
        None
    }
}
