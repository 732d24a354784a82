//! Subpath Connection and Multiple Importance Sampling

use super::vertex::*;
use super::{BDPTIntegrator, MISHeuristic, PathArena};
use bdpt_core::geometry::*;
use bdpt_core::light_distrib::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampler::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;

/// The sampling densities of a path vertex that the MIS weight depends on.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MisDensity {
    /// Area density of sampling the vertex in the direction its subpath was
    /// traced.
    pub pdf_fwd: Float,

    /// Area density of sampling the vertex from the opposite direction.
    pub pdf_rev: Float,

    /// The vertex was reached through a specular event.
    pub delta: bool,
}

impl<'a> From<&PathVertex<'a>> for MisDensity {
    fn from(v: &PathVertex<'a>) -> Self {
        Self {
            pdf_fwd: v.pdf_fwd,
            pdf_rev: v.pdf_rev,
            delta: v.delta,
        }
    }
}

/// Maps zero densities of delta events to 1 so they cancel in density ratios.
///
/// * `f` - The value to remap.
#[inline]
fn remap0(f: Float) -> Float {
    if f != 0.0 {
        f
    } else {
        1.0
    }
}

/// Returns the MIS weight of the strategy that produced a path from a camera
/// prefix and a light prefix. The weight compares the density of the path
/// under this strategy against every other strategy that samples the same
/// path with an earlier or later connection. Strategies that would have to
/// connect through a delta vertex are not counted.
///
/// `camera` holds the `s + 1` camera vertices (origin first) and `light` the
/// `t` light vertices (origin first), with the reverse densities of the
/// connection vertices and their predecessors already recomputed for the
/// connected path.
///
/// * `camera`             - Camera prefix densities.
/// * `light`              - Light prefix densities.
/// * `delta_light_origin` - The light origin is a delta light.
/// * `heuristic`          - Weighting heuristic.
pub fn mis_weight(
    camera: &[MisDensity],
    light: &[MisDensity],
    delta_light_origin: bool,
    heuristic: MISHeuristic,
) -> Float {
    debug_assert!(!camera.is_empty());
    if camera.len() + light.len() == 2 {
        return 1.0;
    }

    let term = |ri: Float| match heuristic {
        MISHeuristic::Balance => ri,
        MISHeuristic::Power => ri * ri,
    };
    let mut sum_ri = 0.0;

    // Consider hypothetical connection strategies along the camera subpath.
    let mut ri = 1.0;
    for i in (1..camera.len()).rev() {
        ri *= remap0(camera[i].pdf_rev) / remap0(camera[i].pdf_fwd);
        if !camera[i].delta && !camera[i - 1].delta {
            sum_ri += term(ri);
        }
    }

    // Consider hypothetical connection strategies along the light subpath.
    ri = 1.0;
    for i in (0..light.len()).rev() {
        ri *= remap0(light[i].pdf_rev) / remap0(light[i].pdf_fwd);
        let delta_light_vertex = if i > 0 { light[i - 1].delta } else { delta_light_origin };
        if !light[i].delta && !delta_light_vertex {
            sum_ri += term(ri);
        }
    }

    1.0 / (1.0 + sum_ri)
}

/// Computes the generalized geometric term between two vertices, including
/// visibility.
///
/// * `scene` - The scene.
/// * `v0`    - First vertex.
/// * `v1`    - Second vertex.
fn g(scene: &Scene, v0: &PathVertex, v1: &PathVertex) -> Float {
    let mut d = v0.p - v1.p;
    let mut g = 1.0 / d.length_squared();
    d *= g.sqrt();

    if let Some(n) = v0.n {
        g *= n.abs_dot(&d);
    }
    if let Some(n) = v1.n {
        g *= n.abs_dot(&d);
    }

    if unoccluded(scene, v0, v1) {
        g
    } else {
        0.0
    }
}

/// Returns true if nothing blocks the segment between two vertices.
///
/// * `scene` - The scene.
/// * `v0`    - First vertex.
/// * `v1`    - Second vertex.
fn unoccluded(scene: &Scene, v0: &PathVertex, v1: &PathVertex) -> bool {
    !scene.intersect_p(&Ray::spawn_to(&v0.p, v0.n.as_ref(), &v1.p, v1.n.as_ref()))
}

/// Attempts to connect the first `s + 1` camera vertices with the first `t`
/// light vertices and returns the weighted contribution of the resulting
/// path. For `s = 0` the raster position the light vertex projects to is
/// returned as well.
///
/// * `integrator` - The integrator.
/// * `arena`      - Subpaths of the current sample.
/// * `s`          - Index of the camera vertex to connect.
/// * `t`          - Number of light vertices to use.
/// * `sampler`    - The sampler.
pub(crate) fn connect_bdpt<'a>(
    integrator: &'a BDPTIntegrator,
    arena: &mut PathArena<'a>,
    s: usize,
    t: usize,
    sampler: &mut dyn Sampler,
) -> (Spectrum, Option<Point2f>) {
    let scene = integrator.scene.as_ref();
    let light_distr = integrator.light_distr.as_ref();
    let PathArena {
        camera,
        light,
        camera_mis,
        light_mis,
    } = arena;

    let pt = &camera[s];

    // Escaped camera rays only contribute as complete paths.
    if t > 0 && matches!(pt.kind, VertexKind::Background) {
        return (Spectrum::ZERO, None);
    }

    let mut l = Spectrum::ZERO;
    let mut p_raster = None;
    let mut sampled: Option<PathVertex<'a>> = None;

    if t == 0 {
        // Interpret the camera subpath as a complete path.
        if pt.is_light() {
            l = pt.le(scene, &camera[s - 1]) * pt.beta;
        }
    } else if s == 0 {
        // Project the light subpath onto the camera.
        let qs = &light[t - 1];
        if qs.is_connectible() {
            let u = sampler.get_2d();
            if let Some(cs) = integrator.camera.sample_wi(&qs.p, &u) {
                if cs.pdf > 0.0 && !cs.we.is_black() {
                    let v = PathVertex::camera(integrator.camera.as_ref(), cs.p_lens, cs.we / cs.pdf, 0.0);
                    l = qs.beta * qs.f(&v) * v.beta;
                    if let Some(n) = qs.n {
                        l *= n.abs_dot(&cs.wi);
                    }

                    // Only check visibility once the path would carry energy.
                    if !l.is_black() && !unoccluded(scene, qs, &v) {
                        l = Spectrum::ZERO;
                    }
                    p_raster = Some(cs.p_raster);
                    sampled = Some(v);
                }
            }
        }
    } else if t == 1 {
        // Sample a point on a light and connect it to the camera subpath.
        if pt.is_connectible() {
            if let Some((light_num, light_pdf)) = light_distr.sample(sampler.get_1d()) {
                let source = scene.lights[light_num].as_ref();
                let u = sampler.get_2d();
                if let Some(li) = source.sample_li(&pt.p, &u).filter(|li| li.pdf > 0.0) {
                    let mut v = PathVertex::light(
                        source,
                        light_num,
                        li.p_light,
                        li.n_light,
                        li.value / (li.pdf * light_pdf),
                        0.0,
                    );
                    v.pdf_fwd = v.pdf_light_origin(scene, light_distr, pt);

                    l = pt.beta * pt.f(&v) * v.beta;
                    if let Some(n) = pt.n {
                        l *= n.abs_dot(&li.wi);
                    }
                    if !l.is_black() && !unoccluded(scene, pt, &v) {
                        l = Spectrum::ZERO;
                    }
                    sampled = Some(v);
                }
            }
        }
    } else {
        // Handle all other bidirectional connection cases.
        let qs = &light[t - 1];
        if qs.is_connectible() && pt.is_connectible() {
            l = qs.beta * qs.f(pt) * pt.f(qs) * pt.beta;
            if !l.is_black() {
                l *= g(scene, qs, pt);
            }
        }
    }

    if l.is_black() {
        return (Spectrum::ZERO, p_raster);
    }

    let weight = strategy_weight(
        scene,
        light_distr,
        integrator.settings.mis_heuristic,
        camera,
        light,
        camera_mis,
        light_mis,
        sampled.as_ref(),
        s,
        t,
    );
    trace!("Strategy (s, t) = ({s}, {t}) contribution {l} weight {weight}");

    (l * weight, p_raster)
}

/// Collects the densities of a connected path into the scratch buffers,
/// recomputes the reverse densities around the connection and returns the
/// MIS weight.
///
/// * `scene`       - The scene.
/// * `light_distr` - Light sampling distribution.
/// * `heuristic`   - Weighting heuristic.
/// * `camera`      - Camera subpath.
/// * `light`       - Light subpath.
/// * `camera_mis`  - Scratch buffer for camera densities.
/// * `light_mis`   - Scratch buffer for light densities.
/// * `sampled`     - Vertex resampled by the `s = 0` or `t = 1` strategies.
/// * `s`           - Index of the camera connection vertex.
/// * `t`           - Number of light vertices.
#[allow(clippy::too_many_arguments)]
fn strategy_weight<'a>(
    scene: &Scene,
    light_distr: &dyn LightDistribution,
    heuristic: MISHeuristic,
    camera: &[PathVertex<'a>],
    light: &[PathVertex<'a>],
    camera_mis: &mut Vec<MisDensity>,
    light_mis: &mut Vec<MisDensity>,
    sampled: Option<&PathVertex<'a>>,
    s: usize,
    t: usize,
) -> Float {
    if s + t == 1 {
        return 1.0;
    }

    // Connection vertices, with the resampled endpoint substituted.
    let pt = match (s, sampled) {
        (0, Some(v)) => v,
        _ => &camera[s],
    };
    let qs = match (t, sampled) {
        (0, _) => None,
        (1, Some(v)) => Some(v),
        _ => Some(&light[t - 1]),
    };
    let pt_minus = if s > 0 { Some(&camera[s - 1]) } else { None };
    let qs_minus = if t > 1 { Some(&light[t - 2]) } else { None };

    // Emitters that cannot start a light subpath are only found by the
    // camera subpath.
    if let (None, VertexKind::Surface { hit }) = (qs, pt.kind) {
        if hit.light_index.is_none() {
            return 1.0;
        }
    }

    camera_mis.clear();
    camera_mis.extend(camera[..s].iter().map(MisDensity::from));
    camera_mis.push(MisDensity::from(pt));
    light_mis.clear();
    if let Some(qs) = qs {
        light_mis.extend(light[..t - 1].iter().map(MisDensity::from));
        light_mis.push(MisDensity::from(qs));
    }

    // The connection vertices are connectible, whatever they were reached by.
    camera_mis[s].delta = false;

    // Update reverse density of the camera connection vertex.
    camera_mis[s].pdf_rev = match (qs, pt_minus) {
        (Some(qs), _) => qs.pdf(scene, qs_minus, pt),
        (None, Some(pm)) => pt.pdf_light_origin(scene, light_distr, pm),
        (None, None) => 0.0,
    };

    // Update reverse density of its predecessor.
    if let Some(pm) = pt_minus {
        camera_mis[s - 1].pdf_rev = match qs {
            Some(qs) => pt.pdf(scene, Some(qs), pm),
            None => pt.pdf_light(scene, pm),
        };
    }

    // Update reverse densities of the light connection vertex and its
    // predecessor.
    if let Some(qs) = qs {
        light_mis[t - 1].delta = false;
        light_mis[t - 1].pdf_rev = pt.pdf(scene, pt_minus, qs);
        if let Some(qm) = qs_minus {
            light_mis[t - 2].pdf_rev = qs.pdf(scene, Some(pt), qm);
        }
    }

    let light_origin = if t == 1 { qs } else { light.first() };
    let delta_light_origin = t > 0 && light_origin.map_or(false, |v| v.is_delta_light());

    mis_weight(camera_mis, light_mis, delta_light_origin, heuristic)
}
