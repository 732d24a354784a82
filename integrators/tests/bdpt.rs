//! End-to-end tests of the bi-directional estimator on small scenes.

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::light_distrib::*;
use bdpt_core::material::*;
use bdpt_core::pbrt::*;
use bdpt_core::primitive::*;
use bdpt_core::primitives::*;
use bdpt_core::sampler::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use cameras::*;
use float_cmp::approx_eq;
use integrators::*;
use lights::*;
use materials::*;
use samplers::*;
use shapes::*;
use std::sync::Arc;

/// Per-pixel primary estimates of a render, row by row.
struct Render {
    resolution: Point2i,
    primary: Vec<Spectrum>,
}

impl Render {
    fn pixel(&self, x: Int, y: Int) -> Spectrum {
        self.primary[(y * self.resolution.x + x) as usize]
    }

    /// Returns the image average of primary estimates plus splats.
    fn mean(&self, integrator: &BDPTIntegrator, spp: usize) -> Spectrum {
        let mut sum = Spectrum::ZERO;
        for y in 0..self.resolution.y {
            for x in 0..self.resolution.x {
                sum += self.pixel(x, y) + integrator.splats().readout(&Point2i::new(x, y), spp);
            }
        }
        sum / self.primary.len() as Float
    }
}

fn render(integrator: &BDPTIntegrator, seed: u64, spp: usize) -> Render {
    let resolution = integrator.splats().resolution();
    let mut sampler = RandomSampler::new(spp, seed);
    let mut arena = integrator.new_arena();

    let mut primary = Vec::with_capacity((resolution.x * resolution.y) as usize);
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            let pixel = Point2i::new(x, y);
            let mut sum = Spectrum::ZERO;
            for i in 0..spp {
                sampler.start_pixel_sample(&pixel, i);
                sum += integrator.trace_sample(&pixel, &mut sampler, &mut arena);
            }
            primary.push(sum / spp as Float);
        }
    }
    Render { resolution, primary }
}

fn matte(kd: Float) -> Option<Arc<dyn Material>> {
    Some(Arc::new(MatteMaterial::new(Spectrum::new(kd))))
}

#[test]
fn point_light_over_lambertian_plane_converges() {
    let intensity = 10.0;
    let albedo = 0.5;
    let height = 2.0;

    // Plane y = 0 facing +y, lit from straight above.
    let floor = Arc::new(Quad::new(
        Point3f::new(-5.0, 0.0, -5.0),
        Vector3f::new(0.0, 0.0, 10.0),
        Vector3f::new(10.0, 0.0, 0.0),
    ));
    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![Arc::new(GeometricPrimitive::new(
        floor,
        matte(albedo),
    ))]));
    let light: Arc<dyn Light> = Arc::new(PointLight::new(
        Point3f::new(0.0, height, 0.0),
        Spectrum::new(intensity),
    ));
    let scene = Arc::new(Scene::new(aggregate, vec![light]));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 4.0, 0.0),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -1.0),
        10.0,
        Point2i::new(9, 9),
    ));
    let integrator = BDPTIntegrator::new(scene, camera, BDPTSettings::default());

    let spp = 256;
    let image = render(&integrator, 7, spp);

    // Radiance reflected by the plane right below the light.
    let expected = albedo * INV_PI * intensity / (height * height);
    for y in 3..6 {
        for x in 3..6 {
            let p = Point2i::new(x, y);
            let l = image.pixel(x, y) + integrator.splats().readout(&p, spp);
            for c in 0..3 {
                assert!(
                    approx_eq!(f32, l[c], expected, epsilon = 0.05 * expected),
                    "pixel ({x}, {y}) channel {c}: {} != {expected}",
                    l[c]
                );
            }
        }
    }
}

#[test]
fn emitters_outside_the_light_list_are_seen_by_camera_paths() {
    // An emitting quad with no material that cannot be sampled as a light.
    let le = Spectrum::from_rgb(1.0, 0.5, 0.25);
    let shape = Arc::new(Quad::new(
        Point3f::new(-5.0, -5.0, 0.0),
        Vector3f::new(10.0, 0.0, 0.0),
        Vector3f::new(0.0, 10.0, 0.0),
    ));
    let emitter = Arc::new(DiffuseAreaLight::new(le, shape.clone(), false));
    let primitive = GeometricPrimitive::new(shape, None).with_area_light(emitter, None);
    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![Arc::new(primitive)]));
    let scene = Arc::new(Scene::new(aggregate, vec![]));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 5.0),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        30.0,
        Point2i::new(4, 4),
    ));
    let integrator = BDPTIntegrator::new(scene, camera, BDPTSettings::default());

    let spp = 4;
    let image = render(&integrator, 1, spp);
    for (i, l) in image.primary.iter().enumerate() {
        assert_eq!(*l, le, "pixel {i}");
        let p = Point2i::new(i as Int % image.resolution.x, i as Int / image.resolution.x);
        assert_eq!(integrator.splats().count(&p), 0);
    }
}

#[test]
fn escaped_camera_rays_see_the_environment() {
    let le = Spectrum::from_rgb(0.25, 0.5, 0.75);

    // A sphere behind the camera gives the scene its extent.
    let sphere = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 10.0), 1.0));
    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![Arc::new(GeometricPrimitive::new(
        sphere,
        matte(0.5),
    ))]));
    let light: Arc<dyn Light> = Arc::new(UniformInfiniteLight::new(le));
    let scene = Arc::new(Scene::new(aggregate, vec![light]));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        45.0,
        Point2i::new(3, 3),
    ));
    let integrator = BDPTIntegrator::new(scene, camera, BDPTSettings::default());

    let image = render(&integrator, 3, 8);
    for l in image.primary.iter() {
        assert_eq!(*l, le);
    }
}

fn cornell_box(seed: u64) -> (Render, Vec<Spectrum>) {
    let white = matte(0.7);
    let walls: Vec<(Point3f, Vector3f, Vector3f)> = vec![
        // Floor, ceiling and back wall.
        (Point3f::new(-1.0, -1.0, -1.0), Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(2.0, 0.0, 0.0)),
        (Point3f::new(-1.0, 1.0, -1.0), Vector3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 2.0)),
        (Point3f::new(-1.0, -1.0, -1.0), Vector3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 2.0, 0.0)),
        // Side walls.
        (Point3f::new(-1.0, -1.0, -1.0), Vector3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, 0.0, 2.0)),
        (Point3f::new(1.0, -1.0, -1.0), Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 2.0, 0.0)),
    ];
    let mut primitives: Vec<ArcPrimitive> = walls
        .into_iter()
        .map(|(p0, e1, e2)| {
            let wall = Arc::new(Quad::new(p0, e1, e2));
            Arc::new(GeometricPrimitive::new(wall, white.clone())) as ArcPrimitive
        })
        .collect();

    let mirror: Option<Arc<dyn Material>> = Some(Arc::new(MirrorMaterial::new(Spectrum::new(0.9))));
    primitives.push(Arc::new(GeometricPrimitive::new(
        Arc::new(Sphere::new(Point3f::new(0.3, -0.6, -0.3), 0.4)),
        mirror,
    )));

    // Downward facing lamp just below the ceiling.
    let lamp = Arc::new(Quad::new(
        Point3f::new(-0.25, 0.99, -0.25),
        Vector3f::new(0.5, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 0.5),
    ));
    let area_light = Arc::new(DiffuseAreaLight::new(Spectrum::new(8.0), lamp.clone(), false));
    primitives.push(Arc::new(
        GeometricPrimitive::new(lamp, white.clone()).with_area_light(area_light.clone(), Some(0)),
    ));

    let lights: Vec<Arc<dyn Light>> = vec![
        area_light,
        Arc::new(PointLight::new(Point3f::new(-0.5, 0.5, 0.5), Spectrum::new(0.5))),
    ];
    let scene = Arc::new(Scene::new(Arc::new(PrimitiveList::new(primitives)), lights));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 3.5),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        40.0,
        Point2i::new(6, 6),
    ));
    let integrator = BDPTIntegrator::new(scene, camera, BDPTSettings::default());

    let spp = 4;
    let image = render(&integrator, seed, spp);
    let splats = (0..6)
        .flat_map(|y| (0..6).map(move |x| Point2i::new(x, y)))
        .map(|p| integrator.splats().sum(&p))
        .collect();
    (image, splats)
}

#[test]
fn identical_seeds_render_identical_images() {
    let (a, a_splats) = cornell_box(42);
    let (b, b_splats) = cornell_box(42);
    assert_eq!(a.primary, b.primary);
    assert_eq!(a_splats, b_splats);

    // The scene is lit, so the comparison is not between black images.
    assert!(a.primary.iter().any(|l| !l.is_black()));
    assert!(a.primary.iter().all(|l| l.is_finite() && !l.has_negatives()));
}

/// Renders the inside of a closed, two sided emitting sphere with unit
/// radiance and a diffuse reflectance of `albedo`. Every path of `k` bounces
/// carries `albedo^k`, so the image is flat at the sum of those terms over
/// the bounce range. A mirror ball of unit reflectance can be placed inside;
/// it scatters without loss and leaves the answer unchanged.
fn furnace(albedo: Float, settings: BDPTSettings, mirror: bool, spp: usize) -> Spectrum {
    let shell = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 0.0), 2.0));
    let emitter = Arc::new(DiffuseAreaLight::new(Spectrum::new(1.0), shell.clone(), true));
    let mut primitives: Vec<ArcPrimitive> = vec![Arc::new(
        GeometricPrimitive::new(shell, matte(albedo)).with_area_light(emitter.clone(), Some(0)),
    )];
    if mirror {
        let ball: Option<Arc<dyn Material>> = Some(Arc::new(MirrorMaterial::new(Spectrum::new(1.0))));
        primitives.push(Arc::new(GeometricPrimitive::new(
            Arc::new(Sphere::new(Point3f::new(0.3, -0.3, -1.0), 0.5)),
            ball,
        )));
    }
    let lights: Vec<Arc<dyn Light>> = vec![emitter];
    let scene = Arc::new(Scene::new(Arc::new(PrimitiveList::new(primitives)), lights));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        60.0,
        Point2i::new(16, 16),
    ));
    let integrator = BDPTIntegrator::new(scene, camera, settings);
    render(&integrator, 11, spp).mean(&integrator, spp)
}

fn assert_flat(l: Spectrum, expected: Float, tolerance: Float) {
    for c in 0..3 {
        assert!(
            approx_eq!(f32, l[c], expected, epsilon = tolerance * expected),
            "channel {c}: {} != {expected}",
            l[c]
        );
    }
}

#[test]
fn furnace_sums_all_bounces_under_both_heuristics() {
    let albedo: Float = 0.5;
    let expected: Float = (0..=3).map(|k| albedo.powi(k)).sum();
    for mis_heuristic in [MISHeuristic::Balance, MISHeuristic::Power] {
        let settings = BDPTSettings {
            min_bounces: 0,
            max_bounces: 3,
            mis_heuristic,
            ..Default::default()
        };
        assert_flat(furnace(albedo, settings, false, 64), expected, 0.02);
    }
}

#[test]
fn furnace_paths_of_a_single_length() {
    let albedo: Float = 0.5;
    for k in 1..=2 {
        let settings = BDPTSettings {
            min_bounces: k,
            max_bounces: k,
            ..Default::default()
        };
        assert_flat(furnace(albedo, settings, false, 64), albedo.powi(k as i32), 0.03);
    }
}

#[test]
fn furnace_with_mirror_ball_converges() {
    let albedo: Float = 0.5;
    let settings = BDPTSettings {
        min_bounces: 0,
        max_bounces: 24,
        ..Default::default()
    };
    assert_flat(furnace(albedo, settings, true, 64), 1.0 / (1.0 - albedo), 0.03);
}

/// A diffuse floor lit only through a mirror ceiling.
fn caustic_scene(resolution: Point2i) -> (Arc<Scene>, Arc<PerspectiveCamera>) {
    let floor = Arc::new(Quad::new(
        Point3f::new(-5.0, 0.0, -5.0),
        Vector3f::new(0.0, 0.0, 10.0),
        Vector3f::new(10.0, 0.0, 0.0),
    ));
    let ceiling = Arc::new(Quad::new(
        Point3f::new(-5.0, 2.0, -5.0),
        Vector3f::new(10.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 10.0),
    ));
    let mirror: Option<Arc<dyn Material>> = Some(Arc::new(MirrorMaterial::new(Spectrum::new(1.0))));
    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![
        Arc::new(GeometricPrimitive::new(floor, matte(0.5))),
        Arc::new(GeometricPrimitive::new(ceiling, mirror)),
    ]));
    let light: Arc<dyn Light> = Arc::new(PointLight::new(Point3f::new(0.0, 1.0, 0.0), Spectrum::new(10.0)));
    let scene = Arc::new(Scene::new(aggregate, vec![light]));

    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 1.0, 4.0),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        30.0,
        resolution,
    ));
    (scene, camera)
}

#[test]
fn light_tracing_onto_the_traced_pixel_stays_in_the_primary_estimate() {
    // Floor, mirror, light: only light subpaths that connect to the lens can
    // sample these paths, and a single pixel image receives all of them.
    let (scene, camera) = caustic_scene(Point2i::new(1, 1));
    let settings = BDPTSettings {
        min_bounces: 2,
        max_bounces: 2,
        ..Default::default()
    };
    let integrator = BDPTIntegrator::new(scene, camera, settings);

    let image = render(&integrator, 5, 1024);
    let p = Point2i::new(0, 0);
    assert!(!image.pixel(0, 0).is_black());
    assert!(image.pixel(0, 0).is_finite());
    assert_eq!(integrator.splats().count(&p), 0);
    assert!(integrator.splats().sum(&p).is_black());
}

#[test]
fn non_finite_scattering_ends_the_subpath() {
    let floor = Arc::new(Quad::new(
        Point3f::new(-5.0, 0.0, -5.0),
        Vector3f::new(0.0, 0.0, 10.0),
        Vector3f::new(10.0, 0.0, 0.0),
    ));
    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(vec![Arc::new(GeometricPrimitive::new(
        floor,
        matte(INFINITY),
    ))]));
    let light: Arc<dyn Light> = Arc::new(PointLight::new(Point3f::new(0.0, 2.0, 0.0), Spectrum::new(10.0)));
    let scene = Arc::new(Scene::new(aggregate, vec![light]));
    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 4.0, 0.0),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -1.0),
        10.0,
        Point2i::new(3, 3),
    ));
    let light_distr = create_light_sample_distribution(LightSampleStrategy::Uniform, &scene);

    let spp = 16;
    {
        let pixel = Point2i::new(1, 1);
        let mut sampler = RandomSampler::new(spp, 9);
        let mut path = Vec::new();
        let mut hits = 0;
        for i in 0..spp {
            sampler.start_pixel_sample(&pixel, i);

            // Lens and floor; the throughput leaving the floor is infinite.
            let n = generate_camera_subpath(&scene, camera.as_ref(), &mut sampler, &pixel, 7, 3, &mut path);
            assert_eq!(n, 2);
            assert!(path.iter().all(|v| v.beta.is_finite() && !v.beta.has_negatives()));

            // Light rays either escape or end on the floor.
            let n = generate_light_subpath(&scene, light_distr.as_ref(), &mut sampler, 6, 3, &mut path);
            assert!(n == 1 || n == 2);
            assert!(path.iter().all(|v| v.beta.is_finite() && !v.beta.has_negatives()));
            if n == 2 {
                hits += 1;
            }
        }
        assert!(hits > 0);
    }

    let integrator = BDPTIntegrator::new(scene, camera, BDPTSettings::default());
    let image = render(&integrator, 9, spp);
    for y in 0..3 {
        for x in 0..3 {
            let p = Point2i::new(x, y);
            let l = image.pixel(x, y);
            assert!(l.is_finite() && !l.has_negatives(), "pixel ({x}, {y}): {l}");
            assert!(integrator.splats().sum(&p).is_finite());
        }
    }
}

#[test]
fn lights_with_non_finite_emission_start_no_subpath() {
    let (scene, _) = caustic_scene(Point2i::new(1, 1));
    let light: Arc<dyn Light> = Arc::new(PointLight::new(Point3f::new(0.0, 1.0, 0.0), Spectrum::new(INFINITY)));
    let scene = Scene::new(Arc::clone(&scene.aggregate), vec![light]);
    let light_distr = create_light_sample_distribution(LightSampleStrategy::Uniform, &scene);

    let pixel = Point2i::new(0, 0);
    let mut sampler = RandomSampler::new(8, 2);
    let mut path = Vec::new();
    for i in 0..8 {
        sampler.start_pixel_sample(&pixel, i);
        assert_eq!(generate_light_subpath(&scene, light_distr.as_ref(), &mut sampler, 4, 3, &mut path), 0);
        assert!(path.is_empty());
    }
}
