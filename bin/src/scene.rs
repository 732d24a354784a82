//! Built-in demo scene.

use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::material::*;
use bdpt_core::primitive::*;
use bdpt_core::primitives::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use cameras::PerspectiveCamera;
use lights::{DiffuseAreaLight, PointLight};
use materials::{MatteMaterial, MirrorMaterial};
use shapes::{Quad, Sphere};
use std::sync::Arc;

/// Returns a Cornell box with a mirror sphere, lit by an area light under the
/// ceiling and a dim point light, and a camera looking into the box.
///
/// * `resolution` - Image resolution.
pub fn cornell_box(resolution: Point2i) -> (Arc<Scene>, Arc<dyn Camera>) {
    let white: Arc<dyn Material> = Arc::new(MatteMaterial::new(Spectrum::new(0.73)));
    let red: Arc<dyn Material> = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.65, 0.05, 0.05)));
    let green: Arc<dyn Material> = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.12, 0.45, 0.15)));
    let mirror: Arc<dyn Material> = Arc::new(MirrorMaterial::new(Spectrum::new(0.9)));

    let wall = |p0: Point3f, e1: Vector3f, e2: Vector3f, material: &Arc<dyn Material>| -> ArcPrimitive {
        Arc::new(GeometricPrimitive::new(
            Arc::new(Quad::new(p0, e1, e2)),
            Some(Arc::clone(material)),
        ))
    };

    // The box spans [-1, 1] on every axis and is open towards +z.
    let mut primitives = vec![
        wall(
            Point3f::new(-1.0, -1.0, -1.0),
            Vector3f::new(0.0, 0.0, 2.0),
            Vector3f::new(2.0, 0.0, 0.0),
            &white,
        ),
        wall(
            Point3f::new(-1.0, 1.0, -1.0),
            Vector3f::new(2.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 2.0),
            &white,
        ),
        wall(
            Point3f::new(-1.0, -1.0, -1.0),
            Vector3f::new(2.0, 0.0, 0.0),
            Vector3f::new(0.0, 2.0, 0.0),
            &white,
        ),
        wall(
            Point3f::new(-1.0, -1.0, -1.0),
            Vector3f::new(0.0, 2.0, 0.0),
            Vector3f::new(0.0, 0.0, 2.0),
            &red,
        ),
        wall(
            Point3f::new(1.0, -1.0, -1.0),
            Vector3f::new(0.0, 0.0, 2.0),
            Vector3f::new(0.0, 2.0, 0.0),
            &green,
        ),
    ];

    primitives.push(Arc::new(GeometricPrimitive::new(
        Arc::new(Sphere::new(Point3f::new(0.35, -0.6, -0.3), 0.4)),
        Some(mirror),
    )));
    primitives.push(Arc::new(GeometricPrimitive::new(
        Arc::new(Sphere::new(Point3f::new(-0.4, -0.7, 0.2), 0.3)),
        Some(Arc::clone(&white)),
    )));

    // Lamp facing down just below the ceiling.
    let lamp = Arc::new(Quad::new(
        Point3f::new(-0.25, 0.99, -0.25),
        Vector3f::new(0.5, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 0.5),
    ));
    let area_light = Arc::new(DiffuseAreaLight::new(Spectrum::new(12.0), lamp.clone(), false));
    let lights: Vec<Arc<dyn Light>> = vec![
        area_light.clone(),
        Arc::new(PointLight::new(Point3f::new(-0.6, 0.6, 0.6), Spectrum::new(0.3))),
    ];
    primitives.push(Arc::new(
        GeometricPrimitive::new(lamp, Some(white)).with_area_light(area_light, Some(0)),
    ));

    let aggregate: ArcPrimitive = Arc::new(PrimitiveList::new(primitives));
    let scene = Arc::new(Scene::new(aggregate, lights));
    info!(
        "Built Cornell box with {} lights, bounds {:?}",
        scene.lights.len(),
        scene.world_bound
    );

    let camera: Arc<dyn Camera> = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 3.4),
        Point3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        40.0,
        resolution,
    ));

    (scene, camera)
}
