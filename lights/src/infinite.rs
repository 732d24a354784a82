//! Uniform Infinite Light Source

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::sampling::*;
use bdpt_core::spectrum::*;
use std::sync::RwLock;

/// Implements an infinitely far away light source that surrounds the entire
/// scene with constant radiance.
pub struct UniformInfiniteLight {
    /// Light source type.
    pub light_type: LightType,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Bounding sphere (center, radius) of the scene; calculated in
    /// `preprocess()`.
    world_sphere: RwLock<(Point3f, Float)>,
}

impl UniformInfiniteLight {
    /// Returns a new `UniformInfiniteLight`.
    ///
    /// * `l_emit` - Emitted radiance.
    pub fn new(l_emit: Spectrum) -> Self {
        Self {
            light_type: LightType::INFINITE_LIGHT,
            l_emit,
            world_sphere: RwLock::new((Point3f::default(), 1.0)),
        }
    }

    /// Returns the scene bounding sphere.
    fn world_sphere(&self) -> (Point3f, Float) {
        *self.world_sphere.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Light for UniformInfiniteLight {
    /// Initialize the light source before rendering begins.
    ///
    /// * `world_bound` - Bounds of the scene geometry.
    fn preprocess(&self, world_bound: &Bounds3f) {
        let sphere = world_bound.bounding_sphere();
        debug!("Infinite light world radius {}", sphere.1);
        *self.world_sphere.write().unwrap_or_else(|e| e.into_inner()) = sphere;
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let (_, world_radius) = self.world_sphere();
        PI * world_radius * world_radius * self.l_emit
    }

    /// Samples incident radiance arriving at a reference point.
    ///
    /// * `p_ref` - Reference point.
    /// * `u`     - Sample value for Monte Carlo integration.
    fn sample_li(&self, p_ref: &Point3f, u: &Point2f) -> Option<Li> {
        let (_, world_radius) = self.world_sphere();
        let wi = uniform_sample_sphere(u);
        Some(Li {
            wi,
            pdf: uniform_sphere_pdf(),
            p_light: *p_ref + wi * (2.0 * world_radius),
            n_light: None,
            value: self.l_emit,
        })
    }

    /// Returns the solid angle PDF of sampling `wi` from `p_ref`.
    fn pdf_li(&self, _p_ref: &Point3f, _wi: &Vector3f) -> Float {
        uniform_sphere_pdf()
    }

    /// Returns emitted radiance along a ray that escapes the scene.
    ///
    /// * `_ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        self.l_emit
    }

    /// Samples a ray entering the scene: a direction uniformly over the sphere
    /// and an origin on the disk perpendicular to it that covers the scene.
    ///
    /// * `u1` - Sample value used for the ray direction.
    /// * `u2` - Sample value used for the ray origin.
    fn sample_le(&self, u1: &Point2f, u2: &Point2f) -> Option<Le> {
        let (world_center, world_radius) = self.world_sphere();
        let d = -uniform_sample_sphere(u1);
        let (v1, v2) = coordinate_system(&(-d));
        let cd = concentric_sample_disk(u2);
        let p_disk = world_center + world_radius * (cd.x * v1 + cd.y * v2);
        Some(Le {
            ray: Ray::new(p_disk + world_radius * -d, d, INFINITY),
            n_light: None,
            pdf_pos: 1.0 / (PI * world_radius * world_radius),
            pdf_dir: uniform_sphere_pdf(),
            value: self.l_emit,
        })
    }

    /// Returns the spatial and directional PDFs of emitting the given ray.
    fn pdf_le(&self, _ray: &Ray, _n_light: Option<&Normal3f>) -> Pdf {
        let (_, world_radius) = self.world_sphere();
        Pdf::new(1.0 / (PI * world_radius * world_radius), uniform_sphere_pdf())
    }
}
