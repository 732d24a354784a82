//! Path Vertex

use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::interaction::*;
use bdpt_core::light::*;
use bdpt_core::light_distrib::*;
use bdpt_core::pbrt::*;
use bdpt_core::scene::*;
use bdpt_core::spectrum::*;
use std::fmt;

/// Quantity carried along a subpath.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// Subpath started at the camera.
    Radiance,

    /// Subpath started at a light.
    Importance,
}

/// What a path vertex lies on. Each kind only carries the references it needs.
#[derive(Copy, Clone)]
pub enum VertexKind<'a> {
    /// The camera lens.
    Camera { camera: &'a dyn Camera },

    /// A point sampled on a light source; `index` is the light's position in
    /// the scene light list.
    Light { light: &'a dyn Light, index: usize },

    /// A ray-surface intersection.
    Surface { hit: SurfaceHit<'a> },

    /// A camera ray that escaped the scene and sees the infinite lights.
    Background,
}

/// A vertex on a camera or light subpath.
#[derive(Copy, Clone)]
pub struct PathVertex<'a> {
    /// What the vertex lies on.
    pub kind: VertexKind<'a>,

    /// Position.
    pub p: Point3f,

    /// Geometric normal; `None` for points that are not on a surface.
    pub n: Option<Normal3f>,

    /// Path throughput up to and including this vertex.
    pub beta: Spectrum,

    /// Area density of sampling this vertex from its predecessor.
    pub pdf_fwd: Float,

    /// Area density of sampling this vertex from its successor when the path
    /// is traced in the opposite direction.
    pub pdf_rev: Float,

    /// Reached through a specular (delta) scattering event.
    pub delta: bool,
}

impl<'a> PathVertex<'a> {
    /// Returns a vertex on the camera lens.
    ///
    /// * `camera`  - The camera.
    /// * `p`       - Point on the lens.
    /// * `beta`    - Throughput.
    /// * `pdf_fwd` - Forward density.
    pub fn camera(camera: &'a dyn Camera, p: Point3f, beta: Spectrum, pdf_fwd: Float) -> Self {
        Self {
            kind: VertexKind::Camera { camera },
            p,
            n: None,
            beta,
            pdf_fwd,
            pdf_rev: 0.0,
            delta: false,
        }
    }

    /// Returns a vertex on a light source.
    ///
    /// * `light`   - The light.
    /// * `index`   - Index of the light in the scene light list.
    /// * `p`       - Point on the light.
    /// * `n`       - Surface normal at `p`, if the light has a surface.
    /// * `beta`    - Throughput.
    /// * `pdf_fwd` - Forward density.
    pub fn light(
        light: &'a dyn Light,
        index: usize,
        p: Point3f,
        n: Option<Normal3f>,
        beta: Spectrum,
        pdf_fwd: Float,
    ) -> Self {
        Self {
            kind: VertexKind::Light { light, index },
            p,
            n,
            beta,
            pdf_fwd,
            pdf_rev: 0.0,
            delta: false,
        }
    }

    /// Returns a vertex at a surface intersection. The solid angle density
    /// `pdf` of the sampled direction at `prev` is converted to area measure.
    ///
    /// * `hit`  - The intersection.
    /// * `beta` - Throughput.
    /// * `pdf`  - Solid angle density of the direction sampled at `prev`.
    /// * `prev` - The preceding vertex.
    pub fn surface(hit: SurfaceHit<'a>, beta: Spectrum, pdf: Float, prev: &PathVertex<'a>) -> Self {
        let mut v = Self {
            kind: VertexKind::Surface { hit },
            p: hit.p,
            n: Some(hit.n),
            beta,
            pdf_fwd: 0.0,
            pdf_rev: 0.0,
            delta: false,
        };
        v.pdf_fwd = prev.convert_density(pdf, &v);
        v
    }

    /// Returns the vertex of a ray that escaped the scene. It is placed at unit
    /// distance along the ray so directions towards it are well defined.
    ///
    /// * `ray`     - The escaping ray.
    /// * `beta`    - Throughput.
    /// * `pdf_fwd` - Solid angle density of the ray direction.
    pub fn background(ray: &Ray, beta: Spectrum, pdf_fwd: Float) -> Self {
        Self {
            kind: VertexKind::Background,
            p: ray.o + ray.d.normalize(),
            n: None,
            beta,
            pdf_fwd,
            pdf_rev: 0.0,
            delta: false,
        }
    }

    /// Returns true if the vertex emits light: light and background vertices
    /// and hits on area lights.
    pub fn is_light(&self) -> bool {
        match self.kind {
            VertexKind::Light { .. } | VertexKind::Background => true,
            VertexKind::Surface { hit } => hit.is_emitter(),
            VertexKind::Camera { .. } => false,
        }
    }

    /// Returns true if the vertex lies on a light described by a delta
    /// distribution.
    pub fn is_delta_light(&self) -> bool {
        match self.kind {
            VertexKind::Light { light, .. } => light.is_delta_light(),
            _ => false,
        }
    }

    /// Returns true if the vertex lies on an infinite light.
    pub fn is_infinite_light(&self) -> bool {
        match self.kind {
            VertexKind::Background => true,
            VertexKind::Light { light, .. } => light.get_type().is_infinite_light(),
            _ => false,
        }
    }

    /// Returns true if a connection to an arbitrary point can be evaluated
    /// at this vertex.
    pub fn is_connectible(&self) -> bool {
        match self.kind {
            VertexKind::Camera { .. } => true,
            VertexKind::Light { light, .. } => !light.get_type().contains(LightType::DELTA_DIRECTION_LIGHT),
            VertexKind::Surface { hit } => hit.bsdf().map_or(false, |bsdf| !bsdf.is_specular()),
            VertexKind::Background => false,
        }
    }

    /// Returns the unit direction towards another vertex or `None` if they
    /// coincide.
    ///
    /// * `v` - The other vertex.
    fn direction_to(&self, v: &PathVertex) -> Option<Vector3f> {
        let w = v.p - self.p;
        if w.length_squared() == 0.0 {
            None
        } else {
            Some(w.normalize())
        }
    }

    /// Returns the BSDF value for scattering from the incoming direction
    /// towards `next`. Only surface vertices scatter.
    ///
    /// * `next` - The vertex light arrives from or leaves to.
    pub fn f(&self, next: &PathVertex) -> Spectrum {
        let (VertexKind::Surface { hit }, Some(wi)) = (self.kind, self.direction_to(next)) else {
            return Spectrum::ZERO;
        };
        hit.bsdf().map_or(Spectrum::ZERO, |bsdf| bsdf.f(&hit.wo, &wi))
    }

    /// Returns the radiance emitted from the vertex towards `v`.
    ///
    /// * `scene` - The scene.
    /// * `v`     - The receiving vertex.
    pub fn le(&self, scene: &Scene, v: &PathVertex) -> Spectrum {
        if !self.is_light() {
            return Spectrum::ZERO;
        }
        let Some(w) = self.direction_to(v) else {
            return Spectrum::ZERO;
        };

        if self.is_infinite_light() {
            scene.infinite_le(&Ray::new(self.p, -w, INFINITY))
        } else if let VertexKind::Surface { hit } = self.kind {
            hit.le(&w)
        } else {
            Spectrum::ZERO
        }
    }

    /// Converts a solid angle density at this vertex to an area density at
    /// `next`. Infinite lights keep the solid angle density.
    ///
    /// * `pdf`  - Solid angle density.
    /// * `next` - The vertex the density is converted for.
    pub fn convert_density(&self, pdf: Float, next: &PathVertex) -> Float {
        if next.is_infinite_light() {
            return pdf;
        }

        let w = next.p - self.p;
        let dist2 = w.length_squared();
        if dist2 == 0.0 {
            return 0.0;
        }
        let inv_dist2 = 1.0 / dist2;
        let cos = next.n.map_or(1.0, |n| n.abs_dot(&(w * inv_dist2.sqrt())));
        pdf * cos * inv_dist2
    }

    /// Returns the area density at `next` of sampling it from this vertex,
    /// given the vertex `prev` that light arrives from.
    ///
    /// * `scene` - The scene.
    /// * `prev`  - The preceding vertex, if any.
    /// * `next`  - The vertex being sampled.
    pub fn pdf(&self, scene: &Scene, prev: Option<&PathVertex>, next: &PathVertex) -> Float {
        match self.kind {
            VertexKind::Light { .. } | VertexKind::Background => self.pdf_light(scene, next),
            VertexKind::Camera { camera } => match self.direction_to(next) {
                Some(wn) => {
                    let pdf = camera.pdf_we(&Ray::new(self.p, wn, INFINITY)).dir;
                    self.convert_density(pdf, next)
                }
                None => 0.0,
            },
            VertexKind::Surface { hit } => {
                let (Some(prev), Some(wn)) = (prev, self.direction_to(next)) else {
                    return 0.0;
                };
                let Some(wp) = self.direction_to(prev) else {
                    return 0.0;
                };
                let pdf = hit.bsdf().map_or(0.0, |bsdf| bsdf.pdf(&wp, &wn));
                self.convert_density(pdf, next)
            }
        }
    }

    /// Returns the area density at `v` of emitting a ray from this light
    /// vertex towards it.
    ///
    /// * `scene` - The scene.
    /// * `v`     - The receiving vertex.
    pub fn pdf_light(&self, scene: &Scene, v: &PathVertex) -> Float {
        let w = v.p - self.p;
        let dist2 = w.length_squared();
        if dist2 == 0.0 {
            return 0.0;
        }
        let w = w / dist2.sqrt();

        let pdf = if self.is_infinite_light() {
            // Planar density over the disk covering the scene.
            let (_, world_radius) = scene.world_bound.bounding_sphere();
            if world_radius > 0.0 {
                1.0 / (PI * world_radius * world_radius)
            } else {
                0.0
            }
        } else {
            let ray = Ray::new(self.p, w, INFINITY);
            let pdf_dir = match self.kind {
                VertexKind::Light { light, .. } => light.pdf_le(&ray, self.n.as_ref()).pdf_dir,
                VertexKind::Surface { hit } => hit
                    .area_light
                    .map_or(0.0, |light| light.pdf_le(&ray, Some(&hit.n)).pdf_dir),
                _ => 0.0,
            };
            pdf_dir / dist2
        };

        v.n.map_or(pdf, |n| pdf * n.abs_dot(&w))
    }

    /// Returns the density of sampling this vertex as the origin of a light
    /// subpath: the light selection probability times the spatial density.
    /// Emitters missing from the scene light list cannot start a light
    /// subpath and get zero.
    ///
    /// * `scene`       - The scene.
    /// * `light_distr` - Light sampling distribution.
    /// * `v`           - The vertex the light subpath continues to.
    pub fn pdf_light_origin(&self, scene: &Scene, light_distr: &dyn LightDistribution, v: &PathVertex) -> Float {
        let Some(w) = self.direction_to(v) else {
            return 0.0;
        };
        if self.is_infinite_light() {
            return infinite_light_density(scene, light_distr, &w);
        }

        let ray = Ray::new(self.p, w, INFINITY);
        let (pdf_pos, index) = match self.kind {
            VertexKind::Light { light, index } => (light.pdf_le(&ray, self.n.as_ref()).pdf_pos, Some(index)),
            VertexKind::Surface { hit } => match hit.area_light {
                Some(light) => (light.pdf_le(&ray, Some(&hit.n)).pdf_pos, hit.light_index),
                None => return 0.0,
            },
            _ => return 0.0,
        };
        index.map_or(0.0, |i| light_distr.pdf(i) * pdf_pos)
    }
}

impl<'a> fmt::Display for PathVertex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            VertexKind::Camera { .. } => "camera",
            VertexKind::Light { .. } => "light",
            VertexKind::Surface { .. } => "surface",
            VertexKind::Background => "background",
        };
        write!(
            f,
            "[{kind} p: {}, beta: {}, pdf_fwd: {}, pdf_rev: {}, delta: {}]",
            self.p, self.beta, self.pdf_fwd, self.pdf_rev, self.delta
        )
    }
}

/// Returns the solid angle density of starting a light subpath on any of the
/// infinite lights with incoming direction `w`, weighted by the probability
/// of choosing each light.
///
/// * `scene`       - The scene.
/// * `light_distr` - Light sampling distribution.
/// * `w`           - Direction of travel into the scene.
pub fn infinite_light_density(scene: &Scene, light_distr: &dyn LightDistribution, w: &Vector3f) -> Float {
    scene
        .infinite_lights
        .iter()
        .map(|&i| light_distr.pdf(i) * scene.lights[i].pdf_li(&Point3f::default(), &(-*w)))
        .sum()
}
