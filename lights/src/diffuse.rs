//! Diffuse Area Light Source

use bdpt_core::geometry::*;
use bdpt_core::light::*;
use bdpt_core::pbrt::*;
use bdpt_core::rng::ONE_MINUS_EPSILON;
use bdpt_core::sampling::*;
use bdpt_core::spectrum::*;
use std::sync::Arc;

/// Implements a basic area light source with a uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Light source type.
    pub light_type: LightType,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// The shape describing the surface of the light source.
    pub shape: Arc<dyn Shape>,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light is emitted from both sides of the surface.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit`    - Emitted radiance.
    /// * `shape`     - The shape describing the surface of the light source.
    /// * `two_sided` - Indicates whether light is emitted from both sides of the
    ///                 surface.
    pub fn new(l_emit: Spectrum, shape: Arc<dyn Shape>, two_sided: bool) -> Self {
        let area = shape.area();
        debug!("Area light on {} with area {area}", shape.get_type());
        Self {
            light_type: LightType::AREA_LIGHT,
            l_emit,
            shape,
            area,
            two_sided,
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let sides = if self.two_sided { 2.0 } else { 1.0 };
        sides * self.l_emit * self.area * PI
    }

    /// Samples incident radiance arriving at a reference point.
    ///
    /// * `p_ref` - Reference point.
    /// * `u`     - Sample value for Monte Carlo integration.
    fn sample_li(&self, p_ref: &Point3f, u: &Point2f) -> Option<Li> {
        let (ss, pdf) = self.shape.sample_solid_angle(p_ref, u);
        let wi = ss.p - *p_ref;
        if pdf == 0.0 || wi.length_squared() == 0.0 {
            return None;
        }

        let wi = wi.normalize();
        let value = self.l(&ss.n, &(-wi));
        if value.is_black() {
            return None;
        }
        Some(Li {
            wi,
            pdf,
            p_light: ss.p,
            n_light: Some(ss.n),
            value,
        })
    }

    /// Returns the solid angle PDF of sampling `wi` from `p_ref`.
    ///
    /// * `p_ref` - Reference point.
    /// * `wi`    - Direction towards the light.
    fn pdf_li(&self, p_ref: &Point3f, wi: &Vector3f) -> Float {
        self.shape.pdf_solid_angle(p_ref, wi)
    }

    /// Samples a ray leaving the light.
    ///
    /// * `u1` - Sample value used for the ray origin.
    /// * `u2` - Sample value used for the ray direction.
    fn sample_le(&self, u1: &Point2f, u2: &Point2f) -> Option<Le> {
        let (ss, pdf_pos) = self.shape.sample_area(u1);

        // Sample a cosine-weighted outgoing direction `w` for area light.
        let (w, pdf_dir) = if self.two_sided {
            // Choose a side to sample and then remap u[0] to [0,1] before
            // applying cosine-weighted hemisphere sampling for the chosen side.
            let mut u = *u2;
            let front = u.x < 0.5;
            u.x = if front {
                min(u.x * 2.0, ONE_MINUS_EPSILON)
            } else {
                min((u.x - 0.5) * 2.0, ONE_MINUS_EPSILON)
            };
            let mut w = cosine_sample_hemisphere(&u);
            if !front {
                w.z = -w.z;
            }
            (w, 0.5 * cosine_hemisphere_pdf(abs(w.z)))
        } else {
            let w = cosine_sample_hemisphere(u2);
            (w, cosine_hemisphere_pdf(w.z))
        };
        if pdf_pos == 0.0 || pdf_dir == 0.0 {
            return None;
        }

        let w = local_to_world(&ss.n, &w);
        Some(Le {
            ray: Ray::spawn(&ss.p, Some(&ss.n), &w),
            n_light: Some(ss.n),
            pdf_pos,
            pdf_dir,
            value: self.l(&ss.n, &w),
        })
    }

    /// Returns the spatial and directional PDFs of emitting the given ray.
    ///
    /// * `ray`     - The ray.
    /// * `n_light` - Surface normal at the ray origin.
    fn pdf_le(&self, ray: &Ray, n_light: Option<&Normal3f>) -> Pdf {
        let cos_theta = n_light.map_or(0.0, |n| n.dot(&ray.d.normalize()));
        let pdf_dir = if self.two_sided {
            0.5 * cosine_hemisphere_pdf(abs(cos_theta))
        } else {
            cosine_hemisphere_pdf(max(cos_theta, 0.0))
        };
        Pdf::new(self.shape.pdf_area(), pdf_dir)
    }
}

impl AreaLight for DiffuseAreaLight {
    /// Returns the emitted radiance at a point on the surface in a direction.
    ///
    /// * `n` - Surface normal at the point.
    /// * `w` - Outgoing direction.
    fn l(&self, n: &Normal3f, w: &Vector3f) -> Spectrum {
        if self.two_sided || n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use shapes::Quad;

    fn ceiling_light(two_sided: bool) -> DiffuseAreaLight {
        // Unit square at y=1 facing -y.
        let quad = Quad::new(
            Point3f::new(-0.5, 1.0, -0.5),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        );
        DiffuseAreaLight::new(Spectrum::new(2.0), Arc::new(quad), two_sided)
    }

    #[test]
    fn one_sided_emission() {
        let light = ceiling_light(false);
        let down = Normal3f::new(0.0, -1.0, 0.0);
        assert_eq!(light.l(&down, &Vector3f::new(0.0, -1.0, 0.0))[0], 2.0);
        assert!(light.l(&down, &Vector3f::new(0.0, 1.0, 0.0)).is_black());
        assert!(light.sample_li(&Point3f::new(0.0, 2.0, 0.0), &Point2f::new(0.5, 0.5)).is_none());
        assert!(approx_eq!(f32, light.power()[0], 2.0 * PI, epsilon = 1e-5));
    }

    #[test]
    fn sample_li_matches_pdf_li() {
        let light = ceiling_light(false);
        let p_ref = Point3f::new(0.2, 0.0, 0.1);
        let li = light.sample_li(&p_ref, &Point2f::new(0.25, 0.75)).unwrap();
        let pdf = light.pdf_li(&p_ref, &li.wi);
        assert!(approx_eq!(f32, li.pdf, pdf, epsilon = 1e-4 * pdf));
    }

    proptest! {
        #[test]
        fn emitted_rays_match_pdf_le(
            u0 in 0.0..1.0f32,
            u1 in 0.0..1.0f32,
            u2 in 0.01..0.99f32,
            u3 in 0.01..0.99f32,
            two_sided in proptest::bool::ANY,
        ) {
            // Keep away from the rim of the hemisphere where the pdf vanishes.
            prop_assume!(abs(u2 - 0.5) > 0.01);
            let light = ceiling_light(two_sided);
            let le = light.sample_le(&Point2f::new(u0, u1), &Point2f::new(u2, u3)).unwrap();
            let pdf = light.pdf_le(&le.ray, le.n_light.as_ref());
            prop_assert!(approx_eq!(f32, pdf.pdf_pos, le.pdf_pos, epsilon = 1e-6));
            prop_assert!(approx_eq!(f32, pdf.pdf_dir, le.pdf_dir, epsilon = 1e-4));
            if !two_sided {
                prop_assert!(le.ray.d.y <= 0.0);
            }
        }
    }
}
