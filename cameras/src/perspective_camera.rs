//! Perspective Camera

use bdpt_core::camera::*;
use bdpt_core::geometry::*;
use bdpt_core::pbrt::*;
use bdpt_core::spectrum::*;

/// Perspective (pinhole) camera. The image plane sits at unit distance along
/// the viewing direction and the lens has unit area, so importance and its
/// sampling densities only depend on the image plane area.
pub struct PerspectiveCamera {
    /// Film resolution in pixels.
    resolution: Point2i,

    /// Camera position.
    eye: Point3f,

    /// Unit viewing direction; also the lens normal.
    forward: Vector3f,

    /// Unit vector along increasing raster x.
    right: Vector3f,

    /// Unit vector along decreasing raster y.
    up: Vector3f,

    /// Half extent of the image plane at z=1 along `right`.
    half_width: Float,

    /// Half extent of the image plane at z=1 along `up`.
    half_height: Float,

    /// Area covered by the image plane bounds at z=1.
    a: Float,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `eye`        - Camera position.
    /// * `look`       - Point the camera looks at.
    /// * `up`         - Up vector; must not be parallel to the viewing direction.
    /// * `fov`        - The field-of-view angle in degrees along the shorter image axis.
    /// * `resolution` - Film resolution in pixels.
    pub fn new(eye: Point3f, look: Point3f, up: Vector3f, fov: Float, resolution: Point2i) -> Self {
        assert!(resolution.x > 0 && resolution.y > 0, "Invalid camera resolution {resolution}");
        let forward = (look - eye).normalize();
        let right = forward.cross(&up).normalize();
        assert!(!right.has_nans(), "Camera up vector is parallel to the viewing direction");
        let up = right.cross(&forward);

        let aspect = resolution.x as Float / resolution.y as Float;
        let tan_half_fov = radians(fov * 0.5).tan();
        let (half_width, half_height) = if aspect > 1.0 {
            (aspect * tan_half_fov, tan_half_fov)
        } else {
            (tan_half_fov, tan_half_fov / aspect)
        };

        Self {
            resolution,
            eye,
            forward,
            right,
            up,
            half_width,
            half_height,
            a: 4.0 * half_width * half_height,
        }
    }

    /// Maps a direction leaving the camera to the raster position it passes
    /// through and the cosine with the viewing direction. Returns `None` when
    /// the direction points away from the image plane or misses the film.
    ///
    /// * `d` - Direction.
    fn raster_position(&self, d: &Vector3f) -> Option<(Point2f, Float)> {
        let d = d.normalize();
        let cos_theta = d.dot(&self.forward);
        if cos_theta <= 0.0 {
            return None;
        }

        // Point on the image plane at z=1.
        let p_focus = d / cos_theta;
        let cx = p_focus.dot(&self.right) / self.half_width;
        let cy = p_focus.dot(&self.up) / self.half_height;
        let p_raster = Point2f::new(
            (cx + 1.0) * 0.5 * self.resolution.x as Float,
            (1.0 - cy) * 0.5 * self.resolution.y as Float,
        );

        let inside = p_raster.x >= 0.0
            && p_raster.x < self.resolution.x as Float
            && p_raster.y >= 0.0
            && p_raster.y < self.resolution.y as Float;
        inside.then_some((p_raster, cos_theta))
    }
}

impl Camera for PerspectiveCamera {
    fn resolution(&self) -> Point2i {
        self.resolution
    }

    /// Returns a ray corresponding to a given sample. It also returns, a floating
    /// point value that affects how much the radiance arriving at the film plane
    /// will contribute to final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float) {
        let cx = (2.0 * sample.p_film.x / self.resolution.x as Float - 1.0) * self.half_width;
        let cy = (1.0 - 2.0 * sample.p_film.y / self.resolution.y as Float) * self.half_height;
        let d = (self.forward + self.right * cx + self.up * cy).normalize();
        (Ray::new(self.eye, d, INFINITY), 1.0)
    }

    fn lens_normal(&self) -> Normal3f {
        Normal3f::from(self.forward)
    }

    /// Evaluate the importance emitted from the camera along a ray.
    ///
    /// * `ray` - The ray.
    fn we(&self, ray: &Ray) -> (Spectrum, Option<Point2f>) {
        match self.raster_position(&ray.d) {
            Some((p_raster, cos_theta)) => {
                let cos2 = cos_theta * cos_theta;
                (Spectrum::new(1.0 / (self.a * cos2 * cos2)), Some(p_raster))
            }
            None => (Spectrum::ZERO, None),
        }
    }

    /// Return the spatial and directional PDFs for sampling a particular ray
    /// leaving the camera.
    ///
    /// * `ray` - The ray.
    fn pdf_we(&self, ray: &Ray) -> PDFResult {
        match self.raster_position(&ray.d) {
            Some((_, cos_theta)) => PDFResult::new(1.0, 1.0 / (self.a * cos_theta * cos_theta * cos_theta)),
            None => PDFResult::default(),
        }
    }

    /// Connect a point in the scene to the pinhole.
    ///
    /// * `p_ref` - Reference point in the scene.
    /// * `_u`    - Unused; a pinhole has a single lens point.
    fn sample_wi(&self, p_ref: &Point3f, _u: &Point2f) -> Option<CameraWiSample> {
        let to_lens = self.eye - *p_ref;
        let dist2 = to_lens.length_squared();
        if dist2 == 0.0 {
            return None;
        }
        let wi = to_lens / dist2.sqrt();

        let (we, p_raster) = self.we(&Ray::new(self.eye, -wi, INFINITY));
        let p_raster = p_raster?;

        // Convert from area measure on the lens (unit area) to solid angle.
        let pdf = dist2 / self.forward.abs_dot(&wi);
        Some(CameraWiSample {
            we,
            wi,
            pdf,
            p_raster,
            p_lens: self.eye,
            n_lens: self.lens_normal(),
        })
    }
}
