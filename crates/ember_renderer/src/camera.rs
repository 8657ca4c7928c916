//! Thin-lens camera for ray generation.

use serde::{Deserialize, Serialize};

use crate::{sampling, Ray};
use ember_math::{Point3, Vec3};
use rand::RngCore;

/// User-facing camera description.
///
/// Built with the `with_*` methods and turned into a [`Camera`] with
/// [`Camera::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Viewport width over height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 is a pinhole
    pub aperture: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,
    /// Shutter open and close times
    pub time0: f32,
    pub time1: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 1.0,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter interval sampled for motion blur.
    pub fn with_shutter(mut self, time0: f32, time1: f32) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = settings.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
            time0: settings.time0,
            time1: settings.time1,
        }
    }

    /// Ray through viewport coordinates `(s, t)`, both in `[0, 1]` from the
    /// lower-left corner.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * sampling::random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let ray_origin = self.origin + offset;
        let ray_direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin;
        let ray_time = self.time0 + (self.time1 - self.time0) * sampling::gen_f32(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit vector pointing from the look-at point back to the eye.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Shutter interval `(time0, time1)`.
    pub fn shutter(&self) -> (f32, f32) {
        (self.time0, self.time1)
    }
}
