//! Sphere primitive for ray tracing, optionally moving over the shutter.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Point3, Vec3};
use rand::RngCore;

/// A sphere primitive.
///
/// The center moves linearly from `center0` at `time0` to `center1` at
/// `time1`; a static sphere has both centers equal.
pub struct Sphere {
    center0: Point3,
    center1: Point3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new static sphere.
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        Self::moving(center, center, 0.0, 1.0, radius, material)
    }

    /// Create a sphere whose center travels from `center0` to `center1`.
    pub fn moving(
        center0: Point3,
        center1: Point3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center at the given shutter time.
    pub fn center(&self, time: f32) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // p is a point on the unit sphere centered at origin
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    fn box_at(&self, time: f32) -> Aabb {
        let center = self.center(time);
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(center - rvec, center + rvec)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        let center = self.center(ray.time());
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            Self::get_sphere_uv(outward_normal),
            &self.material,
        ))
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        Some(Aabb::surrounding(&self.box_at(time0), &self.box_at(time1)))
    }
}
