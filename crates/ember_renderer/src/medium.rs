//! Homogeneous participating media (smoke, fog).

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    sampling, Color, Material, Ray, Texture,
};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// Gap between the entry hit and the exit query on the boundary.
const EXIT_EPSILON: f32 = 1e-4;

/// A volume of constant density filling a closed boundary.
///
/// Rays passing through scatter at an exponentially distributed distance;
/// the hit is reported with an [`Material::Isotropic`] phase function.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    density: f32,
    phase: Arc<Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_texture(boundary, density, Arc::new(Texture::solid(albedo)))
    }

    pub fn with_texture(boundary: Arc<dyn Hittable>, density: f32, albedo: Arc<Texture>) -> Self {
        Self {
            boundary,
            density,
            phase: Arc::new(Material::isotropic_texture(albedo)),
        }
    }

    pub fn density(&self) -> f32 {
        self.density
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        if self.density <= 0.0 {
            return None;
        }

        // Both boundary crossings along the full line, then clip to the window
        let entry = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let exit = self
            .boundary
            .hit(ray, Interval::from_min(entry.t + EXIT_EPSILON), rng)?;

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return None;
        }
        t_enter = t_enter.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        let hit_distance = -(1.0 / self.density) * (1.0 - sampling::gen_f32(rng)).ln();
        if hit_distance > distance_inside {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;
        // Normal and face are arbitrary inside a volume
        Some(HitRecord {
            p: ray.at(t),
            normal: Vec3::X,
            material: &self.phase,
            t,
            u: 0.0,
            v: 0.0,
            front_face: true,
        })
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.boundary.bounding_box(time0, time1)
    }
}
