//! Surface and volume scattering.

use std::sync::Arc;

use crate::{hittable::HitRecord, sampling, Color, Ray, Texture};
use ember_math::{Point3, Vec3Ext};
use rand::RngCore;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel throughput of the bounce.
    pub attenuation: Color,
    /// Continuation ray, starting at the hit point.
    pub scattered: Ray,
}

/// How light interacts with a surface or a volume.
#[derive(Debug, Clone)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Arc<Texture> },
    /// Mirror, blurred by `fuzz` (0 = perfect mirror, 1 = very rough).
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive material with index of refraction `ior`.
    Dielectric { ior: f32 },
    /// Emitter; never scatters.
    DiffuseLight { emit: Arc<Texture> },
    /// Phase function of participating media; scatters uniformly.
    Isotropic { albedo: Arc<Texture> },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::lambertian_texture(Arc::new(Texture::solid(albedo)))
    }

    pub fn lambertian_texture(albedo: Arc<Texture>) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with `fuzz` clamped to `[0, 1]`.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }

    pub fn diffuse_light(emit: Color) -> Self {
        Self::diffuse_light_texture(Arc::new(Texture::solid(emit)))
    }

    pub fn diffuse_light_texture(emit: Arc<Texture>) -> Self {
        Material::DiffuseLight { emit }
    }

    pub fn isotropic(albedo: Color) -> Self {
        Self::isotropic_texture(Arc::new(Texture::solid(albedo)))
    }

    pub fn isotropic_texture(albedo: Arc<Texture>) -> Self {
        Material::Isotropic { albedo }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. The scattered ray keeps the
    /// incoming ray's time.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + sampling::random_unit_vector(rng);

                // Catch degenerate scatter direction
                if direction.near_zero() {
                    direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo.value(rec.u, rec.v, rec.p),
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = ray_in.direction().normalize().reflect(rec.normal);

                // One retry when the fuzzed ray dips below the surface
                (0..2)
                    .map(|_| reflected + *fuzz * sampling::random_in_unit_sphere(rng))
                    .find(|direction| direction.dot(rec.normal) > 0.0)
                    .map(|direction| ScatterResult {
                        attenuation: *albedo,
                        scattered: Ray::new(rec.p, direction, ray_in.time()),
                    })
            }
            Material::Dielectric { ior } => {
                let refraction_ratio = if rec.front_face { 1.0 / *ior } else { *ior };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Check for total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > sampling::gen_f32(rng)
                {
                    unit_direction.reflect(rec.normal)
                } else {
                    unit_direction.refract(rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
            Material::DiffuseLight { .. } => None,
            Material::Isotropic { albedo } => Some(ScatterResult {
                attenuation: albedo.value(rec.u, rec.v, rec.p),
                scattered: Ray::new(rec.p, sampling::random_unit_vector(rng), ray_in.time()),
            }),
        }
    }

    /// Light emitted at the hit. Black for everything but [`Material::DiffuseLight`].
    pub fn emitted(&self, u: f32, v: f32, p: Point3) -> Color {
        match self {
            Material::DiffuseLight { emit } => emit.value(u, v, p),
            _ => Color::ZERO,
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin<'a>(ray: &Ray, outward: Vec3, material: &'a Material) -> HitRecord<'a> {
        // Place the hit at the ray's intersection with the plane through the origin
        let t = -ray.origin().dot(outward) / ray.direction().dot(outward);
        HitRecord::new(ray, t, outward, (0.5, 0.5), material)
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let material = Material::lambertian(Color::new(0.8, 0.3, 0.3));
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.25);
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(result.scattered.time(), 0.25);
            assert_eq!(result.scattered.origin(), rec.p);
        }
    }

    #[test]
    fn test_metal_mirror_reflects() {
        let material = Material::metal(Color::splat(0.9), 0.0);
        let ray = Ray::new(Point3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);
        let rec = hit_at_origin(&ray, Vec3::Y, &material);

        let result = material
            .scatter(&ray, &rec, &mut StdRng::seed_from_u64(0))
            .unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();

        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        match Material::metal(Color::ONE, 3.0) {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_metal_grazing_fuzz_never_goes_below_surface() {
        let material = Material::metal(Color::ONE, 1.0);
        // Nearly grazing: many fuzzed directions dip below the surface
        let ray = Ray::new(Point3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0), 0.0);
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(13);

        let mut absorbed = 0;
        for _ in 0..500 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0 && absorbed < 500);
    }

    #[test]
    fn test_dielectric_normal_incidence_slab_round_trip() {
        // Through a glass slab at normal incidence the direction is unchanged,
        // whether a bounce reflects or refracts.
        let material = Material::dielectric(1.5);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, 0.0);
            let entry = hit_at_origin(&ray, Vec3::Z, &material);
            assert!(entry.front_face);

            let inside = material.scatter(&ray, &entry, &mut rng).unwrap();
            assert_eq!(inside.attenuation, Color::ONE);

            let d = inside.scattered.direction();
            assert!(d.x.abs() < 1e-6 && d.y.abs() < 1e-6);
            if d.z > 0.0 {
                // Reflected back out at the first face
                continue;
            }

            let through = Ray::new(Point3::ZERO, d, 0.0);
            let exit = HitRecord::new(&through, 1.0, Vec3::NEG_Z, (0.0, 0.0), &material);
            assert!(!exit.front_face);

            let out = material.scatter(&through, &exit, &mut rng).unwrap();
            let d = out.scattered.direction();
            assert!(d.x.abs() < 1e-6 && d.y.abs() < 1e-6);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        // Leaving glass at 60 degrees from the normal: 1.5 * sin(60) > 1
        let dir = Vec3::new(60f32.to_radians().sin(), -60f32.to_radians().cos(), 0.0);
        let ray = Ray::new(Point3::ZERO - dir, dir, 0.0);
        let rec = HitRecord::new(&ray, 1.0, Vec3::NEG_Y, (0.0, 0.0), &material);
        assert!(!rec.front_face);

        let result = material
            .scatter(&ray, &rec, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!((result.scattered.direction() - dir.reflect(Vec3::Y)).length() < 1e-5);
    }

    #[test]
    fn test_light_emits_and_absorbs() {
        let material = Material::diffuse_light(Color::splat(4.0));
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.0);
        let rec = hit_at_origin(&ray, Vec3::Y, &material);

        assert!(material
            .scatter(&ray, &rec, &mut StdRng::seed_from_u64(0))
            .is_none());
        assert_eq!(material.emitted(0.2, 0.8, Point3::ONE), Color::splat(4.0));
        assert_eq!(Material::lambertian(Color::ONE).emitted(0.0, 0.0, Point3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_unit_directions() {
        let material = Material::isotropic(Color::splat(0.73));
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.5);
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(8);

        let mut below = 0;
        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
            assert_eq!(result.attenuation, Color::splat(0.73));
            if result.scattered.direction().y < 0.0 {
                below += 1;
            }
        }
        // Unlike a surface, the phase function sends rays both ways
        assert!(below > 50 && below < 150);
    }

    #[test]
    fn test_schlick_reflectance() {
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-5);
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-5);
    }
}
