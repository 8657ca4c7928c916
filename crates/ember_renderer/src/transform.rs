//! Instance transforms: translation and rotation about +Y.
//!
//! Both wrappers move the incoming ray into the child's object space, query the
//! child, then move the hit point and normal back. The child's `front_face`
//! flag is kept as-is; the transformed normal still opposes the world ray.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use ember_math::{rotate_y, Aabb, Interval, Vec3};
use rand::RngCore;

/// A child object displaced by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        let mut rec = self.object.hit(&moved, ray_t, rng)?;
        rec.p += self.offset;
        Some(rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// A child object rotated about the +Y axis through the origin.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Rotate `object` by `angle` degrees.
    ///
    /// The bounding box is computed once over `[time0, time1]`, the shutter
    /// interval the object will be rendered with.
    pub fn new(object: Arc<dyn Hittable>, angle: f32, time0: f32, time1: f32) -> Self {
        let radians = angle.to_radians();
        let (sin_theta, cos_theta) = radians.sin_cos();

        let bbox = object.bounding_box(time0, time1).map(|child| {
            child
                .corners()
                .iter()
                .map(|&corner| rotate_y(corner, sin_theta, cos_theta))
                .fold(Aabb::EMPTY, |acc, p| {
                    Aabb::surrounding(&acc, &Aabb::from_points(p, p))
                })
        });

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        // World to object space is the inverse rotation
        let origin = rotate_y(ray.origin(), -self.sin_theta, self.cos_theta);
        let direction = rotate_y(ray.direction(), -self.sin_theta, self.cos_theta);
        let rotated = Ray::new(origin, direction, ray.time());

        let mut rec = self.object.hit(&rotated, ray_t, rng)?;
        rec.p = rotate_y(rec.p, self.sin_theta, self.cos_theta);
        rec.normal = rotate_y(rec.normal, self.sin_theta, self.cos_theta);
        Some(rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Cuboid, Material, Sphere};
    use ember_math::Point3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::splat(0.5)))
    }

    #[test]
    fn test_translate_moves_hit_point_and_box() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Point3::ZERO, 1.0, gray()));
        let moved = Translate::new(sphere, Vec3::new(0.0, 0.0, -5.0));

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z, 0.0);
        let rec = moved
            .hit(&ray, Interval::from_min(0.001), &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.p - Point3::new(0.0, 0.0, -4.0)).length() < 1e-4);
        assert!(rec.front_face);

        let bbox = moved.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.min(), Vec3::new(-1.0, -1.0, -6.0));
        assert_eq!(bbox.max(), Vec3::new(1.0, 1.0, -4.0));
    }

    #[test]
    fn test_rotate_quarter_turn_maps_faces() {
        // Thin slab along +X; rotated 90 degrees it lies along -Z
        let slab: Arc<dyn Hittable> = Arc::new(Cuboid::new(
            Point3::new(0.0, -1.0, -0.5),
            Point3::new(4.0, 1.0, 0.5),
            gray(),
        ));
        let rotated = RotateY::new(slab, 90.0, 0.0, 1.0);

        let bbox = rotated.bounding_box(0.0, 1.0).unwrap();
        assert!((bbox.min() - Vec3::new(-0.5, -1.0, -4.0)).length() < 1e-4);
        assert!((bbox.max() - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-4);

        // Approach from +X toward the slab now sitting at z in [-4, 0]
        let ray = Ray::new(Point3::new(5.0, 0.0, -2.0), Vec3::NEG_X, 0.0);
        let rec = rotated
            .hit(&ray, Interval::from_min(0.001), &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert!((rec.p - Point3::new(0.5, 0.0, -2.0)).length() < 1e-3);
        assert!((rec.normal - Vec3::X).length() < 1e-4);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_front_face_follows_child() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Point3::ZERO, 2.0, gray()));
        let rotated = RotateY::new(sphere, 30.0, 0.0, 1.0);

        // Starting inside: the child reports a back face hit
        let ray = Ray::new(Point3::ZERO, Vec3::X, 0.0);
        let rec = rotated
            .hit(&ray, Interval::from_min(0.001), &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_unbounded_child_has_no_box() {
        let empty: Arc<dyn Hittable> = Arc::new(crate::HittableList::new());
        assert!(RotateY::new(empty.clone(), 15.0, 0.0, 1.0).bounding_box(0.0, 1.0).is_none());
        assert!(Translate::new(empty, Vec3::ONE).bounding_box(0.0, 1.0).is_none());
    }
}
