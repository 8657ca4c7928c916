//! Axis-aligned box built from six rectangles.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    AaRect, Material, Ray,
};
use ember_math::{Aabb, Interval, Point3};
use rand::RngCore;

/// An axis-aligned box spanning two opposite corners.
pub struct Cuboid {
    bbox: Aabb,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(p0: Point3, p1: Point3, material: Arc<Material>) -> Self {
        let bbox = Aabb::from_points(p0, p1);
        let (lo, hi) = (bbox.min(), bbox.max());

        // Low faces are flipped so every normal points out of the box
        let mut sides = HittableList::new();
        sides.add(Arc::new(AaRect::xy(lo.x, hi.x, lo.y, hi.y, hi.z, material.clone())));
        sides.add(Arc::new(AaRect::xy(lo.x, hi.x, lo.y, hi.y, lo.z, material.clone()).flipped()));
        sides.add(Arc::new(AaRect::xz(lo.x, hi.x, lo.z, hi.z, hi.y, material.clone())));
        sides.add(Arc::new(AaRect::xz(lo.x, hi.x, lo.z, hi.z, lo.y, material.clone()).flipped()));
        sides.add(Arc::new(AaRect::yz(lo.y, hi.y, lo.z, hi.z, hi.x, material.clone())));
        sides.add(Arc::new(AaRect::yz(lo.y, hi.y, lo.z, hi.z, lo.x, material).flipped()));

        Self { bbox, sides }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        self.sides.hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.bbox)
    }
}
