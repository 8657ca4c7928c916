//! Axis-aligned rectangles.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// Half-thickness given to the flat axis of a rectangle's bounding box.
const BOX_PAD: f32 = 1e-4;

/// The coordinate plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// `(first in-plane axis, second in-plane axis, fixed axis)`.
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }
}

/// A finite rectangle lying in the plane `axis == k`.
///
/// The outward normal is the positive fixed axis unless the rectangle is
/// [`flipped`](AaRect::flipped); `(u, v)` are the fractional position along
/// the two in-plane axes.
pub struct AaRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    outward: f32,
    material: Arc<Material>,
}

impl AaRect {
    pub fn new(plane: Plane, a: Interval, b: Interval, k: f32, material: Arc<Material>) -> Self {
        Self {
            plane,
            a,
            b,
            k,
            outward: 1.0,
            material,
        }
    }

    /// Rectangle `[x0, x1] x [y0, y1]` at `z = k`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle `[x0, x1] x [z0, z1]` at `y = k`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle `[y0, y1] x [z0, z1]` at `x = k`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    /// Reverse the outward normal.
    pub fn flipped(mut self) -> Self {
        self.outward = -self.outward;
        self
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn outward_normal(&self) -> Vec3 {
        Vec3::AXES[self.plane.axes().2] * self.outward
    }
}

impl Hittable for AaRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        let (a_axis, b_axis, k_axis) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        let t = (self.k - origin[k_axis]) / direction[k_axis];
        if !ray_t.surrounds(t) {
            return None;
        }

        let a = origin[a_axis] + t * direction[a_axis];
        let b = origin[b_axis] + t * direction[b_axis];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        let uv = (
            (a - self.a.min) / self.a.size(),
            (b - self.b.min) / self.b.size(),
        );
        Some(HitRecord::new(ray, t, self.outward_normal(), uv, &self.material))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let (a_axis, b_axis, k_axis) = self.plane.axes();
        let mut extents = [Interval::EMPTY; 3];

        extents[a_axis] = self.a;
        extents[b_axis] = self.b;
        extents[k_axis] = Interval::new(self.k, self.k).expand(2.0 * BOX_PAD);

        Some(Aabb::new(extents[0], extents[1], extents[2]))
    }
}
