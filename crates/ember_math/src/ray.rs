use crate::Vec3;

/// A ray in 3D space with origin, direction, and time.
///
/// The reciprocal direction and the per-axis octant sign are cached at
/// construction so [`Aabb::hit`](crate::Aabb::hit) can pick the near and far
/// slab without branching on the direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    time: f32,
    inv_direction: Vec3,
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray.
    ///
    /// Zero direction components give infinite reciprocals, which the slab
    /// test handles as "parallel to that axis".
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        let inv_direction = direction.recip();
        let sign = [
            (inv_direction.x < 0.0) as usize,
            (inv_direction.y < 0.0) as usize,
            (inv_direction.z < 0.0) as usize,
        ];

        Self {
            origin,
            direction,
            time,
            inv_direction,
            sign,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Shutter time of the ray (used for motion blur).
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Componentwise `1 / direction`.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// `1` if the ray travels toward negative `axis`, else `0`.
    #[inline]
    pub fn sign(&self, axis: usize) -> usize {
        self.sign[axis]
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
