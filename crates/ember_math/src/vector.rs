// Vector utilities for light transport
//
// Extends glam::Vec3 with the reflection/refraction helpers the materials use.
// glam already provides dot, cross, normalize and componentwise arithmetic.

use glam::Vec3;

/// Tolerance under which every component counts as zero.
const NEAR_ZERO: f32 = 1e-8;

/// Extension trait for Vec3 used as a direction.
pub trait Vec3Ext {
    /// True if the vector is close to zero in all dimensions.
    fn near_zero(&self) -> bool;

    /// Mirror `self` about the surface normal `n`.
    fn reflect(&self, n: Vec3) -> Vec3;

    /// Bend the unit vector `self` through a surface with normal `n`.
    ///
    /// `etai_over_etat` is the ratio of refractive indices. The parallel
    /// component takes the absolute value of its radicand so rounding past
    /// the critical angle cannot produce NaN.
    fn refract(&self, n: Vec3, etai_over_etat: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO)).all()
    }

    fn reflect(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    fn refract(&self, n: Vec3, etai_over_etat: f32) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}

/// Rotate `v` about the +Y axis given a precomputed sine and cosine.
#[inline]
pub fn rotate_y(v: Vec3, sin_theta: f32, cos_theta: f32) -> Vec3 {
    Vec3::new(
        cos_theta * v.x + sin_theta * v.z,
        v.y,
        -sin_theta * v.x + cos_theta * v.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(v.reflect(Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_straight() {
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = v.refract(Vec3::Y, 1.0);

        assert!((out - v).length() < 1e-5);
    }

    #[test]
    fn test_refract_normal_incidence() {
        let out = Vec3::NEG_Z.refract(Vec3::Z, 1.0 / 1.5);
        assert!((out - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let (s, c) = 90.0_f32.to_radians().sin_cos();
        let rotated = rotate_y(Vec3::X, s, c);

        assert!((rotated - Vec3::NEG_Z).length() < 1e-5);
        assert!((rotate_y(rotated, -s, c) - Vec3::X).length() < 1e-5);
    }
}
