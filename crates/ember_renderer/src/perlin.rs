//! Gradient (Perlin) noise with turbulence.

use crate::sampling::random_unit_vector;
use ember_math::Vec3;
use rand::seq::SliceRandom;
use rand::RngCore;

const POINT_COUNT: usize = 256;

/// Perlin noise generator.
///
/// Holds random unit gradients on a lattice and three permutation tables used
/// to hash lattice coordinates.
#[derive(Debug, Clone)]
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the gradient and permutation tables from `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT).map(|_| random_unit_vector(rng)).collect();

        Self {
            gradients,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let floor = p.floor();
        let frac = p - floor;
        let (i, j, k) = (floor.x as i32, floor.y as i32, floor.z as i32);

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    // Lattice indices saturate far from the origin; wrap rather than overflow
                    let hash = self.perm_x[wrap(i.wrapping_add(di as i32))]
                        ^ self.perm_y[wrap(j.wrapping_add(dj as i32))]
                        ^ self.perm_z[wrap(k.wrapping_add(dk as i32))];
                    *cell = self.gradients[hash];
                }
            }
        }

        trilinear_interp(&c, frac)
    }

    /// Sum of `depth` octaves of noise with halving weight, as an absolute value.
    pub fn turb(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp);
            weight *= 0.5;
            temp *= 2.0;
        }

        accum.abs()
    }
}

#[inline]
fn wrap(i: i32) -> usize {
    (i & (POINT_COUNT as i32 - 1)) as usize
}

fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
    perm.shuffle(rng);
    perm
}

/// Hermite-smoothed trilinear blend of the 8 corner gradients.
fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], frac: Vec3) -> f32 {
    let smooth = frac * frac * (Vec3::splat(3.0) - 2.0 * frac);
    let mut accum = 0.0;

    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, gradient) in row.iter().enumerate() {
                let corner = Vec3::new(i as f32, j as f32, k as f32);
                let weight_v = frac - corner;
                let blend = corner * smooth + (Vec3::ONE - corner) * (Vec3::ONE - smooth);
                accum += blend.x * blend.y * blend.z * gradient.dot(weight_v);
            }
        }
    }

    accum
}
