//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Uses a binary tree structure for efficient ray-scene intersection testing.

use std::sync::Arc;

use crate::{
    error::{RenderError, RenderResult},
    HitRecord, Hittable, Ray,
};
use ember_math::{Aabb, Interval};
use rand::RngCore;

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    ///
    /// Boxes are taken over the shutter interval `[time0, time1]`. Fails if
    /// any object is unbounded.
    pub fn new(objects: Vec<Arc<dyn Hittable>>, time0: f32, time1: f32) -> RenderResult<Self> {
        if objects.is_empty() {
            return Ok(BvhNode::Empty);
        }

        let boxed = objects
            .into_iter()
            .map(|object| {
                object
                    .bounding_box(time0, time1)
                    .map(|bbox| (object, bbox))
                    .ok_or(RenderError::MissingBoundingBox)
            })
            .collect::<RenderResult<Vec<_>>>()?;

        log::debug!("Building BVH over {} objects", boxed.len());
        Ok(Self::build(boxed))
    }

    /// Recursive BVH construction.
    ///
    /// Simple median-split approach: sort objects by centroid on longest axis,
    /// split in half, recurse.
    fn build(mut objects: Vec<(Arc<dyn Hittable>, Aabb)>) -> Self {
        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, bbox)| Aabb::surrounding(&acc, bbox));

        // Create leaf for small sets
        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects: objects.into_iter().map(|(object, _)| object).collect(),
                bbox: bounds,
            };
        }

        // Choose split axis based on centroid spread
        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, (_, bbox)| {
            let c = bbox.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|(_, a), (_, b)| {
            a.centroid()[axis]
                .partial_cmp(&b.centroid()[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Split at midpoint
        let right_objects = objects.split_off(objects.len() / 2);
        let left = Self::build(objects);
        let right = Self::build(right_objects);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Number of primitives stored in the tree.
    pub fn len(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { objects, .. } => objects.len(),
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'a>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest: Option<HitRecord<'a>> = None;
                for object in objects {
                    let window = ray_t.with_max(closest.as_ref().map_or(ray_t.max, |rec| rec.t));
                    if let Some(rec) = object.hit(ray, window, rng) {
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t, rng);

                // Only check right up to closest hit
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, ray_t.with_max(right_max), rng);

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        match self {
            BvhNode::Empty => None,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => Some(*bbox),
        }
    }
}
