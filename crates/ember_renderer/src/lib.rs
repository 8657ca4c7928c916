//! Ember renderer - CPU path tracing
//!
//! A Monte Carlo path tracer with motion blur, depth of field, procedural and
//! image textures, area lights and participating media.

mod aarect;
mod bvh;
mod camera;
mod cuboid;
pub mod error;
mod hittable;
mod image_buffer;
mod material;
mod medium;
mod perlin;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;
mod transform;

pub use aarect::{AaRect, Plane};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraSettings};
pub use cuboid::Cuboid;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use image_buffer::{color_to_rgb, linear_to_gamma, ImageBuffer};
pub use material::{Material, ScatterResult};
pub use medium::ConstantMedium;
pub use perlin::Perlin;
pub use renderer::{ray_color, render, render_pixel, RenderConfig};
pub use sphere::Sphere;
pub use texture::{ImageTexture, Texture, TextureError, TextureResult};
pub use transform::{RotateY, Translate};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
