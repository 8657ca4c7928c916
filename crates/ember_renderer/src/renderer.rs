//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a configurable depth budget
//! - Anti-aliasing via jittered multi-sampling
//! - Scanline parallelism over rayon with per-row seeded RNGs

use std::sync::Mutex;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{RenderError, RenderResult},
    image_buffer::{store_pixel, CHANNELS},
    sampling, Camera, Color, Hittable, ImageBuffer, Ray,
};
use ember_math::Interval;

/// Smallest accepted hit distance; avoids self-intersection ("shadow acne").
const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Base seed; a random one is drawn when unset
    pub seed: Option<u64>,
    /// Worker threads; all cores when unset
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            seed: None,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray for at most `max_depth` bounces, adding emission weighted
/// by the product of attenuations so far. A miss picks up `background`; an
/// absorbed ray or an exhausted budget stops with no further light.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    max_depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..max_depth {
        let Some(rec) = world.hit(&ray, Interval::from_min(T_MIN), rng) else {
            return radiance + throughput * background;
        };

        radiance += throughput * rec.material.emitted(rec.u, rec.v, rec.p);

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return radiance,
        }
    }

    radiance
}

/// Render a single pixel with multi-sampling.
///
/// `y` counts from the bottom of the image.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let x_span = config.width.saturating_sub(1).max(1) as f32;
    let y_span = config.height.saturating_sub(1).max(1) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + sampling::gen_f32(rng)) / x_span;
        let t = (y as f32 + sampling::gen_f32(rng)) / y_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config.background, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Render the entire scene to an image buffer.
///
/// Scanlines are traced in parallel. Each one draws from its own RNG seeded
/// by the base seed and its row, so a fixed seed gives identical output for
/// any thread count.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "Rendering {}x{} at {} spp, max depth {} (seed {})",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        seed
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            log::debug!("Using a local pool of {} threads", threads);
            pool.install(|| render_rows(camera, world, config, seed, &mut image));
        }
        None => render_rows(camera, world, config, seed, &mut image),
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

fn render_rows(camera: &Camera, world: &dyn Hittable, config: &RenderConfig, seed: u64, image: &mut ImageBuffer) {
    let height = config.height;
    let row_len = config.width as usize * CHANNELS;
    let report_every = (height / 10).max(1);
    let progress = Mutex::new(0u32);

    image
        .bytes_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Byte row 0 is the top scanline
            let y = height - 1 - row as u32;
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(y)));

            for (x, pixel) in pixels.chunks_exact_mut(CHANNELS).enumerate() {
                let color = render_pixel(camera, world, x as u32, y, config, &mut rng);
                store_pixel(pixel, color);
            }

            if let Ok(mut lines) = progress.lock() {
                *lines += 1;
                log::debug!("Finished line {} of {}", *lines, height);
                if *lines % report_every == 0 {
                    log::info!("{}% done", *lines * 100 / height);
                }
            }
        });
}
