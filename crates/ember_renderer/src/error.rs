//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors that can occur while building a scene or producing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Object has no bounding box; cannot build BVH")]
    MissingBoundingBox,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
