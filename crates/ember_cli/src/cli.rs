use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::RenderOverrides;
use crate::scenes::SceneKind;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Render a built-in scene with the Ember path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "final")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to all cores)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// JSON file with render settings, applied before command line flags
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Image used by the earth texture
    #[arg(long, default_value = "earthmap.png")]
    pub texture: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings given explicitly on the command line.
    pub fn overrides(&self) -> RenderOverrides {
        RenderOverrides {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            background: None,
            seed: self.seed,
            threads: self.threads,
        }
    }
}
