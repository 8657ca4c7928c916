//! Layered render settings: scene defaults, then a JSON file, then flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ember_renderer::{Color, RenderConfig};
use serde::Deserialize;

/// A partial [`RenderConfig`]; every field left `None` keeps the value below it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub background: Option<Color>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl RenderOverrides {
    /// Read overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let overrides = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        log::debug!("Loaded render settings from {}", path.display());
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: RenderOverrides) -> RenderOverrides {
        RenderOverrides {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            samples_per_pixel: other.samples_per_pixel.or(self.samples_per_pixel),
            max_depth: other.max_depth.or(self.max_depth),
            background: other.background.or(self.background),
            seed: other.seed.or(self.seed),
            threads: other.threads.or(self.threads),
        }
    }

    /// Write every set field into `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_json() {
        let overrides: RenderOverrides =
            serde_json::from_str(r#"{"width": 640, "background": [0.5, 0.7, 1.0]}"#).unwrap();

        assert_eq!(overrides.width, Some(640));
        assert_eq!(overrides.background, Some(Color::new(0.5, 0.7, 1.0)));
        assert_eq!(overrides.height, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(serde_json::from_str::<RenderOverrides>(r#"{"widht": 640}"#).is_err());
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = RenderOverrides {
            width: Some(640),
            samples_per_pixel: Some(50),
            ..Default::default()
        };
        let flags = RenderOverrides {
            samples_per_pixel: Some(8),
            seed: Some(3),
            ..Default::default()
        };

        let merged = file.merge(flags);
        let mut config = RenderConfig::default();
        merged.apply(&mut config);

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 400);
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = RenderOverrides::load(Path::new("no/such/config.json")).unwrap_err();
        assert!(format!("{err:#}").contains("no/such/config.json"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ember_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"max_depth": 12, "threads": 3}"#).unwrap();

        let overrides = RenderOverrides::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(overrides.max_depth, Some(12));
        assert_eq!(overrides.threads, Some(3));
    }
}
