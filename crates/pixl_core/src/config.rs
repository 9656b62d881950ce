use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Settings shared by the window, render targets and post process shaders.
///
/// Missing keys in a YAML file fall back to the defaults:
///
/// ```yaml
/// width: 640
/// height: 480
/// title: PIXL
/// vsync: true
/// multisample: 4
/// ```
#[derive(SmartDefault, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct PixlConfig {
    /// Logical screen width in pixels.
    #[default(640)]
    pub width: u32,
    /// Logical screen height in pixels.
    #[default(480)]
    pub height: u32,
    #[default(concat!("PIXL v", env!("CARGO_PKG_VERSION")).to_owned())]
    pub title: String,
    #[default(true)]
    pub vsync: bool,
    /// Number of samples per pixel, 0 disables multisampling.
    #[default(4)]
    pub multisample: u8,
    pub show_cursor: bool,
    /// Fixed updates per second.
    #[default(100)]
    pub update_rate: u32,
    /// Upper bound of fixed updates run in a single frame.
    #[default(10)]
    pub max_updates_per_frame: u32,
}

impl PixlConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;

        Self::from_yaml(&yaml).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Milliseconds per fixed update.
    pub fn update_step_ms(&self) -> f64 {
        1000. / self.update_rate.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PixlConfig::default();

        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.multisample, 4);
        assert!(config.title.starts_with("PIXL v"));
        assert!(!config.show_cursor);
        assert_eq!(config.update_step_ms(), 10.);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = PixlConfig::from_yaml("width: 320\nheight: 240\nvsync: false\n").unwrap();

        assert_eq!((config.width, config.height), (320, 240));
        assert!(!config.vsync);
        assert_eq!(config.update_rate, 100);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(PixlConfig::from_yaml("width: wide").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let error = PixlConfig::load("/nonexistent/pixl.yaml").unwrap_err();
        assert!(error.to_string().contains("pixl.yaml"));
    }
}
