//! Application configuration.
//!
//! Every field has a default reproducing the stock landing scene, so a config
//! file only needs the values it overrides:
//!
//! ```toml
//! [window]
//! title = "My Sphere"
//!
//! [scene]
//! sphere_color = 0xff6b00
//!
//! [controls]
//! auto_rotate_speed = 2.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub controls: ControlsConfig,
    pub entrance: EntranceConfig,
    pub pointer: PointerConfig,
    pub chrome: ChromeConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbit Landing".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sphere_radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// sRGB `0xRRGGBB`.
    pub sphere_color: u32,
    pub background_color: u32,
    pub light_color: u32,
    pub light_intensity: f32,
    /// Range after which the light contributes nothing; `0` means unbounded.
    pub light_distance: f32,
    pub light_position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 3.0,
            width_segments: 64,
            height_segments: 64,
            sphere_color: 0x00ff83,
            background_color: 0x000000,
            light_color: 0xffffff,
            light_intensity: 100.0,
            light_distance: 100.0,
            light_position: [0.0, 10.0, 10.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            camera_distance: 20.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub auto_rotate: bool,
    /// 2.0 is one revolution every 30 seconds.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            enable_pan: false,
            enable_zoom: false,
            auto_rotate: true,
            auto_rotate_speed: 5.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Seconds per step of the entrance sequence.
    pub duration: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self { duration: 0.5 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Fixed blue channel (0–255) of pointer-derived colors.
    pub blue: u8,
    /// Seconds each color transition takes.
    pub transition_duration: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            blue: 150,
            transition_duration: 0.5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub brand: String,
    pub links: Vec<String>,
    pub title: String,
    pub font_path: Option<PathBuf>,
    pub nav_height: f32,
    pub nav_font_size: f32,
    pub title_font_size: f32,
    pub text_color: u32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            brand: "Sphere".to_string(),
            links: vec!["Explore".to_string(), "Create".to_string()],
            title: "Give it a spin".to_string(),
            font_path: None,
            nav_height: 72.0,
            nav_font_size: 22.0,
            title_font_size: 56.0,
            text_color: 0xffffff,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Validation(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return fail("window size must be positive");
        }

        let s = &self.scene;
        if s.sphere_radius <= 0.0 {
            return fail("scene.sphere_radius must be positive");
        }
        if s.width_segments < 3 || s.height_segments < 2 {
            return fail("scene segments must be at least 3 wide and 2 high");
        }
        if !(s.fov > 0.0 && s.fov < 180.0) {
            return fail("scene.fov must be between 0 and 180 degrees");
        }
        if !(s.near > 0.0 && s.near < s.far) {
            return fail("scene.near must be positive and below scene.far");
        }
        if s.light_distance < 0.0 || s.light_intensity < 0.0 {
            return fail("scene light values must not be negative");
        }

        let c = &self.controls;
        if !(c.damping_factor > 0.0 && c.damping_factor <= 1.0) {
            return fail("controls.damping_factor must be in (0, 1]");
        }

        if self.entrance.duration < 0.0 || self.pointer.transition_duration < 0.0 {
            return fail("durations must not be negative");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_stock_scene() {
        let config = AppConfig::default();
        assert_eq!(config.scene.sphere_radius, 3.0);
        assert_eq!(config.scene.width_segments, 64);
        assert_eq!(config.scene.sphere_color, 0x00ff83);
        assert_eq!(config.scene.fov, 45.0);
        assert_eq!(config.scene.camera_distance, 20.0);
        assert!(config.controls.enable_damping);
        assert!(!config.controls.enable_pan);
        assert!(!config.controls.enable_zoom);
        assert_eq!(config.controls.auto_rotate_speed, 5.0);
        assert_eq!(config.pointer.blue, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [window]
            title = "Custom"

            [scene]
            sphere_color = 0xff6b00
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.scene.sphere_color, 0xff6b00);
        assert_eq!(config.scene.height_segments, 64);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_toml("[controls]\ndamping_factor = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_toml("[scene]\nnear = 10.0\nfar = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[window\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[entrance]\nduration = 1.0").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.entrance.duration, 1.0);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/orbit.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/orbit.toml"));
    }

    #[test]
    fn builder_overrides_window() {
        let config = AppConfig::new().title("Demo").size(800, 600);
        assert_eq!(config.window.title, "Demo");
        assert_eq!((config.window.width, config.window.height), (800, 600));
    }
}
