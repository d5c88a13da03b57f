use std::path::PathBuf;

use clap::Parser;
use orbit_landing::{AppConfig, ConfigError};

/// An orbiting, color-reactive sphere with an animated overlay.
#[derive(Parser, Debug)]
#[command(name = "orbit-landing", version, about)]
pub struct Args {
    /// TOML config file; missing fields use defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log filter used when RUST_LOG is unset (e.g. debug, orbit_landing=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_flags_override_defaults() {
        let args = Args::try_parse_from(["orbit-landing", "--width", "640", "--height", "480"])
            .unwrap();
        let config = args.load_config().unwrap();
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert_eq!(config.scene.sphere_radius, 3.0);
    }

    #[test]
    fn zero_width_fails_validation() {
        let args = Args::try_parse_from(["orbit-landing", "--width", "0"]).unwrap();
        assert!(matches!(
            args.load_config(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn log_level_is_optional() {
        let args = Args::try_parse_from(["orbit-landing"]).unwrap();
        assert!(args.log_level.is_none());
        assert!(args.config.is_none());
    }
}
