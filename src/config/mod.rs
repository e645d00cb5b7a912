//! Configuration layer
//!
//! Built-in defaults, optionally overridden by a JSON file in the platform
//! config directory:
//! - macOS: ~/Library/Application Support/orrery/
//! - Linux: ~/.config/orrery/
//! - Windows: %APPDATA%\orrery\config\

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod bodies;
pub mod error;

pub use bodies::{BodyConfig, RingConfig};
pub use error::ConfigError;

const CONFIG_FILE_NAME: &str = "orrery.json";

/// Camera rig tuning. Angles in degrees, lengths in scene units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub initial_distance: f32,
    pub initial_yaw: f32,
    pub initial_height: f32,
    pub min_distance: f32,
    /// Distance removed per wheel step
    pub zoom_step: f32,
    /// Degrees of yaw per pixel of horizontal drag
    pub yaw_sensitivity: f32,
    pub height_sensitivity: f32,
    pub pan_sensitivity: f32,
    /// Framing distance per unit of body radius
    pub zoom_base: f32,
    /// Framing height per unit of body radius
    pub height_factor: f32,
    /// Fraction of the body position the look-at point moves to on selection
    pub damping: f32,
    /// Per-frame tracking smoothing in [0, 1); higher is snappier
    pub smoothing: f32,
    /// Re-derive the framing distance while tracking
    pub retarget_distance: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_distance: 80.0,
            initial_yaw: 0.0,
            initial_height: 5.0,
            min_distance: 1.0,
            zoom_step: 2.0,
            yaw_sensitivity: 0.5,
            height_sensitivity: 0.1,
            pan_sensitivity: 0.01,
            zoom_base: 8.0,
            height_factor: 0.8,
            damping: 0.9,
            smoothing: 0.3,
            retarget_distance: true,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("initial_distance", self.initial_distance),
            ("initial_yaw", self.initial_yaw),
            ("initial_height", self.initial_height),
            ("min_distance", self.min_distance),
            ("zoom_step", self.zoom_step),
            ("yaw_sensitivity", self.yaw_sensitivity),
            ("height_sensitivity", self.height_sensitivity),
            ("pan_sensitivity", self.pan_sensitivity),
            ("zoom_base", self.zoom_base),
            ("height_factor", self.height_factor),
            ("damping", self.damping),
            ("smoothing", self.smoothing),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::CameraNonFinite { field, value });
            }
        }
        if self.min_distance <= 0.0 {
            return Err(ConfigError::NonPositiveMinDistance(self.min_distance));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }
        Ok(())
    }
}

/// Simulation clock tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    pub initial_time_scale: f32,
    /// Scale restored when un-pausing
    pub resume_time_scale: f32,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            initial_time_scale: 1.0,
            resume_time_scale: 0.5,
        }
    }
}

impl TimeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("initial_time_scale", self.initial_time_scale),
            ("resume_time_scale", self.resume_time_scale),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTimeScale { field, value });
            }
        }
        Ok(())
    }
}

/// Render options: background, star glow and shadows
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Asset path of a cubemap stored as six square faces stacked vertically
    pub skybox: Option<String>,
    pub skybox_brightness: f32,
    /// Bloom on the main camera so the emissive star glows
    pub bloom: bool,
    /// Shadows cast from the star's light
    pub star_shadows: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            skybox: None,
            skybox_brightness: 500.0,
            bloom: true,
            star_shadows: true,
        }
    }
}

impl DisplaySettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.skybox_brightness.is_finite() || self.skybox_brightness < 0.0 {
            return Err(ConfigError::InvalidSkyboxBrightness(self.skybox_brightness));
        }
        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub system: BodyConfig,
    pub camera: CameraSettings,
    pub time: TimeSettings,
    pub display: DisplaySettings,
}

impl OrreryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.system.validate()?;
        self.camera.validate()?;
        self.time.validate()?;
        self.display.validate()
    }

    /// Load from the platform config directory, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self, anyhow::Error> {
        let Some(path) = default_config_path() else {
            warn!("Could not resolve a config directory, using built-in defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            info!(
                "No config file at {}, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file at a specific path.
    ///
    /// Returns Err if the file cannot be read or parsed, or if it describes
    /// an invalid system.
    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: OrreryConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Resolve `<config dir>/orrery/orrery.json`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orrery").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "orrery-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(OrreryConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = unique_temp_dir("partial");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "camera": { "smoothing": 0.5 }, "time": { "initial_time_scale": 2.0 } }"#)
            .unwrap();

        let config = OrreryConfig::load_from(&path).unwrap();
        assert_eq!(config.camera.smoothing, 0.5);
        assert_eq!(config.camera.min_distance, CameraSettings::default().min_distance);
        assert_eq!(config.time.initial_time_scale, 2.0);
        assert_eq!(config.time.resume_time_scale, 0.5);
        assert_eq!(config.system, BodyConfig::default());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_custom_system_round_trips_through_file() {
        let dir = unique_temp_dir("custom");
        let path = dir.join(CONFIG_FILE_NAME);
        let config = OrreryConfig {
            system: BodyConfig::new("Star", 0.0, 0.0, 10.0, 1.0, [1.0, 1.0, 0.0])
                .with_satellites(vec![BodyConfig::new("Rock", 3.0, 5.0, 1.0, 0.2, [0.5; 3])]),
            ..Default::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = OrreryConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = unique_temp_dir("invalid");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "camera": { "min_distance": 0.0 } }"#).unwrap();
        let err = OrreryConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));

        fs::write(&path, "{ not json").unwrap();
        let err = OrreryConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_camera_settings_validation() {
        let mut settings = CameraSettings::default();
        settings.smoothing = 1.0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SmoothingOutOfRange(1.0))
        );

        let mut settings = CameraSettings::default();
        settings.pan_sensitivity = f32::INFINITY;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::CameraNonFinite {
                field: "pan_sensitivity",
                ..
            })
        ));
    }

    #[test]
    fn test_display_settings_from_file() {
        let dir = unique_temp_dir("display");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "display": { "skybox": "stars.png", "star_shadows": false } }"#,
        )
        .unwrap();

        let config = OrreryConfig::load_from(&path).unwrap();
        assert_eq!(config.display.skybox.as_deref(), Some("stars.png"));
        assert!(!config.display.star_shadows);
        assert!(config.display.bloom);
        assert_eq!(config.display.skybox_brightness, 500.0);

        fs::write(&path, r#"{ "display": { "skybox_brightness": -1.0 } }"#).unwrap();
        assert!(OrreryConfig::load_from(&path).is_err());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_time_settings_validation() {
        let settings = TimeSettings {
            initial_time_scale: 1.0,
            resume_time_scale: -0.5,
        };
        assert!(settings.validate().is_err());
    }
}
