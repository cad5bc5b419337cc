//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Heightfield generation settings.
    pub terrain: TerrainConfig,
    /// Placement scan settings.
    pub placement: PlacementConfig,
    /// Noise source selection.
    pub noise: NoiseConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Heightfield generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along X.
    pub width: u32,
    /// Cells along Z.
    pub height: u32,
    /// Grid-to-noise coordinate scale.
    pub noise_scale: f64,
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Per-octave amplitude decay, in (0, 1].
    pub persistence: f64,
    /// Vertical scale of the terrain.
    pub amplitude: f64,
}

/// Placement scan settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Grid step between sampled sites.
    pub stride: u32,
    /// Coordinate scale of the decoration noise.
    pub object_noise_scale: f64,
    /// Coordinate scale of the cave-entrance noise.
    pub cave_noise_scale: f64,
    /// Decoration noise threshold (strictly exceeded).
    pub object_threshold: f64,
    /// Cave-entrance noise threshold (strictly exceeded).
    pub cave_threshold: f64,
}

/// Noise source selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Seed for a seeded Perlin generator. `None` selects classic Perlin noise
    /// over the reference permutation table.
    pub seed: Option<u32>,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Normalized waterline used when coloring debug heightmaps.
    pub sea_level: f64,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            noise_scale: 0.02,
            octaves: 4,
            persistence: 0.5,
            amplitude: 10.0,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            stride: 10,
            object_noise_scale: 0.1,
            cave_noise_scale: 0.05,
            object_threshold: 0.8,
            cave_threshold: 0.9,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sea_level: 0.3,
        }
    }
}

/// Platform config directory for terrasynth (e.g. `~/.config/terrasynth`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join("terrasynth"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Location of [`CONFIG_FILE_NAME`] inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

impl Config {
    /// Parse RON text. Absent sections and fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(ConfigError::ParseError)
    }

    /// Pretty RON with sections expanded and scalars inline.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)
    }

    /// Read `config.ron` from `config_dir`; if there is none, write the
    /// defaults there and return them.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_path(config_dir);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let config = Self::from_ron(&text)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(config_dir)?;
                log::info!("Wrote default config to {}", path.display());
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadError(e)),
        }
    }

    /// Write `config.ron` into `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let text = self.to_ron()?;
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        std::fs::write(config_path(config_dir), text).map_err(ConfigError::WriteError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 100"));
        assert!(ron_str.contains("stride: 10"));
        assert!(ron_str.contains("seed: None"));
    }

    #[test]
    fn test_default_generation_settings() {
        let config = Config::default();
        assert_eq!(config.terrain.octaves, 4);
        assert_eq!(config.terrain.persistence, 0.5);
        assert_eq!(config.terrain.amplitude, 10.0);
        assert_eq!(config.placement.object_threshold, 0.8);
        assert_eq!(config.placement.cave_threshold, 0.9);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.noise.seed = Some(99);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config = Config::from_ron("(terrain: (width: 64))").unwrap();
        assert_eq!(config.terrain.width, 64);
        assert_eq!(config.terrain.height, 100);
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        assert!(Config::from_ron("(future_setting: true)").is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.width = 256;
        config.placement.stride = 4;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("terrasynth");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(config_path(&nested).exists());
    }

    #[test]
    fn test_to_ron_parses_back() {
        let mut config = Config::default();
        config.placement.cave_threshold = 0.75;
        let text = config.to_ron().unwrap();
        assert!(text.contains("cave_threshold: 0.75"));
        assert_eq!(Config::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_unreadable_config_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(config_path(dir.path())).unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// terrain tweaks\n(\n  // nothing yet\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
