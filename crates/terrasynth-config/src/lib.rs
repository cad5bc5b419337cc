//! Configuration for terrasynth.
//!
//! Generation settings persist to disk as a RON file. CLI flags parsed with
//! clap override the loaded values, and every section falls back to defaults
//! so older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, NoiseConfig, PlacementConfig, TerrainConfig,
    config_path, default_config_dir,
};
pub use error::ConfigError;
