//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// terrasynth command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terrasynth", about = "Procedural heightfield terrain generator")]
pub struct CliArgs {
    /// Terrain cells along X.
    #[arg(long)]
    pub width: Option<u32>,

    /// Terrain cells along Z.
    #[arg(long)]
    pub height: Option<u32>,

    /// Grid-to-noise coordinate scale.
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Number of fBm octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Per-octave amplitude decay, in (0, 1].
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Vertical terrain scale.
    #[arg(long)]
    pub amplitude: Option<f64>,

    /// Placement scan stride in cells.
    #[arg(long)]
    pub stride: Option<u32>,

    /// Seed for seeded Perlin noise instead of the classic table.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a color-coded heightmap with placement markers to this PNG file.
    #[arg(long)]
    pub heightmap_png: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.width = w;
        }
        if let Some(h) = args.height {
            self.terrain.height = h;
        }
        if let Some(scale) = args.noise_scale {
            self.terrain.noise_scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.terrain.octaves = octaves;
        }
        if let Some(p) = args.persistence {
            self.terrain.persistence = p;
        }
        if let Some(a) = args.amplitude {
            self.terrain.amplitude = a;
        }
        if let Some(stride) = args.stride {
            self.placement.stride = stride;
        }
        if args.seed.is_some() {
            self.noise.seed = args.seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
