//! Demo binary: generates a heightfield, scans it for placements, and reports
//! the results.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p terrasynth-demo -- --width 256 --height 256`.
//! Add `--heightmap-png terrain.png` to write a debug image.

mod pipeline;

use clap::Parser;
use terrasynth_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            std::process::exit(1);
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    terrasynth_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match pipeline::run(&config, args.heightmap_png.as_deref()) {
        Ok(report) => {
            info!(
                "Terrain: {} vertices, {} triangles, heights {:.3}..{:.3}",
                report.vertices, report.triangles, report.min_height, report.max_height
            );
            info!(
                "Placement: {} sites scanned, {} decorations, {} cave entrances",
                report.sites, report.decorations, report.cave_entrances
            );
        }
        Err(e) => {
            error!("Terrain generation failed: {e}");
            std::process::exit(1);
        }
    }
}
