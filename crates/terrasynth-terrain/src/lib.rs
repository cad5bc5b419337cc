//! Procedural heightfield terrain: normalized fBm over classic Perlin noise,
//! heightfield meshing, and noise-driven placement scanning.

mod error;
mod fbm;
mod heightfield;
mod perlin;
mod placement;

pub mod debug_viz;

pub use error::TerrainError;
pub use fbm::{fbm, fbm_weight_sum};
pub use heightfield::{HeightGrid, HeightfieldSynthesizer, TerrainParams, generate};
pub use perlin::{ClassicPerlin, NoiseFnSource, NoiseSource, PERMUTATION, perlin_2d};
pub use placement::{PlacementKind, PlacementParams, PlacementPoint, PlacementScanner, scan};
pub use terrasynth_mesh::MeshData;
