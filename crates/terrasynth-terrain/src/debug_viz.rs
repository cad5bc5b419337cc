//! Terrain debug visualization: 2D images of generated heightfields and
//! placement results, with PNG export.

mod image;
mod renderers;

pub use self::image::{DebugImage, DebugImageError};
pub use renderers::{height_to_color, render_heightmap_debug, render_placement_overlay};
