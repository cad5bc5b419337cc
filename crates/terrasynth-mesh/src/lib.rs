//! Heightfield mesh data: grid triangulation, smooth normals, and GPU-ready vertex packing.

pub mod grid;
pub mod mesh_data;
pub mod normals;
pub mod packed;

pub use grid::{grid_triangles, grid_vertex_count};
pub use mesh_data::{MeshBounds, MeshData};
pub use normals::smooth_normals;
pub use packed::TerrainVertex;
