//! Interleaved vertex format for handing terrain meshes to a GPU adapter.

use glam::{Vec2, Vec3};

/// A single interleaved terrain vertex.
///
/// Layout (32 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// Position in grid units.
    pub position: [f32; 3],
    /// Smooth vertex normal.
    pub normal: [f32; 3],
    /// Texture coordinates in `[0, 1]`.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 32]);

impl TerrainVertex {
    /// Size of one vertex in bytes, for vertex buffer strides.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Build a vertex from glam values.
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    /// View a vertex slice as raw bytes.
    pub fn slice_as_bytes(vertices: &[Self]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
