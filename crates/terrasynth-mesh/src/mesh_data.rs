//! Triangle mesh derived from a heightfield.

use glam::{Vec2, Vec3};

use crate::grid::{grid_triangles, grid_vertex_count};
use crate::normals::smooth_normals;
use crate::packed::TerrainVertex;

/// Axis-aligned bounds of a mesh's vertex positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshBounds {
    /// Component-wise minimum.
    pub min: Vec3,
    /// Component-wise maximum.
    pub max: Vec3,
}

/// Heightfield mesh: parallel vertex, UV and normal buffers plus a triangle
/// index buffer.
///
/// For a `width x height` grid, `vertices`, `uvs` and `normals` each hold
/// `(width + 1) * (height + 1)` entries and `triangles` holds
/// `width * height * 6` indices, every one of which is a valid vertex index.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// Vertex positions `(x, height, z)`.
    pub vertices: Vec<Vec3>,
    /// Texture coordinates `(x / width, z / height)`.
    pub uvs: Vec<Vec2>,
    /// Index buffer, three indices per counter-clockwise triangle.
    pub triangles: Vec<u32>,
    /// Smooth vertex normals.
    pub normals: Vec<Vec3>,
}

impl MeshData {
    /// Build a mesh from a row-major `(width + 1) x (height + 1)` height buffer.
    ///
    /// Vertex `z * (width + 1) + x` sits at `(x, heights[idx], z)` with UV
    /// `(x / width, z / height)`. Normals are recomputed from the triangles.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, the vertex count overflows `u32`,
    /// or `heights` has the wrong length.
    pub fn from_heights(width: u32, height: u32, heights: &[f32]) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        let vertex_count = grid_vertex_count(width, height)
            .unwrap_or_else(|| panic!("grid {width}x{height} exceeds u32 index range"));
        assert_eq!(
            heights.len(),
            vertex_count,
            "height buffer length does not match a {width}x{height} grid"
        );

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        let row = width as usize + 1;
        for (idx, &y) in heights.iter().enumerate() {
            let x = (idx % row) as f32;
            let z = (idx / row) as f32;
            vertices.push(Vec3::new(x, y, z));
            uvs.push(Vec2::new(x / width as f32, z / height as f32));
        }

        let triangles = grid_triangles(width, height);
        let normals = smooth_normals(&vertices, &triangles);

        Self {
            vertices,
            uvs,
            triangles,
            normals,
        }
    }

    /// Recompute `normals` from the current positions and triangles.
    pub fn recalculate_normals(&mut self) {
        self.normals = smooth_normals(&self.vertices, &self.triangles);
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles (index count / 3).
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Returns `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounds of all vertex positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<MeshBounds> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(MeshBounds { min, max })
    }

    /// Interleave position, normal and UV into GPU vertex records.
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((&p, &n), &uv)| TerrainVertex::new(p, n, uv))
            .collect()
    }

    /// Interleaved vertices as raw bytes for GPU upload, `TerrainVertex::STRIDE`
    /// bytes per vertex.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        TerrainVertex::slice_as_bytes(&self.interleaved()).to_vec()
    }

    /// The index buffer as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
