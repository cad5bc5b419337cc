//! Regular grid triangulation.
//!
//! A heightfield of `width x height` cells has `(width + 1) * (height + 1)`
//! vertices laid out row-major along +X, one row per Z step. Each cell is split
//! into two triangles along the diagonal running from `(x + 1, z)` to `(x, z + 1)`.

/// Number of vertices in a `width x height` cell grid, or `None` if the count
/// does not fit a `u32` index buffer.
pub fn grid_vertex_count(width: u32, height: u32) -> Option<usize> {
    let cols = u64::from(width) + 1;
    let rows = u64::from(height) + 1;
    let count = cols.checked_mul(rows)?;
    if count > u64::from(u32::MAX) {
        return None;
    }
    usize::try_from(count).ok()
}

/// Build the index buffer for a `width x height` cell grid.
///
/// For the cell whose lower-left vertex is `i = z * (width + 1) + x` the two
/// triangles are `{i, i + width + 1, i + 1}` and
/// `{i + 1, i + width + 1, i + width + 2}`, both counter-clockwise when viewed
/// from +Y.
///
/// # Panics
///
/// Panics if the vertex count overflows `u32` (see [`grid_vertex_count`]).
pub fn grid_triangles(width: u32, height: u32) -> Vec<u32> {
    assert!(
        grid_vertex_count(width, height).is_some(),
        "grid {width}x{height} exceeds u32 index range"
    );

    let cell_count = width as usize * height as usize;
    let mut triangles = Vec::with_capacity(cell_count * 6);
    let row = width + 1;

    for z in 0..height {
        for x in 0..width {
            let i = z * row + x;
            triangles.extend_from_slice(&[i, i + row, i + 1, i + 1, i + row, i + row + 1]);
        }
    }

    triangles
}
