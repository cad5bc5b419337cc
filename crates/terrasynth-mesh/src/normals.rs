//! Smooth-shading vertex normal recomputation.

use glam::Vec3;

/// Compute per-vertex normals by averaging the unit face normals of every
/// triangle that references the vertex.
///
/// Face normals follow counter-clockwise winding: `(b - a) x (c - a)`.
/// Degenerate (zero-area) triangles contribute nothing. Vertices not touched by
/// any non-degenerate triangle get `Vec3::Y`.
///
/// # Panics
///
/// Panics if `triangles.len()` is not a multiple of 3 or an index is out of
/// range for `positions`.
pub fn smooth_normals(positions: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    assert!(
        triangles.len() % 3 == 0,
        "index buffer length {} is not a multiple of 3",
        triangles.len()
    );

    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in triangles.chunks_exact(3) {
        let [ia, ib, ic] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);
        let face = (b - a).cross(c - a).normalize_or_zero();
        accum[ia] += face;
        accum[ib] += face;
        accum[ic] += face;
    }

    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_triangles;

    const EPSILON: f32 = 1e-6;

    fn flat_grid(width: u32, height: u32, y: f32) -> Vec<Vec3> {
        let mut positions = Vec::new();
        for z in 0..=height {
            for x in 0..=width {
                positions.push(Vec3::new(x as f32, y, z as f32));
            }
        }
        positions
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let positions = flat_grid(4, 3, 2.5);
        let normals = smooth_normals(&positions, &grid_triangles(4, 3));
        assert_eq!(normals.len(), positions.len());
        for n in normals {
            assert!((n - Vec3::Y).length() < EPSILON, "expected +Y, got {n}");
        }
    }

    #[test]
    fn test_sloped_plane_normal() {
        // Height rises along +X with slope 1: the surface normal is (-1, 1, 0)/sqrt(2).
        let mut positions = flat_grid(2, 2, 0.0);
        for p in &mut positions {
            p.y = p.x;
        }
        let normals = smooth_normals(&positions, &grid_triangles(2, 2));
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for n in normals {
            assert!((n - expected).length() < 1e-5, "expected {expected}, got {n}");
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut positions = flat_grid(5, 5, 0.0);
        for (i, p) in positions.iter_mut().enumerate() {
            p.y = ((i * 7919) % 13) as f32 * 0.37;
        }
        let normals = smooth_normals(&positions, &grid_triangles(5, 5));
        for n in normals {
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {n} not unit length");
            assert!(n.y > 0.0, "heightfield normal {n} should face up");
        }
    }

    #[test]
    fn test_unreferenced_vertex_defaults_to_up() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(9.0, 9.0, 9.0)];
        let normals = smooth_normals(&positions, &[0, 2, 1]);
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn test_degenerate_triangle_ignored() {
        let positions = vec![Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
        let normals = smooth_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|&n| n == Vec3::Y));
    }
}
