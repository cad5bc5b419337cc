//! Terrain debug visualization renderers: heightmap bands and placement markers.

use super::image::DebugImage;
use crate::heightfield::HeightGrid;
use crate::placement::{PlacementKind, PlacementPoint};

const DECORATION_COLOR: [u8; 4] = [20, 220, 60, 255];
const CAVE_ENTRANCE_COLOR: [u8; 4] = [230, 30, 30, 255];

/// Generate a debug heightmap image, one pixel per grid sample.
///
/// Heights are normalized to `[0, 1]` over the grid's own min/max range and
/// colored with [`height_to_color`]. Image row `y` is grid row `z`. A perfectly
/// flat grid renders at the midpoint.
pub fn render_heightmap_debug(grid: &HeightGrid, sea_level: f64) -> DebugImage {
    let width = grid.width() + 1;
    let height = grid.height() + 1;
    let mut image = DebugImage::new(width, height);

    let (lo, hi) = grid.min_max();
    let range = f64::from(hi - lo);

    for (z, row) in grid.rows().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            let normalized = if range > 0.0 {
                f64::from(h - lo) / range
            } else {
                0.5
            };
            image.set_pixel(x as u32, z as u32, height_to_color(normalized, sea_level));
        }
    }

    image
}

/// Map a normalized height `[0, 1]` to an RGBA color.
///
/// Color bands: deep water -> shallow water -> beach -> lowlands -> hills -> snow.
/// `sea_level` is the normalized height of the waterline.
pub fn height_to_color(normalized: f64, sea_level: f64) -> [u8; 4] {
    let n = normalized.clamp(0.0, 1.0);

    let rgb = if n < sea_level * 0.5 {
        [0, 0, 128]
    } else if n < sea_level {
        [30, 80, 200]
    } else if n < sea_level + 0.02 {
        [220, 200, 130]
    } else if n < 0.7 {
        let t = ((n - sea_level) / (0.7 - sea_level)).clamp(0.0, 1.0);
        [
            (30.0 + t * 80.0) as u8,
            (160.0 - t * 40.0) as u8,
            (30.0 + t * 20.0) as u8,
        ]
    } else if n < 0.9 {
        let t = (n - 0.7) / 0.2;
        [
            (110.0 + t * 40.0) as u8,
            (120.0 - t * 50.0) as u8,
            (50.0 + t * 20.0) as u8,
        ]
    } else {
        [245, 245, 250]
    };

    [rgb[0], rgb[1], rgb[2], 255]
}

/// Paint placement points onto an image produced by [`render_heightmap_debug`].
///
/// Decorations are green and cave entrances red; a cave entrance wins when both
/// share a site. Points outside the image are skipped.
pub fn render_placement_overlay(image: &mut DebugImage, points: &[PlacementPoint]) {
    let mut ordered: Vec<&PlacementPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.kind == PlacementKind::CaveEntrance);

    for point in ordered {
        let (x, z) = (point.position.x, point.position.z);
        if x < 0.0 || z < 0.0 {
            continue;
        }
        let (px, py) = (x as u32, z as u32);
        if px >= image.width || py >= image.height {
            continue;
        }
        let color = match point.kind {
            PlacementKind::Decoration => DECORATION_COLOR,
            PlacementKind::CaveEntrance => CAVE_ENTRANCE_COLOR,
        };
        image.set_pixel(px, py, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::generate;
    use glam::Vec3;

    #[test]
    fn test_heightmap_image_matches_grid() {
        let (grid, _) = generate(31, 15, 0.1, 4, 0.5, 10.0).unwrap();
        let image = render_heightmap_debug(&grid, 0.3);
        assert_eq!(image.dimensions(), (32, 16));
    }

    #[test]
    fn test_flat_grid_renders_uniform() {
        let grid = HeightGrid::from_heights(3, 3, vec![5.0; 16]).unwrap();
        let image = render_heightmap_debug(&grid, 0.3);
        let expected = height_to_color(0.5, 0.3);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(image.get_pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn test_extremes_use_water_and_snow() {
        let heights: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let grid = HeightGrid::from_heights(2, 2, heights).unwrap();
        let image = render_heightmap_debug(&grid, 0.3);
        assert_eq!(image.get_pixel(0, 0), [0, 0, 128, 255]);
        assert_eq!(image.get_pixel(2, 2), [245, 245, 250, 255]);
    }

    #[test]
    fn test_color_bands_ordered() {
        assert_eq!(height_to_color(0.0, 0.3), [0, 0, 128, 255]);
        assert_eq!(height_to_color(0.2, 0.3), [30, 80, 200, 255]);
        assert_eq!(height_to_color(0.31, 0.3), [220, 200, 130, 255]);
        assert_eq!(height_to_color(1.0, 0.3), [245, 245, 250, 255]);
        assert_eq!(height_to_color(7.0, 0.3), height_to_color(1.0, 0.3));
    }

    #[test]
    fn test_overlay_marks_points() {
        let mut image = DebugImage::new(10, 10);
        let points = [
            PlacementPoint {
                position: Vec3::new(2.0, 1.0, 3.0),
                kind: PlacementKind::Decoration,
            },
            PlacementPoint {
                position: Vec3::new(5.0, 1.0, 5.0),
                kind: PlacementKind::CaveEntrance,
            },
            PlacementPoint {
                position: Vec3::new(5.0, 1.0, 5.0),
                kind: PlacementKind::Decoration,
            },
            PlacementPoint {
                position: Vec3::new(40.0, 0.0, 1.0),
                kind: PlacementKind::Decoration,
            },
        ];
        render_placement_overlay(&mut image, &points);
        assert_eq!(image.get_pixel(2, 3), DECORATION_COLOR);
        assert_eq!(image.get_pixel(5, 5), CAVE_ENTRANCE_COLOR);
        assert_eq!(image.get_pixel(0, 0), [0, 0, 0, 0]);
    }
}
