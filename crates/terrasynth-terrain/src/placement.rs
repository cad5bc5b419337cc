//! Placement scanning: a coarse strided pass over a [`HeightGrid`] that picks
//! sites for decoration and cave-entrance markers from two noise channels.

use glam::Vec3;

use crate::error::TerrainError;
use crate::heightfield::HeightGrid;
use crate::perlin::{ClassicPerlin, NoiseSource};

/// What a placement point marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Surface decoration (tree, rock).
    Decoration,
    /// Entrance to a cave system.
    CaveEntrance,
}

/// A marker position on the terrain surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPoint {
    /// `(x, surface height, z)` in grid units.
    pub position: Vec3,
    /// Marker category.
    pub kind: PlacementKind,
}

/// Parameters for placement scanning.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Grid step between sampled sites. Must be at least 1. Default: 10.
    pub stride: u32,
    /// Coordinate scale of the decoration noise channel. Default: 0.1.
    pub object_noise_scale: f64,
    /// Coordinate scale of the cave noise channel. Default: 0.05.
    pub cave_noise_scale: f64,
    /// Decoration is placed where its noise is strictly above this. Default: 0.8.
    pub object_threshold: f64,
    /// A cave entrance is placed where its noise is strictly above this. Default: 0.9.
    pub cave_threshold: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            stride: 10,
            object_noise_scale: 0.1,
            cave_noise_scale: 0.05,
            object_threshold: 0.8,
            cave_threshold: 0.9,
        }
    }
}

impl PlacementParams {
    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] for a zero stride or any
    /// non-finite scale or threshold.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.stride == 0 {
            return Err(TerrainError::invalid("stride", "must be at least 1"));
        }
        let finite = [
            ("object_noise_scale", self.object_noise_scale),
            ("cave_noise_scale", self.cave_noise_scale),
            ("object_threshold", self.object_threshold),
            ("cave_threshold", self.cave_threshold),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(TerrainError::invalid(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Scans a height grid on a coarse stride, emitting placement points where the
/// decoration or cave noise channel crosses its threshold.
///
/// The two channels are checked independently, so one site can yield both a
/// [`PlacementKind::Decoration`] and a [`PlacementKind::CaveEntrance`].
/// Scanning is lazy and side-effect free; [`PlacementScanner::scan`] can be
/// called any number of times.
#[derive(Clone, Debug)]
pub struct PlacementScanner<'a, O, C = O> {
    grid: &'a HeightGrid,
    params: PlacementParams,
    object_noise: O,
    cave_noise: C,
}

impl<'a, N: NoiseSource + Clone> PlacementScanner<'a, N, N> {
    /// Create a scanner that samples both channels from `noise`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] if `params` fails
    /// [`PlacementParams::validate`].
    pub fn new(grid: &'a HeightGrid, params: PlacementParams, noise: N) -> Result<Self, TerrainError> {
        Self::with_sources(grid, params, noise.clone(), noise)
    }
}

impl<'a, O: NoiseSource, C: NoiseSource> PlacementScanner<'a, O, C> {
    /// Create a scanner with separate noise sources for the two channels.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] if `params` fails
    /// [`PlacementParams::validate`].
    pub fn with_sources(
        grid: &'a HeightGrid,
        params: PlacementParams,
        object_noise: O,
        cave_noise: C,
    ) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            grid,
            params,
            object_noise,
            cave_noise,
        })
    }

    /// The scan parameters.
    pub fn params(&self) -> &PlacementParams {
        &self.params
    }

    /// Sampled `(x, z)` sites: every `stride` cells over `[0, width) x [0, height)`,
    /// Z-major.
    pub fn sites(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let stride = self.params.stride as usize;
        let width = self.grid.width();
        (0..self.grid.height())
            .step_by(stride)
            .flat_map(move |z| (0..width).step_by(stride).map(move |x| (x, z)))
    }

    /// Lazily evaluate placement points, decoration before cave entrance at
    /// each site.
    pub fn scan(&self) -> impl Iterator<Item = PlacementPoint> + '_ {
        self.sites().flat_map(move |(x, z)| {
            let (fx, fz) = (x as f64, z as f64);
            let position = Vec3::new(x as f32, self.grid.height_at(x, z), z as f32);

            let object_scale = self.params.object_noise_scale;
            let object_noise = self.object_noise.sample(fx * object_scale, fz * object_scale);
            let decoration = (object_noise > self.params.object_threshold).then_some(PlacementPoint {
                position,
                kind: PlacementKind::Decoration,
            });

            let cave_scale = self.params.cave_noise_scale;
            let cave_noise = self.cave_noise.sample(fx * cave_scale, fz * cave_scale);
            let cave = (cave_noise > self.params.cave_threshold).then_some(PlacementPoint {
                position,
                kind: PlacementKind::CaveEntrance,
            });

            decoration.into_iter().chain(cave)
        })
    }

    /// Evaluate every placement point into a vector.
    pub fn scan_all(&self) -> Vec<PlacementPoint> {
        let points: Vec<_> = self.scan().collect();
        tracing::debug!(
            sites = self.sites().count(),
            points = points.len(),
            "placement scan complete"
        );
        points
    }
}

/// Scan `grid` with classic Perlin noise on both channels.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidArgument`] for a zero `stride` or any
/// non-finite scale or threshold.
pub fn scan(
    grid: &HeightGrid,
    stride: u32,
    object_noise_scale: f64,
    cave_noise_scale: f64,
    object_threshold: f64,
    cave_threshold: f64,
) -> Result<Vec<PlacementPoint>, TerrainError> {
    let params = PlacementParams {
        stride,
        object_noise_scale,
        cave_noise_scale,
        object_threshold,
        cave_threshold,
    };
    let scanner = PlacementScanner::new(grid, params, ClassicPerlin::new())?;
    Ok(scanner.scan_all())
}
