//! Heightfield synthesis: samples normalized fBm over a regular grid and
//! derives a triangle mesh from it.

use terrasynth_mesh::{MeshData, grid_vertex_count};

use crate::error::TerrainError;
use crate::fbm::fbm;
use crate::perlin::{ClassicPerlin, NoiseSource};

/// Parameters for heightfield generation.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Number of cells along X. Must be at least 1.
    pub width: u32,
    /// Number of cells along Z. Must be at least 1.
    pub height: u32,
    /// Grid-to-noise coordinate scale. Smaller values give broader hills.
    /// Default: 0.02.
    pub noise_scale: f64,
    /// Number of fBm octaves. Must be at least 1. Default: 4.
    pub octaves: u32,
    /// Per-octave amplitude decay, in `(0, 1]`. Default: 0.5.
    pub persistence: f64,
    /// Vertical scale applied to the normalized fBm value. Default: 10.0.
    pub amplitude: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            noise_scale: 0.02,
            octaves: 4,
            persistence: 0.5,
            amplitude: 10.0,
        }
    }
}

impl TerrainParams {
    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 {
            return Err(TerrainError::invalid("width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(TerrainError::invalid("height", "must be at least 1"));
        }
        if grid_vertex_count(self.width, self.height).is_none() {
            return Err(TerrainError::invalid(
                "width",
                format!(
                    "{}x{} grid exceeds the u32 vertex index range",
                    self.width, self.height
                ),
            ));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(TerrainError::invalid(
                "noise_scale",
                format!("must be positive and finite, got {}", self.noise_scale),
            ));
        }
        if self.octaves == 0 {
            return Err(TerrainError::invalid("octaves", "must be at least 1"));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(TerrainError::invalid(
                "persistence",
                format!("must be in (0, 1], got {}", self.persistence),
            ));
        }
        if !self.amplitude.is_finite() {
            return Err(TerrainError::invalid(
                "amplitude",
                format!("must be finite, got {}", self.amplitude),
            ));
        }
        Ok(())
    }
}

/// Scalar heights over a `(width + 1) x (height + 1)` vertex grid.
///
/// Stored row-major: sample `(x, z)` lives at `z * (width + 1) + x`.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    width: u32,
    height: u32,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Wrap an existing row-major height buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] if either dimension is zero,
    /// the grid is too large to index, or `heights` has the wrong length.
    pub fn from_heights(width: u32, height: u32, heights: Vec<f32>) -> Result<Self, TerrainError> {
        if width == 0 {
            return Err(TerrainError::invalid("width", "must be at least 1"));
        }
        if height == 0 {
            return Err(TerrainError::invalid("height", "must be at least 1"));
        }
        let expected = grid_vertex_count(width, height).ok_or_else(|| {
            TerrainError::invalid("width", format!("{width}x{height} grid is too large"))
        })?;
        if heights.len() != expected {
            return Err(TerrainError::invalid(
                "heights",
                format!("expected {expected} samples, got {}", heights.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            heights,
        })
    }

    /// Number of cells along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along Z.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples per row (`width + 1`).
    pub fn row_len(&self) -> usize {
        self.width as usize + 1
    }

    /// Flattened index of sample `(x, z)`.
    pub fn index(&self, x: u32, z: u32) -> usize {
        z as usize * self.row_len() + x as usize
    }

    /// Height at `(x, z)`, or `None` outside `[0, width] x [0, height]`.
    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x > self.width || z > self.height {
            return None;
        }
        Some(self.heights[self.index(x, z)])
    }

    /// Height at `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if `x > width` or `z > height`.
    pub fn height_at(&self, x: u32, z: u32) -> f32 {
        self.get(x, z).unwrap_or_else(|| {
            panic!(
                "sample ({x}, {z}) outside {}x{} grid",
                self.width, self.height
            )
        })
    }

    /// All samples, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Iterate rows in Z order; each row holds `width + 1` samples indexed by X.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.heights.chunks_exact(self.row_len())
    }

    /// Lowest and highest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// Builds heightfields by sampling normalized fBm from a [`NoiseSource`].
#[derive(Clone, Debug, Default)]
pub struct HeightfieldSynthesizer<N = ClassicPerlin<'static>> {
    noise: N,
}

impl HeightfieldSynthesizer<ClassicPerlin<'static>> {
    /// Synthesizer over classic Perlin noise with the reference permutation table.
    pub fn classic() -> Self {
        Self::new(ClassicPerlin::new())
    }
}

impl<N: NoiseSource> HeightfieldSynthesizer<N> {
    /// Create a synthesizer over the given noise source.
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// The underlying noise source.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Sample the height grid only.
    ///
    /// Sample `(x, z)` is `fbm(x * noise_scale, z * noise_scale) * amplitude`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] if `params` fails
    /// [`TerrainParams::validate`].
    pub fn sample_grid(&self, params: &TerrainParams) -> Result<HeightGrid, TerrainError> {
        params.validate()?;

        let capacity = (params.width as usize + 1) * (params.height as usize + 1);
        let mut heights = Vec::with_capacity(capacity);
        for z in 0..=params.height {
            for x in 0..=params.width {
                let value = fbm(
                    &self.noise,
                    x as f64 * params.noise_scale,
                    z as f64 * params.noise_scale,
                    params.octaves,
                    params.persistence,
                );
                heights.push((value * params.amplitude) as f32);
            }
        }

        HeightGrid::from_heights(params.width, params.height, heights)
    }

    /// Generate the height grid and its triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidArgument`] if `params` fails
    /// [`TerrainParams::validate`]. No output is produced on error.
    pub fn generate(&self, params: &TerrainParams) -> Result<(HeightGrid, MeshData), TerrainError> {
        let _span = tracing::debug_span!(
            "generate_heightfield",
            width = params.width,
            height = params.height,
            octaves = params.octaves
        )
        .entered();

        let grid = self.sample_grid(params)?;
        let mesh = MeshData::from_heights(grid.width(), grid.height(), grid.as_slice());

        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "heightfield generated"
        );
        Ok((grid, mesh))
    }
}

/// Generate a heightfield over classic Perlin noise with the reference
/// permutation table.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidArgument`] for zero dimensions, zero octaves,
/// `persistence` outside `(0, 1]`, a non-positive `noise_scale` or a
/// non-finite `amplitude`.
pub fn generate(
    width: u32,
    height: u32,
    noise_scale: f64,
    octaves: u32,
    persistence: f64,
    amplitude: f64,
) -> Result<(HeightGrid, MeshData), TerrainError> {
    let params = TerrainParams {
        width,
        height,
        noise_scale,
        octaves,
        persistence,
        amplitude,
    };
    HeightfieldSynthesizer::classic().generate(&params)
}
