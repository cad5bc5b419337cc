//! Classic 2D Perlin gradient noise over an explicit permutation table.
//!
//! Every sampler in this crate reports values in `[0, 1]`, with 0.5 as the
//! neutral level. Raw Perlin output in `[-1, 1]` is remapped and clamped, so
//! integer lattice points always sample to exactly 0.5.

use ::noise::{NoiseFn, Perlin};

/// A 2D scalar noise field sampled in `[0, 1]`.
pub trait NoiseSource {
    /// Sample the field at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Ken Perlin's reference permutation of `0..=255`.
///
/// Process-wide immutable data; samplers borrow it and never copy or mutate it.
pub static PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

#[inline]
fn to_unit_range(raw: f64) -> f64 {
    ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Raw improved Perlin noise at `(x, y)` using `table`, in `[-1, 1]`.
///
/// Lattice cell corners hash through `table` twice; gradients are the eight
/// axis and diagonal directions. Returns 0 on every integer lattice point.
pub fn perlin_2d(table: &[u8; 256], x: f64, y: f64) -> f64 {
    let xf = libm::floor(x);
    let yf = libm::floor(y);
    let xi = (xf as i64).rem_euclid(256) as usize;
    let yi = (yf as i64).rem_euclid(256) as usize;

    let x = x - xf;
    let y = y - yf;
    let u = fade(x);
    let v = fade(y);

    let p = |i: usize| table[i & 255] as usize;
    let a = p(xi) + yi;
    let b = p(xi + 1) + yi;

    let aa = p(a);
    let ab = p(a + 1);
    let ba = p(b);
    let bb = p(b + 1);

    lerp(
        v,
        lerp(u, grad(aa, x, y), grad(ba, x - 1.0, y)),
        lerp(u, grad(ab, x, y - 1.0), grad(bb, x - 1.0, y - 1.0)),
    )
}

/// Classic Perlin noise borrowing a permutation table.
#[derive(Clone, Copy, Debug)]
pub struct ClassicPerlin<'a> {
    table: &'a [u8; 256],
}

impl ClassicPerlin<'static> {
    /// Perlin noise over the reference [`PERMUTATION`] table.
    pub fn new() -> Self {
        Self {
            table: &PERMUTATION,
        }
    }
}

impl<'a> ClassicPerlin<'a> {
    /// Perlin noise over a caller-supplied permutation table.
    ///
    /// `table` should be a permutation of `0..=255`; other contents still
    /// produce deterministic noise but with visible repetition.
    pub fn with_table(table: &'a [u8; 256]) -> Self {
        Self { table }
    }

    /// The permutation table in use.
    pub fn table(&self) -> &'a [u8; 256] {
        self.table
    }
}

impl Default for ClassicPerlin<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for ClassicPerlin<'_> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        to_unit_range(perlin_2d(self.table, x, y))
    }
}

/// Adapts any 2D [`NoiseFn`] from the `noise` crate to [`NoiseSource`].
///
/// The wrapped function is assumed to produce `[-1, 1]`; it is remapped to
/// `[0, 1]` and clamped.
#[derive(Clone, Debug)]
pub struct NoiseFnSource<N>(pub N);

impl NoiseFnSource<Perlin> {
    /// Seeded Perlin noise from the `noise` crate.
    pub fn seeded_perlin(seed: u32) -> Self {
        Self(Perlin::new(seed))
    }
}

impl<N: NoiseFn<f64, 2>> NoiseSource for NoiseFnSource<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        to_unit_range(self.0.get([x, y]))
    }
}
