//! Normalized fractal Brownian motion (fBm).
//!
//! Octave `i` samples the noise at `2^i` times the base frequency and weights
//! it by `persistence^i`. The weighted sum is divided by the sum of weights, so
//! the result stays in the range of a single noise sample no matter how many
//! octaves are stacked.

use crate::perlin::NoiseSource;

/// Sum of octave weights `persistence^0 + ... + persistence^(octaves - 1)`.
pub fn fbm_weight_sum(octaves: u32, persistence: f64) -> f64 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    for _ in 0..octaves {
        sum += amplitude;
        amplitude *= persistence;
    }
    sum
}

/// Sample normalized fBm at `(x, y)`.
///
/// With a [`NoiseSource`] in `[0, 1]` the result is also in `[0, 1]`.
/// Returns 0 when `octaves` is zero.
pub fn fbm<N: NoiseSource + ?Sized>(
    noise: &N,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
) -> f64 {
    let weight = fbm_weight_sum(octaves, persistence);
    if weight <= 0.0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    for _ in 0..octaves {
        total += noise.sample(x * frequency, y * frequency) * amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }
    total / weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perlin::ClassicPerlin;

    const EPSILON: f64 = 1e-12;

    struct ConstantNoise(f64);

    impl NoiseSource for ConstantNoise {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Returns the x coordinate it was sampled at, to expose octave frequencies.
    struct EchoX;

    impl NoiseSource for EchoX {
        fn sample(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    #[test]
    fn test_weight_sum() {
        assert!((fbm_weight_sum(4, 0.5) - 1.875).abs() < EPSILON);
        assert!((fbm_weight_sum(3, 1.0) - 3.0).abs() < EPSILON);
        assert_eq!(fbm_weight_sum(0, 0.5), 0.0);
    }

    #[test]
    fn test_output_bounded_for_any_octave_count() {
        let noise = ClassicPerlin::new();
        for octaves in [1, 2, 4, 8, 16] {
            for persistence in [0.1, 0.5, 1.0] {
                for i in 0..60 {
                    for j in 0..60 {
                        let v = fbm(&noise, i as f64 * 0.37, j as f64 * 0.41, octaves, persistence);
                        assert!(
                            v.abs() <= 1.0,
                            "fbm {v} unbounded at octaves={octaves} persistence={persistence}"
                        );
                        assert!(v >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_normalization_independent_of_octaves() {
        let noise = ConstantNoise(0.73);
        for octaves in 1..=12 {
            let v = fbm(&noise, 1.0, 2.0, octaves, 0.5);
            assert!(
                (v - 0.73).abs() < EPSILON,
                "constant noise should survive normalization, got {v} at {octaves} octaves"
            );
        }
    }

    #[test]
    fn test_single_octave_is_plain_sample() {
        let noise = ClassicPerlin::new();
        let (x, y) = (4.21, 9.87);
        assert_eq!(fbm(&noise, x, y, 1, 0.5), noise.sample(x, y));
    }

    #[test]
    fn test_octave_frequency_doubles() {
        // Octaves sample x, 2x, 4x with weights 1, 0.5, 0.25.
        let v = fbm(&EchoX, 1.0, 0.0, 3, 0.5);
        let expected = (1.0 + 2.0 * 0.5 + 4.0 * 0.25) / 1.75;
        assert!((v - expected).abs() < EPSILON, "{v} vs {expected}");
    }

    #[test]
    fn test_normalized_by_weight_sum() {
        // Octaves see 0.2 at x = 1 and 0.6 at x = 2 and 4.
        struct Step;
        impl NoiseSource for Step {
            fn sample(&self, x: f64, _y: f64) -> f64 {
                if x < 1.5 { 0.2 } else { 0.6 }
            }
        }
        let v = fbm(&Step, 1.0, 0.0, 3, 0.5);
        let expected = (0.2 + 0.6 * 0.5 + 0.6 * 0.25) / fbm_weight_sum(3, 0.5);
        assert!((v - expected).abs() < EPSILON, "{v} vs {expected}");
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        assert_eq!(fbm(&ConstantNoise(0.9), 0.0, 0.0, 0, 0.5), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let noise = ClassicPerlin::new();
        let a = fbm(&noise, 12.5, 3.25, 6, 0.5);
        let b = fbm(&noise, 12.5, 3.25, 6, 0.5);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
