//! Coherent noise used by terrain generation

use noise::{NoiseFn, Perlin};

/// 3D gradient noise with values roughly in `[-1, 1]`.
///
/// Implementations must be pure functions of position so chunks can be
/// generated in any order and still line up at their borders.
pub trait CoherentNoise: Send + Sync {
    fn noise(&self, x: f64, y: f64, z: f64) -> f64;

    /// Sum of `octaves` layers, each at twice the frequency and `persistence`
    /// times the amplitude of the previous one, normalized back to `[-1, 1]`.
    fn octave_noise(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;
        for _ in 0..octaves.max(1) {
            total += self.noise(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }
        total / max_value
    }
}

/// Perlin noise from the `noise` crate
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self { perlin: Perlin::new(seed) }
    }
}

impl CoherentNoise for PerlinNoise {
    #[inline]
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = PerlinNoise::new(3);
        let b = PerlinNoise::new(3);
        for i in 0..20 {
            let p = i as f64 * 0.37;
            assert_eq!(a.noise(p, p * 0.5, 1.1), b.noise(p, p * 0.5, 1.1));
        }
    }

    #[test]
    fn test_octave_noise_bounded() {
        let n = PerlinNoise::new(11);
        for i in 0..200 {
            let p = i as f64 * 0.173;
            let v = n.octave_noise(p, -p, p * 0.3, 4, 0.5);
            assert!(v.abs() <= 1.1, "octave noise {} out of range", v);
        }
    }

    #[test]
    fn test_single_octave_matches_base() {
        let n = PerlinNoise::new(5);
        assert_eq!(n.octave_noise(0.3, 0.7, 0.1, 1, 0.5), n.noise(0.3, 0.7, 0.1));
    }
}
