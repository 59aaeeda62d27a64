//! Binary operators that merge two distances.

/// How a link's distance merges into the running chain distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombineOp {
    /// Hard union: `min(d1, d2)`
    Union,
    /// Polynomial smooth union with blend radius `k`
    SmoothUnion { k: f32 },
    /// Adds a roughening field onto the running distance
    Displace,
    /// Carves the link's interior out of the running shape
    Subtract,
}

impl CombineOp {
    /// Merge the running distance `d1` with the link distance `d2`.
    #[inline]
    pub fn combine(&self, d1: f32, d2: f32) -> f32 {
        match *self {
            CombineOp::Union => d1.min(d2),
            CombineOp::SmoothUnion { k } => {
                let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
                mix(d2, d1, h) - k * h * (1.0 - h)
            }
            CombineOp::Displace => d1 + d2,
            CombineOp::Subtract => d1.max(-d2),
        }
    }

    /// Whether the link's own distance describes a surface that can own a
    /// material. Carving and roughening links never do.
    #[inline]
    pub fn contributes_surface(&self) -> bool {
        matches!(self, CombineOp::Union | CombineOp::SmoothUnion { .. })
    }
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_union_is_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let d1 = rng.random_range(-50.0..50.0f32);
            let d2 = rng.random_range(-50.0..50.0f32);
            assert_eq!(CombineOp::Union.combine(d1, d2), d1.min(d2));
        }
    }

    #[test]
    fn test_smooth_union_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..5000 {
            let d1 = rng.random_range(-20.0..20.0f32);
            let d2 = rng.random_range(-20.0..20.0f32);
            let k = rng.random_range(0.01..8.0f32);
            let s = CombineOp::SmoothUnion { k }.combine(d1, d2);
            let m = d1.min(d2);
            assert!(s <= m + 1e-4, "smooth {} above min {} (k={})", s, m, k);
            assert!(s >= m - k / 4.0 - 1e-4, "smooth {} below min-k/4 {} (k={})", s, m - k / 4.0, k);
        }
    }

    #[test]
    fn test_smooth_union_far_apart_is_min() {
        let op = CombineOp::SmoothUnion { k: 1.0 };
        assert_eq!(op.combine(-3.0, 5.0), -3.0);
        assert_eq!(op.combine(7.0, 2.0), 2.0);
    }

    #[test]
    fn test_smooth_union_blends_at_equal_distances() {
        let s = CombineOp::SmoothUnion { k: 2.0 }.combine(1.0, 1.0);
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_displace_adds() {
        assert_eq!(CombineOp::Displace.combine(2.0, -0.5), 1.5);
    }

    #[test]
    fn test_subtract_carves() {
        // Inside both: carved away
        assert!(CombineOp::Subtract.combine(-1.0, -0.5) > 0.0);
        // Inside A, outside B: still solid
        assert_eq!(CombineOp::Subtract.combine(-1.0, 3.0), -1.0);
    }

    #[test]
    fn test_contributes_surface() {
        assert!(CombineOp::Union.contributes_surface());
        assert!(CombineOp::SmoothUnion { k: 1.0 }.contributes_surface());
        assert!(!CombineOp::Subtract.contributes_surface());
        assert!(!CombineOp::Displace.contributes_surface());
    }
}
