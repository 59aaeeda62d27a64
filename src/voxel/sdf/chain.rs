//! Ordered composition of SDF shapes.

use glam::Vec3;

use super::{CombineOp, Sdf, TransformOp};

/// One shape in a chain, with its placement and merge rule.
///
/// `combine` is `None` only for the seed link, which establishes the initial
/// distance.
#[derive(Clone, Debug)]
pub struct SdfLink {
    pub shape: Sdf,
    pub transform: TransformOp,
    pub combine: Option<CombineOp>,
}

impl SdfLink {
    /// Distance from a world-space point to this link's placed shape.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.shape.distance(self.transform.apply(point))
    }
}

/// Result of a closest-link query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistResult {
    pub distance: f32,
    pub min_index: usize,
}

/// Shapes evaluated left to right into one scalar field.
///
/// A chain always owns at least its seed link, so every query has a defined
/// starting distance.
#[derive(Clone, Debug)]
pub struct SdfChain {
    seed: SdfLink,
    rest: Vec<SdfLink>,
}

impl SdfChain {
    /// Start a chain from its seed shape.
    pub fn new(shape: Sdf, transform: TransformOp) -> Self {
        Self {
            seed: SdfLink { shape, transform, combine: None },
            rest: Vec::new(),
        }
    }

    /// Append a link, consuming and returning the chain (builder style).
    pub fn with_link(mut self, shape: Sdf, transform: TransformOp, combine: CombineOp) -> Self {
        self.push(shape, transform, combine);
        self
    }

    /// Append a link. Order matters: a `Subtract` only carves what comes
    /// before it.
    pub fn push(&mut self, shape: Sdf, transform: TransformOp, combine: CombineOp) {
        self.rest.push(SdfLink { shape, transform, combine: Some(combine) });
    }

    /// Number of links, seed included
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false: the seed link cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All links in evaluation order, seed first
    pub fn links(&self) -> impl Iterator<Item = &SdfLink> {
        std::iter::once(&self.seed).chain(self.rest.iter())
    }

    /// Composite distance at `point`.
    pub fn dist(&self, point: Vec3) -> f32 {
        let mut d = self.seed.distance(point);
        for link in &self.rest {
            let ld = link.distance(point);
            d = match link.combine {
                Some(op) => op.combine(d, ld),
                None => d.min(ld),
            };
        }
        d
    }

    /// Smallest single-link distance over every link, and that link's
    /// index. Ties keep the earlier link.
    pub fn min_dist(&self, point: Vec3) -> DistResult {
        self.closest(point, |_| true)
    }

    /// Like [`SdfChain::min_dist`] but only surface links take part (the
    /// seed, `Union` and `SmoothUnion`), so carving and roughening links
    /// never own a material.
    pub fn min_surface_dist(&self, point: Vec3) -> DistResult {
        self.closest(point, |link| link.combine.is_none_or(|op| op.contributes_surface()))
    }

    fn closest(&self, point: Vec3, include: impl Fn(&SdfLink) -> bool) -> DistResult {
        let mut best = DistResult { distance: self.seed.distance(point), min_index: 0 };
        for (i, link) in self.rest.iter().enumerate() {
            if !include(link) {
                continue;
            }
            let ld = link.distance(point);
            if ld < best.distance {
                best = DistResult { distance: ld, min_index: i + 1 };
            }
        }
        best
    }
}
