//! Composable signed distance fields for procedural voxel geometry.
//!
//! The workflow is:
//! 1. Pick shapes from [`Sdf`] and place each with a [`TransformOp`]
//! 2. Merge them left to right in an [`SdfChain`] using [`CombineOp`]s
//! 3. Sample the chain at voxel centers; negative distance means solid
//!
//! `min_dist` on the chain reports which link is closest.
//! `min_surface_dist` does the same over surface links only, which callers
//! use to pick a material per voxel.

pub mod primitive;
pub mod transform;
pub mod combine;
pub mod chain;

pub use chain::{DistResult, SdfChain, SdfLink};
pub use combine::CombineOp;
pub use transform::TransformOp;

use glam::Vec3;

/// Closed set of shapes a chain link can hold.
///
/// Parameters are in the shape's local space.
#[derive(Clone, Debug)]
pub enum Sdf {
    Sphere { radius: f32 },
    Cylinder { a: Vec3, b: Vec3, radius: f32 },
    CappedCone { a: Vec3, b: Vec3, ra: f32, rb: f32 },
    /// Cone along +X bending towards +Z; see [`primitive::curved_cone`]
    CurvedCone { length: f32, ra: f32, rb: f32, curve_amount: f32, curve_power: f32 },
    Box { half_extents: Vec3 },
    /// Roughening term for [`CombineOp::Displace`], not a true distance
    SineDisplacement { scale: Vec3, amount: f32 },
    /// A nested chain evaluated as one shape
    Chain(Box<SdfChain>),
}

impl Sdf {
    /// Signed distance from a local-space point (negative = inside).
    pub fn distance(&self, p: Vec3) -> f32 {
        match self {
            Sdf::Sphere { radius } => primitive::sphere(p, *radius),
            Sdf::Cylinder { a, b, radius } => primitive::cylinder(p, *a, *b, *radius),
            Sdf::CappedCone { a, b, ra, rb } => primitive::capped_cone(p, *a, *b, *ra, *rb),
            Sdf::CurvedCone { length, ra, rb, curve_amount, curve_power } => {
                primitive::curved_cone(p, *length, *ra, *rb, *curve_amount, *curve_power)
            }
            Sdf::Box { half_extents } => primitive::aabox(p, *half_extents),
            Sdf::SineDisplacement { scale, amount } => {
                primitive::sine_displacement(p, *scale, *amount)
            }
            Sdf::Chain(chain) => chain.dist(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_node() {
        let s = Sdf::Sphere { radius: 5.0 };
        assert_eq!(s.distance(Vec3::new(5.0, 0.0, 0.0)), 0.0);
        assert_eq!(s.distance(Vec3::ZERO), -5.0);
        assert_eq!(s.distance(Vec3::new(10.0, 0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_dispatch_matches_primitives() {
        let p = Vec3::new(0.4, -0.3, 1.2);
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 0.0, 2.0);

        let cyl = Sdf::Cylinder { a, b, radius: 0.5 };
        assert_eq!(cyl.distance(p), primitive::cylinder(p, a, b, 0.5));

        let cone = Sdf::CappedCone { a, b, ra: 0.6, rb: 0.2 };
        assert_eq!(cone.distance(p), primitive::capped_cone(p, a, b, 0.6, 0.2));

        let bent = Sdf::CurvedCone { length: 3.0, ra: 0.5, rb: 0.2, curve_amount: 1.0, curve_power: 2.0 };
        assert_eq!(bent.distance(p), primitive::curved_cone(p, 3.0, 0.5, 0.2, 1.0, 2.0));

        let cube = Sdf::Box { half_extents: Vec3::ONE };
        assert_eq!(cube.distance(p), primitive::aabox(p, Vec3::ONE));
    }
}
