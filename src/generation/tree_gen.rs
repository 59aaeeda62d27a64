//! Procedural trees built from an SDF chain
//!
//! A tree is:
//! - a flattened root sphere
//! - a tapered, slightly tilted trunk cone
//! - curved cone branches hung off the trunk surface
//! - optional sine roughening on the bark
//!
//! The chain is sampled into a standalone fragment which is then blitted on
//! top of the terrain.

use std::f32::consts::TAU;

use glam::{IVec3, Vec3};
use rand::Rng;
use rayon::prelude::*;

use super::Placement;
use super::config::TreeParams;
use super::context::GenerationContext;
use super::terrain_gen::HeightMap;
use crate::voxel::sdf::{CombineOp, Sdf, SdfChain, TransformOp};
use crate::voxel::{Fragment, Voxel, VoxelStore, blit};

/// Radius of a branch tip relative to its base
const BRANCH_TIP_RATIO: f32 = 0.4;

/// Height of the root sphere's center above the fragment floor
fn root_center_height(params: &TreeParams) -> f32 {
    params.root_radius * params.root_flatten
}

/// Build the SDF chain of one tree in fragment-local voxel units.
///
/// The trunk stands at the horizontal center of the fragment.
pub fn build_tree_chain<R: Rng + ?Sized>(params: &TreeParams, rng: &mut R) -> SdfChain {
    let base = Vec3::new(
        params.fragment_width as f32 * 0.5,
        params.fragment_depth as f32 * 0.5,
        root_center_height(params),
    );

    let mut root_t = TransformOp::from_translation(base);
    root_t.add_scale(Vec3::new(1.0, 1.0, params.root_flatten));
    let mut chain = SdfChain::new(Sdf::Sphere { radius: params.root_radius }, root_t);

    // Trunk, leaning a little in a random compass direction
    let trunk_height = params.trunk_height.sample(rng) * params.fragment_height as f32;
    let ra = params.trunk_radius.sample(rng);
    let rb = ra * params.trunk_taper;
    let lean_dir = rng.random_range(0.0..TAU);
    let tilt = rng.random_range(0.0..=params.max_tilt);

    let mut trunk_t = TransformOp::from_translation(base);
    trunk_t.add_rotation(tilt, Vec3::new(lean_dir.cos(), lean_dir.sin(), 0.0));
    chain.push(
        Sdf::CappedCone { a: Vec3::ZERO, b: Vec3::Z * trunk_height, ra, rb },
        trunk_t,
        CombineOp::Union,
    );

    let branches = params.branch_count.sample(rng);
    for _ in 0..branches {
        let attach = params.branch_attach.sample(rng);
        let heading = rng.random_range(0.0..TAU);
        let pitch = params.branch_pitch.sample(rng);
        let length = params.branch_length.sample(rng);
        let radius = params.branch_radius.sample(rng);
        let curve = params.branch_curve.sample(rng);

        // Anchor on the trunk surface at the attachment height
        let r_here = ra + (rb - ra) * attach;
        let local = Vec3::new(heading.cos() * r_here, heading.sin() * r_here, attach * trunk_height);
        let anchor = trunk_t.transform_point(local);

        let mut branch_t = TransformOp::from_translation(anchor);
        branch_t
            .add_rotation(heading, Vec3::Z)
            .add_rotation(-pitch, Vec3::Y);
        chain.push(
            Sdf::CurvedCone {
                length,
                ra: radius,
                rb: radius * BRANCH_TIP_RATIO,
                curve_amount: curve,
                curve_power: params.branch_curve_power,
            },
            branch_t,
            CombineOp::Union,
        );
    }

    if params.bark_roughness > 0.0 {
        chain.push(
            Sdf::SineDisplacement {
                scale: Vec3::splat(params.bark_frequency),
                amount: params.bark_roughness,
            },
            TransformOp::new(),
            CombineOp::Displace,
        );
    }

    chain
}

/// Sample a tree into a fragment. Cells whose center lies inside the chain
/// become bark.
pub fn assemble_tree(params: &TreeParams, ctx: &mut GenerationContext) -> Fragment {
    let chain = build_tree_chain(params, ctx.rng());
    let mut fragment = Fragment::new(params.fragment_width, params.fragment_depth, params.fragment_height);
    let bark = Voxel::filled(params.material);
    let width = params.fragment_width as usize;
    let layer = fragment.extent().area();

    fragment
        .voxels_mut()
        .par_chunks_mut(layer)
        .enumerate()
        .for_each(|(z, cells)| {
            for (i, cell) in cells.iter_mut().enumerate() {
                let p = Vec3::new((i % width) as f32, (i / width) as f32, z as f32) + Vec3::splat(0.5);
                if chain.dist(p) < 0.0 {
                    *cell = bark;
                }
            }
        });
    fragment
}

/// Offset along one axis that keeps a fragment inside the destination when
/// it fits, or centers it when it doesn't.
pub(crate) fn random_offset<R: Rng + ?Sized>(rng: &mut R, dst_len: u32, src_len: u32) -> i32 {
    let slack = dst_len as i32 - src_len as i32;
    if slack > 0 {
        rng.random_range(0..=slack)
    } else {
        slack / 2
    }
}

/// Grow one tree and stand it on the terrain at a random position.
///
/// The root sphere is sunk into the ground under the trunk. Returns `None`
/// when the column under the trunk has no surface.
pub fn place_tree<S: VoxelStore + ?Sized>(
    store: &mut S,
    heights: &HeightMap,
    params: &TreeParams,
    ctx: &mut GenerationContext,
) -> Option<Placement> {
    let fragment = assemble_tree(params, ctx);
    let e = store.extent();
    let rng = ctx.rng();
    let ox = random_offset(rng, e.width, params.fragment_width);
    let oy = random_offset(rng, e.depth, params.fragment_depth);

    let tx = (ox + params.fragment_width as i32 / 2).clamp(0, e.width as i32 - 1);
    let ty = (oy + params.fragment_depth as i32 / 2).clamp(0, e.depth as i32 - 1);
    let surface = heights.surface(tx, ty)?;

    let offset = IVec3::new(ox, oy, surface + 1 - root_center_height(params).round() as i32);
    let cells = blit(store, &fragment, offset);
    log::trace!("Placed tree at {:?} ({} cells)", offset, cells);
    Some(Placement { offset, cells })
}
