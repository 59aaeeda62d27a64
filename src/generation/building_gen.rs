//! Procedural huts: a base slab, four walls and a door carved into the front.

use glam::{IVec3, Vec3};
use rand::Rng;

use super::Placement;
use super::config::BuildingParams;
use super::context::GenerationContext;
use super::terrain_gen::HeightMap;
use super::tree_gen::random_offset;
use crate::voxel::sdf::{CombineOp, Sdf, SdfChain, TransformOp};
use crate::voxel::{Extent, Fragment, Voxel, VoxelStore, blit};

/// Index of the base slab in a building chain
pub const BASE_LINK: usize = 0;

/// A building chain together with the box it fits in
#[derive(Clone, Debug)]
pub struct BuildingBlueprint {
    pub chain: SdfChain,
    pub extent: Extent,
}

fn box_at(center: Vec3, half_extents: Vec3) -> (Sdf, TransformOp) {
    (Sdf::Box { half_extents }, TransformOp::from_translation(center))
}

/// Lay out one building in fragment-local voxel units.
///
/// Links in order: base, south, north, west, east wall, door. The door is
/// cut through the south (y = 0) wall at a random position that keeps
/// `door_margin` cells of wall on either side.
pub fn build_building_chain<R: Rng + ?Sized>(params: &BuildingParams, rng: &mut R) -> BuildingBlueprint {
    let width = params.width.sample(rng);
    let depth = params.depth.sample(rng);
    let wall_height = params.wall_height.sample(rng);
    let (w, d, h) = (width as f32, depth as f32, wall_height as f32);
    let t = params.wall_thickness as f32;
    let bt = params.base_thickness as f32;

    let (shape, transform) = box_at(Vec3::new(w, d, bt) * 0.5, Vec3::new(w, d, bt) * 0.5);
    let mut chain = SdfChain::new(shape, transform);

    let cz = bt + h * 0.5;
    let walls = [
        (Vec3::new(w * 0.5, t * 0.5, cz), Vec3::new(w * 0.5, t * 0.5, h * 0.5)),
        (Vec3::new(w * 0.5, d - t * 0.5, cz), Vec3::new(w * 0.5, t * 0.5, h * 0.5)),
        (Vec3::new(t * 0.5, d * 0.5, cz), Vec3::new(t * 0.5, d * 0.5, h * 0.5)),
        (Vec3::new(w - t * 0.5, d * 0.5, cz), Vec3::new(t * 0.5, d * 0.5, h * 0.5)),
    ];
    for (center, half) in walls {
        let (shape, transform) = box_at(center, half);
        chain.push(shape, transform, CombineOp::Union);
    }

    // Door: clamp to what the front wall can hold, then slide it between the margins
    let inset = params.wall_thickness + params.door_margin;
    let door_width = params.door_width.sample(rng).min(width.saturating_sub(2 * inset)).max(1);
    let door_height = params.door_height.sample(rng).min(wall_height - 1).max(1);
    let left = inset.min(width - door_width);
    let right = (width - inset - door_width).max(left);
    let door_x = rng.random_range(left..=right) as f32;

    let (dw, dh) = (door_width as f32, door_height as f32);
    let (shape, transform) = box_at(
        Vec3::new(door_x + dw * 0.5, t * 0.5, bt + dh * 0.5),
        // Thicker than the wall so the cut goes cleanly through
        Vec3::new(dw * 0.5, t, dh * 0.5),
    );
    chain.push(shape, transform, CombineOp::Subtract);

    BuildingBlueprint {
        chain,
        extent: Extent::new(width, depth, params.base_thickness + wall_height),
    }
}

/// Sample a building into a fragment. The base slab gets `base_material`,
/// everything else `wall_material`.
pub fn assemble_building(params: &BuildingParams, ctx: &mut GenerationContext) -> Fragment {
    let BuildingBlueprint { chain, extent } = build_building_chain(params, ctx.rng());
    let mut fragment = Fragment::new(extent.width, extent.depth, extent.height);
    let base = Voxel::filled(params.base_material);
    let wall = Voxel::filled(params.wall_material);

    for z in 0..extent.height as i32 {
        for y in 0..extent.depth as i32 {
            for x in 0..extent.width as i32 {
                let p = Vec3::new(x as f32, y as f32, z as f32) + Vec3::splat(0.5);
                if chain.dist(p) >= 0.0 {
                    continue;
                }
                let voxel = if chain.min_surface_dist(p).min_index == BASE_LINK { base } else { wall };
                fragment.set(x, y, z, voxel);
            }
        }
    }
    fragment
}

/// Build one hut and set it into the terrain at a random position.
///
/// The base slab replaces the surface cell under the building's center.
/// Returns `None` when that column has no surface.
pub fn place_building<S: VoxelStore + ?Sized>(
    store: &mut S,
    heights: &HeightMap,
    params: &BuildingParams,
    ctx: &mut GenerationContext,
) -> Option<Placement> {
    let fragment = assemble_building(params, ctx);
    let fe = fragment.extent();
    let e = store.extent();
    let rng = ctx.rng();
    let ox = random_offset(rng, e.width, fe.width);
    let oy = random_offset(rng, e.depth, fe.depth);

    let cx = (ox + fe.width as i32 / 2).clamp(0, e.width as i32 - 1);
    let cy = (oy + fe.depth as i32 / 2).clamp(0, e.depth as i32 - 1);
    let surface = heights.surface(cx, cy)?;

    let offset = IVec3::new(ox, oy, surface);
    let cells = blit(store, &fragment, offset);
    log::trace!("Placed building at {:?} ({} cells)", offset, cells);
    Some(Placement { offset, cells })
}
