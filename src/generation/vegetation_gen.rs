//! Grass blades scattered over the terrain surface

use rand::Rng;

use super::config::VegetationParams;
use super::context::GenerationContext;
use super::terrain_gen::HeightMap;
use crate::voxel::{Voxel, VoxelStore};

const BEND_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Grow `area * density` blades on random surface columns.
///
/// A blade is 1..=`max_blade_length` cells stacked above the surface. Past a
/// random bend point it may step one cell sideways. Blades only fill empty
/// cells and stop at the top of the volume. Returns the number of cells
/// written.
pub fn scatter_vegetation<S: VoxelStore + ?Sized>(
    store: &mut S,
    heights: &HeightMap,
    params: &VegetationParams,
    ctx: &mut GenerationContext,
) -> usize {
    let e = store.extent();
    let blades = (e.area() as f32 * params.density) as usize;
    let blade = Voxel::filled(params.material);
    let rng = ctx.rng();

    let mut written = 0;
    for _ in 0..blades {
        let x = rng.random_range(0..e.width as i32);
        let y = rng.random_range(0..e.depth as i32);
        let length = rng.random_range(1..=params.max_blade_length) as i32;
        let bend_at = rng.random_range(1..=params.max_blade_length) as i32;
        let bends = rng.random_bool(params.bend_chance as f64);
        let (dx, dy) = BEND_DIRECTIONS[rng.random_range(0..BEND_DIRECTIONS.len())];

        let Some(surface) = heights.surface(x, y) else {
            continue;
        };

        let (mut bx, mut by) = (x, y);
        for i in 0..length {
            let z = surface + 1 + i;
            if z >= e.height as i32 {
                break;
            }
            if bends && i == bend_at {
                bx = (bx + dx).clamp(0, e.width as i32 - 1);
                by = (by + dy).clamp(0, e.depth as i32 - 1);
            }
            if store.get(bx, by, z).is_empty() {
                store.set(bx, by, z, blade);
                written += 1;
            }
        }
    }
    written
}
