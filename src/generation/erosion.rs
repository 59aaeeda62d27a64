//! Droplet erosion: loose cells slide downhill until they settle.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::config::ErosionParams;
use super::context::GenerationContext;
use super::terrain_gen::HeightMap;
use crate::voxel::{Voxel, VoxelStore};

const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Counters from one erosion pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ErosionStats {
    /// Droplets released on a column with a surface
    pub droplets: usize,
    /// Horizontal steps taken by all droplets
    pub moves: usize,
}

/// Surface after the top cell of a column was removed
fn next_surface<S: VoxelStore + ?Sized>(store: &S, x: i32, y: i32, removed: i32) -> Option<i32> {
    (0..removed).rev().find(|&z| store.get(x, y, z).is_filled())
}

/// Run `area * droplets_per_column` droplets over the store.
///
/// Each droplet lifts the top cell of a random column, then keeps stepping
/// to a neighbor whose landing height is strictly lower while it has
/// energy. It deposits the cell where it stops, so the material count is
/// preserved. `heights` is kept in sync with the store.
pub fn erode<S: VoxelStore + ?Sized>(
    store: &mut S,
    heights: &mut HeightMap,
    params: &ErosionParams,
    ctx: &mut GenerationContext,
) -> ErosionStats {
    let e = store.extent();
    let iterations = (e.area() as f32 * params.droplets_per_column) as usize;
    let rng = ctx.rng();
    let mut stats = ErosionStats::default();
    let mut order = NEIGHBORS;

    for _ in 0..iterations {
        let x = rng.random_range(0..e.width as i32);
        let y = rng.random_range(0..e.depth as i32);
        let Some(top) = heights.surface(x, y) else {
            continue;
        };
        stats.droplets += 1;

        let carried = store.get(x, y, top);
        store.set(x, y, top, Voxel::EMPTY);
        heights.set_surface(x, y, next_surface(store, x, y, top));

        let (mut px, mut py) = (x, y);
        let mut landing = heights.landing(px, py);
        let mut energy = params.initial_energy;

        while energy >= params.move_cost {
            order.shuffle(rng);
            let lower = order.iter().map(|&(dx, dy)| (px + dx, py + dy)).find(|&(nx, ny)| {
                nx >= 0
                    && ny >= 0
                    && (nx as u32) < e.width
                    && (ny as u32) < e.depth
                    && heights.landing(nx, ny) < landing
            });
            let Some((nx, ny)) = lower else {
                break;
            };
            px = nx;
            py = ny;
            landing = heights.landing(px, py);
            energy -= params.move_cost;
            stats.moves += 1;
        }

        // Landing is never above the lifted cell, so it is always in range
        store.set(px, py, landing, carried);
        heights.set_surface(px, py, Some(landing));
    }

    log::debug!("Erosion: {} droplets, {} moves", stats.droplets, stats.moves);
    stats
}
