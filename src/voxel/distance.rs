//! Nearest-filled-voxel distance propagation.
//!
//! For every empty cell, grow Chebyshev shells (cube surfaces of radius
//! 1, 2, 3, ...) until one contains a filled cell. The cell then stores
//! `radius - 1`: the number of whole empty voxels a ray can safely skip.
//! Cells touching a filled neighbor and cells with nothing filled within
//! `max_radius` both keep 0.

use glam::IVec3;
use rayon::prelude::*;

use crate::voxel::volume::{Extent, VoxelStore};
use crate::voxel::voxel::Voxel;

/// Default search limit in voxels
pub const DEFAULT_MAX_SEARCH_RADIUS: u32 = 16;

/// Outcome counts of one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PropagationStats {
    /// Empty cells examined
    pub visited: usize,
    /// Empty cells that found a filled cell within the limit
    pub resolved: usize,
    /// Empty cells that gave up at the search limit
    pub exhausted: usize,
}

/// Write clearance distances into every empty cell of `store`.
///
/// Only the filled/empty split is read, so running it again on its own
/// output changes nothing.
pub fn propagate<S: VoxelStore + ?Sized>(store: &mut S, max_radius: u32) -> PropagationStats {
    let extent = store.extent();
    let voxels = store.voxels();

    let results: Vec<(Voxel, Option<bool>)> = (0..voxels.len())
        .into_par_iter()
        .map(|i| {
            let v = voxels[i];
            if v.is_filled() {
                return (v, None);
            }
            match distance_at(voxels, extent, extent.coords(i), max_radius) {
                Some(d) => (Voxel::distance(d), Some(true)),
                None => (Voxel::EMPTY, Some(false)),
            }
        })
        .collect();

    let mut stats = PropagationStats::default();
    let out = store.voxels_mut();
    for (cell, (v, found)) in out.iter_mut().zip(results) {
        *cell = v;
        match found {
            Some(true) => stats.resolved += 1,
            Some(false) => stats.exhausted += 1,
            None => continue,
        }
        stats.visited += 1;
    }

    log::debug!(
        "Propagated distances over {}x{}x{}: {} resolved, {} exhausted (limit {})",
        extent.width, extent.depth, extent.height, stats.resolved, stats.exhausted, max_radius
    );
    stats
}

/// Clearance of the cell at `c`, or `None` if nothing filled lies within
/// `max_radius`.
pub fn distance_at(voxels: &[Voxel], extent: Extent, c: IVec3, max_radius: u32) -> Option<u32> {
    (1..=max_radius as i32)
        .find(|&r| shell_has_filled(voxels, extent, c, r))
        .map(|r| (r - 1) as u32)
}

/// Scan the surface of the cube of radius `r` around `c`.
///
/// The six faces are clipped against each other so every shell cell is
/// visited exactly once: X faces take the full square, Y faces drop the X
/// edges, Z faces drop both.
fn shell_has_filled(voxels: &[Voxel], e: Extent, c: IVec3, r: i32) -> bool {
    let filled = |x: i32, y: i32, z: i32| {
        e.index(x, y, z).is_some_and(|i| voxels[i].is_filled())
    };
    let (w, d, h) = (e.width as i32, e.depth as i32, e.height as i32);

    for x in [c.x - r, c.x + r] {
        if x < 0 || x >= w {
            continue;
        }
        for z in c.z - r..=c.z + r {
            for y in c.y - r..=c.y + r {
                if filled(x, y, z) {
                    return true;
                }
            }
        }
    }

    for y in [c.y - r, c.y + r] {
        if y < 0 || y >= d {
            continue;
        }
        for z in c.z - r..=c.z + r {
            for x in c.x - r + 1..c.x + r {
                if filled(x, y, z) {
                    return true;
                }
            }
        }
    }

    for z in [c.z - r, c.z + r] {
        if z < 0 || z >= h {
            continue;
        }
        for y in c.y - r + 1..c.y + r {
            for x in c.x - r + 1..c.x + r {
                if filled(x, y, z) {
                    return true;
                }
            }
        }
    }

    false
}
