//! Layered terrain fill: stone, dirt and a grass cap, with optional caves.

use glam::IVec3;

use super::config::TerrainParams;
use super::noise::CoherentNoise;
use crate::voxel::chunk::{VOXELS_PER_METER, meters_to_voxels};
use crate::voxel::{Material, Voxel, VoxelStore};

/// Surface height per (x, y) column. `None` marks a column with no filled cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    width: u32,
    depth: u32,
    heights: Vec<Option<i32>>,
}

impl HeightMap {
    pub fn new(width: u32, depth: u32) -> Self {
        Self {
            width,
            depth,
            heights: vec![None; width as usize * depth as usize],
        }
    }

    /// Scan every column of a store for its top filled cell
    pub fn from_store<S: VoxelStore + ?Sized>(store: &S) -> Self {
        let e = store.extent();
        let mut map = Self::new(e.width, e.depth);
        for y in 0..e.depth as i32 {
            for x in 0..e.width as i32 {
                map.set_surface(x, y, store.column_top(x, y));
            }
        }
        map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn slot(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.depth,
            "column ({}, {}) out of range for {}x{} height map",
            x, y, self.width, self.depth
        );
        x as usize + y as usize * self.width as usize
    }

    /// Height of the top filled cell of a column
    pub fn surface(&self, x: i32, y: i32) -> Option<i32> {
        self.heights[self.slot(x, y)]
    }

    pub fn set_surface(&mut self, x: i32, y: i32, height: Option<i32>) {
        let i = self.slot(x, y);
        self.heights[i] = height;
    }

    /// Lowest empty cell above the column's top, where a falling cell lands
    pub fn landing(&self, x: i32, y: i32) -> i32 {
        self.surface(x, y).map_or(0, |h| h + 1)
    }
}

/// Fill a store with terrain for the chunk whose voxel origin is `origin`.
///
/// Noise is sampled at world voxel coordinates so neighbouring chunks join
/// without seams. Cell 0 of every column stays stone, so every column ends
/// up with a surface.
pub fn fill_terrain<S, N>(store: &mut S, params: &TerrainParams, noise: &N, origin: IVec3) -> HeightMap
where
    S: VoxelStore + ?Sized,
    N: CoherentNoise + ?Sized,
{
    let e = store.extent();
    let top_cell = e.height as i32 - 1;
    let mut heights = HeightMap::new(e.width, e.depth);

    let surface_base = meters_to_voxels(params.surface_height) as f64;
    let surface_amp = params.surface_amplitude as f64 * VOXELS_PER_METER as f64;
    let stone_base = meters_to_voxels(params.stone_height) as f64;
    let stone_amp = params.stone_amplitude as f64 * VOXELS_PER_METER as f64;
    let cave_ceiling = meters_to_voxels(params.cave_ceiling);
    let caves = params.cave_threshold < 1.0;

    let stone = Voxel::filled(Material::Stone);
    let dirt = Voxel::filled(Material::Dirt);
    let grass = Voxel::filled(Material::Grass);

    for y in 0..e.depth as i32 {
        for x in 0..e.width as i32 {
            let wx = (origin.x + x) as f64;
            let wy = (origin.y + y) as f64;

            let s = params.surface_scale as f64;
            let surface = (surface_base + noise.noise(wx / s, wy / s, 0.0) * surface_amp).round() as i32;
            let surface = surface.clamp(0, top_cell);

            // Offset plane keeps the stone band uncorrelated with the surface
            let s = params.stone_scale as f64;
            let stone_top = (stone_base + noise.noise(wx / s, wy / s, 17.5) * stone_amp).round() as i32;
            let stone_top = stone_top.min(surface - 1);

            for z in 0..=surface {
                let voxel = if z == surface {
                    grass
                } else if z <= stone_top {
                    if caves && z > 0 && z < cave_ceiling {
                        let s = params.cave_scale as f64;
                        let n = noise.octave_noise(
                            wx / s,
                            wy / s,
                            (origin.z + z) as f64 / s,
                            params.cave_octaves,
                            params.cave_persistence as f64,
                        );
                        if n > params.cave_threshold as f64 {
                            continue;
                        }
                    }
                    stone
                } else {
                    dirt
                };
                store.set(x, y, z, voxel);
            }
            heights.set_surface(x, y, Some(surface));
        }
    }

    log::trace!("Filled terrain at origin {:?}", origin);
    heights
}
