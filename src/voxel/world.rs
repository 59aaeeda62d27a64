//! Window of loaded chunks around a center chunk

use rayon::prelude::*;

use super::chunk::{CHUNK_EXTENT, ChunkCoord};
use super::volume::{Extent, VolumeView};
use super::voxel::Voxel;
use crate::core::Result;
use crate::generation::{ChunkGenerator, GenerationContext, GenerationStats};
use crate::generation::noise::CoherentNoise;

/// Chunks loaded on each side of the center chunk
pub const DRAW_DISTANCE: u32 = 1;

/// Square window of `(2 * draw_distance + 1)²` chunks in one flat buffer.
///
/// Chunks are stored back to back, slot `sx + sy * axis`, each one a
/// contiguous block laid out like a standalone chunk. The whole buffer can be
/// uploaded in one go with [`LoadedChunks::as_bytes`].
pub struct LoadedChunks {
    center: ChunkCoord,
    draw_distance: u32,
    chunk_extent: Extent,
    voxels: Vec<Voxel>,
}

impl LoadedChunks {
    /// Create an empty window of full-size chunks
    pub fn new(center: ChunkCoord, draw_distance: u32) -> Self {
        Self::with_extent(center, draw_distance, CHUNK_EXTENT)
    }

    /// Create an empty window with a custom per-chunk extent
    pub fn with_extent(center: ChunkCoord, draw_distance: u32, chunk_extent: Extent) -> Self {
        let axis = (2 * draw_distance + 1) as usize;
        Self {
            center,
            draw_distance,
            chunk_extent,
            voxels: vec![Voxel::EMPTY; axis * axis * chunk_extent.len()],
        }
    }

    /// Chunks along one side of the window
    pub fn axis(&self) -> u32 {
        2 * self.draw_distance + 1
    }

    pub fn chunk_count(&self) -> usize {
        (self.axis() * self.axis()) as usize
    }

    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    pub fn chunk_extent(&self) -> Extent {
        self.chunk_extent
    }

    /// World coordinate of the chunk in slot `(sx, sy)`
    pub fn coord_of(&self, sx: u32, sy: u32) -> ChunkCoord {
        let dd = self.draw_distance as i32;
        ChunkCoord::new(self.center.x + sx as i32 - dd, self.center.y + sy as i32 - dd)
    }

    fn slot_range(&self, sx: u32, sy: u32) -> std::ops::Range<usize> {
        let axis = self.axis();
        if sx >= axis || sy >= axis {
            panic!("chunk slot ({}, {}) out of range for {}x{} window", sx, sy, axis, axis);
        }
        let len = self.chunk_extent.len();
        let start = (sx + sy * axis) as usize * len;
        start..start + len
    }

    /// Read-only cells of one chunk.
    ///
    /// # Panics
    /// If the slot lies outside the window.
    pub fn chunk_voxels(&self, sx: u32, sy: u32) -> &[Voxel] {
        let range = self.slot_range(sx, sy);
        &self.voxels[range]
    }

    /// Writable view of one chunk.
    ///
    /// # Panics
    /// If the slot lies outside the window.
    pub fn chunk_view_mut(&mut self, sx: u32, sy: u32) -> VolumeView<'_> {
        let range = self.slot_range(sx, sy);
        VolumeView::from_exact(self.chunk_extent, &mut self.voxels[range])
    }

    /// Whole window as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }

    /// Generate every chunk of the window in parallel.
    ///
    /// Each chunk gets its own random stream derived from `world_seed` and
    /// its coordinate, so the result does not depend on scheduling.
    pub fn generate<N: CoherentNoise>(
        &mut self,
        generator: &ChunkGenerator<N>,
        world_seed: u64,
    ) -> Result<Vec<GenerationStats>> {
        let extent = self.chunk_extent;
        let coords: Vec<ChunkCoord> = (0..self.chunk_count() as u32)
            .map(|slot| self.coord_of(slot % self.axis(), slot / self.axis()))
            .collect();

        log::info!(
            "Generating {} chunks around ({}, {})",
            coords.len(),
            self.center.x,
            self.center.y
        );

        self.voxels
            .par_chunks_mut(extent.len())
            .zip(coords.par_iter())
            .map(|(cells, &coord)| {
                let mut view = VolumeView::new(extent, cells)?;
                let mut ctx = GenerationContext::for_chunk(world_seed, coord);
                Ok(generator.generate_into(&mut view, coord, &mut ctx))
            })
            .collect()
    }
}
