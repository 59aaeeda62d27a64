//! Chunk generation pipeline.
//!
//! The pipeline runs, in order:
//! 1. Terrain fill (stone, dirt, grass, optional caves)
//! 2. Droplet erosion (optional)
//! 3. Grass blade scattering
//! 4. Trees
//! 5. Buildings
//! 6. Distance-field propagation (optional)
//!
//! All randomness comes from the [`GenerationContext`] handed in, so a seed
//! and a chunk coordinate fully determine the output.

pub mod config;
pub mod context;
pub mod noise;
pub mod terrain_gen;
pub mod vegetation_gen;
pub mod tree_gen;
pub mod building_gen;
pub mod erosion;

pub use config::{GenerationConfig, Span};
pub use context::GenerationContext;
pub use erosion::ErosionStats;
pub use noise::{CoherentNoise, PerlinNoise};
pub use terrain_gen::HeightMap;

use glam::IVec3;
use serde::Serialize;

use crate::core::Result;
use crate::voxel::distance::{self, PropagationStats};
use crate::voxel::{Chunk, ChunkCoord, Extent, VoxelStore, CHUNK_EXTENT};

/// Where a fragment was stamped and how many cells it wrote
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub offset: IVec3,
    pub cells: usize,
}

/// Per-chunk counters from one pipeline run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub terrain_cells: usize,
    pub vegetation_cells: usize,
    pub trees: Vec<Placement>,
    pub buildings: Vec<Placement>,
    pub erosion: Option<ErosionStats>,
    pub propagation: Option<PropagationStats>,
}

/// Runs the generation stages for one chunk at a time.
///
/// Holds only read-only state, so one generator can be shared across
/// threads generating different chunks.
pub struct ChunkGenerator<N = PerlinNoise> {
    config: GenerationConfig,
    noise: N,
}

impl ChunkGenerator<PerlinNoise> {
    /// Create a generator using Perlin noise seeded from the terrain config.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let noise = PerlinNoise::new(config.terrain.noise_seed);
        Self::with_noise(config, noise)
    }
}

impl<N: CoherentNoise> ChunkGenerator<N> {
    /// Create a generator with a custom noise provider.
    pub fn with_noise(config: GenerationConfig, noise: N) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Context for a chunk: derived from the world seed when one is
    /// configured, fresh entropy otherwise.
    pub fn context_for(&self, coord: ChunkCoord) -> GenerationContext {
        match self.config.seed {
            Some(seed) => GenerationContext::for_chunk(seed, coord),
            None => GenerationContext::from_entropy(),
        }
    }

    /// Generate a full-size chunk.
    pub fn generate_chunk(&self, coord: ChunkCoord, ctx: &mut GenerationContext) -> Chunk {
        self.generate_chunk_with_extent(coord, CHUNK_EXTENT, ctx)
    }

    /// Generate a chunk of a custom size (tests, previews)
    pub fn generate_chunk_with_extent(
        &self,
        coord: ChunkCoord,
        extent: Extent,
        ctx: &mut GenerationContext,
    ) -> Chunk {
        let mut chunk = Chunk::with_extent(coord, extent);
        let stats = self.generate_into(chunk.volume_mut(), coord, ctx);
        log::info!(
            "Generated chunk ({}, {}): {} trees, {} buildings",
            coord.x,
            coord.y,
            stats.trees.len(),
            stats.buildings.len()
        );
        chunk
    }

    /// Run every stage on an empty store.
    ///
    /// The store's extent is taken as the chunk extent when placing terrain
    /// noise in world space.
    pub fn generate_into<S: VoxelStore + ?Sized>(
        &self,
        store: &mut S,
        coord: ChunkCoord,
        ctx: &mut GenerationContext,
    ) -> GenerationStats {
        let cfg = &self.config;
        let origin = coord.voxel_origin(store.extent());
        let mut stats = GenerationStats::default();

        let mut heights = terrain_gen::fill_terrain(store, &cfg.terrain, &self.noise, origin);
        stats.terrain_cells = store.filled_count();
        log::debug!("Terrain: {} cells", stats.terrain_cells);

        if cfg.erosion.enabled {
            stats.erosion = Some(erosion::erode(store, &mut heights, &cfg.erosion, ctx));
        }

        stats.vegetation_cells = vegetation_gen::scatter_vegetation(store, &heights, &cfg.vegetation, ctx);
        log::debug!("Vegetation: {} cells", stats.vegetation_cells);

        for _ in 0..cfg.trees.count {
            if let Some(p) = tree_gen::place_tree(store, &heights, &cfg.trees, ctx) {
                stats.trees.push(p);
            }
        }
        for _ in 0..cfg.buildings.count {
            if let Some(p) = building_gen::place_building(store, &heights, &cfg.buildings, ctx) {
                stats.buildings.push(p);
            }
        }

        if cfg.distance.enabled {
            stats.propagation = Some(distance::propagate(store, cfg.distance.max_search_radius));
        }
        stats
    }
}
