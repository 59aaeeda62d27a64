//! Voxel data structures and operations

pub mod voxel;
pub mod volume;
pub mod chunk;
pub mod world;
pub mod distance;
pub mod sdf;

pub use chunk::{Chunk, ChunkCoord, CHUNK_EXTENT, CHUNK_VOXEL_COUNT};
pub use volume::{blit, Extent, Fragment, VolumeView, VoxelStore, VoxelVolume};
pub use voxel::{Material, Voxel};
pub use world::{LoadedChunks, DRAW_DISTANCE};
