//! Chunk constants and the owned chunk volume

use glam::IVec3;

use crate::voxel::volume::{Extent, VoxelStore, VoxelVolume};
use crate::voxel::voxel::Voxel;

/// Width (and depth) of a chunk in world units (meters)
pub const CHUNK_WIDTH_METERS: u32 = 16;

/// Height of a chunk in meters
pub const CHUNK_HEIGHT_METERS: u32 = 32;

/// Voxels per meter - controls resolution (higher = finer detail)
/// 8 voxels/meter = 12.5cm voxels
pub const VOXELS_PER_METER: u32 = 8;

/// Number of voxels along a chunk's X and Y sides
pub const CHUNK_WIDTH_VOXELS: u32 = CHUNK_WIDTH_METERS * VOXELS_PER_METER;

/// Number of voxels along a chunk's Z side
pub const CHUNK_HEIGHT_VOXELS: u32 = CHUNK_HEIGHT_METERS * VOXELS_PER_METER;

/// Cells in one chunk: `width² × height`
pub const CHUNK_VOXEL_COUNT: usize =
    CHUNK_WIDTH_VOXELS as usize * CHUNK_WIDTH_VOXELS as usize * CHUNK_HEIGHT_VOXELS as usize;

/// Extent of a full chunk
pub const CHUNK_EXTENT: Extent = Extent::new(CHUNK_WIDTH_VOXELS, CHUNK_WIDTH_VOXELS, CHUNK_HEIGHT_VOXELS);

/// Convert meters to whole voxels (rounded down)
#[inline]
pub fn meters_to_voxels(meters: f32) -> i32 {
    (meters * VOXELS_PER_METER as f32).floor() as i32
}

/// Horizontal position of a chunk column in the world grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position given in meters
    pub fn from_world_pos(x: f32, y: f32) -> Self {
        let w = CHUNK_WIDTH_METERS as f32;
        Self {
            x: (x / w).floor() as i32,
            y: (y / w).floor() as i32,
        }
    }

    /// World voxel coordinate of this chunk's (0, 0, 0) cell for a chunk of
    /// the given extent
    pub fn voxel_origin(&self, extent: Extent) -> IVec3 {
        IVec3::new(self.x * extent.width as i32, self.y * extent.depth as i32, 0)
    }
}

/// A generated chunk: a full-size volume tagged with its grid position.
///
/// Produced by one generation call and then handed whole to the renderer.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    volume: VoxelVolume,
}

impl Chunk {
    /// Create a new empty chunk at the given coordinate
    pub fn new(coord: ChunkCoord) -> Self {
        Self::with_extent(coord, CHUNK_EXTENT)
    }

    /// Create an empty chunk of a custom size (tests, previews)
    pub fn with_extent(coord: ChunkCoord, extent: Extent) -> Self {
        Self {
            coord,
            volume: VoxelVolume::new(extent.width, extent.depth, extent.height),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut VoxelVolume {
        &mut self.volume
    }

    /// Raw cell buffer in the signed encoding, for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.volume.voxels())
    }

    /// Hand the buffer over to the consumer
    pub fn into_voxels(self) -> Vec<Voxel> {
        self.volume.into_voxels()
    }
}
