//! Dense voxel volumes with row-major flat addressing.
//!
//! Every volume stores its cells in one contiguous buffer indexed as
//! `x + y * width + z * width * depth`, with Z pointing up. Out-of-range
//! access through [`VoxelStore::get`]/[`VoxelStore::set`] panics: it always
//! means the pipeline was wired up wrong. [`blit`] is the one place where
//! out-of-range destinations are expected and silently clipped.

use std::collections::BTreeMap;

use glam::IVec3;

use crate::core::{Error, Result};
use crate::voxel::voxel::{Material, Voxel};

/// Dimensions of a volume in voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Size along X
    pub width: u32,
    /// Size along Y
    pub depth: u32,
    /// Size along Z (up)
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, depth: u32, height: u32) -> Self {
        Self { width, depth, height }
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width as usize * self.depth as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of (x, y) columns
    pub const fn area(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && y >= 0 && z >= 0
            && (x as u32) < self.width
            && (y as u32) < self.depth
            && (z as u32) < self.height
    }

    /// Flat index of an in-range coordinate
    #[inline]
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.contains(x, y, z) {
            return None;
        }
        let (w, d) = (self.width as usize, self.depth as usize);
        Some(x as usize + y as usize * w + z as usize * w * d)
    }

    /// Inverse of [`Extent::index`]
    #[inline]
    pub fn coords(&self, index: usize) -> IVec3 {
        let (w, d) = (self.width as usize, self.depth as usize);
        IVec3::new(
            (index % w) as i32,
            ((index / w) % d) as i32,
            (index / (w * d)) as i32,
        )
    }
}

/// Read/write access to a dense voxel grid.
///
/// Implemented by owned volumes and by views into a larger buffer, so the
/// generator can write either into a standalone chunk or straight into a
/// world window.
pub trait VoxelStore {
    fn extent(&self) -> Extent;
    fn voxels(&self) -> &[Voxel];
    fn voxels_mut(&mut self) -> &mut [Voxel];

    #[inline]
    fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.extent().contains(x, y, z)
    }

    /// Flat index of `(x, y, z)`.
    ///
    /// # Panics
    /// If the coordinate lies outside the volume.
    #[inline]
    fn index_of(&self, x: i32, y: i32, z: i32) -> usize {
        let e = self.extent();
        match e.index(x, y, z) {
            Some(i) => i,
            None => panic!(
                "voxel ({}, {}, {}) out of range for {}x{}x{} volume",
                x, y, z, e.width, e.depth, e.height
            ),
        }
    }

    /// # Panics
    /// If the coordinate lies outside the volume.
    #[inline]
    fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.voxels()[self.index_of(x, y, z)]
    }

    /// # Panics
    /// If the coordinate lies outside the volume.
    #[inline]
    fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) {
        let i = self.index_of(x, y, z);
        self.voxels_mut()[i] = voxel;
    }

    /// Non-panicking read for callers that probe near edges
    #[inline]
    fn try_get(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.extent().index(x, y, z).map(|i| self.voxels()[i])
    }

    /// Height of the highest filled cell in a column, if any.
    fn column_top(&self, x: i32, y: i32) -> Option<i32> {
        let h = self.extent().height as i32;
        (0..h).rev().find(|&z| self.get(x, y, z).is_filled())
    }

    /// Count of filled cells per material. Unknown IDs are ignored.
    fn material_histogram(&self) -> BTreeMap<Material, usize> {
        let mut counts = BTreeMap::new();
        for m in self.voxels().iter().filter_map(|v| v.material()) {
            *counts.entry(m).or_insert(0) += 1;
        }
        counts
    }

    fn filled_count(&self) -> usize {
        self.voxels().iter().filter(|v| v.is_filled()).count()
    }

    /// True when every cell is either a known material or the empty sentinel
    /// 0, i.e. the state after generation and before distance propagation.
    fn is_encoding_valid(&self) -> bool {
        self.voxels().iter().all(|v| match v.raw() {
            0 => true,
            r if r < 0 => v.material().is_some(),
            _ => false,
        })
    }
}

/// Owned dense volume: a whole chunk, or a small scratch fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelVolume {
    extent: Extent,
    voxels: Vec<Voxel>,
}

/// Scratch volume holding one procedural object before it is blitted.
pub type Fragment = VoxelVolume;

impl VoxelVolume {
    /// Create an all-empty volume
    pub fn new(width: u32, depth: u32, height: u32) -> Self {
        let extent = Extent::new(width, depth, height);
        Self {
            extent,
            voxels: vec![Voxel::EMPTY; extent.len()],
        }
    }

    /// Wrap an existing buffer; its length must match the extent.
    pub fn from_voxels(extent: Extent, voxels: Vec<Voxel>) -> Result<Self> {
        if voxels.len() != extent.len() {
            return Err(Error::Voxel(format!(
                "buffer of {} cells does not match {}x{}x{} volume",
                voxels.len(), extent.width, extent.depth, extent.height
            )));
        }
        Ok(Self { extent, voxels })
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Set every cell to `voxel`
    pub fn fill(&mut self, voxel: Voxel) {
        self.voxels.fill(voxel);
    }

    /// Borrow as a view (same addressing, no copy)
    pub fn view_mut(&mut self) -> VolumeView<'_> {
        VolumeView { extent: self.extent, voxels: &mut self.voxels }
    }

    /// Give up the buffer
    pub fn into_voxels(self) -> Vec<Voxel> {
        self.voxels
    }
}

impl VoxelStore for VoxelVolume {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }
}

/// Volume addressing over a borrowed slice of a larger buffer.
#[derive(Debug)]
pub struct VolumeView<'a> {
    extent: Extent,
    voxels: &'a mut [Voxel],
}

impl<'a> VolumeView<'a> {
    pub fn new(extent: Extent, voxels: &'a mut [Voxel]) -> Result<Self> {
        if voxels.len() != extent.len() {
            return Err(Error::Voxel(format!(
                "slice of {} cells does not match {}x{}x{} view",
                voxels.len(), extent.width, extent.depth, extent.height
            )));
        }
        Ok(Self { extent, voxels })
    }

    /// For callers that already sliced exactly `extent.len()` cells
    pub(crate) fn from_exact(extent: Extent, voxels: &'a mut [Voxel]) -> Self {
        debug_assert_eq!(voxels.len(), extent.len());
        Self { extent, voxels }
    }
}

impl VoxelStore for VolumeView<'_> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn voxels(&self) -> &[Voxel] {
        &*self.voxels
    }

    fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut *self.voxels
    }
}

/// Stamp the filled cells of `src` into `dst` with `src`'s origin at `offset`.
///
/// Empty source cells never overwrite the destination, and destinations
/// outside `dst` are skipped so objects can hang over chunk edges. Returns
/// the number of cells written.
pub fn blit<S: VoxelStore + ?Sized>(dst: &mut S, src: &VoxelVolume, offset: IVec3) -> usize {
    let se = src.extent;
    let de = dst.extent();

    // Clip the source range to what lands inside the destination
    let lo = |o: i32| (-o).max(0);
    let hi = |o: i32, src_len: u32, dst_len: u32| (dst_len as i32 - o).min(src_len as i32);
    let (x0, x1) = (lo(offset.x), hi(offset.x, se.width, de.width));
    let (y0, y1) = (lo(offset.y), hi(offset.y, se.depth, de.depth));
    let (z0, z1) = (lo(offset.z), hi(offset.z, se.height, de.height));

    let mut written = 0;
    for z in z0..z1 {
        for y in y0..y1 {
            for x in x0..x1 {
                let v = src.get(x, y, z);
                if v.is_filled() {
                    dst.set(x + offset.x, y + offset.y, z + offset.z, v);
                    written += 1;
                }
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        let e = Extent::new(4, 3, 2);
        assert_eq!(e.index(0, 0, 0), Some(0));
        assert_eq!(e.index(1, 0, 0), Some(1));
        assert_eq!(e.index(0, 1, 0), Some(4));
        assert_eq!(e.index(0, 0, 1), Some(12));
        assert_eq!(e.index(3, 2, 1), Some(23));
        assert_eq!(e.index(4, 0, 0), None);
        assert_eq!(e.index(-1, 0, 0), None);
        assert_eq!(e.len(), 24);
    }

    #[test]
    fn test_coords_inverse() {
        let e = Extent::new(5, 7, 3);
        for i in 0..e.len() {
            let c = e.coords(i);
            assert_eq!(e.index(c.x, c.y, c.z), Some(i));
        }
    }

    #[test]
    fn test_get_set() {
        let mut v = VoxelVolume::new(8, 8, 8);
        assert_eq!(v.get(3, 4, 5), Voxel::EMPTY);
        v.set(3, 4, 5, Voxel::filled(Material::Stone));
        assert_eq!(v.get(3, 4, 5).material(), Some(Material::Stone));
        assert_eq!(v.filled_count(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let v = VoxelVolume::new(4, 4, 4);
        v.get(4, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_negative_panics() {
        let mut v = VoxelVolume::new(4, 4, 4);
        v.set(0, -1, 0, Voxel::filled(Material::Dirt));
    }

    #[test]
    fn test_try_get() {
        let v = VoxelVolume::new(4, 4, 4);
        assert_eq!(v.try_get(0, 0, 0), Some(Voxel::EMPTY));
        assert_eq!(v.try_get(0, 0, 4), None);
    }

    #[test]
    fn test_from_voxels_length_mismatch() {
        let e = Extent::new(2, 2, 2);
        assert!(VoxelVolume::from_voxels(e, vec![Voxel::EMPTY; 8]).is_ok());
        assert!(VoxelVolume::from_voxels(e, vec![Voxel::EMPTY; 7]).is_err());
    }

    #[test]
    fn test_view_shares_buffer() {
        let mut v = VoxelVolume::new(4, 4, 4);
        {
            let mut view = v.view_mut();
            view.set(1, 2, 3, Voxel::filled(Material::Wood));
        }
        assert_eq!(v.get(1, 2, 3).material(), Some(Material::Wood));
    }

    #[test]
    fn test_column_top() {
        let mut v = VoxelVolume::new(2, 2, 10);
        assert_eq!(v.column_top(0, 0), None);
        v.set(0, 0, 0, Voxel::filled(Material::Stone));
        v.set(0, 0, 6, Voxel::filled(Material::Grass));
        assert_eq!(v.column_top(0, 0), Some(6));
    }

    #[test]
    fn test_encoding_valid() {
        let mut v = VoxelVolume::new(2, 2, 2);
        assert!(v.is_encoding_valid());
        v.set(0, 0, 0, Voxel::filled(Material::Glass));
        assert!(v.is_encoding_valid());
        v.set(1, 0, 0, Voxel::distance(3));
        assert!(!v.is_encoding_valid());
    }

    #[test]
    fn test_histogram() {
        let mut v = VoxelVolume::new(4, 1, 1);
        v.set(0, 0, 0, Voxel::filled(Material::Stone));
        v.set(1, 0, 0, Voxel::filled(Material::Stone));
        v.set(2, 0, 0, Voxel::filled(Material::Dirt));
        let h = v.material_histogram();
        assert_eq!(h.get(&Material::Stone), Some(&2));
        assert_eq!(h.get(&Material::Dirt), Some(&1));
        assert_eq!(h.get(&Material::Grass), None);
    }

    #[test]
    fn test_blit_empty_fragment_is_noop() {
        let mut chunk = VoxelVolume::new(8, 8, 8);
        for z in 0..4 {
            for y in 0..8 {
                for x in 0..8 {
                    chunk.set(x, y, z, Voxel::filled(Material::Dirt));
                }
            }
        }
        let before = chunk.clone();
        let fragment = Fragment::new(4, 4, 4);
        assert_eq!(blit(&mut chunk, &fragment, IVec3::new(2, 2, 2)), 0);
        assert_eq!(chunk, before);
    }

    #[test]
    fn test_blit_copies_filled_only() {
        let mut chunk = VoxelVolume::new(8, 8, 8);
        chunk.set(3, 3, 3, Voxel::filled(Material::Stone));
        chunk.set(4, 3, 3, Voxel::filled(Material::Stone));

        let mut fragment = Fragment::new(2, 1, 1);
        fragment.set(1, 0, 0, Voxel::filled(Material::Bark));

        let written = blit(&mut chunk, &fragment, IVec3::new(3, 3, 3));
        assert_eq!(written, 1);
        // Empty fragment cell left the stone alone
        assert_eq!(chunk.get(3, 3, 3).material(), Some(Material::Stone));
        assert_eq!(chunk.get(4, 3, 3).material(), Some(Material::Bark));
    }

    #[test]
    fn test_blit_clips_at_edges() {
        let mut chunk = VoxelVolume::new(4, 4, 4);
        let mut fragment = Fragment::new(3, 3, 3);
        fragment.fill(Voxel::filled(Material::Wood));

        // Hangs over the +X/+Y corner
        let written = blit(&mut chunk, &fragment, IVec3::new(2, 2, 0));
        assert_eq!(written, 2 * 2 * 3);

        // Hangs over the negative side
        let mut chunk = VoxelVolume::new(4, 4, 4);
        let written = blit(&mut chunk, &fragment, IVec3::new(-2, -1, -2));
        assert_eq!(written, 2);
        assert!(chunk.get(0, 0, 0).is_filled());

        // Entirely outside
        let mut chunk = VoxelVolume::new(4, 4, 4);
        assert_eq!(blit(&mut chunk, &fragment, IVec3::new(10, 0, 0)), 0);
    }
}
