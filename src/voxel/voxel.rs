//! Voxel cell encoding

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Substance of a filled voxel.
///
/// Discriminants are the material IDs stored (negated) in filled cells and
/// are part of the contract with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum Material {
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Bark = 4,
    Wood = 5,
    Glass = 6,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Stone,
        Material::Dirt,
        Material::Grass,
        Material::Bark,
        Material::Wood,
        Material::Glass,
    ];

    /// Material ID (always positive)
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

/// Single voxel - exactly 4 bytes
///
/// - `v < 0`: filled, material ID is `-v`
/// - `v > 0`: empty, `v` voxels of clearance to the nearest filled cell
/// - `v == 0`: empty, distance unknown (or touching a filled cell)
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Voxel(i32);

impl Voxel {
    /// Empty voxel with no distance information
    pub const EMPTY: Voxel = Voxel(0);

    /// Filled voxel of the given material
    pub const fn filled(material: Material) -> Self {
        Self(-(material as i32))
    }

    /// Empty voxel carrying a clearance distance
    pub fn distance(voxels: u32) -> Self {
        debug_assert!(voxels <= i32::MAX as u32);
        Self(voxels as i32)
    }

    /// Reinterpret a raw cell value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn is_filled(self) -> bool {
        self.0 < 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 >= 0
    }

    /// Material of a filled voxel; `None` for empty cells or unknown IDs
    pub fn material(self) -> Option<Material> {
        if self.is_filled() {
            Material::from_id(-self.0)
        } else {
            None
        }
    }

    /// Clearance distance of an empty voxel; `None` for filled cells
    pub fn distance_value(self) -> Option<u32> {
        if self.is_empty() {
            Some(self.0 as u32)
        } else {
            None
        }
    }
}

impl From<Material> for Voxel {
    fn from(material: Material) -> Self {
        Voxel::filled(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Voxel>(), 4);
    }

    #[test]
    fn test_empty() {
        assert!(Voxel::EMPTY.is_empty());
        assert!(!Voxel::EMPTY.is_filled());
        assert_eq!(Voxel::EMPTY.material(), None);
        assert_eq!(Voxel::EMPTY.distance_value(), Some(0));
        assert_eq!(Voxel::default(), Voxel::EMPTY);
    }

    #[test]
    fn test_filled_encoding() {
        for m in Material::ALL {
            let v = Voxel::filled(m);
            assert!(v.is_filled());
            assert_eq!(v.raw(), -m.id());
            assert_eq!(v.material(), Some(m));
            assert_eq!(v.distance_value(), None);
        }
    }

    #[test]
    fn test_distance_encoding() {
        let v = Voxel::distance(7);
        assert!(v.is_empty());
        assert_eq!(v.raw(), 7);
        assert_eq!(v.distance_value(), Some(7));
    }

    #[test]
    fn test_material_ids() {
        assert_eq!(Material::from_id(1), Some(Material::Stone));
        assert_eq!(Material::from_id(6), Some(Material::Glass));
        assert_eq!(Material::from_id(0), None);
        assert_eq!(Material::from_id(42), None);
        assert!(Material::ALL.iter().all(|m| m.id() > 0));
    }

    #[test]
    fn test_unknown_material_id() {
        let v = Voxel::from_raw(-99);
        assert!(v.is_filled());
        assert_eq!(v.material(), None);
    }
}
