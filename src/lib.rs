//! Voxgen - SDF-driven procedural voxel chunk generation

pub mod core;
pub mod voxel;
pub mod generation;
