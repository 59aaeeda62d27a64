//! Generation configuration.
//!
//! Chunk dimensions and resolution are build-time constants in
//! [`crate::voxel::chunk`]. Everything tunable per run lives here and can be
//! loaded from JSON. Terrain bands are in meters; object shapes are sized in
//! voxels because they are sampled straight into fragments.

use std::path::Path;

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::voxel::Material;
use crate::voxel::distance::DEFAULT_MAX_SEARCH_RADIUS;

/// Inclusive range a parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }

    fn check(&self, name: &str) -> Result<()> {
        // Negated so NaN bounds are rejected too
        if !(self.min <= self.max) {
            return Err(Error::Config(format!("{}: min is greater than max", name)));
        }
        Ok(())
    }
}

/// Layered terrain fill
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Seed of the coherent-noise provider
    pub noise_seed: u32,
    /// Mean grass surface height (meters)
    pub surface_height: f32,
    /// Surface noise amplitude (meters)
    pub surface_amplitude: f32,
    /// Voxels per surface-noise period
    pub surface_scale: f32,
    /// Mean top of the stone band (meters)
    pub stone_height: f32,
    /// Stone-top noise amplitude (meters)
    pub stone_amplitude: f32,
    /// Voxels per stone-noise period
    pub stone_scale: f32,
    /// Caves are only carved below this height (meters)
    pub cave_ceiling: f32,
    /// Voxels per cave-noise period
    pub cave_scale: f32,
    /// Cells whose cave noise exceeds this stay empty; >= 1 disables caves
    pub cave_threshold: f32,
    pub cave_octaves: u32,
    pub cave_persistence: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            noise_seed: 12345,
            surface_height: 20.0,
            surface_amplitude: 2.0,
            surface_scale: 48.0,
            stone_height: 16.0,
            stone_amplitude: 1.5,
            stone_scale: 32.0,
            cave_ceiling: 12.0,
            cave_scale: 32.0,
            cave_threshold: 0.35,
            cave_octaves: 3,
            cave_persistence: 0.5,
        }
    }
}

/// Grass blades scattered over the surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationParams {
    /// Blades per surface column
    pub density: f32,
    /// Longest blade in voxels
    pub max_blade_length: u32,
    /// Chance that a blade bends sideways once past its bend point
    pub bend_chance: f32,
    pub material: Material,
}

impl Default for VegetationParams {
    fn default() -> Self {
        Self {
            density: 0.05,
            max_blade_length: 4,
            bend_chance: 0.5,
            material: Material::Grass,
        }
    }
}

/// Procedural trees. Lengths are in voxels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Trees per chunk
    pub count: u32,
    /// Fragment bounding box (voxels)
    pub fragment_width: u32,
    pub fragment_depth: u32,
    pub fragment_height: u32,
    /// Root sphere radius before flattening
    pub root_radius: f32,
    /// Vertical squash of the root sphere
    pub root_flatten: f32,
    /// Trunk height as a fraction of the fragment height
    pub trunk_height: Span<f32>,
    pub trunk_radius: Span<f32>,
    /// Top radius as a fraction of the base radius
    pub trunk_taper: f32,
    /// Largest trunk lean (radians)
    pub max_tilt: f32,
    pub branch_count: Span<u32>,
    pub branch_radius: Span<f32>,
    /// Attachment height as a fraction of trunk height
    pub branch_attach: Span<f32>,
    pub branch_length: Span<f32>,
    /// Upward angle of a branch at its root (radians)
    pub branch_pitch: Span<f32>,
    pub branch_curve: Span<f32>,
    pub branch_curve_power: f32,
    /// Amplitude of the sine roughening on bark; 0 disables it
    pub bark_roughness: f32,
    pub bark_frequency: f32,
    pub material: Material,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            count: 2,
            fragment_width: 48,
            fragment_depth: 48,
            fragment_height: 96,
            root_radius: 6.0,
            root_flatten: 0.35,
            trunk_height: Span::new(0.55, 0.8),
            trunk_radius: Span::new(2.5, 3.5),
            trunk_taper: 0.45,
            max_tilt: 0.12,
            branch_count: Span::new(3, 6),
            branch_radius: Span::new(0.9, 1.6),
            branch_attach: Span::new(0.45, 0.9),
            branch_length: Span::new(10.0, 18.0),
            branch_pitch: Span::new(0.2, 0.7),
            branch_curve: Span::new(0.5, 1.5),
            branch_curve_power: 1.5,
            bark_roughness: 0.25,
            bark_frequency: 1.3,
            material: Material::Bark,
        }
    }
}

/// Procedural huts. Lengths are in voxels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingParams {
    /// Buildings per chunk
    pub count: u32,
    pub width: Span<u32>,
    pub depth: Span<u32>,
    pub wall_height: Span<u32>,
    pub wall_thickness: u32,
    pub base_thickness: u32,
    pub door_width: Span<u32>,
    pub door_height: Span<u32>,
    /// Minimum gap between the door and a corner
    pub door_margin: u32,
    pub base_material: Material,
    pub wall_material: Material,
}

impl Default for BuildingParams {
    fn default() -> Self {
        Self {
            count: 0,
            width: Span::new(24, 40),
            depth: Span::new(20, 32),
            wall_height: Span::new(16, 24),
            wall_thickness: 2,
            base_thickness: 2,
            door_width: Span::new(6, 10),
            door_height: Span::new(12, 15),
            door_margin: 3,
            base_material: Material::Stone,
            wall_material: Material::Wood,
        }
    }
}

/// Droplet erosion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionParams {
    pub enabled: bool,
    /// Droplets per surface column
    pub droplets_per_column: f32,
    /// Energy a droplet starts with
    pub initial_energy: u32,
    /// Energy spent per horizontal move
    pub move_cost: u32,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            enabled: false,
            droplets_per_column: 2.0,
            initial_energy: 8,
            move_cost: 1,
        }
    }
}

/// Distance-field propagation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceParams {
    pub enabled: bool,
    pub max_search_radius: u32,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            enabled: false,
            max_search_radius: DEFAULT_MAX_SEARCH_RADIUS,
        }
    }
}

/// Configuration for the chunk generation pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// World seed. `None` draws fresh entropy for every chunk.
    pub seed: Option<u64>,
    pub terrain: TerrainParams,
    pub vegetation: VegetationParams,
    pub trees: TreeParams,
    pub buildings: BuildingParams,
    pub erosion: ErosionParams,
    pub distance: DistanceParams,
}

impl GenerationConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded generation config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would break generation.
    pub fn validate(&self) -> Result<()> {
        let t = &self.terrain;
        for (name, scale) in [
            ("terrain.surface_scale", t.surface_scale),
            ("terrain.stone_scale", t.stone_scale),
            ("terrain.cave_scale", t.cave_scale),
        ] {
            if scale <= 0.0 {
                return Err(Error::Config(format!("{} must be positive", name)));
            }
        }

        let v = &self.vegetation;
        if !(0.0..=1.0).contains(&v.density) {
            return Err(Error::Config("vegetation.density must be within [0, 1]".into()));
        }
        if v.max_blade_length == 0 {
            return Err(Error::Config("vegetation.max_blade_length must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&v.bend_chance) {
            return Err(Error::Config("vegetation.bend_chance must be within [0, 1]".into()));
        }

        let tr = &self.trees;
        if tr.fragment_width == 0 || tr.fragment_depth == 0 || tr.fragment_height == 0 {
            return Err(Error::Config("trees: fragment must not be empty".into()));
        }
        if tr.root_radius <= 0.0 || tr.root_flatten <= 0.0 {
            return Err(Error::Config("trees: root radius and flatten must be positive".into()));
        }
        tr.trunk_height.check("trees.trunk_height")?;
        tr.trunk_radius.check("trees.trunk_radius")?;
        tr.branch_count.check("trees.branch_count")?;
        tr.branch_radius.check("trees.branch_radius")?;
        tr.branch_attach.check("trees.branch_attach")?;
        tr.branch_length.check("trees.branch_length")?;
        tr.branch_pitch.check("trees.branch_pitch")?;
        tr.branch_curve.check("trees.branch_curve")?;
        if !(tr.max_tilt >= 0.0) {
            return Err(Error::Config("trees.max_tilt must not be negative".into()));
        }
        if !(tr.trunk_radius.min > 0.0 && tr.branch_radius.min > 0.0 && tr.trunk_taper > 0.0) {
            return Err(Error::Config("trees: radii and taper must be positive".into()));
        }
        if !(tr.branch_attach.min >= 0.0 && tr.branch_attach.max <= 1.0) {
            return Err(Error::Config("trees.branch_attach must be within [0, 1]".into()));
        }
        if tr.trunk_height.min <= 0.0 || tr.branch_length.min <= 0.0 {
            return Err(Error::Config("trees: trunk height and branch length must be positive".into()));
        }

        let b = &self.buildings;
        b.width.check("buildings.width")?;
        b.depth.check("buildings.depth")?;
        b.wall_height.check("buildings.wall_height")?;
        b.door_width.check("buildings.door_width")?;
        b.door_height.check("buildings.door_height")?;
        if b.wall_thickness == 0 || b.depth.min < 2 * b.wall_thickness + 1 {
            return Err(Error::Config("buildings: walls leave no interior".into()));
        }
        if b.width.min < 2 * (b.wall_thickness + b.door_margin) + b.door_width.min {
            return Err(Error::Config("buildings.width too small for the door and margins".into()));
        }
        if b.wall_height.min < 2 {
            return Err(Error::Config("buildings.wall_height must be at least 2".into()));
        }

        if self.erosion.move_cost == 0 {
            return Err(Error::Config("erosion.move_cost must be at least 1".into()));
        }
        if self.distance.max_search_radius == 0 {
            return Err(Error::Config("distance.max_search_radius must be at least 1".into()));
        }
        Ok(())
    }
}
