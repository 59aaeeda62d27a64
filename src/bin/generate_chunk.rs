//! Chunk generator binary: generates one chunk (or a window of chunks) and
//! prints the generation stats as JSON.
//!
//! Usage: cargo run --release --bin generate_chunk -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>       Generation config (JSON); defaults otherwise
//!   --seed <SEED>         World seed, overrides the config
//!   --chunk-x <X>         Chunk X coordinate (default: 0)
//!   --chunk-y <Y>         Chunk Y coordinate (default: 0)
//!   --erode               Enable droplet erosion
//!   --propagate           Enable distance propagation
//!   --window              Generate the full draw-distance window around the chunk
//!   --output <PATH>       Write the raw voxel buffer (little-endian i32) here
//!   --dump-config <PATH>  Write the effective config and exit

use std::path::PathBuf;
use std::time::Instant;

use voxgen::core::Result;
use voxgen::generation::{ChunkGenerator, GenerationConfig};
use voxgen::voxel::{ChunkCoord, LoadedChunks, VoxelStore, DRAW_DISTANCE};

fn main() {
    voxgen::core::logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => GenerationConfig::load(&PathBuf::from(path))?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = parse_u64_arg(&args, "--seed") {
        config.seed = Some(seed);
    }
    if has_flag(&args, "--erode") {
        config.erosion.enabled = true;
    }
    if has_flag(&args, "--propagate") {
        config.distance.enabled = true;
    }

    if let Some(path) = parse_str_arg(&args, "--dump-config") {
        config.save(&PathBuf::from(&path))?;
        println!("Wrote config to {}", path);
        return Ok(());
    }

    let coord = ChunkCoord::new(
        parse_i32_arg(&args, "--chunk-x").unwrap_or(0),
        parse_i32_arg(&args, "--chunk-y").unwrap_or(0),
    );
    let output = parse_str_arg(&args, "--output").map(PathBuf::from);
    let generator = ChunkGenerator::new(config)?;
    let start = Instant::now();

    let (stats, bytes) = if has_flag(&args, "--window") {
        // A window needs one seed for all of its chunks
        let seed = generator.config().seed.unwrap_or_else(rand::random);
        let mut window = LoadedChunks::new(coord, DRAW_DISTANCE);
        let stats = window.generate(&generator, seed)?;
        (serde_json::to_value(&stats)?, window.as_bytes().to_vec())
    } else {
        let mut ctx = generator.context_for(coord);
        let mut chunk = voxgen::voxel::Chunk::new(coord);
        let stats = generator.generate_into(chunk.volume_mut(), coord, &mut ctx);
        log::info!("Materials: {:?}", chunk.volume().material_histogram());
        (serde_json::to_value(&stats)?, chunk.as_bytes().to_vec())
    };

    log::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if let Some(path) = output {
        std::fs::write(&path, &bytes)?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
