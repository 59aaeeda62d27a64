use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voxgen::generation::tree_gen::build_tree_chain;
use voxgen::generation::{ChunkGenerator, GenerationConfig, GenerationContext};
use voxgen::voxel::distance::propagate;
use voxgen::voxel::{ChunkCoord, Extent, Material, Voxel, VoxelStore, VoxelVolume};

fn bench_tree_chain_dist(c: &mut Criterion) {
    let params = GenerationConfig::default().trees;
    let chain = build_tree_chain(&params, &mut ChaCha8Rng::seed_from_u64(1));
    let p = Vec3::new(24.0, 24.0, 30.0);

    c.bench_function("tree_chain_dist", |b| {
        b.iter(|| chain.dist(black_box(p)));
    });
}

fn bench_propagate_32(c: &mut Criterion) {
    let mut base = VoxelVolume::new(32, 32, 32);
    for y in 0..32 {
        for x in 0..32 {
            for z in 0..8 {
                base.set(x, y, z, Voxel::filled(Material::Stone));
            }
        }
    }

    c.bench_function("propagate_32", |b| {
        b.iter(|| {
            let mut vol = base.clone();
            propagate(&mut vol, black_box(8))
        });
    });
}

fn bench_generate_small_chunk(c: &mut Criterion) {
    let mut config = GenerationConfig::default();
    config.seed = Some(7);
    config.terrain.surface_height = 4.0;
    config.terrain.stone_height = 3.0;
    let generator = ChunkGenerator::new(config).expect("valid config");
    let extent = Extent::new(64, 64, 128);
    let coord = ChunkCoord::new(0, 0);

    let mut group = c.benchmark_group("generation");
    group.sample_size(10);
    group.bench_function("chunk_64x64x128", |b| {
        b.iter(|| {
            let mut ctx = GenerationContext::from_seed(7);
            generator.generate_chunk_with_extent(black_box(coord), extent, &mut ctx)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tree_chain_dist,
    bench_propagate_32,
    bench_generate_small_chunk,
);
criterion_main!(benches);
