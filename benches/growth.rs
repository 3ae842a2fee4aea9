use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::IVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use voxel_arbor::generation::options::keys;
use voxel_arbor::generation::{TreeConfig, TreeOptions};
use voxel_arbor::voxel::edit::{analyze_decay, DecayRules};
use voxel_arbor::voxel::{BlockWorld, TreeGrower};

fn config_with_life(life: i32) -> TreeConfig {
    let mut options = TreeOptions::defaults();
    options.set(keys::TRUNK_MAX_LIFE, life);
    TreeConfig::from_options(&options).unwrap()
}

fn grown_world(life: i32, seed: u64) -> BlockWorld {
    let config = config_with_life(life);
    let mut world = BlockWorld::new();
    TreeGrower::new(&config.params, ChaCha8Rng::seed_from_u64(seed))
        .grow(&mut world, IVec3::ZERO)
        .unwrap();
    world
}

fn bench_grow_small(c: &mut Criterion) {
    let config = config_with_life(20);

    c.bench_function("grow_tree_life_20", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut world = BlockWorld::new();
            let mut grower = TreeGrower::new(&config.params, ChaCha8Rng::seed_from_u64(seed));
            grower.grow(&mut world, black_box(IVec3::ZERO)).unwrap()
        });
    });
}

fn bench_grow_straight(c: &mut Criterion) {
    let mut options = TreeOptions::defaults();
    options
        .set(keys::TRUNK_MAX_LIFE, 200)
        .set(keys::TRUNK_THICKNESS_RATIO, 0.05)
        .set(keys::SPLIT_ONE_IN, 0)
        .set(keys::CURVE_ONE_IN, 0)
        .set(keys::BRANCH_ONE_IN, 0)
        .set(keys::LEAVES_ONE_IN, 0)
        .set(keys::BRANCH_AT_END_OF_LIFE, false);
    let config = TreeConfig::from_options(&options).unwrap();

    c.bench_function("grow_straight_trunk_200", |b| {
        b.iter(|| {
            let mut world = BlockWorld::new();
            let mut grower = TreeGrower::new(&config.params, ChaCha8Rng::seed_from_u64(1));
            grower.grow(&mut world, black_box(IVec3::ZERO)).unwrap()
        });
    });
}

fn bench_decay_analysis(c: &mut Criterion) {
    let world = grown_world(20, 7);
    let rules = DecayRules::default();

    c.bench_function("decay_analysis_life_20", |b| {
        b.iter(|| analyze_decay(&world, black_box(IVec3::ZERO), &rules));
    });
}

criterion_group!(
    benches,
    bench_grow_small,
    bench_grow_straight,
    bench_decay_analysis,
);
criterion_main!(benches);
