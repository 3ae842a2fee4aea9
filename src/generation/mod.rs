//! Operation entry point: parses host options and runs one of the tree tools.
//!
//! The pipeline is:
//! 1. Parse and validate every option into a `TreeConfig` (no voxel is touched on failure)
//! 2. Run the selected operation from the region's minimum corner
//! 3. Report the region back through `VoxelAccess::mark_dirty`

pub mod config;
pub mod options;

pub use config::TreeConfig;
pub use options::{OptionValue, TreeOptions};

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::math::BlockBox;
use crate::voxel::edit::{delete_tree, remove_decayable_leaves, DecayStats, DeletionStats};
use crate::voxel::procgen::{GrowthStats, TreeGrower};
use crate::voxel::world::VoxelAccess;

/// The three tools the host can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTree,
    DeleteTree,
    RemoveDecayableLeaves,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::CreateTree,
        Operation::DeleteTree,
        Operation::RemoveDecayableLeaves,
    ];

    /// Name as the host shows it
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CreateTree => "Create Tree",
            Operation::DeleteTree => "Delete Tree",
            Operation::RemoveDecayableLeaves => "Remove Decay-able Leaves",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.label() == name)
            .ok_or_else(|| ConfigError::UnknownOperation(name.to_string()))
    }
}

/// Per-operation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStats {
    Growth(GrowthStats),
    Deletion(DeletionStats),
    Decay(DecayStats),
}

/// What ran and which region was reported dirty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationReport {
    pub operation: Operation,
    pub region: BlockBox,
    pub stats: OperationStats,
}

/// Parse `options` and run the selected operation against `world`.
///
/// Only `region.min` is used as the seed. Configuration errors are returned
/// before any block is written.
pub fn perform<W, R>(
    world: &mut W,
    region: BlockBox,
    options: &TreeOptions,
    rng: R,
) -> Result<OperationReport>
where
    W: VoxelAccess + ?Sized,
    R: Rng,
{
    let config = TreeConfig::from_options(options)?;
    run(world, region, &config, rng)
}

/// Run an already validated configuration.
///
/// The region is marked dirty even when growth fails part way, since the
/// blocks written so far stay in the world.
pub fn run<W, R>(
    world: &mut W,
    region: BlockBox,
    config: &TreeConfig,
    rng: R,
) -> Result<OperationReport>
where
    W: VoxelAccess + ?Sized,
    R: Rng,
{
    let seed = region.min;
    log::info!("{} at {}", config.operation, seed);

    let outcome = match config.operation {
        Operation::CreateTree => {
            let mut grower = TreeGrower::new(&config.params, rng);
            if let Some(limit) = config.max_sampling_attempts {
                grower = grower.with_sampling_limit(limit);
            }
            grower.grow(world, seed).map(OperationStats::Growth)
        }
        Operation::DeleteTree => {
            let stats = delete_tree(world, seed, &config.tree_materials());
            Ok(OperationStats::Deletion(stats))
        }
        Operation::RemoveDecayableLeaves => {
            let stats = remove_decayable_leaves(world, seed, &config.decay);
            Ok(OperationStats::Decay(stats))
        }
    };

    world.mark_dirty(region);
    let stats = outcome?;

    Ok(OperationReport {
        operation: config.operation,
        region,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::generation::options::keys;
    use crate::voxel::block::{ids, Block};
    use crate::voxel::world::BlockWorld;
    use glam::IVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_tree() -> TreeOptions {
        let mut options = TreeOptions::defaults();
        options.set(keys::TRUNK_MAX_LIFE, 20);
        options
    }

    #[test]
    fn test_operation_names() {
        for op in Operation::ALL {
            assert_eq!(op.label().parse::<Operation>(), Ok(op));
            assert_eq!(op.to_string(), op.label());
        }
        assert_eq!(
            "Grow Shrub".parse::<Operation>(),
            Err(ConfigError::UnknownOperation("Grow Shrub".to_string()))
        );
    }

    #[test]
    fn test_bad_config_leaves_world_untouched() {
        let mut world = BlockWorld::new();
        world.set_block(IVec3::new(3, 3, 3), Block::new(ids::LOG, 0));
        let mut options = small_tree();
        options.remove(keys::BRANCH_MATERIAL);

        let region = BlockBox::from_point(IVec3::ZERO);
        let result = perform(&mut world, region, &options, ChaCha8Rng::seed_from_u64(1));
        assert!(matches!(result, Err(Error::Config(ConfigError::Missing(_)))));
        assert_eq!(world.block_count(), 1);
        assert!(world.take_dirty().is_empty());
    }

    #[test]
    fn test_create_reports_region() {
        let mut world = BlockWorld::new();
        let region = BlockBox::new(IVec3::new(10, 64, -5), IVec3::new(20, 80, 5));
        let report =
            perform(&mut world, region, &small_tree(), ChaCha8Rng::seed_from_u64(7)).unwrap();

        assert_eq!(report.operation, Operation::CreateTree);
        assert_eq!(report.region, region);
        assert_eq!(world.take_dirty(), vec![region]);
        match report.stats {
            OperationStats::Growth(stats) => {
                assert!(stats.cells_processed > 0);
                assert!(stats.voxels_written > 0);
            }
            other => panic!("expected growth stats, got {:?}", other),
        }
        // Trunk base is stamped at the minimum corner
        assert_eq!(world.block_at(region.min), Block::new(ids::LOG, 0));
    }

    #[test]
    fn test_create_then_delete_empties_world() {
        let mut world = BlockWorld::new();
        let region = BlockBox::from_point(IVec3::new(0, 0, 0));
        perform(&mut world, region, &small_tree(), ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert!(world.block_count() > 0);

        let mut options = small_tree();
        options.set(keys::OPERATION, "Delete Tree");
        let report = perform(&mut world, region, &options, ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(world.block_count(), 0);
        match report.stats {
            OperationStats::Deletion(stats) => assert!(stats.voxels_deleted > 0),
            other => panic!("expected deletion stats, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_spares_other_materials() {
        let mut world = BlockWorld::new();
        let stone = Block::new(1, 0);
        world.set_block(IVec3::new(0, 0, 0), Block::new(ids::LOG, 0));
        world.set_block(IVec3::new(0, 1, 0), Block::new(ids::LOG, 0));
        world.set_block(IVec3::new(1, 0, 0), stone);

        let mut options = small_tree();
        options.set(keys::OPERATION, "Delete Tree");
        let region = BlockBox::from_point(IVec3::ZERO);
        perform(&mut world, region, &options, ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(world.block_count(), 1);
        assert_eq!(world.block_at(IVec3::new(1, 0, 0)), stone);
    }

    #[test]
    fn test_decay_operation() {
        let mut world = BlockWorld::new();
        let log = Block::new(ids::LOG, 0);
        let leaf = Block::new(ids::LEAVES, 0);
        world.set_block(IVec3::ZERO, log);
        // A straight line of leaves along +x: hops 1..=6
        for x in 1..=6 {
            world.set_block(IVec3::new(x, 0, 0), leaf);
        }

        let mut options = small_tree();
        options.set(keys::OPERATION, "Remove Decay-able Leaves");
        let region = BlockBox::from_point(IVec3::ZERO);
        let report = perform(&mut world, region, &options, ChaCha8Rng::seed_from_u64(0)).unwrap();

        match report.stats {
            OperationStats::Decay(stats) => {
                assert_eq!(stats.edge_logs, 1);
                assert_eq!(stats.removed_distant, 2);
            }
            other => panic!("expected decay stats, got {:?}", other),
        }
        for x in 1..=4 {
            assert_eq!(world.block_at(IVec3::new(x, 0, 0)), leaf);
        }
        assert!(world.block_at(IVec3::new(5, 0, 0)).is_air());
        assert!(world.block_at(IVec3::new(6, 0, 0)).is_air());
        assert_eq!(world.block_at(IVec3::ZERO), log);
    }

    #[test]
    fn test_sampling_limit_still_marks_dirty() {
        let mut options = small_tree();
        // Curve on every step, but no direction can be within 0..0.5 degrees while
        // also at least 1 degree away
        options
            .set(keys::CURVE_ONE_IN, 1)
            .set(keys::CURVE_MAX_ANGLE, 0.5)
            .set(keys::SPLIT_ONE_IN, 0);
        let config = TreeConfig::from_options(&options).unwrap().with_sampling_limit(50);

        let mut world = BlockWorld::new();
        let region = BlockBox::from_point(IVec3::ZERO);
        let result = run(&mut world, region, &config, ChaCha8Rng::seed_from_u64(9));
        assert!(matches!(result, Err(Error::SamplingExhausted { attempts: 50, .. })));
        assert_eq!(world.take_dirty(), vec![region]);
        // The first tick moves straight and draws before any curve is tried
        assert!(world.block_count() > 0);
    }
}
