//! Tree removal by flood fill

use glam::IVec3;

use super::neighbors;
use crate::voxel::block::Block;
use crate::voxel::world::VoxelAccess;

/// Counters collected while deleting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionStats {
    /// Positions taken off the stack, repeats included
    pub visited: usize,
    /// Non-air blocks cleared
    pub voxels_deleted: usize,
}

/// Clear the tree touching `seed`.
///
/// Walks a stack from `seed`; every neighbour (26-connected) whose block
/// exactly equals one of `materials` (id and data) is pushed, then the
/// popped block is cleared. The seed itself is cleared whatever it holds.
/// No visited set is kept: a cleared block no longer matches, and a block
/// pushed twice before it is cleared is simply cleared twice.
pub fn delete_tree<W: VoxelAccess + ?Sized>(
    world: &mut W,
    seed: IVec3,
    materials: &[Block],
) -> DeletionStats {
    let mut stats = DeletionStats::default();
    let mut stack = vec![seed];

    while let Some(pos) = stack.pop() {
        stats.visited += 1;
        for n in neighbors(pos) {
            if materials.contains(&world.block_at(n)) {
                stack.push(n);
            }
        }

        if !world.block_at(pos).is_air() {
            stats.voxels_deleted += 1;
        }
        world.set_block(pos, Block::AIR);
    }

    log::info!(
        "Deleted tree at {}: {} blocks cleared ({} visits)",
        seed,
        stats.voxels_deleted,
        stats.visited
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::block::ids;
    use crate::voxel::world::BlockWorld;

    const TRUNK: Block = Block::new(ids::LOG, 0);
    const BRANCH: Block = Block::new(ids::LOG, 1);
    const LEAVES: Block = Block::new(ids::LEAVES, 0);
    const MATERIALS: [Block; 3] = [TRUNK, BRANCH, LEAVES];

    #[test]
    fn test_deletes_connected_structure_only() {
        let mut world = BlockWorld::new();
        let mut tree = Vec::new();
        for y in 0..6 {
            tree.push(IVec3::new(0, y, 0));
        }
        // Branch joined only at an edge, leaf joined only at a corner
        tree.push(IVec3::new(1, 6, 0));
        tree.push(IVec3::new(2, 7, 1));
        for p in &tree {
            world.set_block(*p, TRUNK);
        }
        world.set_block(IVec3::new(1, 6, 0), BRANCH);
        world.set_block(IVec3::new(2, 7, 1), LEAVES);

        // Same material two blocks from the structure: not touching
        let isolated = IVec3::new(4, 7, 1);
        world.set_block(isolated, LEAVES);

        let stats = delete_tree(&mut world, IVec3::ZERO, &MATERIALS);

        assert_eq!(stats.voxels_deleted, tree.len());
        for p in &tree {
            assert!(world.block_at(*p).is_air(), "{} not deleted", p);
        }
        assert_eq!(world.block_at(isolated), LEAVES);
        assert_eq!(world.block_count(), 1);
    }

    #[test]
    fn test_data_value_must_match() {
        let mut world = BlockWorld::new();
        world.set_block(IVec3::new(0, 0, 0), TRUNK);
        world.set_block(IVec3::new(0, 1, 0), TRUNK);
        // Different variant of the same wood is left alone, and so is
        // anything beyond it
        let other_wood = Block::new(ids::LOG, 2);
        world.set_block(IVec3::new(0, 2, 0), other_wood);
        world.set_block(IVec3::new(0, 3, 0), TRUNK);

        delete_tree(&mut world, IVec3::ZERO, &MATERIALS);

        assert!(world.block_at(IVec3::new(0, 1, 0)).is_air());
        assert_eq!(world.block_at(IVec3::new(0, 2, 0)), other_wood);
        assert_eq!(world.block_at(IVec3::new(0, 3, 0)), TRUNK);
    }

    #[test]
    fn test_seed_is_always_cleared() {
        let mut world = BlockWorld::new();
        let stone = Block::new(1, 0);
        world.set_block(IVec3::ZERO, stone);
        world.set_block(IVec3::new(1, 0, 0), LEAVES);

        let stats = delete_tree(&mut world, IVec3::ZERO, &MATERIALS);

        assert_eq!(stats.voxels_deleted, 2);
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn test_empty_seed_with_no_tree() {
        let mut world = BlockWorld::new();
        world.set_block(IVec3::new(5, 5, 5), TRUNK);
        let stats = delete_tree(&mut world, IVec3::ZERO, &MATERIALS);
        assert_eq!(stats, DeletionStats { visited: 1, voxels_deleted: 0 });
        assert_eq!(world.block_count(), 1);
    }
}
