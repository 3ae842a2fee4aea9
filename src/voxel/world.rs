//! Block access interface and a sparse in-memory world

use std::collections::HashMap;
use std::path::Path;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::math::BlockBox;
use crate::voxel::block::Block;

/// Read/write access to a block volume.
///
/// Coordinates are unbounded integers; range checking or clamping is up to
/// the implementation.
pub trait VoxelAccess {
    /// Block at a position (air where nothing is stored)
    fn block_at(&self, pos: IVec3) -> Block;

    /// Overwrite the block at a position
    fn set_block(&mut self, pos: IVec3, block: Block);

    /// Tell the host a region changed
    fn mark_dirty(&mut self, region: BlockBox);
}

/// Sparse block world: only non-air blocks are stored
#[derive(Debug, Default)]
pub struct BlockWorld {
    blocks: HashMap<IVec3, Block>,
    /// Regions reported through `mark_dirty` since the last `take_dirty`
    dirty: Vec<BlockBox>,
}

#[derive(Serialize, Deserialize)]
struct WorldFile {
    blocks: Vec<(IVec3, Block)>,
}

impl BlockWorld {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-air blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks exactly equal to `block`
    pub fn count_of(&self, block: Block) -> usize {
        self.blocks.values().filter(|b| **b == block).count()
    }

    /// Iterate all non-air blocks
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Block)> + '_ {
        self.blocks.iter().map(|(p, b)| (*p, *b))
    }

    /// Bounding box of all non-air blocks
    pub fn bounds(&self) -> Option<BlockBox> {
        let mut positions = self.blocks.keys();
        let first = *positions.next()?;
        let mut bounds = BlockBox::from_point(first);
        for p in positions {
            bounds.expand(*p);
        }
        Some(bounds)
    }

    /// Take the list of dirty regions and clear the internal list
    pub fn take_dirty(&mut self) -> Vec<BlockBox> {
        std::mem::take(&mut self.dirty)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let mut blocks: Vec<(IVec3, Block)> = self.iter().collect();
        blocks.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        Ok(serde_json::to_string_pretty(&WorldFile { blocks })?)
    }

    /// Parse from JSON produced by `to_json`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: WorldFile = serde_json::from_str(json)?;
        let mut world = Self::new();
        for (pos, block) in file.blocks {
            world.set_block(pos, block);
        }
        Ok(world)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl VoxelAccess for BlockWorld {
    fn block_at(&self, pos: IVec3) -> Block {
        self.blocks.get(&pos).copied().unwrap_or(Block::AIR)
    }

    fn set_block(&mut self, pos: IVec3, block: Block) {
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
    }

    fn mark_dirty(&mut self, region: BlockBox) {
        self.dirty.push(region);
    }
}
