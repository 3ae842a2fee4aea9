//! Block type: a material id plus an auxiliary data value

use serde::{Deserialize, Serialize};

/// Block ids used by the default material families
pub mod ids {
    pub const AIR: u16 = 0;
    pub const LOG: u16 = 17;
    pub const LEAVES: u16 = 18;
    pub const LEAVES2: u16 = 161;
    pub const LOG2: u16 = 162;
}

/// Single block: material id and variant/orientation data
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Material type id
    pub id: u16,
    /// Auxiliary data value (variant, orientation, ...)
    pub data: u8,
}

impl Block {
    /// Empty/air block
    pub const AIR: Block = Block { id: ids::AIR, data: 0 };

    pub const fn new(id: u16, data: u8) -> Self {
        Self { id, data }
    }

    /// Check if block is air
    pub fn is_air(&self) -> bool {
        self.id == ids::AIR
    }
}

/// Set of material ids treated alike regardless of data value
/// (e.g. every wood variant counts as a log).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialFamily {
    ids: Vec<u16>,
}

impl MaterialFamily {
    pub fn new(ids: impl IntoIterator<Item = u16>) -> Self {
        Self { ids: ids.into_iter().collect() }
    }

    /// Both log id ranges
    pub fn logs() -> Self {
        Self::new([ids::LOG, ids::LOG2])
    }

    /// Both leaf id ranges
    pub fn leaves() -> Self {
        Self::new([ids::LEAVES, ids::LEAVES2])
    }

    pub fn contains(&self, block: Block) -> bool {
        self.ids.contains(&block.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air() {
        assert!(Block::AIR.is_air());
        assert!(Block::default().is_air());
        assert!(!Block::new(ids::LOG, 0).is_air());
    }

    #[test]
    fn test_families_ignore_data() {
        let logs = MaterialFamily::logs();
        assert!(logs.contains(Block::new(ids::LOG, 0)));
        assert!(logs.contains(Block::new(ids::LOG2, 1)));
        assert!(!logs.contains(Block::new(ids::LEAVES, 0)));

        let leaves = MaterialFamily::leaves();
        assert!(leaves.contains(Block::new(ids::LEAVES, 3)));
        assert!(leaves.contains(Block::new(ids::LEAVES2, 0)));
        assert!(!leaves.contains(Block::AIR));
    }
}
