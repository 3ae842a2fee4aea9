//! Integer axis-aligned block region

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Inclusive box of block coordinates defined by min and max corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl BlockBox {
    /// Create a box from two opposite corners (any order)
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box covering a single block
    pub fn from_point(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Number of blocks along each axis
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Check if a block lies inside the box
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Grow the box to include a block
    pub fn expand(&mut self, p: IVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Return merged box containing both
    pub fn merged(&self, other: &BlockBox) -> BlockBox {
        BlockBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
