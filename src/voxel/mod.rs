//! Block data structures and operations

pub mod block;
pub mod world;
pub mod procgen;
pub mod edit;

pub use block::{Block, MaterialFamily};
pub use world::{BlockWorld, VoxelAccess};
pub use procgen::{GrowthStats, TreeGrower};
pub use edit::{DecayRules, DecayStats, DeletionStats};
