//! Procedural tree growth
//!
//! A worklist of growth cells walks upward from a seed block, curving,
//! splitting and branching at random, and stamps a sphere of material at
//! every step.

pub mod cell;
pub mod sphere;
pub mod tree;

pub use cell::{CellKind, GrowthCell, Worklist};
pub use sphere::draw_sphere;
pub use tree::{BranchParams, GrowthStats, LeafParams, TreeGrower, TreeParams, TrunkParams};
