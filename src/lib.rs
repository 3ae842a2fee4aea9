//! Voxel Arbor - procedural voxel trees
//!
//! Grows branching trees into a block volume, removes previously grown
//! trees, and prunes leaves that would decay because they are too far
//! from a log.

pub mod core;
pub mod math;
pub mod voxel;
pub mod generation;

pub use generation::{perform, Operation, OperationReport, OperationStats};
