//! Flood-fill edits over connected blocks
//!
//! Both edits walk the 26-neighbourhood of each block with an explicit
//! stack. Tree deletion clears every block of the tree's materials that is
//! connected to the seed; decay analysis measures how far each leaf is from
//! the nearest log and clears the ones that would rot away.

pub mod decay;
pub mod delete;

pub use decay::{analyze_decay, remove_decayable_leaves, DecayAnalysis, DecayRules, DecayStats};
pub use delete::{delete_tree, DeletionStats};

use glam::IVec3;

/// The 26 blocks around `center`, x outermost, each axis ascending
pub(crate) fn neighbors(center: IVec3) -> impl Iterator<Item = IVec3> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dz| {
                let offset = IVec3::new(dx, dy, dz);
                (offset != IVec3::ZERO).then_some(center + offset)
            })
        })
    })
}

/// True when at least two of the three deltas are zero, i.e. the blocks
/// share a face (or are the same block).
pub(crate) fn shares_face(a: IVec3, b: IVec3) -> bool {
    let d = a - b;
    let zeros = (d.x == 0) as u8 + (d.y == 0) as u8 + (d.z == 0) as u8;
    zeros >= 2
}
