//! Leaf decay analysis
//!
//! A leaf survives while it is within a few face-steps of a log, counting
//! only steps through other leaves. The analysis runs in three passes:
//!
//! 1. From the seed, flood through touching logs (26-connected) and keep
//!    every log that shares a face with a leaf: the *edge logs*.
//! 2. From each edge log, flood through face-adjacent leaves recording the
//!    shortest hop count seen so far. The walk is a stack, not a
//!    distance-ordered queue, so a leaf is pushed again whenever a shorter
//!    path to it turns up. Leaves that only touch a visited block along an
//!    edge or corner are remembered separately.
//! 3. Clear every leaf further than the threshold, and every edge/corner
//!    leaf that never got a distance at all.

use std::collections::{HashMap, HashSet};

use glam::IVec3;

use super::{neighbors, shares_face};
use crate::voxel::block::{Block, MaterialFamily};
use crate::voxel::world::VoxelAccess;

/// Leaves further than this many steps from a log decay by default
pub const DEFAULT_DECAY_DISTANCE: i32 = 4;

/// Which blocks count as logs and leaves, and how far leaves may reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayRules {
    pub logs: MaterialFamily,
    pub leaves: MaterialFamily,
    /// Largest surviving distance
    pub max_distance: i32,
}

impl Default for DecayRules {
    fn default() -> Self {
        Self {
            logs: MaterialFamily::logs(),
            leaves: MaterialFamily::leaves(),
            max_distance: DEFAULT_DECAY_DISTANCE,
        }
    }
}

/// Counters collected by the analysis and removal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayStats {
    pub edge_logs: usize,
    /// Leaves that received a distance
    pub leaves_measured: usize,
    /// Leaves cleared for being too far from a log
    pub removed_distant: usize,
    /// Edge/corner leaves cleared for having no distance
    pub removed_orphans: usize,
}

/// Result of the first two passes. Nothing in the world is changed yet.
#[derive(Debug, Default)]
pub struct DecayAnalysis {
    edge_logs: HashSet<IVec3>,
    /// Edge logs at 0, leaves at their shortest hop count
    distances: HashMap<IVec3, i32>,
    /// Leaves seen only across an edge or corner
    diagonal: HashSet<IVec3>,
}

impl DecayAnalysis {
    /// Logs that share a face with at least one leaf
    pub fn edge_logs(&self) -> &HashSet<IVec3> {
        &self.edge_logs
    }

    /// Recorded distance of a leaf (0 for edge logs)
    pub fn distance(&self, pos: IVec3) -> Option<i32> {
        self.distances.get(&pos).copied()
    }

    /// Blocks the third pass clears: distant leaves first, then orphans
    pub fn doomed(&self, max_distance: i32) -> (Vec<IVec3>, Vec<IVec3>) {
        let distant = self
            .distances
            .iter()
            .filter(|(_, d)| **d > max_distance)
            .map(|(p, _)| *p)
            .collect();
        let orphans = self
            .diagonal
            .iter()
            .filter(|p| !self.distances.contains_key(*p))
            .copied()
            .collect();
        (distant, orphans)
    }

    /// Clear doomed leaves from the world
    pub fn apply<W: VoxelAccess + ?Sized>(&self, world: &mut W, max_distance: i32) -> DecayStats {
        let (distant, orphans) = self.doomed(max_distance);
        for p in distant.iter().chain(&orphans) {
            world.set_block(*p, Block::AIR);
        }

        DecayStats {
            edge_logs: self.edge_logs.len(),
            leaves_measured: self.distances.len() - self.edge_logs.len(),
            removed_distant: distant.len(),
            removed_orphans: orphans.len(),
        }
    }
}

/// Run the two measuring passes from `seed`
pub fn analyze_decay<W: VoxelAccess + ?Sized>(
    world: &W,
    seed: IVec3,
    rules: &DecayRules,
) -> DecayAnalysis {
    let mut analysis = DecayAnalysis {
        edge_logs: find_edge_logs(world, seed, rules),
        ..Default::default()
    };
    log::info!("{} edge logs detected", analysis.edge_logs.len());

    let total = analysis.edge_logs.len();
    for (i, log) in analysis.edge_logs.iter().enumerate() {
        log::debug!("Measuring leaves from edge log {} / {}", i + 1, total);
        measure_from(world, *log, rules, &mut analysis.distances, &mut analysis.diagonal);
    }
    analysis
}

/// Analyse and clear decayable leaves around `seed`
pub fn remove_decayable_leaves<W: VoxelAccess + ?Sized>(
    world: &mut W,
    seed: IVec3,
    rules: &DecayRules,
) -> DecayStats {
    let analysis = analyze_decay(world, seed, rules);
    let stats = analysis.apply(world, rules.max_distance);
    log::info!(
        "Removed {} distant and {} orphaned leaves ({} measured)",
        stats.removed_distant,
        stats.removed_orphans,
        stats.leaves_measured
    );
    stats
}

/// First pass: flood through logs, keep the ones with a leaf on a face.
///
/// Every popped block is classified, the seed included.
fn find_edge_logs<W: VoxelAccess + ?Sized>(
    world: &W,
    seed: IVec3,
    rules: &DecayRules,
) -> HashSet<IVec3> {
    let mut edge_logs = HashSet::new();
    let mut unused = HashSet::new();
    let mut stack = vec![seed];

    while let Some(pos) = stack.pop() {
        for n in neighbors(pos) {
            if edge_logs.contains(&n) || unused.contains(&n) {
                continue;
            }
            if rules.logs.contains(world.block_at(n)) {
                stack.push(n);
            }
        }

        if touches_leaf_face(world, pos, rules) {
            edge_logs.insert(pos);
        } else {
            unused.insert(pos);
        }
    }
    edge_logs
}

fn touches_leaf_face<W: VoxelAccess + ?Sized>(world: &W, pos: IVec3, rules: &DecayRules) -> bool {
    neighbors(pos)
        .filter(|n| shares_face(*n, pos))
        .any(|n| rules.leaves.contains(world.block_at(n)))
}

/// Second pass for one edge log: relax leaf distances over face steps
fn measure_from<W: VoxelAccess + ?Sized>(
    world: &W,
    log: IVec3,
    rules: &DecayRules,
    distances: &mut HashMap<IVec3, i32>,
    diagonal: &mut HashSet<IVec3>,
) {
    distances.insert(log, 0);
    let mut stack = vec![log];

    while let Some(pos) = stack.pop() {
        let next = distances.get(&pos).copied().unwrap_or(0) + 1;
        for n in neighbors(pos) {
            if !rules.leaves.contains(world.block_at(n)) {
                continue;
            }
            if !shares_face(n, pos) {
                diagonal.insert(n);
                continue;
            }
            let shorter = distances.get(&n).is_none_or(|d| *d > next);
            if shorter {
                distances.insert(n, next);
                stack.push(n);
            }
        }
    }
}
