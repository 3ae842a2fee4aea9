//! Procedural tree growth over a queue of growth cells
//!
//! Growth starts from a single trunk cell pointing straight up. Each step
//! pops the oldest cell, stamps a sphere sized by its remaining life, and
//! then, depending on its kind and a handful of "1 in N" rolls, moves it
//! forward, curves it, splits it into two trunks, or spawns branches and
//! leaves from it. Every new cell goes to the back of the queue, so the
//! tree grows breadth-first.

use glam::{DVec3, IVec3};
use rand::Rng;

use crate::core::types::Result;
use crate::math::vector::{self, mirror_horizontal, random_vector_within_angle, UP};
use crate::math::one_in;
use crate::voxel::block::Block;
use crate::voxel::procgen::cell::{rescaled_life, CellKind, GrowthCell, Worklist};
use crate::voxel::procgen::sphere::draw_sphere;
use crate::voxel::world::VoxelAccess;

/// Split directions are drawn this many degrees from straight up
const SPLIT_ANGLE: (f64, f64) = (10.0, 90.0);
/// Leaves sprout this many degrees away from their parent's direction
const LEAF_ANGLE: (f64, f64) = (10.0, 170.0);
/// Smallest deviation for a curve
const CURVE_MIN_ANGLE: f64 = 1.0;
/// Curve limit for leaf cells. Leaves always move straight, so this is
/// never reached by `grow`.
const LEAF_CURVE_MAX_ANGLE: f64 = 2.0;
/// A trunk at or below this life counts as ending
const END_OF_LIFE: i32 = 2;

/// Trunk behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkParams {
    /// Life of the initial trunk cell
    pub max_life: i32,
    pub material: Block,
    /// Always spawn a branch from trunks about to expire
    pub branch_at_end_of_life: bool,
    /// Sphere diameter per unit of remaining life
    pub thickness_ratio: f64,
    /// Split into two trunks with chance 1 in N (0 = never)
    pub split_one_in: u32,
    /// Life multiplier for both halves of a split
    pub split_life_multiplier: f64,
    /// Curve with chance 1 in N (0 = never)
    pub curve_one_in: u32,
    /// Largest curve, in degrees from the current direction
    pub curve_max_angle: f64,
}

/// Branch behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct BranchParams {
    /// Spawn a branch with chance 1 in N (0 = never)
    pub one_in: u32,
    /// Branch direction range, degrees from straight up
    pub min_angle: f64,
    pub max_angle: f64,
    /// New branch life is the parent's life times this
    pub life_multiplier: f64,
    pub material: Block,
    pub thickness_ratio: f64,
    pub curve_one_in: u32,
    pub curve_max_angle: f64,
}

/// Leaf behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct LeafParams {
    /// Leaves sprout once `life * one_in <= trunk max life` (0 = never)
    pub one_in: u32,
    /// Leaf cells spawned each time leaves sprout
    pub count: u32,
    pub max_life: i32,
    pub material: Block,
    pub thickness_ratio: f64,
}

/// Complete growth parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    pub trunk: TrunkParams,
    pub branch: BranchParams,
    pub leaves: LeafParams,
}

impl TreeParams {
    /// Material stamped by a cell of the given kind
    pub fn material(&self, kind: CellKind) -> Block {
        match kind {
            CellKind::Trunk => self.trunk.material,
            CellKind::Branch => self.branch.material,
            CellKind::Leaf => self.leaves.material,
        }
    }

    /// Sphere diameter per unit of life for the given kind
    pub fn thickness_ratio(&self, kind: CellKind) -> f64 {
        match kind {
            CellKind::Trunk => self.trunk.thickness_ratio,
            CellKind::Branch => self.branch.thickness_ratio,
            CellKind::Leaf => self.leaves.thickness_ratio,
        }
    }

    fn curve_max_angle(&self, kind: CellKind) -> f64 {
        match kind {
            CellKind::Trunk => self.trunk.curve_max_angle,
            CellKind::Branch => self.branch.curve_max_angle,
            CellKind::Leaf => LEAF_CURVE_MAX_ANGLE,
        }
    }

    /// Ids no sphere may overwrite (trunk and branch wood)
    fn protected_ids(&self) -> [u16; 2] {
        [self.trunk.material.id, self.branch.material.id]
    }
}

/// Counters collected while growing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Live cells taken off the queue and drawn
    pub cells_processed: usize,
    pub splits: usize,
    pub curves: usize,
    pub branches: usize,
    pub leaves: usize,
    /// Block writes, including repeated writes to the same block
    pub voxels_written: usize,
}

/// Grows one tree into a block volume
pub struct TreeGrower<'a, R: Rng> {
    params: &'a TreeParams,
    rng: R,
    pending: Worklist,
    /// Give up direction sampling after this many rejections (None = never)
    max_sampling_attempts: Option<u32>,
    stats: GrowthStats,
}

impl<'a, R: Rng> TreeGrower<'a, R> {
    /// Create a grower with an empty queue
    pub fn new(params: &'a TreeParams, rng: R) -> Self {
        Self {
            params,
            rng,
            pending: Worklist::new(),
            max_sampling_attempts: None,
            stats: GrowthStats::default(),
        }
    }

    /// Fail with `Error::SamplingExhausted` instead of looping forever on an
    /// impossible angle range.
    pub fn with_sampling_limit(mut self, max_attempts: u32) -> Self {
        self.max_sampling_attempts = Some(max_attempts);
        self
    }

    /// Cells waiting to be processed
    pub fn pending(&self) -> &Worklist {
        &self.pending
    }

    /// Queue a cell
    pub fn push(&mut self, cell: GrowthCell) {
        self.pending.push(cell);
    }

    pub fn stats(&self) -> GrowthStats {
        self.stats
    }

    /// Grow a full tree whose trunk starts at `origin`.
    ///
    /// Runs until the queue is empty. On error, blocks already written stay
    /// written.
    pub fn grow<W: VoxelAccess + ?Sized>(
        &mut self,
        world: &mut W,
        origin: IVec3,
    ) -> Result<GrowthStats> {
        self.pending.clear();
        self.stats = GrowthStats::default();
        self.push(GrowthCell::new(
            CellKind::Trunk,
            self.params.trunk.max_life,
            origin.as_dvec3(),
            UP,
        ));

        while self.step(world)? {}

        log::info!(
            "Grew tree at {}: {} cells, {} splits, {} curves, {} branches, {} leaves, {} block writes",
            origin,
            self.stats.cells_processed,
            self.stats.splits,
            self.stats.curves,
            self.stats.branches,
            self.stats.leaves,
            self.stats.voxels_written,
        );
        Ok(self.stats)
    }

    /// Process the oldest pending cell.
    ///
    /// Returns `false` once the queue is empty.
    pub fn step<W: VoxelAccess + ?Sized>(&mut self, world: &mut W) -> Result<bool> {
        let Some(cell) = self.pending.pop() else {
            return Ok(false);
        };
        if cell.is_expired() {
            return Ok(true);
        }

        self.stats.cells_processed += 1;
        self.draw(world, &cell);
        self.transition(&cell)?;
        Ok(true)
    }

    fn draw<W: VoxelAccess + ?Sized>(&mut self, world: &mut W, cell: &GrowthCell) {
        let diameter = cell.life as f64 * self.params.thickness_ratio(cell.kind);
        self.stats.voxels_written += draw_sphere(
            world,
            cell.position,
            diameter,
            self.params.material(cell.kind),
            &self.params.protected_ids(),
        );
    }

    /// Queue whatever follows `cell`. Rules are checked in order and the
    /// first one that applies ends the step.
    fn transition(&mut self, cell: &GrowthCell) -> Result<()> {
        let params = self.params;
        let trunk = &params.trunk;

        match cell.kind {
            // Leaves just drift; a fresh trunk never branches on its first tick
            CellKind::Leaf => {
                self.push(cell.moved());
                return Ok(());
            }
            CellKind::Trunk if cell.life == trunk.max_life => {
                self.push(cell.moved());
                return Ok(());
            }
            CellKind::Trunk if cell.life <= END_OF_LIFE && trunk.branch_at_end_of_life => {
                self.push(cell.moved());
                self.spawn_branch(cell)?;
                return Ok(());
            }
            _ => {}
        }

        if cell.kind == CellKind::Trunk && one_in(&mut self.rng, trunk.split_one_in) {
            return self.split_trunk(cell);
        }
        if cell.kind == CellKind::Trunk && one_in(&mut self.rng, trunk.curve_one_in) {
            return self.curve(cell);
        }
        if cell.kind == CellKind::Branch && one_in(&mut self.rng, params.branch.curve_one_in) {
            return self.curve(cell);
        }

        if one_in(&mut self.rng, params.branch.one_in) {
            self.spawn_branch(cell)?;
        }
        let leaves = &params.leaves;
        if leaves.one_in != 0 && cell.life as i64 * leaves.one_in as i64 <= trunk.max_life as i64 {
            for _ in 0..leaves.count {
                self.spawn_leaf(cell)?;
            }
        }
        self.push(cell.moved());
        Ok(())
    }

    fn sample_direction(
        &mut self,
        reference: DVec3,
        min_angle: f64,
        max_angle: f64,
    ) -> Result<DVec3> {
        random_vector_within_angle(
            &mut self.rng,
            reference,
            min_angle,
            max_angle,
            self.max_sampling_attempts,
        )
    }

    /// Start a branch tilted away from straight up
    pub fn spawn_branch(&mut self, cell: &GrowthCell) -> Result<()> {
        let params = self.params;
        let branch = &params.branch;
        let dir = self.sample_direction(UP, branch.min_angle, branch.max_angle)?;

        log::debug!("Branched at {}", cell.position);
        self.stats.branches += 1;
        self.push(GrowthCell::new(
            CellKind::Branch,
            rescaled_life(cell.life, branch.life_multiplier),
            cell.position + dir,
            vector::normalize(dir)?,
        ));
        Ok(())
    }

    /// Replace a trunk with two trunks leaning in mirrored horizontal
    /// directions.
    pub fn split_trunk(&mut self, cell: &GrowthCell) -> Result<()> {
        let dir = vector::normalize(self.sample_direction(UP, SPLIT_ANGLE.0, SPLIT_ANGLE.1)?)?;
        let multiplier = self.params.trunk.split_life_multiplier;

        log::debug!("Split at {}", cell.position);
        self.stats.splits += 1;
        self.push(cell.advanced(dir, multiplier));
        self.push(cell.advanced(mirror_horizontal(dir), multiplier));
        Ok(())
    }

    /// Bend the cell up to its kind's curve angle and move one step
    pub fn curve(&mut self, cell: &GrowthCell) -> Result<()> {
        let max_angle = self.params.curve_max_angle(cell.kind);
        let dir = self.sample_direction(cell.direction, CURVE_MIN_ANGLE, max_angle)?;

        log::debug!("Curved at {}", cell.position);
        self.stats.curves += 1;
        self.push(cell.advanced(vector::normalize(dir)?, 1.0));
        Ok(())
    }

    /// Sprout a leaf cell off to the side of `cell`
    pub fn spawn_leaf(&mut self, cell: &GrowthCell) -> Result<()> {
        let dir = self.sample_direction(cell.direction, LEAF_ANGLE.0, LEAF_ANGLE.1)?;
        let life = self.params.leaves.max_life;

        self.stats.leaves += 1;
        self.push(GrowthCell::new(
            CellKind::Leaf,
            life,
            cell.position + dir,
            dir,
        ));
        Ok(())
    }
}
