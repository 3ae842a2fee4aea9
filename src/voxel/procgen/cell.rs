//! Growth cells and the pending-work queue

use std::collections::VecDeque;

use glam::DVec3;

/// What a growth cell draws and which transition rules apply to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Trunk,
    Branch,
    Leaf,
}

/// One active growth point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthCell {
    pub kind: CellKind,
    /// Remaining life; the cell is dropped once this reaches zero
    pub life: i32,
    pub position: DVec3,
    /// Growth direction (unit length)
    pub direction: DVec3,
}

/// `round(life * multiplier) - 1`, rounding half away from zero.
pub fn rescaled_life(life: i32, multiplier: f64) -> i32 {
    (life as f64 * multiplier).round() as i32 - 1
}

impl GrowthCell {
    pub fn new(kind: CellKind, life: i32, position: DVec3, direction: DVec3) -> Self {
        Self {
            kind,
            life,
            position,
            direction,
        }
    }

    /// Check if the cell has no life left
    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }

    /// Same kind, one step along `direction`, life rescaled by `life_multiplier`.
    pub fn advanced(&self, direction: DVec3, life_multiplier: f64) -> Self {
        Self {
            kind: self.kind,
            life: rescaled_life(self.life, life_multiplier),
            position: self.position + direction,
            direction,
        }
    }

    /// One step along the current direction, life - 1
    pub fn moved(&self) -> Self {
        self.advanced(self.direction, 1.0)
    }
}

/// Cells waiting to be processed, first in first out.
///
/// Breadth-first order keeps branching depth even across the tree.
#[derive(Debug, Default)]
pub struct Worklist {
    cells: VecDeque<GrowthCell>,
}

impl Worklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: GrowthCell) {
        self.cells.push_back(cell);
    }

    /// Remove the oldest pending cell
    pub fn pop(&mut self) -> Option<GrowthCell> {
        self.cells.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrowthCell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescaled_life() {
        assert_eq!(rescaled_life(50, 1.0), 49);
        assert_eq!(rescaled_life(50, 0.5), 24);
        assert_eq!(rescaled_life(10, 0.75), 7); // 7.5 rounds up
        assert_eq!(rescaled_life(9, 0.5), 4); // 4.5 rounds up
        assert_eq!(rescaled_life(1, 0.25), -1);
    }

    #[test]
    fn test_moved() {
        let cell = GrowthCell::new(CellKind::Trunk, 5, DVec3::new(1.0, 2.0, 3.0), DVec3::Y);
        let next = cell.moved();
        assert_eq!(next.kind, CellKind::Trunk);
        assert_eq!(next.life, 4);
        assert_eq!(next.position, DVec3::new(1.0, 3.0, 3.0));
        assert_eq!(next.direction, DVec3::Y);
    }

    #[test]
    fn test_expired() {
        let origin = DVec3::ZERO;
        assert!(GrowthCell::new(CellKind::Leaf, 0, origin, DVec3::Y).is_expired());
        assert!(GrowthCell::new(CellKind::Leaf, -3, origin, DVec3::Y).is_expired());
        assert!(!GrowthCell::new(CellKind::Leaf, 1, origin, DVec3::Y).is_expired());
    }

    #[test]
    fn test_worklist_is_fifo() {
        let mut list = Worklist::new();
        for life in 1..=3 {
            list.push(GrowthCell::new(CellKind::Branch, life, DVec3::ZERO, DVec3::Y));
        }
        assert_eq!(list.len(), 3);
        assert_eq!(list.pop().map(|c| c.life), Some(1));
        assert_eq!(list.pop().map(|c| c.life), Some(2));
        assert_eq!(list.pop().map(|c| c.life), Some(3));
        assert!(list.is_empty());
        assert!(list.pop().is_none());
    }
}
