//! Hex adjacency on the sheared lattice.
//!
//! Each hole touches up to six others, reached by the steps in
//! [`HEX_STEPS`]. The neighbor table is computed once per board size and
//! is symmetric: if A lists B then B lists A. Every jump rule in the
//! engine is derived from this relation rather than from raw coordinates.

use super::layout::{Layout, Position};

/// The six lattice steps to a neighboring hole, as (column, row) deltas.
///
/// Neighbor lists are returned in this order.
pub const HEX_STEPS: [(i32, i32); 6] = [(1, 1), (1, -1), (2, 0), (-2, 0), (-1, 1), (-1, -1)];

/// Precomputed neighbor lists, indexed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Adjacency {
    neighbors: Vec<Vec<Position>>,
}

impl Adjacency {
    pub fn build(layout: &Layout) -> Self {
        let neighbors = (0..layout.len())
            .map(|p| {
                let origin = layout.coord(p);
                HEX_STEPS
                    .iter()
                    .filter_map(|&(dc, dr)| layout.position_at(origin.offset(dc, dr)))
                    .collect()
            })
            .collect();
        Adjacency { neighbors }
    }

    /// Neighbors of a valid position, in step order.
    pub fn of(&self, position: Position) -> &[Position] {
        &self.neighbors[position]
    }

    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Positions adjacent to both `a` and `b`, in `a`'s step order.
    pub fn shared(&self, a: Position, b: Position) -> Vec<Position> {
        self.neighbors[a]
            .iter()
            .copied()
            .filter(|n| self.neighbors[b].contains(n))
            .collect()
    }
}
