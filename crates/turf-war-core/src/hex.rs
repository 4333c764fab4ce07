//! Hex coordinate system for the game board.
//!
//! Uses axial coordinates on a rectangular footprint: `q` runs along a row and
//! `r` selects the row. Neighbors are the six axial direction vectors, so a
//! cell's neighborhood does not depend on row parity.

use serde::{Deserialize, Serialize};

/// The six axial directions, in the order neighbors are enumerated.
///
/// The patrol breaks distance ties by this order, so it is part of the rules.
pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Axial coordinates for a hex cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column coordinate
    pub q: i32,
    /// Row coordinate
    pub r: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering for deterministic iteration
        (self.r, self.q).cmp(&(other.r, other.q))
    }
}

impl HexCoord {
    /// Create a new hex coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// All six candidate neighbors in [`DIRECTIONS`] order.
    ///
    /// Candidates are not bounds-checked; see [`crate::board::Board::neighbors`].
    pub fn neighbors(&self) -> [HexCoord; 6] {
        DIRECTIONS.map(|(dq, dr)| HexCoord::new(self.q + dq, self.r + dr))
    }

    /// Sum of absolute axis differences (`|Δq| + |Δr|`).
    ///
    /// This is not the true hex distance; the patrol uses it as its
    /// steering heuristic.
    pub fn manhattan(&self, other: &HexCoord) -> u32 {
        (self.q - other.q).unsigned_abs() + (self.r - other.r).unsigned_abs()
    }

    /// Check if this coordinate is within a `width` × `height` rectangle.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.q >= 0 && self.r >= 0 && (self.q as u32) < width && (self.r as u32) < height
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
