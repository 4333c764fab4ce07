//! The hex board: cells, metro stations and the patrol position.

use crate::hex::HexCoord;
use crate::rng::RandomSource;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Damage at which a cell changes hands. Owned cells always sit at this value.
pub const CAPTURE_DAMAGE: u32 = 10;

/// A single cell on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Position on the board.
    pub coord: HexCoord,
    /// Crew that holds this cell.
    pub owner: Option<PlayerId>,
    /// Accumulated damage, 0..=10.
    pub damage: u32,
    /// Metro stations pay the elevated income rate.
    pub is_metro: bool,
}

impl Cell {
    /// Create an untouched, unowned cell.
    pub fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            owner: None,
            damage: 0,
            is_metro: false,
        }
    }

    /// Hand the cell to a crew at full damage.
    pub fn claim(&mut self, owner: PlayerId) {
        self.owner = Some(owner);
        self.damage = CAPTURE_DAMAGE;
    }
}

/// The game board.
///
/// Cells are stored row by row (`r` outer, `q` inner), which is also the
/// order they were generated in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    cells: Vec<Cell>,
    /// Cell the patrol currently stands on.
    pub patrol: HexCoord,
}

impl Board {
    /// Create a blank board with the patrol parked at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity((width * height) as usize);
        for r in 0..height as i32 {
            for q in 0..width as i32 {
                cells.push(Cell::new(HexCoord::new(q, r)));
            }
        }
        Self {
            width,
            height,
            cells,
            patrol: HexCoord::new(0, 0),
        }
    }

    /// Generate a board for a new game.
    ///
    /// Draws from `rng` in a fixed order: one pick per metro station, one per
    /// crew start in roster order, then one for the patrol. Crew starts and
    /// the patrol are drawn from cells not already used, so they never land
    /// on a metro station or on each other. The caller checks beforehand
    /// that the board has room for every placement.
    pub fn generate<R: RandomSource + ?Sized>(
        width: u32,
        height: u32,
        metro_count: u32,
        players: &[PlayerId],
        rng: &mut R,
    ) -> Self {
        let mut board = Self::new(width, height);
        let mut free: Vec<usize> = (0..board.cells.len()).collect();

        for _ in 0..metro_count {
            if free.is_empty() {
                break;
            }
            let idx = free.remove(rng.index(free.len()));
            board.cells[idx].is_metro = true;
        }

        for &player in players {
            if free.is_empty() {
                break;
            }
            let idx = free.remove(rng.index(free.len()));
            board.cells[idx].claim(player);
        }

        if !free.is_empty() {
            let idx = free[rng.index(free.len())];
            board.patrol = board.cells[idx].coord;
        }

        board
    }

    fn index_of(&self, coord: &HexCoord) -> Option<usize> {
        if coord.in_bounds(self.width, self.height) {
            Some(coord.r as usize * self.width as usize + coord.q as usize)
        } else {
            None
        }
    }

    /// Check if a coordinate is on the board.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.index_of(coord).is_some()
    }

    /// Get a cell at the given coordinate.
    pub fn get(&self, coord: &HexCoord) -> Option<&Cell> {
        self.index_of(coord).map(|idx| &self.cells[idx])
    }

    /// Get a mutable reference to a cell.
    pub fn get_mut(&mut self, coord: &HexCoord) -> Option<&mut Cell> {
        self.index_of(coord).map(move |idx| &mut self.cells[idx])
    }

    /// All cells in generation order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count total cells on the board.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Neighbors of a cell that exist on the board, in direction order.
    pub fn neighbors(&self, coord: &HexCoord) -> Vec<HexCoord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|c| self.contains(c))
            .collect()
    }

    /// Number of cells owned by a crew.
    pub fn owned_by(&self, player: PlayerId) -> u32 {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count() as u32
    }

    /// Number of cells nobody owns.
    pub fn unowned_count(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.owner.is_none()).count() as u32
    }

    /// Whether the patrol stands on the given cell.
    pub fn is_patrolled(&self, coord: &HexCoord) -> bool {
        self.patrol == *coord
    }
}
