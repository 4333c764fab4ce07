//! Crew state.

use crate::types::{PlayerColor, PlayerId};
use serde::{Deserialize, Serialize};

/// A crew in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Roster index.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Crew color for map display.
    pub color: PlayerColor,
    /// Spendable points.
    pub points: u32,
    /// Number of cells this crew owns. Kept equal to the board count.
    pub owned_cells: u32,
    /// Turns left before this crew may act again after a bust.
    pub penalty_turns: u32,
    /// Remaining turns of an in-flight multi-turn action.
    pub multi_turn_left: u32,
}

impl Player {
    /// Create a new crew with no territory.
    pub fn new(id: PlayerId, name: String, color: PlayerColor, points: u32) -> Self {
        Self {
            id,
            name,
            color,
            points,
            owned_cells: 0,
            penalty_turns: 0,
            multi_turn_left: 0,
        }
    }

    /// Whether the crew is sitting out a penalty.
    pub fn is_penalized(&self) -> bool {
        self.penalty_turns > 0
    }

    /// Check if the crew can pay for something.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.points >= cost
    }

    /// Add points to the crew's purse.
    pub fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Count down one turn of penalty. Returns true when the penalty just ended.
    pub fn tick_penalty(&mut self) -> bool {
        if self.penalty_turns == 0 {
            return false;
        }
        self.penalty_turns -= 1;
        self.penalty_turns == 0
    }
}
