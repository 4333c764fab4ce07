//! Per-turn income.

use crate::board::Board;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Income rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Paid every turn regardless of territory.
    pub base_income: u32,
    /// Paid per owned metro station.
    pub metro_bonus: u32,
    /// Paid per owned ordinary cell.
    pub standard_bonus: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_income: 20,
            metro_bonus: 15,
            standard_bonus: 5,
        }
    }
}

/// Income a crew collects at the start of its turn.
pub fn income_for(player: PlayerId, board: &Board, economy: &EconomyConfig) -> u32 {
    board
        .cells()
        .iter()
        .filter(|cell| cell.owner == Some(player))
        .fold(economy.base_income, |income, cell| {
            income
                + if cell.is_metro {
                    economy.metro_bonus
                } else {
                    economy.standard_bonus
                }
        })
}
