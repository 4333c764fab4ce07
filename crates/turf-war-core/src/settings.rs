//! Game settings and configuration.

use crate::catalog::ActionCatalog;
use crate::economy::EconomyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest board side accepted by [`GameSettings::validate`].
pub const MAX_BOARD_SIDE: u32 = 1024;

/// Configuration for a game session.
///
/// Every field has a default, so a JSON document only needs to name what it
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Metro stations scattered at setup.
    pub metro_count: u32,
    /// Owned cells needed to win.
    pub winning_cells: u32,
    /// Points each crew starts with.
    pub starting_points: u32,
    /// Income rates.
    pub economy: EconomyConfig,
    /// Action costs and effects.
    pub catalog: ActionCatalog,
    /// Turns a busted crew sits out.
    pub penalty_turns: u32,
    /// How many turns of a busted crew's history get reverted.
    pub rollback_window: u32,
    /// Chance the patrol wanders randomly instead of chasing the last action.
    pub patrol_wander_chance: f64,
    /// Smallest roster a game can start with.
    pub min_players: u8,
    /// Largest roster a game can start with.
    pub max_players: u8,
}

impl GameSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyBoard);
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(SettingsError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.winning_cells == 0 {
            return Err(SettingsError::ZeroWinningCells);
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(SettingsError::InvalidPlayerBounds {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if !(0.0..=1.0).contains(&self.patrol_wander_chance) {
            return Err(SettingsError::InvalidProbability(self.patrol_wander_chance));
        }
        for (kind, spec) in self.catalog.iter() {
            if spec.turns == 0 {
                return Err(SettingsError::ZeroTurnAction(kind.to_string()));
            }
            if !(0.0..=1.0).contains(&spec.detection_chance) {
                return Err(SettingsError::InvalidProbability(spec.detection_chance));
            }
        }
        Ok(())
    }

    /// Total number of cells on the board.
    ///
    /// Saturates for boards that [`validate`](Self::validate) would reject.
    pub fn cell_count(&self) -> u32 {
        self.width.saturating_mul(self.height)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 12,
            height: 10,
            metro_count: 10,
            winning_cells: 40,
            starting_points: 100,
            economy: EconomyConfig::default(),
            catalog: ActionCatalog::default(),
            penalty_turns: 5,
            rollback_window: 5,
            patrol_wander_chance: 0.7,
            min_players: 2,
            max_players: 6,
        }
    }
}

/// Errors from invalid game settings.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SettingsError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board {width}x{height} is larger than {max} cells per side", max = MAX_BOARD_SIDE)]
    BoardTooLarge { width: u32, height: u32 },
    #[error("Winning threshold must be at least one cell")]
    ZeroWinningCells,
    #[error("Invalid player bounds: min {min}, max {max}")]
    InvalidPlayerBounds { min: u8, max: u8 },
    #[error("Probability {0} is outside 0.0..=1.0")]
    InvalidProbability(f64),
    #[error("Action {0} must last at least one turn")]
    ZeroTurnAction(String),
    #[error("Could not parse settings: {0}")]
    Parse(String),
}
