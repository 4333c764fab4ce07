//! Events surfaced by the engine for rendering and logging.
//!
//! Events describe what a transition did; they are not needed to reproduce
//! the state, which is fully determined by the commands and the random
//! source.

use crate::catalog::ActionKind;
use crate::hex::HexCoord;
use crate::types::{PlayerId, TurnNumber};
use serde::{Deserialize, Serialize};

/// Everything a transition can report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An action was paid for and its damage applied.
    ActionApplied {
        player: PlayerId,
        kind: ActionKind,
        target: HexCoord,
        cost: u32,
        damage: u32,
    },
    /// A crew took a cell.
    CellCaptured {
        player: PlayerId,
        coord: HexCoord,
        previous_owner: Option<PlayerId>,
    },
    /// A capture that took the cell from another crew ("beef").
    ContestedCapture {
        attacker: PlayerId,
        victim: PlayerId,
        coord: HexCoord,
    },
    /// A crew acted on the patrol's cell and got away with it.
    PatrolEvaded { player: PlayerId, coord: HexCoord },
    /// The patrol caught a crew; its recent history was reverted.
    DetectionTriggered {
        player: PlayerId,
        coord: HexCoord,
        penalty_turns: u32,
        records_reverted: u32,
        cells_lost: u32,
    },
    /// The patrol moved.
    PatrolMoved { from: HexCoord, to: HexCoord },
    /// A multi-turn action keeps the turn with the same crew.
    ActionContinues { player: PlayerId, turns_left: u32 },
    /// The turn passed to a new holder, who was credited income.
    TurnAdvanced {
        player: PlayerId,
        turn: TurnNumber,
        income: u32,
    },
    /// A crew's penalty ran out.
    PenaltyLifted { player: PlayerId },
    /// A crew passed its turn.
    TurnPassed { player: PlayerId },
    /// A crew reached the winning threshold.
    GameWon { player: PlayerId, cells: u32 },
}

impl GameEvent {
    /// The crew the event is mainly about, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::ActionApplied { player, .. }
            | GameEvent::CellCaptured { player, .. }
            | GameEvent::PatrolEvaded { player, .. }
            | GameEvent::DetectionTriggered { player, .. }
            | GameEvent::ActionContinues { player, .. }
            | GameEvent::TurnAdvanced { player, .. }
            | GameEvent::PenaltyLifted { player }
            | GameEvent::TurnPassed { player }
            | GameEvent::GameWon { player, .. } => Some(*player),
            GameEvent::ContestedCapture { attacker, .. } => Some(*attacker),
            GameEvent::PatrolMoved { .. } => None,
        }
    }

    /// Whether this event ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon { .. })
    }
}
