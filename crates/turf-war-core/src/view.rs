//! Read-only projections of the game state for presentation layers.
//!
//! Nothing here mutates a [`GameState`]; renderers take a snapshot and draw
//! from it.

use crate::board::Cell;
use crate::catalog::ActionKind;
use crate::game_state::{GamePhase, GameState};
use crate::hex::HexCoord;
use crate::scheduler::TurnPhase;
use crate::types::{PlayerId, TurnNumber};
use serde::{Deserialize, Serialize};

/// What one crew looks like from the outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
    pub points: u32,
    pub owned_cells: u32,
    /// Income the crew collects when its turn starts.
    pub income: u32,
    /// Turns left before a busted crew may act again.
    pub penalty_turns: u32,
    /// Whether the crew holds the turn.
    pub is_current: bool,
}

/// A full picture of the game at one moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u32,
    pub height: u32,
    /// Every cell, row by row.
    pub cells: Vec<Cell>,
    pub patrol: HexCoord,
    pub turn: TurnNumber,
    pub current_player: PlayerId,
    /// Where the holder's turn stands.
    pub turn_phase: TurnPhase,
    /// Crews in roster order.
    pub players: Vec<PlayerSummary>,
    pub winner: Option<PlayerId>,
}

impl GameSnapshot {
    /// Project `state` into a snapshot.
    pub fn capture(state: &GameState) -> Self {
        let players = state
            .players
            .iter()
            .map(|p| PlayerSummary {
                id: p.id,
                name: p.name.clone(),
                color: p.color.to_hex(),
                points: p.points,
                owned_cells: p.owned_cells,
                income: state.income_for(p.id).unwrap_or(0),
                penalty_turns: p.penalty_turns,
                is_current: p.id == state.current_player && state.phase == GamePhase::Playing,
            })
            .collect();

        let turn_phase = match state.current_player() {
            Some(holder) if holder.multi_turn_left > 0 => TurnPhase::Suspended {
                turns_left: holder.multi_turn_left,
            },
            _ => TurnPhase::AwaitingAction,
        };

        Self {
            width: state.board.width,
            height: state.board.height,
            cells: state.board.cells().to_vec(),
            patrol: state.board.patrol,
            turn: state.turn,
            current_player: state.current_player,
            turn_phase,
            players,
            winner: state.winner,
        }
    }

    /// Look up a cell by coordinate.
    pub fn cell(&self, coord: &HexCoord) -> Option<&Cell> {
        if !coord.in_bounds(self.width, self.height) {
            return None;
        }
        self.cells
            .get(coord.r as usize * self.width as usize + coord.q as usize)
    }

    /// Crews ordered by owned cells, most first. Ties keep roster order.
    pub fn scoreboard(&self) -> Vec<&PlayerSummary> {
        let mut ranked: Vec<&PlayerSummary> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.owned_cells.cmp(&a.owned_cells));
        ranked
    }
}

/// Per-crew action counts over the records still in history.
///
/// Busted records have been pruned, so they no longer count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewStats {
    pub owned_cells: u32,
    pub tags: u32,
    pub throw_ups: u32,
    pub burners: u32,
    pub captures: u32,
}

impl CrewStats {
    /// Tally `player`'s surviving history.
    pub fn for_player(state: &GameState, player: PlayerId) -> Self {
        let mut stats = CrewStats {
            owned_cells: state.get_player(player).map_or(0, |p| p.owned_cells),
            ..Default::default()
        };
        for record in state.history.for_player(player) {
            match record.kind {
                ActionKind::Tag => stats.tags += 1,
                ActionKind::ThrowUp => stats.throw_ups += 1,
                ActionKind::Burner => stats.burners += 1,
            }
            if record.captured {
                stats.captures += 1;
            }
        }
        stats
    }

    /// Total recorded actions.
    pub fn total_actions(&self) -> u32 {
        self.tags + self.throw_ups + self.burners
    }
}
