//! Bust handling: penalty and bounded rollback of a caught crew's history.
//!
//! Each record stores the damage it actually added, so undoing it is a
//! subtraction that lands on the cell's pre-action value. Window records are
//! undone newest first. A record whose cell has since been captured by
//! another crew has no live effect left and is only pruned.

use crate::game_state::GameState;
use crate::history::ActionRecord;
use crate::types::PlayerId;

/// What a bust reverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BustOutcome {
    /// Records whose effect was undone on the board.
    pub records_reverted: u32,
    /// Records removed from history (reverted or superseded).
    pub records_pruned: u32,
    /// Captures handed back to their previous owner.
    pub cells_lost: u32,
}

/// Penalize `player` and revert its actions inside the rollback window.
///
/// Also clears any in-flight multi-turn action.
pub fn apply(state: &mut GameState, player: PlayerId) -> BustOutcome {
    let penalty = state.settings.penalty_turns;
    let window = state.settings.rollback_window;
    let turn = state.turn;

    if let Some(p) = state.get_player_mut(player) {
        p.penalty_turns = penalty;
        p.multi_turn_left = 0;
    }

    let mut records: Vec<ActionRecord> = state
        .history
        .window(player, turn, window)
        .into_iter()
        .cloned()
        .collect();
    records.sort_by(|a, b| b.sequence.cmp(&a.sequence));

    let mut outcome = BustOutcome::default();
    for record in &records {
        if revert(state, player, record) {
            outcome.records_reverted += 1;
            if record.captured {
                outcome.cells_lost += 1;
            }
        }
    }
    outcome.records_pruned = state.history.prune_window(player, turn, window) as u32;

    tracing::debug!(
        target: "turf::bust",
        player,
        turn,
        reverted = outcome.records_reverted,
        pruned = outcome.records_pruned,
        cells_lost = outcome.cells_lost,
        "crew busted"
    );
    outcome
}

/// Undo one record if its effect is still on the board.
fn revert(state: &mut GameState, player: PlayerId, record: &ActionRecord) -> bool {
    let Some(cell) = state.board.get_mut(&record.coord) else {
        return false;
    };

    if record.captured {
        if cell.owner != Some(player) {
            return false;
        }
        cell.owner = record.previous_owner;
        cell.damage = cell.damage.saturating_sub(record.damage_applied);

        if let Some(p) = state.get_player_mut(player) {
            p.owned_cells = p.owned_cells.saturating_sub(1);
        }
        if let Some(previous) = record.previous_owner {
            if let Some(victim) = state.get_player_mut(previous) {
                victim.owned_cells += 1;
            }
        }
        true
    } else if cell.owner.is_none() {
        cell.damage = cell.damage.saturating_sub(record.damage_applied);
        true
    } else {
        false
    }
}
