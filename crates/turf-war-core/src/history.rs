//! Append-only log of resolved actions.
//!
//! The log backs bust rollback and the post-game statistics. Records are
//! only ever removed by a bust, and only those of the busted crew inside
//! the rollback window.

use crate::catalog::ActionKind;
use crate::hex::HexCoord;
use crate::types::{PlayerId, TurnNumber};
use serde::{Deserialize, Serialize};

/// One resolved action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Monotonic sequence number, unique per game.
    pub sequence: u64,
    /// Crew that acted.
    pub player: PlayerId,
    /// Global turn the action was taken on.
    pub turn: TurnNumber,
    /// Target cell.
    pub coord: HexCoord,
    /// Kind of action used.
    pub kind: ActionKind,
    /// Damage actually added to the cell, after capture normalization.
    ///
    /// Subtracting this from the cell returns it to its pre-action damage.
    pub damage_applied: u32,
    /// Whether the action captured the cell.
    pub captured: bool,
    /// Owner of the cell before the action.
    pub previous_owner: Option<PlayerId>,
}

/// Ordered action log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHistory {
    records: Vec<ActionRecord>,
    next_sequence: u64,
}

impl ActionHistory {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, stamping its sequence number.
    pub fn push(&mut self, mut record: ActionRecord) -> u64 {
        record.sequence = self.next_sequence;
        self.next_sequence += 1;
        let sequence = record.sequence;
        self.records.push(record);
        sequence
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records belonging to one crew.
    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter().filter(move |r| r.player == player)
    }

    /// Whether a record falls inside a crew's rollback window.
    ///
    /// The window covers turns strictly after `current_turn - window`.
    pub fn in_window(
        record: &ActionRecord,
        player: PlayerId,
        current_turn: TurnNumber,
        window: u32,
    ) -> bool {
        record.player == player && record.turn.saturating_add(window) > current_turn
    }

    /// Records of `player` inside the rollback window, oldest first.
    pub fn window(
        &self,
        player: PlayerId,
        current_turn: TurnNumber,
        window: u32,
    ) -> Vec<&ActionRecord> {
        self.records
            .iter()
            .filter(|r| Self::in_window(r, player, current_turn, window))
            .collect()
    }

    /// Remove the window records of `player`. Returns how many were removed.
    pub fn prune_window(&mut self, player: PlayerId, current_turn: TurnNumber, window: u32) -> usize {
        let before = self.records.len();
        self.records
            .retain(|r| !Self::in_window(r, player, current_turn, window));
        before - self.records.len()
    }
}
