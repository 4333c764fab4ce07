//! Turn sequencing: who holds the turn next, penalties and income.

use crate::economy;
use crate::events::GameEvent;
use crate::game_state::GameState;
use crate::player::Player;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Where the turn stands once an action has resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The holder may act.
    AwaitingAction,
    /// The patrol caught the holder; the bust runs before anything else.
    Detected,
    /// A multi-turn action keeps the turn with the same crew.
    Suspended { turns_left: u32 },
    /// The turn moves on to the next eligible crew.
    Advancing,
}

/// Classify a resolved action by detection and multi-turn progress.
///
/// Counts down the actor's in-flight multi-turn action unless it was caught.
pub fn after_action(state: &mut GameState, actor: PlayerId, detected: bool) -> TurnPhase {
    if detected {
        return TurnPhase::Detected;
    }
    let Some(player) = state.get_player_mut(actor) else {
        return TurnPhase::Advancing;
    };
    if player.multi_turn_left == 0 {
        return TurnPhase::Advancing;
    }
    player.multi_turn_left -= 1;
    match player.multi_turn_left {
        0 => TurnPhase::Advancing,
        turns_left => TurnPhase::Suspended { turns_left },
    }
}

/// The next crew to hold the turn after `current`.
///
/// Scans forward cyclically past penalized crews. When every crew is
/// penalized the turn falls to the next index anyway.
pub fn next_holder(players: &[Player], current: PlayerId) -> PlayerId {
    let count = players.len();
    if count == 0 {
        return current;
    }
    let start = current as usize;
    (1..=count)
        .map(|step| (start + step) % count)
        .find(|&index| !players[index].is_penalized())
        .unwrap_or((start + 1) % count) as PlayerId
}

/// Hand the turn to the next crew.
///
/// Picks the holder from the penalties as they stand, then counts every
/// penalty down, bumps the turn counter and credits the new holder's income.
pub fn advance_turn(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let next = next_holder(&state.players, state.current_player);
    state.current_player = next;
    state.turn += 1;

    for player in &mut state.players {
        if player.tick_penalty() {
            events.push(GameEvent::PenaltyLifted { player: player.id });
        }
    }

    let income = economy::income_for(next, &state.board, &state.settings.economy);
    if let Some(player) = state.get_player_mut(next) {
        player.add_points(income);
    }

    tracing::debug!(
        target: "turf::scheduler",
        holder = next,
        turn = state.turn,
        income,
        "turn advanced"
    );
    events.push(GameEvent::TurnAdvanced {
        player: next,
        turn: state.turn,
        income,
    });
    events
}
