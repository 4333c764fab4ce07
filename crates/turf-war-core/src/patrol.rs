//! The roaming patrol: movement policy and detection rolls.

use crate::catalog::ActionSpec;
use crate::events::GameEvent;
use crate::game_state::GameState;
use crate::hex::HexCoord;
use crate::rng::RandomSource;

/// Roll whether the patrol catches an action taken on its cell.
pub fn roll_detection<R: RandomSource + ?Sized>(spec: &ActionSpec, rng: &mut R) -> bool {
    rng.chance(spec.detection_chance)
}

/// Pick the patrol's next cell.
///
/// One draw decides between wandering and chasing. Wandering (taken with
/// probability `wander_chance`, and always when there is nothing to chase)
/// draws once more to pick a neighbor uniformly. Chasing steps to the
/// neighbor closest to `last_action` by manhattan distance, preferring the
/// earliest neighbor on ties.
pub fn next_position<R: RandomSource + ?Sized>(
    position: HexCoord,
    neighbors: &[HexCoord],
    last_action: Option<HexCoord>,
    wander_chance: f64,
    rng: &mut R,
) -> HexCoord {
    if neighbors.is_empty() {
        return position;
    }

    let wander = rng.chance(wander_chance);
    match last_action {
        Some(target) if !wander => neighbors
            .iter()
            .copied()
            .reduce(|best, candidate| {
                if candidate.manhattan(&target) < best.manhattan(&target) {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or(position),
        _ => neighbors[rng.index(neighbors.len())],
    }
}

/// Move the patrol one step on the state's board.
pub fn advance<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> GameEvent {
    let from = state.board.patrol;
    let neighbors = state.board.neighbors(&from);
    let last_action = state.history.last().map(|record| record.coord);
    let to = next_position(
        from,
        &neighbors,
        last_action,
        state.settings.patrol_wander_chance,
        rng,
    );
    state.board.patrol = to;

    tracing::debug!(target: "turf::patrol", %from, %to, "patrol moved");
    GameEvent::PatrolMoved { from, to }
}
