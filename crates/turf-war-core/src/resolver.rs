//! Action validation and resolution.
//!
//! [`resolve`] checks every precondition before it touches the state, so a
//! refused action never leaves a partial write behind.

use crate::board::CAPTURE_DAMAGE;
use crate::catalog::{ActionKind, ActionSpec};
use crate::events::GameEvent;
use crate::game_state::{GameError, GameState};
use crate::hex::HexCoord;
use crate::history::ActionRecord;
use crate::patrol;
use crate::rng::RandomSource;
use crate::types::PlayerId;

/// Outcome of a resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Record appended to the history.
    pub record: ActionRecord,
    /// Whether the patrol caught the actor.
    pub detected: bool,
    /// Events produced while resolving.
    pub events: Vec<GameEvent>,
}

/// Check that `actor` may use `kind` on `target` right now.
///
/// Checks run in a fixed order and the first failure is reported.
pub fn validate(
    state: &GameState,
    actor: PlayerId,
    target: HexCoord,
    kind: ActionKind,
) -> Result<ActionSpec, GameError> {
    if state.is_terminal() {
        return Err(GameError::GameAlreadyOver);
    }
    let player = state
        .get_player(actor)
        .ok_or(GameError::UnknownPlayer(actor))?;
    if state.current_holder() != actor {
        return Err(GameError::NotYourTurn);
    }
    if player.is_penalized() {
        return Err(GameError::Penalized);
    }

    let spec = *state.settings.catalog.get(kind);
    if !player.can_afford(spec.cost) {
        return Err(GameError::InsufficientFunds {
            needed: spec.cost,
            available: player.points,
        });
    }

    let cell = state
        .board
        .get(&target)
        .ok_or(GameError::InvalidCoordinate(target))?;
    if cell.owner == Some(actor) {
        return Err(GameError::SelfTarget);
    }
    Ok(spec)
}

/// Validate and apply one action.
///
/// Deducts the cost, adds damage and captures the cell once it reaches
/// [`CAPTURE_DAMAGE`], then appends an [`ActionRecord`]. When the target is
/// the patrol's cell the detection roll happens here; acting on the bust is
/// left to the caller.
pub fn resolve<R: RandomSource + ?Sized>(
    state: &mut GameState,
    actor: PlayerId,
    target: HexCoord,
    kind: ActionKind,
    rng: &mut R,
) -> Result<Resolution, GameError> {
    let spec = validate(state, actor, target, kind)?;
    let mut events = Vec::new();

    // Validation guarantees both lookups succeed from here on
    let Some(player) = state.get_player_mut(actor) else {
        return Err(GameError::UnknownPlayer(actor));
    };
    player.points -= spec.cost;
    if spec.is_multi_turn() {
        player.multi_turn_left = spec.turns;
    }

    let Some(cell) = state.board.get_mut(&target) else {
        return Err(GameError::InvalidCoordinate(target));
    };
    let previous_owner = cell.owner;
    let previous_damage = cell.damage;
    let raw_damage = cell.damage.saturating_add(spec.damage);
    let captured = raw_damage >= CAPTURE_DAMAGE;
    if captured {
        cell.claim(actor);
    } else {
        cell.damage = raw_damage;
    }
    let damage_applied = cell.damage - previous_damage;

    events.push(GameEvent::ActionApplied {
        player: actor,
        kind,
        target,
        cost: spec.cost,
        damage: spec.damage,
    });

    if captured {
        if let Some(victim) = previous_owner {
            if let Some(victim_player) = state.get_player_mut(victim) {
                victim_player.owned_cells = victim_player.owned_cells.saturating_sub(1);
            }
            events.push(GameEvent::ContestedCapture {
                attacker: actor,
                victim,
                coord: target,
            });
        }
        if let Some(player) = state.get_player_mut(actor) {
            player.owned_cells += 1;
        }
        events.push(GameEvent::CellCaptured {
            player: actor,
            coord: target,
            previous_owner,
        });
    }

    let mut record = ActionRecord {
        sequence: 0,
        player: actor,
        turn: state.turn,
        coord: target,
        kind,
        damage_applied,
        captured,
        previous_owner,
    };
    record.sequence = state.history.push(record.clone());

    let detected = state.board.is_patrolled(&target) && patrol::roll_detection(&spec, rng);
    if state.board.is_patrolled(&target) && !detected {
        events.push(GameEvent::PatrolEvaded {
            player: actor,
            coord: target,
        });
    }

    tracing::debug!(
        target: "turf::resolver",
        player = actor,
        %kind,
        cell = %target,
        captured,
        detected,
        "action resolved"
    );

    Ok(Resolution {
        record,
        detected,
        events,
    })
}
