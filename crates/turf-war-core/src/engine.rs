//! The authoritative state transition.
//!
//! [`apply_action`] is the only way a game moves forward after setup. It
//! takes a state and a [`Command`], and returns the next state with the
//! events it produced, or an error with the input state left as it was.
//!
//! An accepted action runs through these stages:
//!
//! 1. Resolve: validate, pay, damage and maybe capture, roll detection.
//! 2. Bust: a caught crew is penalized and its recent history reverted,
//!    then the turn advances without moving the patrol.
//! 3. Victory: the first crew at the winning threshold ends the game.
//! 4. Suspend or advance: an unfinished multi-turn action keeps the turn,
//!    otherwise the patrol moves and the turn passes on.

use crate::bust;
use crate::catalog::ActionKind;
use crate::events::GameEvent;
use crate::game_state::{CrewEntry, GameError, GameState, SetupError};
use crate::hex::HexCoord;
use crate::patrol;
use crate::resolver;
use crate::rng::RandomSource;
use crate::scheduler::{self, TurnPhase};
use crate::settings::GameSettings;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Input to the engine, issued on behalf of one crew.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Use an action on a cell.
    Act {
        player: PlayerId,
        target: HexCoord,
        kind: ActionKind,
    },
    /// Give up the rest of the turn.
    Pass { player: PlayerId },
}

impl Command {
    pub fn act(player: PlayerId, target: HexCoord, kind: ActionKind) -> Self {
        Command::Act {
            player,
            target,
            kind,
        }
    }

    pub fn pass(player: PlayerId) -> Self {
        Command::Pass { player }
    }

    /// The crew issuing the command.
    pub fn player(&self) -> PlayerId {
        match self {
            Command::Act { player, .. } | Command::Pass { player } => *player,
        }
    }
}

/// Set up a game on a `width` x `height` board with default rules otherwise.
pub fn create_board<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    metro_count: u32,
    roster: Vec<CrewEntry>,
    rng: &mut R,
) -> Result<GameState, SetupError> {
    let settings = GameSettings {
        width,
        height,
        metro_count,
        ..Default::default()
    };
    GameState::create(settings, roster, rng)
}

/// Apply one command to `state`.
pub fn apply_action<R: RandomSource + ?Sized>(
    state: &GameState,
    command: &Command,
    rng: &mut R,
) -> Result<(GameState, Vec<GameEvent>), GameError> {
    let mut next = state.clone();
    let events = match *command {
        Command::Act {
            player,
            target,
            kind,
        } => act(&mut next, player, target, kind, rng)?,
        Command::Pass { player } => pass(&mut next, player, rng)?,
    };
    Ok((next, events))
}

/// Replay a command log from `initial`, stopping at the first refused command.
pub fn replay<R: RandomSource + ?Sized>(
    initial: &GameState,
    commands: &[Command],
    rng: &mut R,
) -> Result<(GameState, Vec<GameEvent>), GameError> {
    let mut state = initial.clone();
    let mut events = Vec::new();
    for command in commands {
        let (next, produced) = apply_action(&state, command, rng)?;
        state = next;
        events.extend(produced);
    }
    Ok((state, events))
}

fn act<R: RandomSource + ?Sized>(
    state: &mut GameState,
    player: PlayerId,
    target: HexCoord,
    kind: ActionKind,
    rng: &mut R,
) -> Result<Vec<GameEvent>, GameError> {
    let resolution = resolver::resolve(state, player, target, kind, rng)?;
    let mut events = resolution.events;

    let phase = scheduler::after_action(state, player, resolution.detected);
    if phase == TurnPhase::Detected {
        let outcome = bust::apply(state, player);
        events.push(GameEvent::DetectionTriggered {
            player,
            coord: target,
            penalty_turns: state.settings.penalty_turns,
            records_reverted: outcome.records_reverted,
            cells_lost: outcome.cells_lost,
        });
        if !check_victory(state, &mut events) {
            events.extend(scheduler::advance_turn(state));
        }
        return Ok(events);
    }
    if check_victory(state, &mut events) {
        return Ok(events);
    }

    match phase {
        TurnPhase::Suspended { turns_left } => {
            tracing::debug!(target: "turf::engine", player, turns_left, "action continues");
            events.push(GameEvent::ActionContinues { player, turns_left });
        }
        TurnPhase::Advancing | TurnPhase::AwaitingAction | TurnPhase::Detected => {
            events.push(patrol::advance(state, rng));
            events.extend(scheduler::advance_turn(state));
        }
    }
    Ok(events)
}

fn pass<R: RandomSource + ?Sized>(
    state: &mut GameState,
    player: PlayerId,
    rng: &mut R,
) -> Result<Vec<GameEvent>, GameError> {
    if state.is_terminal() {
        return Err(GameError::GameAlreadyOver);
    }
    let holder = state.current_holder();
    let Some(crew) = state.get_player_mut(player) else {
        return Err(GameError::UnknownPlayer(player));
    };
    if crew.id != holder {
        return Err(GameError::NotYourTurn);
    }
    crew.multi_turn_left = 0;

    tracing::debug!(target: "turf::engine", player, turn = state.turn, "turn passed");
    let mut events = vec![GameEvent::TurnPassed { player }];
    events.push(patrol::advance(state, rng));
    events.extend(scheduler::advance_turn(state));
    Ok(events)
}

/// End the game if a crew has reached the threshold.
fn check_victory(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let Some(winner) = state.leader_at_threshold() else {
        return false;
    };
    let cells = state.get_player(winner).map_or(0, |p| p.owned_cells);
    state.declare_winner(winner);

    tracing::info!(target: "turf::engine", winner, cells, turn = state.turn, "game won");
    events.push(GameEvent::GameWon {
        player: winner,
        cells,
    });
    true
}

/// The crew holding the turn.
pub fn current_holder(state: &GameState) -> PlayerId {
    state.current_holder()
}

/// Income `player` would collect if its turn started now.
pub fn income_for(player: PlayerId, state: &GameState) -> Option<u32> {
    state.income_for(player)
}

/// Whether the game has ended.
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}

/// The winner, once the game has ended.
pub fn winner(state: &GameState) -> Option<PlayerId> {
    state.winner()
}

/// Owns a game and the random source that drives it.
///
/// A convenience over [`apply_action`] for callers that keep one live game.
#[derive(Clone, Debug)]
pub struct GameEngine<R> {
    state: GameState,
    rng: R,
}

impl<R: RandomSource> GameEngine<R> {
    /// Wrap an existing state.
    pub fn new(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    /// Set up a new game, drawing the board from `rng`.
    pub fn create(
        settings: GameSettings,
        roster: Vec<CrewEntry>,
        mut rng: R,
    ) -> Result<Self, SetupError> {
        let state = GameState::create(settings, roster, &mut rng)?;
        Ok(Self { state, rng })
    }

    /// Apply a command, keeping the old state if it is refused.
    pub fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>, GameError> {
        let (next, events) = apply_action(&self.state, &command, &mut self.rng)?;
        self.state = next;
        Ok(events)
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Take the state out of the engine.
    pub fn into_state(self) -> GameState {
        self.state
    }
}
