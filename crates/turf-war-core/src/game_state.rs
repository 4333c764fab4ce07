//! Root game state containing all game data.

use crate::board::{Board, CAPTURE_DAMAGE};
use crate::economy;
use crate::hex::HexCoord;
use crate::history::ActionHistory;
use crate::player::Player;
use crate::rng::RandomSource;
use crate::settings::{GameSettings, SettingsError};
use crate::types::{PlayerColor, PlayerId, TurnNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// The complete state of a game at any point in time.
///
/// Callers treat this as a value: the engine takes a state and returns a new
/// one, and nothing else mutates it between transitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Game configuration (immutable after setup).
    pub settings: GameSettings,
    /// The board and patrol.
    pub board: Board,
    /// All crews, in turn order. A crew's id is its index here.
    pub players: Vec<Player>,
    /// Which crew holds the turn.
    pub current_player: PlayerId,
    /// Global turn counter, starting at 0.
    pub turn: TurnNumber,
    /// Log of resolved actions.
    pub history: ActionHistory,
    /// Game phase.
    pub phase: GamePhase,
    /// Winner (if the game has ended).
    pub winner: Option<PlayerId>,
}

/// A crew as it enters the game from the lobby.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewEntry {
    pub name: String,
    pub color: PlayerColor,
}

impl CrewEntry {
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Build a roster from names, using the default palette.
    pub fn roster<S: AsRef<str>>(names: &[S]) -> Vec<CrewEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                CrewEntry::new(name.as_ref(), PlayerColor::default_for_player(i as PlayerId))
            })
            .collect()
    }
}

impl GameState {
    /// Set up a new game: validate the roster, generate the board and give
    /// the first turn to the first crew.
    pub fn create<R: RandomSource + ?Sized>(
        settings: GameSettings,
        roster: Vec<CrewEntry>,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        settings.validate()?;

        if roster.len() < settings.min_players as usize {
            return Err(SetupError::NotEnoughPlayers {
                min: settings.min_players,
            });
        }
        if roster.len() > settings.max_players as usize {
            return Err(SetupError::TooManyPlayers {
                max: settings.max_players,
            });
        }
        if roster.iter().any(|entry| entry.name.trim().is_empty()) {
            return Err(SetupError::EmptyName);
        }
        let mut colors = HashSet::new();
        if !roster.iter().all(|entry| colors.insert(entry.color)) {
            return Err(SetupError::DuplicateColor);
        }

        // Every metro, every start and the patrol need a cell of their own
        let required = settings
            .metro_count
            .saturating_add(roster.len() as u32)
            .saturating_add(1);
        if settings.cell_count() < required {
            return Err(SetupError::BoardTooSmall {
                cells: settings.cell_count(),
                required,
            });
        }

        let ids: Vec<PlayerId> = (0..roster.len() as PlayerId).collect();
        let board = Board::generate(
            settings.width,
            settings.height,
            settings.metro_count,
            &ids,
            rng,
        );

        let players = roster
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut player =
                    Player::new(i as PlayerId, entry.name, entry.color, settings.starting_points);
                player.owned_cells = board.owned_by(player.id);
                player
            })
            .collect();

        tracing::debug!(
            target: "turf::setup",
            width = settings.width,
            height = settings.height,
            patrol = %board.patrol,
            "board generated"
        );

        Ok(Self {
            settings,
            board,
            players,
            current_player: 0,
            turn: 0,
            history: ActionHistory::new(),
            phase: GamePhase::Playing,
            winner: None,
        })
    }

    /// Get a player by ID.
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// Get a mutable player by ID.
    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id as usize)
    }

    /// The crew holding the turn.
    pub fn current_holder(&self) -> PlayerId {
        self.current_player
    }

    /// Get the current player.
    pub fn current_player(&self) -> Option<&Player> {
        self.get_player(self.current_player)
    }

    /// Income the crew would collect if its turn started now.
    pub fn income_for(&self, player: PlayerId) -> Option<u32> {
        self.get_player(player)
            .map(|p| economy::income_for(p.id, &self.board, &self.settings.economy))
    }

    /// Check if the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// The winner, once the game has ended.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// First crew in roster order at or above the winning threshold.
    pub fn leader_at_threshold(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.owned_cells >= self.settings.winning_cells)
            .map(|p| p.id)
    }

    /// End the game in favour of `player`.
    pub(crate) fn declare_winner(&mut self, player: PlayerId) {
        self.winner = Some(player);
        self.phase = GamePhase::Ended;
    }

    /// Verify the data-model invariants.
    ///
    /// Holds for every state reachable through setup and the engine.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for cell in self.board.cells() {
            if cell.damage > CAPTURE_DAMAGE {
                return Err(InvariantViolation::DamageOutOfRange {
                    coord: cell.coord,
                    damage: cell.damage,
                });
            }
            if cell.owner.is_some() != (cell.damage == CAPTURE_DAMAGE) {
                return Err(InvariantViolation::OwnerDamageMismatch {
                    coord: cell.coord,
                    damage: cell.damage,
                });
            }
            if let Some(owner) = cell.owner {
                if self.get_player(owner).is_none() {
                    return Err(InvariantViolation::UnknownOwner {
                        coord: cell.coord,
                        owner,
                    });
                }
            }
        }

        for player in &self.players {
            let actual = self.board.owned_by(player.id);
            if player.owned_cells != actual {
                return Err(InvariantViolation::OwnedCountMismatch {
                    player: player.id,
                    recorded: player.owned_cells,
                    actual,
                });
            }
        }

        if !self.board.contains(&self.board.patrol) {
            return Err(InvariantViolation::PatrolOffBoard(self.board.patrol));
        }
        if self.get_player(self.current_player).is_none() {
            return Err(InvariantViolation::UnknownHolder(self.current_player));
        }
        Ok(())
    }
}

/// Phases of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Game is in progress.
    #[default]
    Playing,
    /// A crew reached the winning threshold.
    Ended,
}

/// Errors from a command the engine refused. The state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game is already over")]
    GameAlreadyOver,
    #[error("No crew with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("It's not this crew's turn")]
    NotYourTurn,
    #[error("Crew is busted and cannot act")]
    Penalized,
    #[error("Not enough points: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("Cell {0} is not on the board")]
    InvalidCoordinate(HexCoord),
    #[error("Cannot attack your own cell")]
    SelfTarget,
}

/// Errors from setting up a game.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SetupError {
    #[error("Need at least {min} crews")]
    NotEnoughPlayers { min: u8 },
    #[error("At most {max} crews can play")]
    TooManyPlayers { max: u8 },
    #[error("Crew name cannot be empty")]
    EmptyName,
    #[error("Two crews picked the same color")]
    DuplicateColor,
    #[error("Board has {cells} cells but setup needs {required}")]
    BoardTooSmall { cells: u32, required: u32 },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// A broken data-model invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Cell {coord} has damage {damage}")]
    DamageOutOfRange { coord: HexCoord, damage: u32 },
    #[error("Cell {coord} ownership disagrees with damage {damage}")]
    OwnerDamageMismatch { coord: HexCoord, damage: u32 },
    #[error("Cell {coord} is owned by unknown crew {owner}")]
    UnknownOwner { coord: HexCoord, owner: PlayerId },
    #[error("Crew {player} records {recorded} cells but owns {actual}")]
    OwnedCountMismatch {
        player: PlayerId,
        recorded: u32,
        actual: u32,
    },
    #[error("Patrol at {0} is off the board")]
    PatrolOffBoard(HexCoord),
    #[error("Turn holder {0} is not on the roster")]
    UnknownHolder(PlayerId),
}
