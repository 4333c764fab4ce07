//! Turf War Core Library
//!
//! This crate contains the rules engine for Turf War, a turn-based territory
//! game on a hex grid. Crews spend points to tag, throw up and burn cells,
//! capture them once damage reaches the threshold, and race to hold enough
//! of the city while a roaming patrol busts anyone it catches.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Deterministic**: A state, a command and a random source always
//!   produce the same next state
//! - **Serializable**: All state can be inspected and stored via serde
//! - **Single entry point**: [`engine::apply_action`] is the only transition

// Core modules
pub mod hex;
pub mod rng;
pub mod types;

// Board and rules data
pub mod board;
pub mod catalog;
pub mod economy;
pub mod settings;

// Game state modules
pub mod events;
pub mod game_state;
pub mod history;
pub mod player;

// Turn pipeline
pub mod bust;
pub mod patrol;
pub mod resolver;
pub mod scheduler;

// Engine and presentation
pub mod engine;
pub mod view;

// Re-exports for convenience
pub use board::{Board, Cell, CAPTURE_DAMAGE};
pub use catalog::{ActionCatalog, ActionKind, ActionSpec};
pub use economy::EconomyConfig;
pub use engine::{apply_action, create_board, replay, Command, GameEngine};
pub use events::GameEvent;
pub use game_state::{
    CrewEntry, GameError, GamePhase, GameState, InvariantViolation, SetupError,
};
pub use hex::HexCoord;
pub use history::{ActionHistory, ActionRecord};
pub use player::Player;
pub use rng::{RandomSource, ScriptedRandom, SeededRng};
pub use scheduler::TurnPhase;
pub use settings::{GameSettings, SettingsError};
pub use types::{PlayerColor, PlayerId, TurnNumber};
pub use view::{CrewStats, GameSnapshot, PlayerSummary};
