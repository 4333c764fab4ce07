//! Core type aliases used throughout the crate.

use serde::{Deserialize, Serialize};

/// Crew index into the roster (0-5 for a six crew game).
pub type PlayerId = u8;

/// Global turn counter.
pub type TurnNumber = u32;

/// RGB color for crew identification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The six crew colors offered in the lobby.
    pub const PALETTE: [PlayerColor; 6] = [
        Self::new(0xFF, 0x00, 0x66), // Pink
        Self::new(0x00, 0xFF, 0x88), // Green
        Self::new(0xFF, 0xDD, 0x00), // Yellow
        Self::new(0x00, 0xBB, 0xFF), // Blue
        Self::new(0xFF, 0x44, 0x00), // Orange
        Self::new(0xAA, 0x00, 0xFF), // Purple
    ];

    /// Default color for a roster slot.
    pub const fn default_for_player(player_id: PlayerId) -> Self {
        Self::PALETTE[player_id as usize % Self::PALETTE.len()]
    }

    /// Convert to hex string (e.g., "#FF0066").
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::new(128, 128, 128) // Gray
    }
}
