//! The table of attack kinds a crew can use.
//!
//! The catalog is plain data carried in [`crate::settings::GameSettings`];
//! the resolver only ever reads it.

use serde::{Deserialize, Serialize};

/// Kinds of action a crew can take against a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Cheap, one point of damage, least likely to get caught.
    Tag,
    /// Mid-tier piece.
    ThrowUp,
    /// Expensive multi-turn piece that captures a fresh cell outright.
    Burner,
}

impl ActionKind {
    /// All action kinds, cheapest first.
    pub const fn all() -> &'static [ActionKind] {
        &[ActionKind::Tag, ActionKind::ThrowUp, ActionKind::Burner]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Tag => write!(f, "TAG"),
            ActionKind::ThrowUp => write!(f, "THROW-UP"),
            ActionKind::Burner => write!(f, "BURNER"),
        }
    }
}

/// Cost and effect of one action kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Points deducted when the action is used.
    pub cost: u32,
    /// Damage added to the target cell.
    pub damage: u32,
    /// Turns the crew keeps the turn for (1 = ordinary action).
    pub turns: u32,
    /// Probability of a bust when the target is the patrol's cell.
    pub detection_chance: f64,
}

impl ActionSpec {
    pub const fn new(cost: u32, damage: u32, turns: u32, detection_chance: f64) -> Self {
        Self {
            cost,
            damage,
            turns,
            detection_chance,
        }
    }

    /// Whether using this action suspends turn advancement.
    pub const fn is_multi_turn(&self) -> bool {
        self.turns > 1
    }
}

/// Costs and effects for every [`ActionKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCatalog {
    pub tag: ActionSpec,
    pub throw_up: ActionSpec,
    pub burner: ActionSpec,
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self {
            tag: ActionSpec::new(20, 1, 1, 0.6),
            throw_up: ActionSpec::new(50, 3, 1, 0.8),
            burner: ActionSpec::new(150, 10, 2, 0.95),
        }
    }
}

impl ActionCatalog {
    /// Look up the spec for an action kind.
    pub fn get(&self, kind: ActionKind) -> &ActionSpec {
        match kind {
            ActionKind::Tag => &self.tag,
            ActionKind::ThrowUp => &self.throw_up,
            ActionKind::Burner => &self.burner,
        }
    }

    /// Iterate over every kind with its spec, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = (ActionKind, &ActionSpec)> {
        ActionKind::all().iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// The cheapest cost of any action.
    pub fn cheapest_cost(&self) -> u32 {
        self.iter().map(|(_, spec)| spec.cost).min().unwrap_or(0)
    }
}
