// Chain Clash API Types
// Field names follow the game service's GraphQL schema (camelCase) so the
// query response deserializes straight into these types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns the coordinate shifted by (dx, dy), or `None` past the i32 range
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Calculates Manhattan distance between two coordinates
    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The three unit classes a player can field
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Warrior,
    Archer,
    Mage,
}

impl UnitKind {
    /// Damage dealt by one attack of this unit
    pub fn attack_power(&self) -> u64 {
        match self {
            UnitKind::Warrior => 20,
            UnitKind::Archer => 30,
            UnitKind::Mage => 50,
        }
    }
}

/// A single unit on the board
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub owner: String,
    #[serde(rename = "unitType")]
    pub kind: UnitKind,
    pub position: Position,
    pub hp: u64,
}

/// Square board with the units currently alive on it
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub size: i32,
    pub units: Vec<Unit>,
}

impl Board {
    /// Checks if a coordinate lies on the board
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.size && position.y >= 0 && position.y < self.size
    }
}

/// Terminal outcome of a match, tagged by the GraphQL `__typename`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum GameOutcome {
    Victory { winner: String },
    Surrender {
        #[serde(default)]
        loser: String,
    },
    Draw,
    /// Any result kind this agent does not know; still ends the game
    #[serde(other)]
    Unknown,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Victory { winner } => write!(f, "victory for {}", winner),
            GameOutcome::Surrender { loser } => write!(f, "surrender by {}", loser),
            GameOutcome::Draw => write!(f, "draw"),
            GameOutcome::Unknown => write!(f, "unrecognised result"),
        }
    }
}

/// A candidate action for one unit
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(tag = "kind")]
pub enum Action {
    /// Relocate the unit at `from` to the empty cell `to`
    Move { from: Position, to: Position },
    /// Strike the enemy unit standing on `to`
    Attack { from: Position, to: Position },
}

impl Action {
    pub fn from(&self) -> Position {
        match self {
            Action::Move { from, .. } | Action::Attack { from, .. } => *from,
        }
    }

    pub fn to(&self) -> Position {
        match self {
            Action::Move { to, .. } | Action::Attack { to, .. } => *to,
        }
    }

    /// Converts the action to the `moveType` tag the service expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Attack { .. } => "attack",
        }
    }

    /// Flattens the action into the mutation payload
    pub fn to_input(&self) -> MoveInput {
        let (from, to) = (self.from(), self.to());
        MoveInput {
            move_type: self.as_str().to_string(),
            from_x: from.x,
            from_y: from.y,
            to_x: to.x,
            to_y: to.y,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.as_str(), self.from(), self.to())
    }
}

/// Flat `MoveInput` payload of the `submitMove` mutation
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveInput {
    #[serde(rename = "moveType")]
    pub move_type: String,
    pub from_x: i32,
    pub from_y: i32,
    pub to_x: i32,
    pub to_y: i32,
}
