// Typed, immutable view of the remote game state at one poll tick.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{AgentError, AgentResult};
use crate::types::{Board, GameOutcome, Position, Unit};

/// Complete game state as returned by the `gameState` query
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Player identifiers in turn order
    pub players: Vec<String>,
    #[serde(rename = "turnIndex")]
    pub turn_index: u64,
    pub board: Board,
    #[serde(default)]
    pub result: Option<GameOutcome>,
}

/// Builds a snapshot from the raw `gameState` object of a query response
///
/// Fails with `MalformedState` when a required field (players, turnIndex,
/// board.size, board.units) is missing or has the wrong shape, when the board
/// size is not positive, when a unit stands off the board, or when two units
/// share a cell.
pub fn parse_snapshot(raw: &Value) -> AgentResult<Snapshot> {
    let snapshot = Snapshot::deserialize(raw).map_err(|e| AgentError::malformed(e.to_string()))?;

    if snapshot.board.size <= 0 {
        return Err(AgentError::malformed(format!(
            "board size must be positive, got {}",
            snapshot.board.size
        )));
    }

    let mut occupied = HashSet::with_capacity(snapshot.board.units.len());
    for unit in &snapshot.board.units {
        if !snapshot.board.contains(unit.position) {
            return Err(AgentError::malformed(format!(
                "unit at {} is outside the {}x{} board",
                unit.position, snapshot.board.size, snapshot.board.size
            )));
        }
        if !occupied.insert(unit.position) {
            return Err(AgentError::malformed(format!(
                "more than one unit at {}",
                unit.position
            )));
        }
    }

    Ok(snapshot)
}

impl Snapshot {
    /// Units owned by `player`, in board order
    pub fn units_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.board.units.iter().filter(move |u| u.owner == player)
    }

    /// Units owned by anyone other than `player`
    pub fn units_not_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.board.units.iter().filter(move |u| u.owner != player)
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.board.units.iter().find(|u| u.position == position)
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// Player whose turn it is; `None` while nobody has joined
    pub fn current_player(&self) -> Option<&str> {
        if self.players.is_empty() {
            return None;
        }
        let idx = (self.turn_index % self.players.len() as u64) as usize;
        self.players.get(idx).map(String::as_str)
    }

    /// First player in turn order that is not `player`
    pub fn opponent_of(&self, player: &str) -> Option<&str> {
        self.players
            .iter()
            .map(String::as_str)
            .find(|p| *p != player)
    }
}
