// Candidate action enumeration.
//
// Every unit may step anywhere inside the 5x5 envelope around it (|dx|, |dy| <= 2)
// and may attack an enemy that is orthogonally adjacent. No movement cost,
// line of sight or per-turn resource is checked here.

use crate::snapshot::Snapshot;
use crate::types::Action;

/// Half-width of the movement envelope
pub const MOVE_RANGE: i32 = 2;

/// Maximum Manhattan distance for an attack
pub const ATTACK_RANGE: u32 = 1;

/// Generates all candidate actions for `player`
///
/// Order is unit-by-unit in board order, then dx ascending, then dy ascending.
/// The (0, 0) offset never yields a candidate: the cell is held by the unit itself.
pub fn generate_moves(snapshot: &Snapshot, player: &str) -> Vec<Action> {
    let mut actions = Vec::new();

    for unit in snapshot.units_of(player) {
        let from = unit.position;

        for dx in -MOVE_RANGE..=MOVE_RANGE {
            for dy in -MOVE_RANGE..=MOVE_RANGE {
                let Some(to) = from
                    .offset(dx, dy)
                    .filter(|to| snapshot.board.contains(*to))
                else {
                    continue;
                };

                match snapshot.unit_at(to) {
                    None => actions.push(Action::Move { from, to }),
                    Some(target)
                        if target.owner != player && from.manhattan_distance(to) <= ATTACK_RANGE =>
                    {
                        actions.push(Action::Attack { from, to })
                    }
                    Some(_) => {}
                }
            }
        }
    }

    actions
}
