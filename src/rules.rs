// Transition function used between search plies.
//
// Mirrors how the game contract resolves a move: relocation for Move, damage
// from the attacker's kind for Attack (defender removed once its hp runs out),
// turn advanced by one, and victory for the mover once no other owner has units.

use crate::snapshot::Snapshot;
use crate::types::{Action, GameOutcome};

/// Returns the snapshot that results from playing `action` on `snapshot`
///
/// The input is never modified. If there is no unit at `action.from()` only
/// the turn index advances.
pub fn apply_action(snapshot: &Snapshot, action: &Action) -> Snapshot {
    let mut next = snapshot.clone();
    next.turn_index = next.turn_index.saturating_add(1);

    let Some(attacker_idx) = next
        .board
        .units
        .iter()
        .position(|u| u.position == action.from())
    else {
        return next;
    };

    match action {
        Action::Move { to, .. } => {
            next.board.units[attacker_idx].position = *to;
        }
        Action::Attack { to, .. } => {
            let damage = next.board.units[attacker_idx].kind.attack_power();
            if let Some(target_idx) = next.board.units.iter().position(|u| u.position == *to) {
                let target = &mut next.board.units[target_idx];
                if target.hp > damage {
                    target.hp -= damage;
                } else {
                    next.board.units.remove(target_idx);
                }
            }
        }
    }

    let mover = &snapshot.board.units[attacker_idx].owner;
    if next.result.is_none() && next.board.units.iter().all(|u| &u.owner == mover) {
        next.result = Some(GameOutcome::Victory {
            winner: mover.clone(),
        });
    }

    next
}
