// Depth-bounded minimax over generated candidate actions.
//
// The agent maximizes, a single designated opponent (first other player in
// turn order) minimizes. No pruning, move ordering or transposition table:
// ties always go to the earliest candidate in generation order.

use crate::eval::{Evaluator, Score};
use crate::movegen::generate_moves;
use crate::rules::apply_action;
use crate::snapshot::Snapshot;
use crate::types::Action;

/// Search role at a given ply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Agent to move, take the highest child value
    Maximizing,
    /// Opponent to move, take the lowest child value
    Minimizing,
}

impl Layer {
    pub fn flip(self) -> Layer {
        match self {
            Layer::Maximizing => Layer::Minimizing,
            Layer::Minimizing => Layer::Maximizing,
        }
    }
}

/// Best root action together with its backed-up value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub action: Action,
    pub score: Score,
    pub candidates: usize,
}

/// Minimax searcher for one agent
#[derive(Debug)]
pub struct Search<'a> {
    agent: &'a str,
    evaluator: Evaluator,
    nodes: u64,
}

impl<'a> Search<'a> {
    pub fn new(agent: &'a str, evaluator: Evaluator) -> Self {
        Search {
            agent,
            evaluator,
            nodes: 0,
        }
    }

    /// Number of positions visited since construction
    pub fn nodes_visited(&self) -> u64 {
        self.nodes
    }

    /// Backed-up minimax value of `snapshot` from the agent's perspective
    pub fn value(&mut self, snapshot: &Snapshot, depth: u8, layer: Layer) -> Score {
        self.nodes += 1;

        if depth == 0 || snapshot.is_terminal() {
            return self.evaluator.evaluate(snapshot, self.agent);
        }

        let side = match layer {
            Layer::Maximizing => Some(self.agent),
            Layer::Minimizing => snapshot.opponent_of(self.agent),
        };
        let moves = match side {
            Some(player) => generate_moves(snapshot, player),
            None => Vec::new(),
        };

        // Stalemate leaf
        if moves.is_empty() {
            return self.evaluator.evaluate(snapshot, self.agent);
        }

        let children = moves.iter().map(|action| {
            let child = apply_action(snapshot, action);
            self.value(&child, depth - 1, layer.flip())
        });

        match layer {
            Layer::Maximizing => children.fold(Score::MIN, Score::max),
            Layer::Minimizing => children.fold(Score::MAX, Score::min),
        }
    }

    /// Picks the root action with the highest value after `depth` plies of
    /// lookahead, opponent replying first
    ///
    /// Returns `None` when the agent has no candidate actions.
    pub fn best_action(&mut self, snapshot: &Snapshot, depth: u8) -> Option<Choice> {
        let candidates = generate_moves(snapshot, self.agent);
        let mut best: Option<(Action, Score)> = None;

        for action in &candidates {
            let child = apply_action(snapshot, action);
            let score = self.value(&child, depth, Layer::Minimizing);

            // Strict comparison keeps the first of equal candidates
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((*action, score));
            }
        }

        best.map(|(action, score)| Choice {
            action,
            score,
            candidates: candidates.len(),
        })
    }
}

/// Minimax value of `snapshot` for `agent` with the default evaluator
pub fn search(snapshot: &Snapshot, agent: &str, depth: u8, layer: Layer) -> Score {
    Search::new(agent, Evaluator::default()).value(snapshot, depth, layer)
}

/// Chooses the agent's action, or `None` to pass
pub fn choose_move(snapshot: &Snapshot, agent: &str, depth: u8) -> Option<Action> {
    Search::new(agent, Evaluator::default())
        .best_action(snapshot, depth)
        .map(|choice| choice.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use crate::types::{Board, GameOutcome, Position, Unit, UnitKind};

    fn unit(owner: &str, kind: UnitKind, x: i32, y: i32, hp: u64) -> Unit {
        Unit {
            owner: owner.to_string(),
            kind,
            position: Position::new(x, y),
            hp,
        }
    }

    fn snapshot(size: i32, units: Vec<Unit>) -> Snapshot {
        Snapshot {
            players: vec!["agent".to_string(), "enemy".to_string()],
            turn_index: 0,
            board: Board { size, units },
            result: None,
        }
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Warrior, 2, 2, 100),
                unit("enemy", UnitKind::Mage, 2, 3, 40),
            ],
        );

        for layer in [Layer::Maximizing, Layer::Minimizing] {
            assert_eq!(search(&s, "agent", 0, layer), evaluate(&s, "agent"));
        }
    }

    #[test]
    fn test_terminal_snapshot_is_not_expanded() {
        let mut s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Mage, 2, 2, 40),
                unit("enemy", UnitKind::Warrior, 2, 3, 10),
            ],
        );
        s.result = Some(GameOutcome::Draw);

        let mut searcher = Search::new("agent", Evaluator::default());
        assert_eq!(
            searcher.value(&s, 3, Layer::Maximizing),
            evaluate(&s, "agent")
        );
        assert_eq!(searcher.nodes_visited(), 1);
    }

    #[test]
    fn test_no_moves_is_a_stalemate_leaf() {
        // Opponent has no units, so the minimizing layer cannot move
        let s = snapshot(3, vec![unit("agent", UnitKind::Warrior, 1, 1, 100)]);

        assert_eq!(
            search(&s, "agent", 2, Layer::Minimizing),
            evaluate(&s, "agent")
        );
    }

    #[test]
    fn test_single_player_has_no_opponent_layer() {
        let mut s = snapshot(3, vec![unit("agent", UnitKind::Warrior, 1, 1, 100)]);
        s.players = vec!["agent".to_string()];

        assert_eq!(
            search(&s, "agent", 2, Layer::Minimizing),
            evaluate(&s, "agent")
        );
    }

    #[test]
    fn test_maximizer_takes_the_kill() {
        let s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Mage, 2, 2, 40),
                unit("enemy", UnitKind::Warrior, 2, 3, 30),
            ],
        );

        // One ply: only the lethal attack changes the score
        let value = search(&s, "agent", 1, Layer::Maximizing);
        assert_eq!(value, 50 + 40);
    }

    #[test]
    fn test_minimizer_assumes_best_reply() {
        let mut s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Warrior, 2, 2, 100),
                unit("enemy", UnitKind::Mage, 2, 3, 40),
            ],
        );
        s.turn_index = 1;

        // Enemy mage hits for 50 on its ply
        let value = search(&s, "agent", 1, Layer::Minimizing);
        assert_eq!(value, (50 + 50) - (50 + 40));
    }

    #[test]
    fn test_choose_move_passes_without_candidates() {
        let s = snapshot(5, vec![unit("enemy", UnitKind::Warrior, 2, 2, 100)]);
        assert_eq!(choose_move(&s, "agent", 2), None);
    }

    #[test]
    fn test_choose_move_prefers_lethal_attack() {
        let s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Mage, 0, 0, 40),
                unit("enemy", UnitKind::Archer, 0, 1, 20),
            ],
        );

        assert_eq!(
            choose_move(&s, "agent", 2),
            Some(Action::Attack {
                from: Position::new(0, 0),
                to: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn test_ties_go_to_first_generated_candidate() {
        // Lone unit, nothing can change material: every candidate ties
        let s = snapshot(3, vec![unit("agent", UnitKind::Warrior, 1, 1, 100)]);

        let choice = Search::new("agent", Evaluator::default())
            .best_action(&s, 2)
            .unwrap();

        assert_eq!(choice.action, generate_moves(&s, "agent")[0]);
        assert_eq!(choice.candidates, 8);
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let s = snapshot(
            5,
            vec![
                unit("agent", UnitKind::Mage, 2, 2, 40),
                unit("enemy", UnitKind::Warrior, 2, 3, 30),
            ],
        );
        let before = s.clone();

        let _ = choose_move(&s, "agent", 2);

        assert_eq!(s, before);
    }
}
