// Move selection for the agent's side.
//
// Wraps the generator and minimax search, keeps the CPU-bound work off the
// async scheduler and reports what was chosen.

use log::{debug, info};
use std::time::Instant;

use crate::config::Config;
use crate::error::{AgentError, AgentResult};
use crate::eval::{Evaluator, Score};
use crate::search::Search;
use crate::snapshot::Snapshot;
use crate::types::Action;

/// Outcome of one move selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub score: Score,
    pub candidates: usize,
    pub nodes: u64,
    pub elapsed_ms: u128,
}

/// Minimax agent with static configuration
#[derive(Debug, Clone)]
pub struct Bot {
    config: Config,
    evaluator: Evaluator,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        let evaluator = Evaluator::from(&config.evaluation);
        Bot { config, evaluator }
    }

    pub fn player_id(&self) -> &str {
        &self.config.agent.player_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chooses the agent's action on the calling thread
    ///
    /// Returns `None` when the agent has no candidate actions.
    pub fn choose(&self, snapshot: &Snapshot) -> Option<Decision> {
        let start_time = Instant::now();
        let mut search = Search::new(self.player_id(), self.evaluator);

        let choice = search.best_action(snapshot, self.config.search.depth)?;

        Some(Decision {
            action: choice.action,
            score: choice.score,
            candidates: choice.candidates,
            nodes: search.nodes_visited(),
            elapsed_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Chooses the agent's action on the blocking thread pool
    pub async fn decide(&self, snapshot: &Snapshot) -> AgentResult<Option<Decision>> {
        info!("Turn {}: thinking...", snapshot.turn_index);

        let bot = self.clone();
        let snapshot = snapshot.clone();
        let decision = tokio::task::spawn_blocking(move || bot.choose(&snapshot))
            .await
            .map_err(|e| AgentError::SearchTask(e.to_string()))?;

        match &decision {
            Some(d) => info!(
                "Chose {} (score: {}, candidates: {}, nodes: {}, time: {}ms)",
                d.action, d.score, d.candidates, d.nodes, d.elapsed_ms
            ),
            None => debug!("Selector found no candidate actions"),
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Position, Unit, UnitKind};

    fn snapshot(units: Vec<Unit>) -> Snapshot {
        Snapshot {
            players: vec!["bot_player".to_string(), "human".to_string()],
            turn_index: 0,
            board: Board { size: 5, units },
            result: None,
        }
    }

    #[test]
    fn test_choose_reports_search_statistics() {
        let bot = Bot::new(Config::default_hardcoded());
        let s = snapshot(vec![
            Unit {
                owner: "bot_player".to_string(),
                kind: UnitKind::Mage,
                position: Position::new(1, 1),
                hp: 40,
            },
            Unit {
                owner: "human".to_string(),
                kind: UnitKind::Archer,
                position: Position::new(1, 2),
                hp: 30,
            },
        ]);

        let decision = bot.choose(&s).unwrap();

        assert_eq!(
            decision.action,
            Action::Attack {
                from: Position::new(1, 1),
                to: Position::new(1, 2)
            }
        );
        assert!(decision.nodes as usize > decision.candidates);
    }

    #[tokio::test]
    async fn test_decide_without_units_passes() {
        let bot = Bot::new(Config::default_hardcoded());
        let decision = bot.decide(&snapshot(vec![])).await.unwrap();
        assert!(decision.is_none());
    }
}
