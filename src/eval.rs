// Material + health heuristic, the only leaf signal used by search.

use crate::config::EvaluationConfig;
use crate::snapshot::Snapshot;
use crate::types::Unit;

/// Position score, higher is better for the evaluated player
pub type Score = i64;

/// Scores snapshots from one player's perspective
///
/// `score = unit_weight * |mine| + hp_weight * hp(mine) - unit_weight * |others| - hp_weight * hp(others)`
///
/// Every unit not owned by the evaluated player counts as enemy, so games with
/// more than two players lump all opponents together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    unit_weight: Score,
    hp_weight: Score,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator {
            unit_weight: 50,
            hp_weight: 1,
        }
    }
}

impl From<&EvaluationConfig> for Evaluator {
    fn from(config: &EvaluationConfig) -> Self {
        Evaluator::new(config.unit_weight, config.hp_weight)
    }
}

impl Evaluator {
    pub fn new(unit_weight: Score, hp_weight: Score) -> Self {
        Evaluator {
            unit_weight,
            hp_weight,
        }
    }

    pub fn evaluate(&self, snapshot: &Snapshot, player: &str) -> Score {
        let mine = self.side_score(snapshot.units_of(player));
        let theirs = self.side_score(snapshot.units_not_of(player));

        mine.saturating_sub(theirs)
    }

    /// Weighted unit count plus weighted hp for one side, clamped to the score range
    fn side_score<'a>(&self, units: impl Iterator<Item = &'a Unit>) -> Score {
        let (count, hp) = units.fold((0 as Score, 0 as Score), |(count, hp), unit| {
            let unit_hp = Score::try_from(unit.hp).unwrap_or(Score::MAX);
            (count.saturating_add(1), hp.saturating_add(unit_hp))
        });

        self.unit_weight
            .saturating_mul(count)
            .saturating_add(self.hp_weight.saturating_mul(hp))
    }
}

/// Scores `snapshot` for `player` with the default weights
pub fn evaluate(snapshot: &Snapshot, player: &str) -> Score {
    Evaluator::default().evaluate(snapshot, player)
}
