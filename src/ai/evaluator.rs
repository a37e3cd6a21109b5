use crate::game::{Grid, Player};

use super::heuristic::Heuristic;

/// Static position scoring used at the leaves of a search.
///
/// Every call to [`Evaluator::evaluate`] bumps the counter reported by
/// [`Evaluator::evaluation_count`], which starts at zero and never decreases.
pub trait Evaluator: Send {
    /// Desirability of `grid` for `player`.
    fn evaluate(&mut self, player: Player, grid: &Grid) -> f64;

    /// Number of `evaluate` calls made so far.
    fn evaluation_count(&self) -> u64;

    fn name(&self) -> &str;

    /// One-ply lookahead: the first playable column whose successor scores
    /// strictly highest for `player`.
    fn best_immediate_move(&mut self, player: Player, grid: &Grid) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for col in grid.playable_columns() {
            let score = self.evaluate(player, &grid.successor(col, player));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }
        best.map(|(col, _)| col)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, player: Player, grid: &Grid) -> f64 {
        (**self).evaluate(player, grid)
    }

    fn evaluation_count(&self) -> u64 {
        (**self).evaluation_count()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn best_immediate_move(&mut self, player: Player, grid: &Grid) -> Option<usize> {
        (**self).best_immediate_move(player, grid)
    }
}

/// Counts evaluations around a pure [`Heuristic`].
pub struct HeuristicEvaluator<H> {
    heuristic: H,
    evaluations: u64,
}

impl<H: Heuristic> HeuristicEvaluator<H> {
    pub fn new(heuristic: H) -> Self {
        HeuristicEvaluator {
            heuristic,
            evaluations: 0,
        }
    }
}

impl<H: Heuristic> Evaluator for HeuristicEvaluator<H> {
    fn evaluate(&mut self, player: Player, grid: &Grid) -> f64 {
        self.evaluations += 1;
        self.heuristic.evaluate(grid, player)
    }

    fn evaluation_count(&self) -> u64 {
        self.evaluations
    }

    fn name(&self) -> &str {
        self.heuristic.name()
    }
}
