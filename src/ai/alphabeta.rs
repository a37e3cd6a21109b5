use crate::game::{Grid, Player};

use super::evaluator::Evaluator;
use super::search::{improves, mover, SearchResult, Strategy};

/// Minimax with alpha-beta pruning.
///
/// Columns are tried in the same ascending order as [`super::MinMax`] and
/// only strict improvements replace the best move, so both strategies agree
/// on column and score for every input.
pub struct AlphaBeta<E> {
    player: Player,
    win_length: usize,
    evaluator: E,
    nodes: u64,
}

impl<E: Evaluator> AlphaBeta<E> {
    pub fn new(player: Player, win_length: usize, evaluator: E) -> Self {
        AlphaBeta {
            player,
            win_length,
            evaluator,
            nodes: 0,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Search `depth` plies below `grid` within the window `(alpha, beta)`.
    pub fn search(
        &mut self,
        grid: &Grid,
        depth: usize,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> SearchResult {
        self.alphabeta(self.player, grid, depth, alpha, beta, maximizing)
    }

    fn alphabeta(
        &mut self,
        acting: Player,
        grid: &Grid,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 || grid.terminal_result(self.win_length).is_some() {
            return SearchResult::leaf(self.evaluator.evaluate(acting, grid));
        }

        let side = mover(acting, maximizing);
        let mut best: Option<SearchResult> = None;
        for col in 0..grid.width() {
            if !grid.is_column_playable(col) {
                continue;
            }
            let child = grid.successor(col, side);
            let score = self
                .alphabeta(acting, &child, depth - 1, alpha, beta, !maximizing)
                .score;
            if improves(score, best, maximizing) {
                best = Some(SearchResult {
                    column: Some(col),
                    score,
                });
            }

            let best_score = best.map_or(score, |b| b.score);
            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if beta <= alpha {
                break;
            }
        }

        // A non-terminal grid always has an open column
        best.unwrap_or_else(|| SearchResult::leaf(self.evaluator.evaluate(acting, grid)))
    }
}

impl<E: Evaluator> Strategy for AlphaBeta<E> {
    fn best_move(&mut self, grid: &Grid, depth: usize) -> SearchResult {
        self.search(grid, depth, f64::NEG_INFINITY, f64::INFINITY, true)
    }

    fn nodes_visited(&self) -> u64 {
        self.nodes
    }

    fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    fn evaluation_count(&self) -> u64 {
        self.evaluator.evaluation_count()
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}
