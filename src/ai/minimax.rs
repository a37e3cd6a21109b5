use crate::game::{Grid, Player};

use super::evaluator::Evaluator;
use super::search::{improves, mover, SearchResult, Strategy};

/// Exhaustive depth-limited minimax.
///
/// Successor grids are generated on demand and dropped when their call
/// returns, so memory stays proportional to the depth of the search.
pub struct MinMax<E> {
    player: Player,
    win_length: usize,
    evaluator: E,
    nodes: u64,
}

impl<E: Evaluator> MinMax<E> {
    pub fn new(player: Player, win_length: usize, evaluator: E) -> Self {
        MinMax {
            player,
            win_length,
            evaluator,
            nodes: 0,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Search `depth` plies below `grid`. `maximizing` is true on the acting
    /// player's own turn.
    pub fn search(&mut self, grid: &Grid, depth: usize, maximizing: bool) -> SearchResult {
        self.minimax(self.player, grid, depth, maximizing)
    }

    fn minimax(
        &mut self,
        acting: Player,
        grid: &Grid,
        depth: usize,
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
            let score = self.minimax(acting, &child, depth - 1, !maximizing).score;
            if improves(score, best, maximizing) {
                best = Some(SearchResult {
                    column: Some(col),
                    score,
                });
            }
        }

        // A non-terminal grid always has an open column
        best.unwrap_or_else(|| SearchResult::leaf(self.evaluator.evaluate(acting, grid)))
    }
}

impl<E: Evaluator> Strategy for MinMax<E> {
    fn best_move(&mut self, grid: &Grid, depth: usize) -> SearchResult {
        self.search(grid, depth, true)
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
        "MinMax"
    }
}
