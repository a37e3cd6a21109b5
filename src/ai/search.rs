use crate::game::{Grid, Player};

/// Column picked at a node (if any) together with its backed-up score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: f64,
}

impl SearchResult {
    /// A depth-limit or terminal node: a score but no move.
    pub fn leaf(score: f64) -> Self {
        SearchResult {
            column: None,
            score,
        }
    }
}

/// Immutable per-agent settings: who is acting, the run length needed to win,
/// and how many plies to look ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    pub player: Player,
    pub win_length: usize,
    pub depth: usize,
}

/// A depth-limited adversarial search over successor grids.
pub trait Strategy: Send {
    /// Search `depth` plies from `grid` with the acting player to move.
    fn best_move(&mut self, grid: &Grid, depth: usize) -> SearchResult;

    /// Column component of [`Strategy::best_move`].
    fn choose_move(&mut self, grid: &Grid, depth: usize) -> Option<usize> {
        self.best_move(grid, depth).column
    }

    /// Nodes visited since the last reset, leaves included.
    fn nodes_visited(&self) -> u64;

    fn reset_nodes(&mut self);

    /// Evaluations made by the bound evaluator over its lifetime.
    fn evaluation_count(&self) -> u64;

    fn name(&self) -> &str;
}

/// Side to move at a node: the acting player when maximizing, the opponent
/// otherwise.
pub(crate) fn mover(acting: Player, maximizing: bool) -> Player {
    if maximizing {
        acting
    } else {
        acting.other()
    }
}

/// Whether `score` replaces `best` at a node. Only strict improvements count,
/// so the lowest-index column wins ties. The first candidate always seeds the
/// result.
pub(crate) fn improves(score: f64, best: Option<SearchResult>, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best.score,
        Some(best) => score < best.score,
    }
}
