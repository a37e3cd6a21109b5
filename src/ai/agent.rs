use log::debug;

use crate::error::AgentError;
use crate::game::Grid;

use super::alphabeta::AlphaBeta;
use super::evaluator::Evaluator;
use super::minimax::MinMax;
use super::search::{PlayerConfig, SearchResult, Strategy};

/// Universal interface for everything that can pick a column: search agents,
/// humans at a terminal, and baselines.
pub trait Agent {
    /// Select a playable column (0-based) for the current grid.
    fn choose_move(&mut self, grid: &Grid) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Evaluations performed by the agent's evaluator, if it has one.
    fn evaluation_count(&self) -> u64 {
        0
    }
}

/// An agent that delegates to a [`Strategy`] with a fixed depth.
pub struct SearchAgent<S> {
    config: PlayerConfig,
    strategy: S,
    last: Option<SearchResult>,
}

impl<E: Evaluator> SearchAgent<MinMax<E>> {
    pub fn minimax(config: PlayerConfig, evaluator: E) -> Self {
        let strategy = MinMax::new(config.player, config.win_length, evaluator);
        Self::new(config, strategy)
    }
}

impl<E: Evaluator> SearchAgent<AlphaBeta<E>> {
    pub fn alphabeta(config: PlayerConfig, evaluator: E) -> Self {
        let strategy = AlphaBeta::new(config.player, config.win_length, evaluator);
        Self::new(config, strategy)
    }
}

impl<S: Strategy> SearchAgent<S> {
    pub fn new(config: PlayerConfig, strategy: S) -> Self {
        SearchAgent {
            config,
            strategy,
            last: None,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Nodes visited by the most recent decision
    pub fn nodes_visited(&self) -> u64 {
        self.strategy.nodes_visited()
    }

    /// Column and score of the most recent decision
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last
    }
}

impl<S: Strategy> Agent for SearchAgent<S> {
    fn choose_move(&mut self, grid: &Grid) -> Result<usize, AgentError> {
        self.strategy.reset_nodes();
        let evaluations_before = self.strategy.evaluation_count();

        let result = self.strategy.best_move(grid, self.config.depth);
        self.last = Some(result);

        debug!(
            "{} for {} at depth {}: column {:?}, score {}, {} nodes, {} evaluations",
            self.strategy.name(),
            self.config.player.name(),
            self.config.depth,
            result.column,
            result.score,
            self.strategy.nodes_visited(),
            self.strategy.evaluation_count() - evaluations_before,
        );

        result.column.ok_or(AgentError::NoMove)
    }

    fn name(&self) -> &str {
        self.strategy.name()
    }

    fn evaluation_count(&self) -> u64 {
        self.strategy.evaluation_count()
    }
}
