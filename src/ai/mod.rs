mod agent;
mod alphabeta;
mod evaluator;
pub mod heuristic;
mod human;
mod minimax;
mod random;
mod search;

pub use agent::{Agent, SearchAgent};
pub use alphabeta::AlphaBeta;
pub use evaluator::{Evaluator, HeuristicEvaluator};
pub use heuristic::{Heuristic, HeuristicKind, SimpleHeuristic, ThreatHeuristic, WIN_SCORE};
pub use human::HumanAgent;
pub use minimax::MinMax;
pub use random::RandomAgent;
pub use search::{PlayerConfig, SearchResult, Strategy};
