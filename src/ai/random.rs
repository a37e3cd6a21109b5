use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::AgentError;
use crate::game::Grid;

use super::agent::Agent;

/// An agent that selects uniformly at random from playable columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, grid: &Grid) -> Result<usize, AgentError> {
        let actions = grid.playable_columns();
        if actions.is_empty() {
            return Err(AgentError::NoMove);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
