//! Turn loop that pits two agents against each other.

use log::{debug, info};

use crate::ai::Agent;
use crate::error::ArenaError;
use crate::game::{GameOutcome, GameState, Player};

fn seat(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

/// Result of playing a single game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<(Player, usize)>,
    pub outcome: GameOutcome,
    pub final_state: GameState,
    /// Evaluations spent by each side during this game, indexed by seat
    pub evaluations: [u64; 2],
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Draw => None,
        }
    }

    pub fn evaluations_by(&self, player: Player) -> u64 {
        self.evaluations[seat(player)]
    }
}

/// Play from `state` until the game ends. `agents[0]` plays [`Player::One`].
pub fn play_game(
    mut state: GameState,
    agents: &mut [Box<dyn Agent>; 2],
) -> Result<GameRecord, ArenaError> {
    let evaluations_before = [agents[0].evaluation_count(), agents[1].evaluation_count()];
    let mut moves = Vec::new();

    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }

        let player = state.current_player();
        let agent = &mut agents[seat(player)];
        let column = agent
            .choose_move(state.grid())
            .map_err(|source| ArenaError::Agent { player, source })?;

        let legal = state.legal_actions();
        if let Err(reason) = state.apply_move_mut(column) {
            return Err(ArenaError::IllegalMove {
                player,
                column,
                legal,
                reason,
            });
        }

        info!("{} ({}) plays column {}", player.name(), agent.name(), column + 1);
        debug!("\n{}", state.grid());
        moves.push((player, column));
    };

    match outcome {
        GameOutcome::Winner(p) => info!("{} wins after {} moves", p.name(), moves.len()),
        GameOutcome::Draw => info!("draw after {} moves", moves.len()),
    }

    let evaluations = [
        agents[0].evaluation_count() - evaluations_before[0],
        agents[1].evaluation_count() - evaluations_before[1],
    ];
    Ok(GameRecord {
        moves,
        outcome,
        final_state: state,
        evaluations,
    })
}

/// Running totals over a series of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: [u32; 2],
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, record: &GameRecord) {
        match record.winner() {
            Some(p) => self.wins[seat(p)] += 1,
            None => self.draws += 1,
        }
    }

    pub fn wins_for(&self, player: Player) -> u32 {
        self.wins[seat(player)]
    }

    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{HeuristicKind, PlayerConfig, RandomAgent, SearchAgent};
    use crate::error::AgentError;
    use crate::game::Grid;

    /// Always answers the same column, legal or not.
    struct Stubborn(usize);

    impl Agent for Stubborn {
        fn choose_move(&mut self, _grid: &Grid) -> Result<usize, AgentError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    fn alphabeta(player: Player, depth: usize) -> Box<dyn Agent> {
        Box::new(SearchAgent::alphabeta(
            PlayerConfig {
                player,
                win_length: 4,
                depth,
            },
            HeuristicKind::Threat.evaluator(4),
        ))
    }

    #[test]
    fn plays_to_completion_and_counts_evaluations() {
        let mut agents: [Box<dyn Agent>; 2] =
            [alphabeta(Player::One, 2), Box::new(RandomAgent::seeded(7))];
        let state = GameState::initial(7, 6, 4).unwrap();
        let record = play_game(state, &mut agents).unwrap();

        assert_eq!(record.final_state.outcome(), Some(record.outcome));
        assert_eq!(record.final_state.grid().piece_count(), record.moves.len());
        assert_eq!(record.moves[0].0, Player::One);
        assert!(record.evaluations_by(Player::One) > 0);
        assert_eq!(record.evaluations_by(Player::Two), 0);
    }

    #[test]
    fn rejects_illegal_choice() {
        let mut agents: [Box<dyn Agent>; 2] = [Box::new(Stubborn(0)), Box::new(Stubborn(0))];
        let state = GameState::initial(3, 2, 3).unwrap();
        let err = play_game(state, &mut agents).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::IllegalMove {
                player: Player::One,
                column: 0,
                ..
            }
        ));
    }

    #[test]
    fn finished_position_returns_immediately() {
        let grid: Grid = "...\nX..\nX.O\nXOO".parse().unwrap();
        let state = GameState::from_grid(grid, Player::Two, 3);
        let mut agents: [Box<dyn Agent>; 2] = [Box::new(Stubborn(9)), Box::new(Stubborn(9))];
        let record = play_game(state, &mut agents).unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(record.winner(), Some(Player::One));
    }

    #[test]
    fn tally_counts_results() {
        let mut tally = Tally::default();
        for seed in 0..4 {
            let mut agents: [Box<dyn Agent>; 2] = [
                Box::new(RandomAgent::seeded(seed)),
                Box::new(RandomAgent::seeded(seed + 100)),
            ];
            let record = play_game(GameState::initial(5, 4, 3).unwrap(), &mut agents).unwrap();
            tally.record(&record);
        }
        assert_eq!(tally.games(), 4);
        assert_eq!(
            tally.wins_for(Player::One) + tally.wins_for(Player::Two) + tally.draws,
            4
        );
    }
}
