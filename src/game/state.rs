use crate::error::GridError;

use super::{GameOutcome, Grid, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
    GameOver,
}

/// A grid plus whose turn it is and the win condition, advanced one move at a
/// time by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    current_player: Player,
    win_length: usize,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state on an empty grid
    pub fn initial(width: usize, height: usize, win_length: usize) -> Result<Self, GridError> {
        Ok(Self::from_grid(Grid::new(width, height)?, Player::One, win_length))
    }

    /// Resume from an arbitrary position with `to_move` on turn
    pub fn from_grid(grid: Grid, to_move: Player, win_length: usize) -> Self {
        let outcome = grid.terminal_result(win_length);
        GameState {
            grid,
            current_player: to_move,
            win_length,
            outcome,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.grid.playable_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move in place
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if column >= self.grid.width() {
            return Err(MoveError::InvalidColumn);
        }
        if !self.grid.apply_move(column, self.current_player) {
            return Err(MoveError::ColumnFull);
        }

        self.outcome = self.grid.terminal_result(self.win_length);
        self.current_player = self.current_player.other();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial(7, 6, 4).unwrap();
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial(7, 6, 4).unwrap();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::Two);
        assert_eq!(new_state.grid().value_at(3, 5), Cell::One);
        // Source state untouched
        assert_eq!(state.grid().piece_count(), 0);
    }

    #[test]
    fn test_invalid_and_full_columns() {
        let mut state = GameState::initial(3, 2, 3).unwrap();
        assert_eq!(state.apply_move(3), Err(MoveError::InvalidColumn));
        state.apply_move_mut(0).unwrap();
        state.apply_move_mut(0).unwrap();
        assert_eq!(state.apply_move(0), Err(MoveError::ColumnFull));
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial(7, 6, 4).unwrap();

        // One wins with horizontal line on the bottom row
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // One
            if col < 3 {
                state = state.apply_move(col).unwrap(); // Two (row above)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::One)));
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
        assert!(state.legal_actions().is_empty());
    }

    #[test]
    fn test_draw_on_tiny_grid() {
        // 2x2 with win length 3 can never be won
        let mut state = GameState::initial(2, 2, 3).unwrap();
        for col in [0, 1, 1, 0] {
            state = state.apply_move(col).unwrap();
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_from_grid_picks_up_finished_game() {
        let grid: Grid = "...\nX..\nX..\nX..".parse().unwrap();
        let state = GameState::from_grid(grid, Player::Two, 3);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::One)));
    }
}
