use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors raised when a grid is built from malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: usize, height: usize },

    #[error("column {column} has {found} cells, expected {expected}")]
    RaggedColumns {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({col}, {row}) holds {value}, expected 0, 1 or 2")]
    InvalidCellValue { col: usize, row: usize, value: u8 },

    #[error("row {row} contains unknown glyph '{glyph}'")]
    InvalidGlyph { row: usize, glyph: char },

    #[error("piece at ({col}, {row}) floats above an empty cell")]
    FloatingPiece { col: usize, row: usize },
}

/// Errors an agent can hit while choosing a column.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("no playable column on this grid")]
    NoMove,

    #[error("input closed before a column was chosen")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while the driver plays out a game.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("{player:?} selected illegal column {column} (legal: {legal:?})")]
    IllegalMove {
        player: Player,
        column: usize,
        legal: Vec<usize>,
        reason: MoveError,
    },

    #[error("{player:?} failed to choose a move: {source}")]
    Agent {
        player: Player,
        source: AgentError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        let err = GridError::FloatingPiece { col: 2, row: 3 };
        assert_eq!(err.to_string(), "piece at (2, 3) floats above an empty cell");
    }

    #[test]
    fn test_arena_error_display() {
        let err = ArenaError::IllegalMove {
            player: Player::Two,
            column: 5,
            legal: vec![0, 1, 2],
            reason: MoveError::ColumnFull,
        };
        assert_eq!(
            err.to_string(),
            "Two selected illegal column 5 (legal: [0, 1, 2])"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.width must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.width must be > 0"
        );
    }
}
