use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ai::{Agent, HeuristicKind, HumanAgent, PlayerConfig, RandomAgent, SearchAgent};
use crate::error::ConfigError;
use crate::game::Player;

/// Grid dimensions and the run length needed to win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 7,
            height: 6,
            win_length: 4,
        }
    }
}

/// Which kind of agent controls a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Human,
    Minimax,
    Alphabeta,
    Random,
}

/// Settings for one side of the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Search depth in plies (search agents only)
    pub depth: usize,
    pub heuristic: HeuristicKind,
    /// Show the heuristic's one-ply suggestion to human players
    pub hint: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            kind: AgentKind::Alphabeta,
            depth: 4,
            heuristic: HeuristicKind::default(),
            hint: true,
        }
    }
}

impl AgentConfig {
    /// Build the agent playing `player` in a game won by `win_length` in a row.
    pub fn build(&self, player: Player, win_length: usize) -> Box<dyn Agent> {
        let evaluator = self.heuristic.evaluator(win_length);
        let config = PlayerConfig {
            player,
            win_length,
            depth: self.depth,
        };
        match self.kind {
            AgentKind::Human => {
                Box::new(HumanAgent::stdio(player, self.hint.then_some(evaluator)))
            }
            AgentKind::Minimax => Box::new(SearchAgent::minimax(config, evaluator)),
            AgentKind::Alphabeta => Box::new(SearchAgent::alphabeta(config, evaluator)),
            AgentKind::Random => Box::new(RandomAgent::new()),
        }
    }

    fn validate(&self, side: &str) -> Result<(), ConfigError> {
        let searches = matches!(self.kind, AgentKind::Minimax | AgentKind::Alphabeta);
        if searches && self.depth == 0 {
            return Err(ConfigError::Validation(format!(
                "{side}.depth must be >= 1 for search agents"
            )));
        }
        Ok(())
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub player_one: AgentConfig,
    pub player_two: AgentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            player_one: AgentConfig {
                kind: AgentKind::Human,
                ..AgentConfig::default()
            },
            player_two: AgentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.width == 0 || self.game.height == 0 {
            return Err(ConfigError::Validation(
                "game.width and game.height must be > 0".into(),
            ));
        }
        if self.game.win_length < 2 {
            return Err(ConfigError::Validation(
                "game.win_length must be >= 2".into(),
            ));
        }
        if self.game.win_length > self.game.width.max(self.game.height) {
            return Err(ConfigError::Validation(
                "game.win_length must fit on the grid".into(),
            ));
        }
        self.player_one.validate("player_one")?;
        self.player_two.validate("player_two")?;
        Ok(())
    }

    /// Agent config for `player`
    pub fn agent(&self, player: Player) -> &AgentConfig {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.player_one.kind, AgentKind::Human);
        assert_eq!(config.player_two.kind, AgentKind::Alphabeta);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[player_two]
kind = "minimax"
heuristic = "simple"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player_two.kind, AgentKind::Minimax);
        assert_eq!(config.player_two.heuristic, HeuristicKind::Simple);
        // Other fields should be defaults
        assert_eq!(config.player_two.depth, 4);
        assert_eq!(config.game.width, 7);
    }

    #[test]
    fn test_empty_toml_is_all_defaults_for_sections() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.win_length, 4);
        assert_eq!(config.player_one.kind, AgentKind::Human);
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.game.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unreachable_win_length() {
        let mut config = AppConfig::default();
        config.game.win_length = 8;
        assert!(config.validate().is_err());
        config.game.win_length = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth_search() {
        let mut config = AppConfig::default();
        config.player_two.depth = 0;
        assert!(config.validate().is_err());
        // Depth is irrelevant for humans
        config.player_two.kind = AgentKind::Human;
        config.validate().unwrap();
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.height, 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
width = 5
height = 4
win_length = 3

[player_one]
kind = "random"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.width, 5);
        assert_eq!(config.agent(Player::One).kind, AgentKind::Random);
        assert_eq!(config.agent(Player::Two).depth, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nwin_length = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_build_search_agents() {
        let config = AppConfig::default();
        let agent = config.player_two.build(Player::Two, config.game.win_length);
        assert_eq!(agent.name(), "AlphaBeta");

        let minimax = AgentConfig {
            kind: AgentKind::Minimax,
            ..AgentConfig::default()
        };
        assert_eq!(minimax.build(Player::One, 4).name(), "MinMax");
    }
}
