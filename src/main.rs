use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_n::arena::{play_game, Tally};
use connect_n::config::{AgentKind, AppConfig};
use connect_n::game::{GameState, Grid, Player};

/// Play an n-in-a-row game between humans and search agents.
#[derive(Parser)]
#[command(name = "connect-n", about = "Play an n-in-a-row connection game")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_n.toml")]
    config: PathBuf,

    /// Override grid width
    #[arg(long)]
    width: Option<usize>,

    /// Override grid height
    #[arg(long)]
    height: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    win_length: Option<usize>,

    /// Agent for player X: human, minimax, alphabeta or random
    #[arg(long)]
    player_one: Option<String>,

    /// Agent for player O: human, minimax, alphabeta or random
    #[arg(long)]
    player_two: Option<String>,

    /// Override search depth for player X
    #[arg(long)]
    depth_one: Option<usize>,

    /// Override search depth for player O
    #[arg(long)]
    depth_two: Option<usize>,

    /// Start from a position file (rows top to bottom, `.`/`X`/`O`)
    #[arg(long)]
    position: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_kind(name: &str) -> Result<AgentKind> {
    match name {
        "human" => Ok(AgentKind::Human),
        "minimax" => Ok(AgentKind::Minimax),
        "alphabeta" => Ok(AgentKind::Alphabeta),
        "random" => Ok(AgentKind::Random),
        other => bail!(
            "unknown agent '{}' (expected 'human', 'minimax', 'alphabeta', or 'random')",
            other
        ),
    }
}

/// Load the starting state, either from a position file or an empty grid.
fn starting_state(cli: &Cli, config: &AppConfig) -> Result<GameState> {
    let win_length = config.game.win_length;
    let Some(path) = &cli.position else {
        return Ok(GameState::initial(
            config.game.width,
            config.game.height,
            win_length,
        )?);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading position from {}", path.display()))?;
    let grid: Grid = text
        .parse()
        .with_context(|| format!("parsing position in {}", path.display()))?;

    let to_move = if grid.pieces_of(Player::One) > grid.pieces_of(Player::Two) {
        Player::Two
    } else {
        Player::One
    };
    Ok(GameState::from_grid(grid, to_move, win_length))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.game.width = width;
    }
    if let Some(height) = cli.height {
        config.game.height = height;
    }
    if let Some(win_length) = cli.win_length {
        config.game.win_length = win_length;
    }
    if let Some(kind) = &cli.player_one {
        config.player_one.kind = parse_kind(kind)?;
    }
    if let Some(kind) = &cli.player_two {
        config.player_two.kind = parse_kind(kind)?;
    }
    if let Some(depth) = cli.depth_one {
        config.player_one.depth = depth;
    }
    if let Some(depth) = cli.depth_two {
        config.player_two.depth = depth;
    }
    config.validate().context("invalid configuration")?;

    let mut tally = Tally::default();
    for game in 1..=cli.games {
        let state = starting_state(&cli, &config)?;
        let win_length = state.win_length();
        let mut agents = [
            config.player_one.build(Player::One, win_length),
            config.player_two.build(Player::Two, win_length),
        ];

        let record = play_game(state, &mut agents)
            .with_context(|| format!("playing game {game}"))?;
        tally.record(&record);

        println!("{}", record.final_state.grid());
        match record.winner() {
            Some(player) => println!("Game {game}: {} wins!", player.name()),
            None => println!("Game {game}: draw"),
        }
        for player in [Player::One, Player::Two] {
            println!(
                "  {} ({}) used {} evaluations",
                player.name(),
                agents[player.id() as usize - 1].name(),
                record.evaluations_by(player)
            );
        }
    }

    if cli.games > 1 {
        println!(
            "{} games: X {} / O {} / draws {}",
            tally.games(),
            tally.wins_for(Player::One),
            tally.wins_for(Player::Two),
            tally.draws
        );
    }
    Ok(())
}
