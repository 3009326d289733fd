use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use std::path::PathBuf;
use term_snake::config::AppConfig;
use term_snake::leaderboard::LeaderboardClient;
use term_snake::logging;
use term_snake::modes::{PlayMode, ScoresMode, fit_to_terminal};

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal with a shared high-score board")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in tiles (default: fit the terminal)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in tiles (default: fit the terminal)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for replayable games
    #[arg(long)]
    seed: Option<u64>,

    /// Never drop food onto the snake
    #[arg(long)]
    food_avoids_snake: bool,

    /// Base URL of the hosted score table
    #[arg(long, env = "SNAKE_LEADERBOARD_URL")]
    leaderboard_url: Option<String>,

    /// API key for the hosted score table
    #[arg(long, env = "SNAKE_LEADERBOARD_KEY", hide_env_values = true)]
    leaderboard_key: Option<String>,

    /// Local score file, used when no leaderboard URL is set
    #[arg(long)]
    scores_file: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<LevelFilter>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Print the high-score board
    Scores,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded configuration
    fn into_config(self) -> Result<(AppConfig, Mode, Option<u64>)> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.grid_width = width;
            config.fit_to_terminal = false;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
            config.fit_to_terminal = false;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.game.tick_interval_ms = tick_ms;
        }
        if self.food_avoids_snake {
            config.game.food_avoids_snake = true;
        }
        if self.leaderboard_url.is_some() {
            config.leaderboard.url = self.leaderboard_url;
        }
        if self.leaderboard_key.is_some() {
            config.leaderboard.api_key = self.leaderboard_key;
        }
        if let Some(scores_file) = self.scores_file {
            config.leaderboard.scores_file = scores_file;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }

        Ok((config, self.mode, self.seed))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (mut config, mode, seed) = Cli::parse().into_config()?;

    if matches!(mode, Mode::Play) && config.fit_to_terminal {
        fit_to_terminal(&mut config.game)?;
    }
    config.validate()?;

    logging::init(&config.log_file, config.log_level)?;
    info!("Scores kept in {}", config.leaderboard.describe_store());

    let store = config.leaderboard.open_store();
    let leaderboard = LeaderboardClient::new(store, config.leaderboard.limit);

    // Dispatch to appropriate mode
    match mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config.game, seed, leaderboard);
            play_mode.run().await?;
        }
        Mode::Scores => {
            let mut scores_mode =
                ScoresMode::new(leaderboard, config.leaderboard.describe_store());
            scores_mode.run().await?;
        }
    }

    Ok(())
}
