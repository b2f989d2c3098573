use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{GameMode, GameSession, HighScore, PieceSeed};

use self::app::PlayApp;
use crate::tui::Tui;

mod app;
mod screen;

const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";
const DEFAULT_TICK_MILLIS: u64 = 50;
const DEFAULT_CLEAR_PAUSE_MILLIS: u64 = 400;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// How pieces are chosen: `default` keeps the falling piece, `random`
    /// changes it on every drop
    #[clap(long, default_value_t = GameMode::Default)]
    mode: GameMode,
    /// File holding the best score
    #[clap(long, default_value_os_t = PathBuf::from(DEFAULT_HIGH_SCORE_FILE))]
    high_score_file: PathBuf,
    /// Length of one game tick in milliseconds
    #[clap(
        long,
        default_value_t = DEFAULT_TICK_MILLIS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    tick_millis: u64,
    /// How long completed rows stay on screen before they are removed, in milliseconds
    #[clap(long, default_value_t = DEFAULT_CLEAR_PAUSE_MILLIS)]
    clear_pause_millis: u64,
    /// Seed for a reproducible piece sequence (32 hexadecimal digits)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            mode: GameMode::Default,
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            tick_millis: DEFAULT_TICK_MILLIS,
            clear_pause_millis: DEFAULT_CLEAR_PAUSE_MILLIS,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        mode,
        high_score_file,
        tick_millis,
        clear_pause_millis,
        seed,
    } = arg;

    let mut session = match seed {
        Some(seed) => GameSession::with_seed(*mode, *seed),
        None => GameSession::new(*mode),
    };
    session.set_high_score(HighScore::load(high_score_file));

    let mut app = PlayApp::new(
        session,
        Duration::from_millis(*tick_millis),
        Duration::from_millis(*clear_pause_millis),
    );
    Tui::new().run(&mut app).context("terminal UI failed")?;

    let session = app.session();
    HighScore::save_if_higher(high_score_file, session.high_score())?;

    println!("{}", summary(session));
    Ok(())
}

fn summary(session: &GameSession) -> String {
    let headline = if session.session_state().is_game_over() {
        "Game over!"
    } else {
        "Game ended."
    };
    let high_score = if session.is_new_high_score() {
        "New high score!".to_owned()
    } else {
        format!("High score: {}", session.high_score())
    };
    format!("{headline} Score: {}. {high_score}", session.score())
}
