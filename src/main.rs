//! Side Attack entry point
//!
//! Headless runner: builds a game, starts a session through the menu and lets
//! the autopilot play it, logging frames instead of drawing them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use side_attack::consts::TICK_RATE;
use side_attack::persistence::DEFAULT_STORE_FILE;
use side_attack::platform::InputEvent;
use side_attack::renderer::{LogRenderer, Renderer};
use side_attack::sim::GameEvent;
use side_attack::{Difficulty, FileScoreStore, FrameOutcome, Game, GameMode, GamePhase, Settings};

#[derive(Parser)]
#[command(name = "side-attack", about = "Sideways arcade shooter, played by the autopilot")]
struct Cli {
    /// Game mode: fleet or target
    #[arg(long, default_value = "fleet", value_parser = parse_mode)]
    mode: GameMode,

    /// Difficulty: easy, normal or hard
    #[arg(long, default_value = "easy", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Maximum frames to run
    #[arg(long, default_value = "36000")]
    frames: u64,

    /// Settings file path (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file path
    #[arg(long, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Log a frame summary every N frames
    #[arg(long, default_value_t = u64::from(TICK_RATE) * 5)]
    log_every: u64,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    GameMode::from_str(s).ok_or_else(|| format!("unknown mode '{s}'"))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut game = Game::new(cli.mode, settings, Box::new(FileScoreStore::new(&cli.store)));
    game.set_autopilot(true);

    // Start the way a player would: click the matching menu button
    let button = game
        .menu()
        .buttons
        .iter()
        .find(|b| b.difficulty == cli.difficulty)
        .or_else(|| game.menu().buttons.first());
    let Some(button) = button else {
        log::error!("Menu has no buttons");
        return ExitCode::FAILURE;
    };
    if button.difficulty != cli.difficulty {
        log::warn!(
            "{} mode has no {} button, playing {}",
            cli.mode.as_str(),
            cli.difficulty.as_str(),
            button.difficulty.as_str()
        );
    }
    let click = button.bounds.center();
    game.handle_event(InputEvent::MouseDown {
        x: click.x,
        y: click.y,
    });

    let mut renderer = LogRenderer::new(cli.log_every);
    for _ in 0..cli.frames {
        match game.frame() {
            Ok(FrameOutcome::Continue) => {}
            Ok(FrameOutcome::Quit) => break,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::from(2);
            }
        }

        for event in game.events() {
            match event {
                GameEvent::Fired => {}
                other => log::debug!("{:?}", other),
            }
        }
        renderer.draw(&game.view());

        if game.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let stats = &game.state().stats;
    log::info!(
        "Finished after {} frames: score {}, level {}, ships left {}, record {}",
        renderer.frames_drawn(),
        stats.score,
        stats.level,
        stats.lives,
        game.scoreboard().record()
    );
    ExitCode::SUCCESS
}
