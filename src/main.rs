//! # Level Mover Main Entry Point
//!
//! Loads the configuration, opens the record store, and runs the fixed-rate
//! game loop with macroquad rendering.

use clap::Parser;
use level_mover::{
    GameConfig, GameSession, InputHandler, JsonRecordStore, LevelMoverResult, MacroquadDisplay,
    MemoryRecordStore, PlayerInput, RecordStore,
};
use log::{error, info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Level Mover.
#[derive(Parser, Debug)]
#[command(name = "level-mover")]
#[command(about = "A sliding-tile puzzle where the level moves around you")]
#[command(version)]
struct Args {
    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Index of the first level to play
    #[arg(long, default_value_t = 0)]
    start_level: usize,

    /// Record file, overrides the configured one
    #[arg(long)]
    records: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Level Mover")]
async fn main() -> LevelMoverResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Level Mover v{}", level_mover::VERSION);

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => {
            let config = GameConfig::default();
            config.validate()?;
            config
        }
    };

    run_game(&args, config).await
}

/// Initializes `env_logger`. `RUST_LOG` takes precedence over the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn open_records(args: &Args, config: &GameConfig) -> Box<dyn RecordStore> {
    let path = args
        .records
        .clone()
        .unwrap_or_else(|| config.record_file.clone());

    match JsonRecordStore::open(&path) {
        Ok(store) => {
            info!("Record total: {}", store.total());
            Box::new(store)
        }
        Err(e) => {
            warn!(
                "Could not open records at {}: {}. Records will not be saved.",
                path.display(),
                e
            );
            Box::new(MemoryRecordStore::new())
        }
    }
}

/// Main game loop implementation.
async fn run_game(args: &Args, config: GameConfig) -> LevelMoverResult<()> {
    let (width, height) = MacroquadDisplay::window_size(&config);
    request_new_screen_size(width as f32, height as f32);

    let store = open_records(args, &config);
    let sim_dt = 1.0 / config.ticks_per_second as f32;
    let mut display = MacroquadDisplay::new(&config);
    let mut session = GameSession::start(config, store, args.start_level)?;
    let input_handler = InputHandler::new();

    display.add_message(format!("Level {}. Collect every star!", session.level_id()));

    let mut accumulator = 0.0;
    let mut pending: Option<PlayerInput> = None;

    loop {
        if let Some(input) = input_handler.get_input() {
            if input == PlayerInput::Quit {
                info!("Player quit the game");
                break;
            }
            pending = Some(input);
        }

        accumulator += get_frame_time().min(0.1);

        let mut substeps = 0;
        while accumulator >= sim_dt && substeps < level_mover::config::MAX_SUBSTEPS {
            // One-shot input goes to the first substep only.
            match session.tick(pending.take()) {
                Ok(events) => display.push_events(&events),
                Err(e) => {
                    error!("Tick failed: {}", e);
                    display.add_message(format!("Error: {e}"));
                }
            }
            accumulator -= sim_dt;
            substeps += 1;
        }

        display.render(&session);

        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}
