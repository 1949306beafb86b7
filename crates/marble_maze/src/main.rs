//! Marble maze
//!
//! Roll the ball through the maze to the goal without leaving the board.
//! The binary plays a scripted run headless; pass a `.toml` or `.ron`
//! configuration file as the only argument to override the shipped maze.

mod config;
mod error;
mod input;
mod level;
mod scene;

use std::path::PathBuf;

use maze_engine::core::Config;
use maze_engine::foundation::logging;
use maze_engine::render::HeadlessBackend;
use maze_engine::scene::Aspect;
use maze_engine::GameLoop;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::ScriptedInput;
use crate::scene::MazeScene;

/// Frame limit for the scripted run when the configuration sets none
const DEMO_FRAMES: u64 = 600;

fn main() -> Result<(), GameError> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let mut config = GameConfig::load_or_default(config_path.as_deref())?;
    logging::init_with_level(config.engine.level_filter());

    match &config_path {
        Some(path) => log::info!("Configuration loaded from {}", path.display()),
        None => log::info!("Using the built-in maze"),
    }

    if config.engine.max_frames.is_none() {
        config.engine.max_frames = Some(DEMO_FRAMES);
    }

    let mut scene = MazeScene::new(&config, Aspect::WIDESCREEN)?;
    let mut game_loop = GameLoop::new(config.engine.clone())?;
    let mut events = ScriptedInput::demo();
    let mut backend = HeadlessBackend::new();

    let summary = game_loop.run(&mut scene, &mut events, &mut backend)?;
    log::info!(
        "Run finished after {} frames ({:.2}s simulated, close requested: {})",
        summary.frames,
        summary.total_time,
        summary.close_requested
    );
    log::info!("{} frames submitted to the backend", backend.frames_submitted());

    let stats = scene.stats();
    log::info!(
        "Goals: {}, out of bounds: {}, manual resets: {}, blocked frames: {}",
        stats.goals,
        stats.out_of_bounds,
        stats.manual_resets,
        stats.blocked_frames
    );

    Ok(())
}
