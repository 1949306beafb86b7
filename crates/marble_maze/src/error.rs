//! Game-level errors

use maze_engine::core::ConfigError;
use maze_engine::physics::CollisionError;
use maze_engine::scene::SceneError;
use maze_engine::EngineError;
use thiserror::Error;

/// Everything that can stop the game from starting or running
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene construction failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A wall footprint was rejected
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// The frame loop failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
