//! Game configuration
//!
//! One file configures the whole game. Every section is optional; missing
//! sections and fields take the values of the shipped maze.
//!
//! ```toml
//! [movement]
//! move_speed = 6.0
//!
//! [camera]
//! fov_degrees = 75.0
//!
//! [controls]
//! forward = "Up"
//! ```

use maze_engine::core::{CameraConfig, Config, ConfigError, EngineConfig, LevelConfig, MovementConfig};
use maze_engine::input::KeyBindings;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frame loop settings
    pub engine: EngineConfig,

    /// Player movement and collision tuning
    pub movement: MovementConfig,

    /// Chase camera settings
    pub camera: CameraConfig,

    /// Maze layout
    pub level: LevelConfig,

    /// Key bindings
    pub controls: KeyBindings,
}

impl GameConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.movement.validate()?;
        self.camera.validate()?;
        self.level.validate()
    }
}

impl Config for GameConfig {}
