//! # Engine and level configuration
//!
//! Every tunable the movement core and the maze level need, with defaults
//! reproducing the shipped game. All structures are `serde` friendly and
//! partially specified files fall back to the defaults field by field.
//!
//! Vectors are stored as `[f32; 3]` so config files stay readable:
//!
//! ```ron
//! (
//!     move_speed: 5.0,
//!     roll_speed: 3.5,
//!     body_radius: 0.8,
//!     broad_phase_radius: 15.0,
//! )
//! ```

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

// Re-export from the old config module for compatibility
pub use crate::config::{Config, ConfigError};

/// Player movement and collision tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Ground distance per second while a direction key is held
    pub move_speed: f32,
    /// Roll angle per second applied to the player (radians)
    pub roll_speed: f32,
    /// Radius of the player disc used by the narrow phase
    pub body_radius: f32,
    /// Ground radius of the broad phase
    pub broad_phase_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            roll_speed: 3.5,
            body_radius: 0.8,
            broad_phase_radius: 15.0,
        }
    }
}

impl MovementConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("movement.move_speed", self.move_speed)?;
        finite("movement.roll_speed", self.roll_speed)?;
        positive("movement.body_radius", self.body_radius)?;
        positive("movement.broad_phase_radius", self.broad_phase_radius)?;
        if self.broad_phase_radius < self.body_radius {
            return Err(ConfigError::Invalid(
                "movement.broad_phase_radius must not be smaller than movement.body_radius".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config for MovementConfig {}

/// Chase camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Yaw radians per pointer pixel
    pub yaw_sensitivity: f32,
    /// Pitch applied to the camera at spawn, in degrees
    pub tilt_degrees: f32,
    /// Field of view change per scroll step, in degrees
    pub scroll_step_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
            yaw_sensitivity: 0.002,
            tilt_degrees: -35.0,
            scroll_step_degrees: 1.0,
        }
    }
}

impl CameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must lie in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        positive("camera.near", self.near)?;
        if !(self.far > self.near) || !self.far.is_finite() {
            return Err(ConfigError::Invalid("camera.far must be finite and greater than camera.near".to_string()));
        }
        finite("camera.yaw_sensitivity", self.yaw_sensitivity)?;
        finite("camera.tilt_degrees", self.tilt_degrees)?;
        finite("camera.scroll_step_degrees", self.scroll_step_degrees)
    }
}

impl Config for CameraConfig {}

/// One maze wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    /// Ground position of the wall centre
    pub position: [f32; 3],
    /// Yaw tag in degrees; multiples of 180 run along Z
    pub rotation_degrees: f32,
}

impl WallSpec {
    /// Wall at `(x, 0, z)`
    pub const fn new(x: f32, z: f32, rotation_degrees: f32) -> Self {
        Self {
            position: [x, 0.0, z],
            rotation_degrees,
        }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Point light placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightSpec {
    /// Linear RGB color
    pub color: [f32; 3],
    /// World position
    pub position: [f32; 3],
}

/// Spot light placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLightSpec {
    /// Linear RGB color
    pub color: [f32; 3],
    /// World position
    pub position: [f32; 3],
    /// Full-intensity cone angle in degrees
    pub inner_cone_degrees: f32,
    /// Zero-intensity cone angle in degrees
    pub outer_cone_degrees: f32,
    /// Euler rotation applied after placement, in degrees
    pub rotation_degrees: [f32; 3],
}

/// Maze layout: spawns, bounds, goal, walls and lights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Player spawn position
    pub player_spawn: [f32; 3],
    /// Uniform scale applied to the player at spawn
    pub player_scale: f32,
    /// Camera spawn position
    pub camera_spawn: [f32; 3],
    /// Half side of the square play area centred on the origin
    pub play_area_half_extent: f32,
    /// Goal marker position
    pub goal_position: [f32; 3],
    /// Goal marker scale
    pub goal_scale: [f32; 3],
    /// Half side of the goal capture square
    pub goal_capture_half_extent: f32,
    /// Half of a wall's thickness
    pub wall_half_thickness: f32,
    /// Half of a wall's length
    pub wall_half_length: f32,
    /// Wall placements
    pub walls: Vec<WallSpec>,
    /// Point lights
    pub point_lights: Vec<PointLightSpec>,
    /// Spot lights
    pub spot_lights: Vec<SpotLightSpec>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_spawn: [0.0, 1.0, 22.0],
            player_scale: 0.8,
            camera_spawn: [0.0, 3.0, 24.0],
            play_area_half_extent: 23.0,
            goal_position: [0.0, 0.0, -20.0],
            goal_scale: [2.0, 3.0, 1.5],
            goal_capture_half_extent: 0.5,
            wall_half_thickness: 1.0,
            wall_half_length: 10.0,
            walls: vec![
                WallSpec::new(-8.0, -15.0, 90.0),
                WallSpec::new(-9.0, -13.0, 0.0),
                WallSpec::new(-18.0, 9.0, 0.0),
                WallSpec::new(-8.0, 11.0, 90.0),
                WallSpec::new(7.0, 4.0, 90.0),
                WallSpec::new(9.0, -6.0, 0.0),
                WallSpec::new(13.0, -7.0, 90.0),
                WallSpec::new(16.0, -23.0, 0.0),
                WallSpec::new(18.0, 9.0, 0.0),
                WallSpec::new(7.0, 18.0, 90.0),
            ],
            point_lights: vec![
                PointLightSpec {
                    color: [0.0, 2.0, 2.0],
                    position: [-10.0, 2.0, -10.0],
                },
                PointLightSpec {
                    color: [2.0, 0.0, 0.0],
                    position: [10.0, 2.0, 10.0],
                },
            ],
            spot_lights: vec![SpotLightSpec {
                color: [10.0, 300.0, 300.0],
                position: [6.0, 2.0, 4.0],
                inner_cone_degrees: 20.0,
                outer_cone_degrees: 30.0,
                rotation_degrees: [20.0, 60.0, 0.0],
            }],
        }
    }
}

impl LevelConfig {
    /// Player spawn as a vector
    pub fn player_spawn(&self) -> Vec3 {
        Vec3::from(self.player_spawn)
    }

    /// Camera spawn as a vector
    pub fn camera_spawn(&self) -> Vec3 {
        Vec3::from(self.camera_spawn)
    }

    /// Goal position as a vector
    pub fn goal_position(&self) -> Vec3 {
        Vec3::from(self.goal_position)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("level.player_scale", self.player_scale)?;
        positive("level.play_area_half_extent", self.play_area_half_extent)?;
        positive("level.goal_capture_half_extent", self.goal_capture_half_extent)?;
        positive("level.wall_half_thickness", self.wall_half_thickness)?;
        positive("level.wall_half_length", self.wall_half_length)?;
        for spot in &self.spot_lights {
            if spot.inner_cone_degrees > spot.outer_cone_degrees {
                return Err(ConfigError::Invalid(
                    "level.spot_lights: inner cone must not exceed outer cone".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Config for LevelConfig {}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Fixed step in seconds for headless runs
    pub fixed_timestep: f32,
    /// Stop after this many frames (`None` runs until the application quits)
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the fixed step
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Limit the run length
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Parsed log level, `Info` when unrecognised
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("engine.fixed_timestep", self.fixed_timestep)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Orientation;

    #[test]
    fn test_defaults_are_valid() {
        MovementConfig::default().validate().unwrap();
        CameraConfig::default().validate().unwrap();
        LevelConfig::default().validate().unwrap();
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_maze_has_ten_walls() {
        let level = LevelConfig::default();
        assert_eq!(level.walls.len(), 10);

        let along_x = level
            .walls
            .iter()
            .filter(|wall| Orientation::from_degrees(wall.rotation_degrees) == Orientation::AlongX)
            .count();
        assert_eq!(along_x, 5);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let movement: MovementConfig = toml::from_str("move_speed = 7.5").unwrap();
        assert_eq!(movement.move_speed, 7.5);
        assert_eq!(movement.body_radius, 0.8);
        assert_eq!(movement.broad_phase_radius, 15.0);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let level: LevelConfig = ron::from_str("(play_area_half_extent: 30.0, walls: [])").unwrap();
        assert_eq!(level.play_area_half_extent, 30.0);
        assert!(level.walls.is_empty());
        assert_eq!(level.player_spawn, [0.0, 1.0, 22.0]);
    }

    #[test]
    fn test_validation_rejects_nonsense() {
        let movement = MovementConfig { body_radius: 0.0, ..MovementConfig::default() };
        assert!(matches!(movement.validate(), Err(ConfigError::Invalid(_))));

        let camera = CameraConfig { near: 10.0, far: 1.0, ..CameraConfig::default() };
        assert!(camera.validate().is_err());

        let level = LevelConfig { wall_half_length: f32::NAN, ..LevelConfig::default() };
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = std::env::temp_dir().join(format!("maze_engine_level_{}.ron", std::process::id()));
        let mut level = LevelConfig::default();
        level.goal_capture_half_extent = 1.25;

        level.save_to_file(&path).unwrap();
        let loaded = LevelConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, level);
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(LevelConfig::load_or_default(None).unwrap(), LevelConfig::default());

        let missing = std::env::temp_dir().join("maze_engine_missing_level.toml");
        assert!(matches!(LevelConfig::load_or_default(Some(missing.as_path())), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = MovementConfig::load_from_file("movement.json");
        assert!(matches!(result, Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))));

        let result = MovementConfig::default().save_to_file(std::env::temp_dir().join("movement.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_engine_level_filter() {
        assert_eq!(EngineConfig::new().with_log_level("debug").level_filter(), log::LevelFilter::Debug);
        assert_eq!(EngineConfig::new().with_log_level("loud").level_filter(), log::LevelFilter::Info);
    }
}
