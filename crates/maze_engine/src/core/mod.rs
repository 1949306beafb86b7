//! # Core Engine Module
//!
//! Shared configuration types for every subsystem. File handling lives in
//! [`crate::config`]; the concrete structures live here.

pub mod config;

// Re-export commonly used config types
pub use config::{
    CameraConfig,
    Config,
    ConfigError,
    EngineConfig,
    LevelConfig,
    MovementConfig,
    PointLightSpec,
    SpotLightSpec,
    WallSpec,
};
