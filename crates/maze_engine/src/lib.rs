//! # Maze Engine
//!
//! The core of a small real-time maze scene: a transform hierarchy, collision
//! gating for a rolling player body, and the per-frame movement that ties
//! them together.
//!
//! ## Features
//!
//! - **Scene Graph**: slotmap arena of transform nodes with non-owning parent links
//! - **Collision Gating**: broad phase by ground radius, circle-vs-rectangle narrow phase
//! - **Movement**: per-direction probing with a tethered chase camera
//! - **Render Extraction**: `bytemuck` uniform records for any backend
//! - **Configuration**: TOML / RON files with per-field defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maze_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut graph = SceneGraph::new();
//!     let player = graph.insert(TransformNode::at(Vec3::new(0.0, 1.0, 22.0)))?;
//!     let camera = graph.insert(TransformNode::at(Vec3::new(0.0, 3.0, 24.0)))?;
//!
//!     let wall = graph.insert(TransformNode::at(Vec3::new(0.0, 0.0, 10.0)))?;
//!     let obstacles = vec![Obstacle::new(wall, Orientation::AlongX, 1.0, 10.0)?];
//!
//!     let mut keys = KeyboardState::new();
//!     keys.handle_key(KeyCode::W, KeyAction::Press);
//!
//!     let controller = MovementController::new(MovementConfig::default(), KeyBindings::default());
//!     let outcome = controller.step(&mut graph, player, camera, &obstacles, &keys, 1.0 / 60.0)?;
//!     println!("moved: {:?}", outcome.accepted);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod physics;
pub mod movement;
pub mod input;
pub mod render;

mod application;
mod engine;

#[cfg(test)]
mod tests;

pub use application::{Application, AppError, AppEvent};
pub use engine::{EngineError, EventSource, GameLoop, NoEvents, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        EngineError, EventSource, GameLoop, NoEvents, RunSummary,
        foundation::{
            math::{Mat4, Vec2, Vec3},
            time::Timer,
        },
        scene::{Aspect, Camera, MeshHandle, NodeKey, PointLight, Renderable, SceneError, SceneGraph, SpotLight, TransformNode},
        physics::{BroadPhase, CollisionError, Footprint, Obstacle, Orientation, ProximityFilter},
        movement::{BoundsCheck, Directions, FrameOutcome, LevelBounds, MovementController, Spawn},
        input::{InputState, KeyAction, KeyBindings, KeyCode, KeyboardState, PointerTracker},
        render::{FrameData, HeadlessBackend, RenderBackend, RenderError},
        core::config::{CameraConfig, Config, ConfigError, EngineConfig, LevelConfig, MovementConfig},
    };
}
