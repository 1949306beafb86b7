//! The maze scene: per-frame game logic on top of the engine

use maze_engine::foundation::math::{utils, Vec3};
use maze_engine::input::{KeyAction, KeyCode, KeyboardState, PointerTracker};
use maze_engine::movement::{BoundsCheck, FrameOutcome, MovementController};
use maze_engine::render::{FrameData, RenderBackend};
use maze_engine::scene::{Aspect, SceneGraph};
use maze_engine::{AppError, Application};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::level::MazeLevel;

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Times the player left the play area
    pub out_of_bounds: u32,
    /// Times the player reached the goal
    pub goals: u32,
    /// Resets requested from the keyboard
    pub manual_resets: u32,
    /// Frames where at least one direction was blocked
    pub blocked_frames: u32,
}

/// Marble maze game state
pub struct MazeScene {
    graph: SceneGraph,
    level: MazeLevel,
    controller: MovementController,
    keys: KeyboardState,
    pointer: PointerTracker,
    scroll_step: f32,
    last_outcome: FrameOutcome,
    stats: SceneStats,
}

impl MazeScene {
    /// Build the maze described by `config`
    pub fn new(config: &GameConfig, aspect: Aspect) -> Result<Self, GameError> {
        config.validate()?;

        let mut graph = SceneGraph::new();
        let level = MazeLevel::build(&mut graph, &config.level, &config.camera, aspect)?;
        log::info!("Maze ready with {} walls", level.obstacles.len());

        Ok(Self {
            graph,
            level,
            controller: MovementController::new(config.movement.clone(), config.controls),
            keys: KeyboardState::new(),
            pointer: PointerTracker::new(config.camera.yaw_sensitivity),
            scroll_step: utils::deg_to_rad(config.camera.scroll_step_degrees),
            last_outcome: FrameOutcome::default(),
            stats: SceneStats::default(),
        })
    }

    /// Scene graph holding every node of the maze
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Level handles
    pub fn level(&self) -> &MazeLevel {
        &self.level
    }

    /// Player world position
    pub fn player_position(&self) -> Result<Vec3, AppError> {
        Ok(self.graph.world_position(self.level.player)?)
    }

    /// Camera world position
    pub fn camera_position(&self) -> Result<Vec3, AppError> {
        Ok(self.graph.world_position(self.level.camera.node())?)
    }

    /// Movement result of the last update
    pub fn last_outcome(&self) -> FrameOutcome {
        self.last_outcome
    }

    /// Run counters
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Put player and camera back at spawn
    pub fn reset(&mut self) -> Result<(), AppError> {
        self.level
            .spawn
            .apply(&mut self.graph, self.level.player, self.level.camera.node())?;
        Ok(())
    }
}

impl Application for MazeScene {
    fn update(&mut self, delta_time: f32, total_time: f32) -> Result<(), AppError> {
        match self.level.bounds.check(&self.player_position()?) {
            BoundsCheck::Inside => {}
            BoundsCheck::OutOfBounds => {
                log::info!("Player left the play area at t={:.2}s, resetting", total_time);
                self.stats.out_of_bounds += 1;
                self.reset()?;
            }
            BoundsCheck::GoalReached => {
                log::info!("Goal reached at t={:.2}s, resetting", total_time);
                self.stats.goals += 1;
                self.reset()?;
            }
        }

        let outcome = self.controller.step(
            &mut self.graph,
            self.level.player,
            self.level.camera.node(),
            &self.level.obstacles,
            &self.keys,
            delta_time,
        )?;
        if !outcome.blocked.is_empty() {
            self.stats.blocked_frames += 1;
        }
        self.last_outcome = outcome;
        Ok(())
    }

    fn render(&mut self, backend: &mut dyn RenderBackend, _delta_time: f32, _total_time: f32) -> Result<(), AppError> {
        let frame = FrameData::extract(
            &self.graph,
            &self.level.camera,
            &self.level.point_lights,
            &self.level.spot_lights,
            &self.level.renderables,
        )?;
        backend.submit_frame(&frame)?;
        Ok(())
    }

    fn on_key(&mut self, key: KeyCode, action: KeyAction) -> Result<(), AppError> {
        self.keys.handle_key(key, action);
        if key == self.controller.bindings().reset && action == KeyAction::Press {
            log::info!("Manual reset");
            self.stats.manual_resets += 1;
            self.reset()?;
        }
        Ok(())
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), AppError> {
        if let Some(yaw) = self.pointer.on_move(x, y) {
            self.controller
                .orbit_camera(&mut self.graph, self.level.camera.node(), self.level.player, yaw)?;
        }
        Ok(())
    }

    fn on_scroll(&mut self, _x_offset: f64, y_offset: f64) -> Result<(), AppError> {
        self.level.camera.zoom(y_offset as f32 * self.scroll_step);
        Ok(())
    }

    fn cleanup(&mut self) {
        log::info!("Scene finished: {:?}", self.stats);
    }
}
