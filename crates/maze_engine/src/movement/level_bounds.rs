//! Play-area and goal checks, and the reset they trigger

use crate::core::{CameraConfig, LevelConfig};
use crate::foundation::math::{utils, Vec2, Vec3};
use crate::scene::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};

/// Where the player is relative to the level's zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    /// Somewhere playable
    Inside,
    /// On or beyond the play-area edge
    OutOfBounds,
    /// Inside the goal capture square
    GoalReached,
}

impl BoundsCheck {
    /// Whether this result sends the player back to spawn
    pub fn requires_reset(&self) -> bool {
        !matches!(self, Self::Inside)
    }
}

/// Strict point-in-square test on the ground plane
fn in_square(point: &Vec2, center: &Vec2, half_extent: f32) -> bool {
    center.x - half_extent < point.x
        && point.x < center.x + half_extent
        && center.y - half_extent < point.y
        && point.y < center.y + half_extent
}

/// Square play area around the origin plus a square goal zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    play_area_half_extent: f32,
    goal_center: Vec2,
    goal_capture_half_extent: f32,
}

impl LevelBounds {
    /// Bounds from explicit values; `goal_position` is projected to the ground
    pub fn new(play_area_half_extent: f32, goal_position: &Vec3, goal_capture_half_extent: f32) -> Self {
        Self {
            play_area_half_extent,
            goal_center: utils::ground(goal_position),
            goal_capture_half_extent,
        }
    }

    /// Bounds described by a level
    pub fn from_level(level: &LevelConfig) -> Self {
        Self::new(
            level.play_area_half_extent,
            &level.goal_position(),
            level.goal_capture_half_extent,
        )
    }

    /// Classify a world position. Leaving the play area wins over the goal.
    pub fn check(&self, position: &Vec3) -> BoundsCheck {
        let ground = utils::ground(position);
        if !in_square(&ground, &Vec2::zeros(), self.play_area_half_extent) {
            BoundsCheck::OutOfBounds
        } else if in_square(&ground, &self.goal_center, self.goal_capture_half_extent) {
            BoundsCheck::GoalReached
        } else {
            BoundsCheck::Inside
        }
    }
}

/// Spawn transforms of the player and its camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    /// Player position
    pub player_position: Vec3,
    /// Uniform player scale
    pub player_scale: f32,
    /// Camera position
    pub camera_position: Vec3,
    /// Camera pitch in radians
    pub camera_tilt: f32,
}

impl Spawn {
    /// Spawn described by level and camera settings
    pub fn from_config(level: &LevelConfig, camera: &CameraConfig) -> Self {
        Self {
            player_position: level.player_spawn(),
            player_scale: level.player_scale,
            camera_position: level.camera_spawn(),
            camera_tilt: utils::deg_to_rad(camera.tilt_degrees),
        }
    }

    /// Discard all accumulated motion and put both nodes back at spawn
    pub fn apply<E: WorldMatrixEvaluator>(
        &self,
        graph: &mut SceneGraph<E>,
        player: NodeKey,
        camera: NodeKey,
    ) -> Result<(), SceneError> {
        let body = graph.node_mut(player)?;
        body.reset_model_matrix_to(&self.player_position);
        body.scale(&Vec3::repeat(self.player_scale));

        let eye = graph.node_mut(camera)?;
        eye.reset_model_matrix_to(&self.camera_position);
        eye.rotate(self.camera_tilt, 0.0, 0.0);
        Ok(())
    }
}
