//! Broad phase: keep only obstacles near the player
//!
//! Distances are measured on the X/Z ground plane between world positions.
//! The [`BroadPhase`] trait lets a spatial index (grid, quadtree) replace the
//! linear scan without touching the movement controller.

use crate::foundation::math::utils;
use crate::scene::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};
use super::collision::Obstacle;

/// Candidate selection for the narrow phase
pub trait BroadPhase {
    /// Obstacles close enough to `reference` to be worth a narrow-phase test,
    /// in their original order.
    fn find_near<'a, E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        reference: NodeKey,
        candidates: &'a [Obstacle],
    ) -> Result<Vec<&'a Obstacle>, SceneError>;
}

/// Linear scan with a fixed ground-plane radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityFilter {
    radius: f32,
}

impl ProximityFilter {
    /// Filter keeping candidates within `radius` (inclusive)
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Search radius
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl BroadPhase for ProximityFilter {
    fn find_near<'a, E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        reference: NodeKey,
        candidates: &'a [Obstacle],
    ) -> Result<Vec<&'a Obstacle>, SceneError> {
        let origin = utils::ground(&graph.world_position(reference)?);

        let mut near = Vec::new();
        for obstacle in candidates {
            let offset = utils::ground(&graph.world_position(obstacle.node)?) - origin;
            if offset.norm() <= self.radius {
                near.push(obstacle);
            }
        }

        log::trace!("Broad phase kept {}/{} obstacles", near.len(), candidates.len());
        Ok(near)
    }
}
