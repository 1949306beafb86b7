//! Renderable scene objects

use crate::foundation::math::Mat4;
use super::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};

/// Opaque handle to mesh data owned by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// A mesh placed in the world by a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    /// Node carrying the object transform
    pub node: NodeKey,

    /// Mesh drawn at that transform
    pub mesh: MeshHandle,
}

impl Renderable {
    /// Pair a node with a mesh
    pub fn new(node: NodeKey, mesh: MeshHandle) -> Self {
        Self { node, mesh }
    }

    /// Model matrix handed to the renderer
    pub fn model_matrix<E: WorldMatrixEvaluator>(&self, graph: &SceneGraph<E>) -> Result<Mat4, SceneError> {
        graph.world_model_matrix(self.node)
    }
}
