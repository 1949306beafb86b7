//! Scene graph arena and world-matrix evaluation
//!
//! The graph is nothing more than the set of [`TransformNode`]s and the parent
//! links between them. Nodes live in a `slotmap` arena so a parent link is a
//! plain key: non-owning, copyable, and independent of destruction order.
//!
//! World matrices are produced by a pluggable [`WorldMatrixEvaluator`]. The
//! default [`RecursiveEvaluator`] walks the parent chain on every query with
//! no memoization, so results always reflect the current local matrices. A
//! caching strategy can be dropped in later without touching callers.

use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::{utils, Mat4, Vec3};
use super::{NodeKey, TransformNode};

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The key does not refer to a live node
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// The node is still referenced as a parent and cannot be removed
    #[error("Scene node {node:?} is still the parent of {children} node(s)")]
    HasChildren {
        /// Node whose removal was requested
        node: NodeKey,
        /// Number of nodes still linked to it
        children: usize,
    },
}

/// Read access to stored nodes, as needed by evaluators
pub trait NodeStore {
    /// Look up a node by key
    fn node(&self, key: NodeKey) -> Option<&TransformNode>;
}

impl NodeStore for SlotMap<NodeKey, TransformNode> {
    fn node(&self, key: NodeKey) -> Option<&TransformNode> {
        self.get(key)
    }
}

/// Strategy for composing a node's world matrix from its ancestry
pub trait WorldMatrixEvaluator {
    /// World matrix of `key`: `parent_world * local`, or `local` for roots
    fn world_model_matrix(&self, nodes: &dyn NodeStore, key: NodeKey) -> Result<Mat4, SceneError>;
}

/// Uncached, recursive evaluation.
///
/// Cost is O(depth) per query. A cyclic parent chain recurses until the
/// stack is exhausted; cycles are not detected.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecursiveEvaluator;

impl WorldMatrixEvaluator for RecursiveEvaluator {
    fn world_model_matrix(&self, nodes: &dyn NodeStore, key: NodeKey) -> Result<Mat4, SceneError> {
        let node = nodes.node(key).ok_or(SceneError::NodeNotFound(key))?;
        match node.parent() {
            Some(parent) => Ok(self.world_model_matrix(nodes, parent)? * node.model_matrix()),
            None => Ok(node.model_matrix()),
        }
    }
}

/// Arena of transform nodes linked by parent handles
pub struct SceneGraph<E: WorldMatrixEvaluator = RecursiveEvaluator> {
    nodes: SlotMap<NodeKey, TransformNode>,
    evaluator: E,
}

impl SceneGraph {
    /// Create an empty graph with the recursive evaluator
    pub fn new() -> Self {
        Self::with_evaluator(RecursiveEvaluator)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: WorldMatrixEvaluator> SceneGraph<E> {
    /// Create an empty graph using a custom evaluation strategy
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            evaluator,
        }
    }

    /// Insert a node and return its handle.
    ///
    /// A parent handle already set on the node must refer to a live node.
    pub fn insert(&mut self, node: TransformNode) -> Result<NodeKey, SceneError> {
        if let Some(parent) = node.parent() {
            self.node(parent)?;
        }
        Ok(self.nodes.insert(node))
    }

    /// Remove a node. Fails while any other node still uses it as parent.
    pub fn remove(&mut self, key: NodeKey) -> Result<TransformNode, SceneError> {
        let children = self
            .nodes
            .iter()
            .filter(|(other, node)| *other != key && node.parent() == Some(key))
            .count();
        if children > 0 {
            return Err(SceneError::HasChildren { node: key, children });
        }
        self.nodes.remove(key).ok_or(SceneError::NodeNotFound(key))
    }

    /// Shared access to a node
    pub fn node(&self, key: NodeKey) -> Result<&TransformNode, SceneError> {
        self.nodes.get(key).ok_or(SceneError::NodeNotFound(key))
    }

    /// Mutable access to a node for local transform operations
    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut TransformNode, SceneError> {
        self.nodes.get_mut(key).ok_or(SceneError::NodeNotFound(key))
    }

    /// Link `child` under `parent` (or detach it with `None`).
    ///
    /// Both nodes must exist. Cycles, including a node parenting itself, are
    /// not rejected; see [`RecursiveEvaluator`].
    pub fn set_parent(&mut self, child: NodeKey, parent: Option<NodeKey>) -> Result<(), SceneError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        self.node_mut(child)?.set_parent(parent);
        Ok(())
    }

    /// Whether the key refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World-space model matrix (fresh copy, recomputed on every call)
    pub fn world_model_matrix(&self, key: NodeKey) -> Result<Mat4, SceneError> {
        self.evaluator.world_model_matrix(&self.nodes, key)
    }

    /// Translation column of the world matrix
    pub fn world_position(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(utils::translation_of(&self.world_model_matrix(key)?))
    }

    /// Normalized world X basis vector
    pub fn world_x_axis(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(utils::basis_axis(&self.world_model_matrix(key)?, 0))
    }

    /// Normalized world Y basis vector
    pub fn world_y_axis(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(utils::basis_axis(&self.world_model_matrix(key)?, 1))
    }

    /// Normalized world Z basis vector
    pub fn world_z_axis(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(utils::basis_axis(&self.world_model_matrix(key)?, 2))
    }
}
