//! Scene hierarchy
//!
//! Transform nodes live in a single [`SceneGraph`] arena and refer to their
//! parents by [`NodeKey`]. Cameras, lights and renderables do not own a
//! transform themselves; each one holds the key of the node that places it.
//!
//! ```text
//! SceneGraph (slotmap arena)
//!   ├── player node ──── Renderable
//!   ├── camera node ──── Camera
//!   ├── wall nodes ───── Renderable + Obstacle
//!   └── light nodes ──── PointLight / SpotLight
//! ```

slotmap::new_key_type! {
    /// Handle to a node stored in a [`SceneGraph`]
    pub struct NodeKey;
}

mod transform_node;
mod scene_graph;
pub mod camera;
pub mod lights;
pub mod renderable;

pub use transform_node::TransformNode;
pub use scene_graph::{NodeStore, RecursiveEvaluator, SceneError, SceneGraph, WorldMatrixEvaluator};
pub use camera::{Aspect, Camera};
pub use lights::{PointLight, SpotLight};
pub use renderable::{MeshHandle, Renderable};
