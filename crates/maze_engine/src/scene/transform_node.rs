//! Transform node - the positioned element of the scene hierarchy
//!
//! A node owns exactly one local affine matrix and an optional handle to its
//! parent. The handle is non-owning: the parent lives in the same
//! [`SceneGraph`](super::SceneGraph) arena and its lifetime is independent of
//! the link. World-space data needs the whole chain and is therefore queried
//! through the graph; everything here is local.
//!
//! # Composition conventions
//!
//! | operation              | effect on `local`                    | frame            |
//! |------------------------|--------------------------------------|------------------|
//! | `translate`            | `local * T(v)`                       | node's own axes  |
//! | `pre_translate`        | `T(v) * local`                       | parent's axes    |
//! | `rotate`               | `local * Rx * Ry * Rz`               | node's own axes  |
//! | `rotate_around_point`  | `T(p) * Rx * Ry * Rz * T(-p) * local` | parent's axes    |
//! | `scale`                | `local * S(v)`                       | node's own axes  |

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use super::NodeKey;

/// A node of the transform hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    /// Local transform relative to the parent (or world, for roots)
    local: Mat4,

    /// Non-owning link to the parent node
    parent: Option<NodeKey>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformNode {
    /// Create a root node with an identity transform
    pub fn new() -> Self {
        Self {
            local: Mat4::identity(),
            parent: None,
        }
    }

    /// Create a root node from an arbitrary local matrix
    pub fn from_matrix(local: Mat4) -> Self {
        Self { local, parent: None }
    }

    /// Create a root node translated to `position`
    pub fn at(position: Vec3) -> Self {
        Self::from_matrix(Mat4::translation_matrix(&position))
    }

    /// Builder pattern: attach to a parent
    pub fn with_parent(mut self, parent: NodeKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Parent handle, if any
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Replace the parent handle.
    ///
    /// Clearing or replacing the link never touches the previous parent.
    /// Acyclicity is the caller's obligation: a node that (transitively) becomes
    /// its own parent makes the next world-matrix query recurse until the stack
    /// is exhausted.
    pub fn set_parent(&mut self, parent: Option<NodeKey>) {
        self.parent = parent;
    }

    /// Copy of the local model matrix
    pub fn model_matrix(&self) -> Mat4 {
        self.local
    }

    /// Move along the node's own current axes: `local = local * T(v)`
    pub fn translate(&mut self, v: &Vec3) {
        self.local *= Mat4::translation_matrix(v);
    }

    /// Move along the parent's axes regardless of the node's own rotation:
    /// `local = T(v) * local`
    pub fn pre_translate(&mut self, v: &Vec3) {
        self.local = Mat4::translation_matrix(v) * self.local;
    }

    /// Intrinsic Euler rotation about local X, then Y, then Z (radians)
    pub fn rotate(&mut self, rx: f32, ry: f32, rz: f32) {
        self.local *= Mat4::rotation_xyz(rx, ry, rz);
    }

    /// Orbit the node about `pivot`, given in the parent's frame.
    ///
    /// Pre-multiplies `T(pivot) * R(rx, ry, rz) * T(-pivot)`. The product is
    /// applied right to left so a node sitting exactly on the pivot keeps its
    /// translation bit-for-bit and only spins.
    pub fn rotate_around_point(&mut self, rx: f32, ry: f32, rz: f32, pivot: &Vec3) {
        let to_pivot_space = Mat4::translation_matrix(&-pivot) * self.local;
        let rotated = Mat4::rotation_xyz(rx, ry, rz) * to_pivot_space;
        self.local = Mat4::translation_matrix(pivot) * rotated;
    }

    /// Non-uniform scale along the node's own axes
    pub fn scale(&mut self, v: &Vec3) {
        self.local *= Mat4::scale_matrix(v);
    }

    /// Drop all accumulated rotation and scale and place the node at `position`
    pub fn reset_model_matrix_to(&mut self, position: &Vec3) {
        self.local = Mat4::translation_matrix(position);
    }

    /// Translation column of the local matrix
    pub fn position(&self) -> Vec3 {
        utils::translation_of(&self.local)
    }

    /// Normalized local X basis vector
    pub fn x_axis(&self) -> Vec3 {
        utils::basis_axis(&self.local, 0)
    }

    /// Normalized local Y basis vector
    pub fn y_axis(&self) -> Vec3 {
        utils::basis_axis(&self.local, 1)
    }

    /// Normalized local Z basis vector
    pub fn z_axis(&self) -> Vec3 {
        utils::basis_axis(&self.local, 2)
    }
}
