//! # Scene Camera
//!
//! A perspective camera positioned by a node of the scene graph. The camera
//! looks down its node's negative world Z axis with the world Y axis as up, so
//! any transform applied to the node (tether translations, orbiting yaw)
//! directly moves the view.
//!
//! Matrices are computed on demand from the current graph state, never cached.

use crate::foundation::math::{utils, Mat4, Point3};
use super::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};

/// Smallest field of view the zoom controls allow (radians)
const MIN_FOV: f32 = 1.0 * std::f32::consts::PI / 180.0;

/// Largest field of view the zoom controls allow (radians)
const MAX_FOV: f32 = 179.0 * std::f32::consts::PI / 180.0;

/// Viewport aspect ratio (width / height)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect(pub f32);

impl Aspect {
    /// 16:9
    pub const WIDESCREEN: Aspect = Aspect(16.0 / 9.0);

    /// 4:3
    pub const CLASSIC: Aspect = Aspect(4.0 / 3.0);

    /// Aspect ratio of a framebuffer. A zero height is treated as one pixel.
    pub fn custom(width: u32, height: u32) -> Self {
        Self(width as f32 / height.max(1) as f32)
    }

    /// Ratio value
    pub fn ratio(&self) -> f32 {
        self.0
    }
}

/// Perspective camera bound to a scene node
#[derive(Debug, Clone)]
pub struct Camera {
    /// Node carrying the camera transform
    node: NodeKey,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Viewport aspect ratio
    pub aspect: Aspect,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera for an existing node
    ///
    /// # Arguments
    /// * `node` - Scene node the camera follows
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Viewport aspect ratio
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(node: NodeKey, fov_degrees: f32, aspect: Aspect, near: f32, far: f32) -> Self {
        Self {
            node,
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Scene node carrying the camera transform
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Widen or narrow the field of view (scroll-wheel zoom)
    pub fn zoom(&mut self, delta_radians: f32) {
        self.fov = (self.fov + delta_radians).clamp(MIN_FOV, MAX_FOV);
        log::trace!("Camera fov now {:.3} rad", self.fov);
    }

    /// World-to-view matrix: eye at the node's world position, looking along
    /// its negative world Z axis, up along its world Y axis.
    pub fn view_matrix<E: WorldMatrixEvaluator>(&self, graph: &SceneGraph<E>) -> Result<Mat4, SceneError> {
        let eye = graph.world_position(self.node)?;
        let target = eye - graph.world_z_axis(self.node)?;
        let up = graph.world_y_axis(self.node)?;
        Ok(Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up))
    }

    /// View-to-clip perspective matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect.ratio(), self.fov, self.near, self.far)
    }
}
