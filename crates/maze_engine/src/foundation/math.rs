//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the engine plus the small set of
//! matrix helpers the transform hierarchy is built on. All matrices are
//! column-major with the translation stored in the fourth column.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
};

/// 2D vector type (ground-plane coordinates: `x` = world X, `y` = world Z)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Project a 3D point onto the X/Z ground plane.
    pub fn ground(v: &Vec3) -> Vec2 {
        Vec2::new(v.x, v.z)
    }

    /// Translation column of an affine matrix.
    pub fn translation_of(m: &Mat4) -> Vec3 {
        Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    /// Normalized basis vector `index` (0 = X, 1 = Y, 2 = Z) of a matrix.
    ///
    /// A zero-length basis vector (degenerate scale) yields the zero vector.
    pub fn basis_axis(m: &Mat4, index: usize) -> Vec3 {
        Vec3::new(m[(0, index)], m[(1, index)], m[(2, index)])
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros)
    }
}

/// Extension trait for Mat4 with the transform constructors used by scene nodes
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation_matrix(v: &Vec3) -> Mat4;

    /// Create a non-uniform scale matrix
    fn scale_matrix(v: &Vec3) -> Mat4;

    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Intrinsic X-then-Y-then-Z rotation, `Rx * Ry * Rz`
    fn rotation_xyz(rx: f32, ry: f32, rz: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translation_matrix(v: &Vec3) -> Mat4 {
        Mat4::new_translation(v)
    }

    fn scale_matrix(v: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(v)
    }

    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_xyz(rx: f32, ry: f32, rz: f32) -> Mat4 {
        Self::rotation_x(rx) * Self::rotation_y(ry) * Self::rotation_z(rz)
    }
}
