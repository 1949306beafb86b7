//! GPU-facing uniform records
//!
//! Plain `#[repr(C)]` structs laid out with vec4 granularity (std140 friendly)
//! so a backend can upload them with `bytemuck::bytes_of` without conversion.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Vec3};

/// Per-frame camera data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World-to-view matrix, column-major
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix, column-major
    pub projection: [[f32; 4]; 4],
    /// Eye position in world space, w = 1
    pub position: [f32; 4],
}

impl CameraUniform {
    /// Pack camera matrices and eye position
    pub fn new(view: &Mat4, projection: &Mat4, position: &Vec3) -> Self {
        Self {
            view: (*view).into(),
            projection: (*projection).into(),
            position: [position.x, position.y, position.z, 1.0],
        }
    }
}

/// Point light record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    /// World position, w = 1
    pub position: [f32; 4],
    /// RGB color, w unused
    pub color: [f32; 4],
}

impl PointLightUniform {
    /// Pack a point light
    pub fn new(position: &Vec3, color: &Vec3) -> Self {
        Self {
            position: [position.x, position.y, position.z, 1.0],
            color: [color.x, color.y, color.z, 0.0],
        }
    }
}

/// Spot light record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpotLightUniform {
    /// World position, w = 1
    pub position: [f32; 4],
    /// View-space direction, w = 0
    pub direction: [f32; 4],
    /// RGB color, w unused
    pub color: [f32; 4],
    /// Cone angles [inner, outer, unused, unused] in radians
    pub cone: [f32; 4],
}

impl SpotLightUniform {
    /// Pack a spot light
    pub fn new(position: &Vec3, direction: &Vec3, color: &Vec3, inner_cone: f32, outer_cone: f32) -> Self {
        Self {
            position: [position.x, position.y, position.z, 1.0],
            direction: [direction.x, direction.y, direction.z, 0.0],
            color: [color.x, color.y, color.z, 0.0],
            cone: [inner_cone, outer_cone, 0.0, 0.0],
        }
    }
}

/// Per-object data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    /// World model matrix, column-major
    pub model: [[f32; 4]; 4],
}

impl ObjectUniform {
    /// Pack a model matrix
    pub fn new(model: &Mat4) -> Self {
        Self { model: (*model).into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 32);
        assert_eq!(std::mem::size_of::<SpotLightUniform>(), 64);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 64);
    }

    #[test]
    fn test_matrix_is_column_major() {
        let model = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let object = ObjectUniform::new(&model);
        assert_eq!(object.model[3], [1.0, 2.0, 3.0, 1.0]);

        let bytes = bytemuck::bytes_of(&object);
        assert_eq!(bytes.len(), 64);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[12..16], &[1.0, 2.0, 3.0, 1.0]);
    }
}
