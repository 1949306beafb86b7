//! Scene lights
//!
//! Lights are placed by scene nodes like everything else. Their GPU-facing
//! records are produced on demand from the current world transforms.

use crate::foundation::math::{utils, Mat3, Mat4, Vec3};
use crate::render::uniforms::{PointLightUniform, SpotLightUniform};
use super::{NodeKey, SceneError, SceneGraph, TransformNode, WorldMatrixEvaluator};

/// Omnidirectional light positioned by a scene node
#[derive(Debug, Clone)]
pub struct PointLight {
    /// Node carrying the light transform
    node: NodeKey,

    /// Linear RGB color, may exceed 1.0 for bright lights
    pub color: Vec3,
}

impl PointLight {
    /// Wrap an existing node
    pub fn new(node: NodeKey, color: Vec3) -> Self {
        Self { node, color }
    }

    /// Insert a fresh root node translated to `position` and wrap it
    pub fn spawn<E: WorldMatrixEvaluator>(
        graph: &mut SceneGraph<E>,
        color: Vec3,
        position: &Vec3,
    ) -> Result<Self, SceneError> {
        let mut node = TransformNode::new();
        node.translate(position);
        let key = graph.insert(node)?;
        log::debug!("Spawned point light at {:?}", position);
        Ok(Self::new(key, color))
    }

    /// Scene node carrying the light transform
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// World-space uniform record
    pub fn uniform<E: WorldMatrixEvaluator>(&self, graph: &SceneGraph<E>) -> Result<PointLightUniform, SceneError> {
        let position = graph.world_position(self.node)?;
        Ok(PointLightUniform::new(&position, &self.color))
    }
}

/// Cone light: a point light that shines down its node's negative Z axis
#[derive(Debug, Clone)]
pub struct SpotLight {
    /// Position and color
    pub point: PointLight,

    /// Angle of full intensity (radians)
    pub inner_cone: f32,

    /// Angle where intensity reaches zero (radians)
    pub outer_cone: f32,
}

impl SpotLight {
    /// Insert a spot light node at `position`. Cone angles are in degrees.
    pub fn spawn<E: WorldMatrixEvaluator>(
        graph: &mut SceneGraph<E>,
        color: Vec3,
        position: &Vec3,
        inner_cone_degrees: f32,
        outer_cone_degrees: f32,
    ) -> Result<Self, SceneError> {
        Ok(Self {
            point: PointLight::spawn(graph, color, position)?,
            inner_cone: utils::deg_to_rad(inner_cone_degrees),
            outer_cone: utils::deg_to_rad(outer_cone_degrees),
        })
    }

    /// Scene node carrying the light transform
    pub fn node(&self) -> NodeKey {
        self.point.node()
    }

    /// Direction the cone points to, in view space
    pub fn view_direction<E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        view: &Mat4,
    ) -> Result<Vec3, SceneError> {
        let forward = -graph.world_z_axis(self.node())?;
        let view_rotation: Mat3 = view.fixed_view::<3, 3>(0, 0).into_owned();
        Ok(view_rotation * forward)
    }

    /// Uniform record. Position is world space, direction is view space.
    pub fn uniform<E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        view: &Mat4,
    ) -> Result<SpotLightUniform, SceneError> {
        let position = graph.world_position(self.node())?;
        let direction = self.view_direction(graph, view)?;
        Ok(SpotLightUniform::new(
            &position,
            &direction,
            &self.point.color,
            self.inner_cone,
            self.outer_cone,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_light_spawn_position() {
        let mut graph = SceneGraph::new();
        let light = PointLight::spawn(&mut graph, Vec3::new(0.0, 2.0, 2.0), &Vec3::new(-10.0, 2.0, -10.0)).unwrap();

        let uniform = light.uniform(&graph).unwrap();
        assert_eq!(uniform.position, [-10.0, 2.0, -10.0, 1.0]);
        assert_eq!(uniform.color, [0.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_spot_light_direction_identity_view() {
        let mut graph = SceneGraph::new();
        let spot = SpotLight::spawn(&mut graph, Vec3::new(10.0, 300.0, 300.0), &Vec3::new(6.0, 2.0, 4.0), 20.0, 30.0)
            .unwrap();

        let direction = spot.view_direction(&graph, &Mat4::identity()).unwrap();
        assert_relative_eq!(direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(spot.inner_cone, utils::deg_to_rad(20.0));
        assert_relative_eq!(spot.outer_cone, utils::deg_to_rad(30.0));
    }

    #[test]
    fn test_spot_light_direction_follows_node_and_view() {
        let mut graph = SceneGraph::new();
        let spot = SpotLight::spawn(&mut graph, Vec3::new(1.0, 1.0, 1.0), &Vec3::zeros(), 20.0, 30.0).unwrap();

        // Pitch the light straight down
        graph.node_mut(spot.node()).unwrap().rotate(-std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        let down = spot.view_direction(&graph, &Mat4::identity()).unwrap();
        assert_relative_eq!(down, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);

        // A view rotated by a quarter yaw carries the direction with it
        let view = Mat4::new_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let rotated = spot.view_direction(&graph, &view).unwrap();
        assert_relative_eq!(rotated, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);

        let uniform = spot.uniform(&graph, &view).unwrap();
        assert_relative_eq!(uniform.direction[1], -1.0, epsilon = 1e-6);
    }
}
