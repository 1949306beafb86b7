//! Per-frame render extraction
//!
//! The scene hands the renderer one [`FrameData`] per frame. Everything in it
//! is already resolved to world (or view) space, so a backend never touches
//! the scene graph.

use crate::scene::{Camera, MeshHandle, PointLight, Renderable, SceneError, SceneGraph, SpotLight, WorldMatrixEvaluator};
use super::uniforms::{CameraUniform, ObjectUniform, PointLightUniform, SpotLightUniform};

/// One mesh draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Object transform
    pub object: ObjectUniform,
}

/// Complete frame rendering data
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Camera parameters (view/projection matrices)
    pub camera: CameraUniform,

    /// Point lights in submission order
    pub point_lights: Vec<PointLightUniform>,

    /// Spot lights in submission order
    pub spot_lights: Vec<SpotLightUniform>,

    /// Mesh draws in submission order
    pub draws: Vec<DrawItem>,
}

impl FrameData {
    /// Resolve the current scene state into uniform records
    pub fn extract<E: WorldMatrixEvaluator>(
        graph: &SceneGraph<E>,
        camera: &Camera,
        point_lights: &[PointLight],
        spot_lights: &[SpotLight],
        renderables: &[Renderable],
    ) -> Result<Self, SceneError> {
        let view = camera.view_matrix(graph)?;
        let camera_uniform = CameraUniform::new(
            &view,
            &camera.projection_matrix(),
            &graph.world_position(camera.node())?,
        );

        let point_lights = point_lights
            .iter()
            .map(|light| light.uniform(graph))
            .collect::<Result<Vec<_>, _>>()?;

        let spot_lights = spot_lights
            .iter()
            .map(|light| light.uniform(graph, &view))
            .collect::<Result<Vec<_>, _>>()?;

        let draws = renderables
            .iter()
            .map(|renderable| {
                Ok(DrawItem {
                    mesh: renderable.mesh,
                    object: ObjectUniform::new(&renderable.model_matrix(graph)?),
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        Ok(Self {
            camera: camera_uniform,
            point_lights,
            spot_lights,
            draws,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{Aspect, TransformNode};

    #[test]
    fn test_extract_resolves_world_space() {
        let mut graph = SceneGraph::new();
        let camera_node = graph.insert(TransformNode::at(Vec3::new(0.0, 3.0, 24.0))).unwrap();
        let parent = graph.insert(TransformNode::at(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        let child = graph
            .insert(TransformNode::at(Vec3::new(0.0, 0.0, 2.0)).with_parent(parent))
            .unwrap();

        let camera = Camera::perspective(camera_node, 90.0, Aspect::WIDESCREEN, 0.1, 100.0);
        let light = PointLight::spawn(&mut graph, Vec3::new(2.0, 0.0, 0.0), &Vec3::new(10.0, 2.0, 10.0)).unwrap();
        let spot = SpotLight::spawn(&mut graph, Vec3::new(1.0, 1.0, 1.0), &Vec3::new(6.0, 2.0, 4.0), 20.0, 30.0).unwrap();
        let renderables = [Renderable::new(child, MeshHandle(7))];

        let frame = FrameData::extract(&graph, &camera, &[light], &[spot], &renderables).unwrap();
        assert_eq!(frame.camera.position, [0.0, 3.0, 24.0, 1.0]);
        assert_eq!(frame.point_lights.len(), 1);
        assert_eq!(frame.spot_lights.len(), 1);
        assert_eq!(frame.draws[0].mesh, MeshHandle(7));
        assert_eq!(frame.draws[0].object.model[3], [1.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_extract_fails_on_removed_node() {
        let mut graph = SceneGraph::new();
        let camera_node = graph.insert(TransformNode::new()).unwrap();
        let gone = graph.insert(TransformNode::new()).unwrap();
        graph.remove(gone).unwrap();

        let camera = Camera::perspective(camera_node, 90.0, Aspect::CLASSIC, 0.1, 100.0);
        let renderables = [Renderable::new(gone, MeshHandle(0))];
        let result = FrameData::extract(&graph, &camera, &[], &[], &renderables);
        assert_eq!(result, Err(SceneError::NodeNotFound(gone)));
    }
}
