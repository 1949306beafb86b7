//! Maze construction
//!
//! Builds every node of the level into a scene graph: ground, player ball,
//! chase camera, walls, goal marker and lights. Walls get their upright
//! orientation by a rotation about the origin followed by a move to their
//! ground position, so the obstacle footprint and the mesh always agree.

use maze_engine::core::{CameraConfig, LevelConfig};
use maze_engine::foundation::math::{utils, Vec3};
use maze_engine::movement::{LevelBounds, Spawn};
use maze_engine::physics::{Obstacle, Orientation};
use maze_engine::scene::{Aspect, Camera, MeshHandle, NodeKey, PointLight, Renderable, SceneGraph, SpotLight, TransformNode};

use crate::error::GameError;

/// Mesh slots the render backend is expected to provide
pub mod meshes {
    use super::MeshHandle;

    /// Ground plane
    pub const GROUND: MeshHandle = MeshHandle(0);
    /// Player ball
    pub const BALL: MeshHandle = MeshHandle(1);
    /// Maze wall
    pub const WALL: MeshHandle = MeshHandle(2);
    /// Finish line marker
    pub const GOAL: MeshHandle = MeshHandle(3);
}

/// Everything placed in the scene graph for one maze
#[derive(Debug, Clone)]
pub struct MazeLevel {
    /// Player ball node
    pub player: NodeKey,
    /// Chase camera
    pub camera: Camera,
    /// Goal marker node
    pub goal: NodeKey,
    /// Blocking walls in layout order
    pub obstacles: Vec<Obstacle>,
    /// Drawn meshes
    pub renderables: Vec<Renderable>,
    /// Point lights
    pub point_lights: Vec<PointLight>,
    /// Spot lights
    pub spot_lights: Vec<SpotLight>,
    /// Where reset puts player and camera
    pub spawn: Spawn,
    /// Play area and goal zone
    pub bounds: LevelBounds,
}

/// Upright wall node at `position`
fn wall_node(orientation: Orientation, position: &Vec3) -> TransformNode {
    let mut node = TransformNode::new();
    match orientation {
        Orientation::AlongX => node.rotate_around_point(
            utils::deg_to_rad(90.0),
            utils::deg_to_rad(-90.0),
            0.0,
            &Vec3::zeros(),
        ),
        Orientation::AlongZ => node.rotate_around_point(0.0, 0.0, utils::deg_to_rad(-90.0), &Vec3::zeros()),
    }
    node.pre_translate(position);
    node
}

impl MazeLevel {
    /// Populate `graph` with the level described by `level`
    pub fn build(graph: &mut SceneGraph, level: &LevelConfig, camera: &CameraConfig, aspect: Aspect) -> Result<Self, GameError> {
        let mut renderables = vec![Renderable::new(graph.insert(TransformNode::new())?, meshes::GROUND)];

        let spawn = Spawn::from_config(level, camera);
        let player = graph.insert(TransformNode::new())?;
        let camera_node = graph.insert(TransformNode::new())?;
        spawn.apply(graph, player, camera_node)?;
        renderables.push(Renderable::new(player, meshes::BALL));

        let mut obstacles = Vec::with_capacity(level.walls.len());
        for wall in &level.walls {
            let orientation = Orientation::from_degrees(wall.rotation_degrees);
            let node = graph.insert(wall_node(orientation, &wall.position()))?;
            obstacles.push(Obstacle::new(node, orientation, level.wall_half_thickness, level.wall_half_length)?);
            renderables.push(Renderable::new(node, meshes::WALL));
        }

        let mut goal_node = TransformNode::new();
        goal_node.translate(&level.goal_position());
        goal_node.scale(&Vec3::from(level.goal_scale));
        let goal = graph.insert(goal_node)?;
        renderables.push(Renderable::new(goal, meshes::GOAL));

        let point_lights = level
            .point_lights
            .iter()
            .map(|light| PointLight::spawn(graph, Vec3::from(light.color), &Vec3::from(light.position)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut spot_lights = Vec::with_capacity(level.spot_lights.len());
        for light in &level.spot_lights {
            let spot = SpotLight::spawn(
                graph,
                Vec3::from(light.color),
                &Vec3::from(light.position),
                light.inner_cone_degrees,
                light.outer_cone_degrees,
            )?;
            let [rx, ry, rz] = light.rotation_degrees.map(utils::deg_to_rad);
            graph.node_mut(spot.node())?.rotate(rx, ry, rz);
            spot_lights.push(spot);
        }

        let bounds = LevelBounds::new(
            level.play_area_half_extent,
            &graph.world_position(goal)?,
            level.goal_capture_half_extent,
        );

        log::debug!(
            "Built maze: {} walls, {} point lights, {} spot lights",
            obstacles.len(),
            point_lights.len(),
            spot_lights.len()
        );

        Ok(Self {
            player,
            camera: Camera::perspective(camera_node, camera.fov_degrees, aspect, camera.near, camera.far),
            goal,
            obstacles,
            renderables,
            point_lights,
            spot_lights,
            spawn,
            bounds,
        })
    }
}
