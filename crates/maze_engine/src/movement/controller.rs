//! Per-frame movement with collision avoidance
//!
//! Each of the four ground directions is handled on its own:
//!
//! ```text
//! key held? ── no ──> idle
//!    │ yes
//!    v
//! broad phase -> narrow phase on each candidate
//!    │ first hit                 │ no hit
//!    v                           v
//! blocked (nothing moves)    pre_translate player + camera, roll player
//! ```
//!
//! A blocked direction never prevents another direction from moving in the
//! same frame, so sliding along a wall while pressing two keys works.

use bitflags::bitflags;

use crate::core::MovementConfig;
use crate::foundation::math::Vec3;
use crate::input::{InputState, KeyBindings, KeyCode};
use crate::physics::{BroadPhase, Obstacle, ProximityFilter};
use crate::scene::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};

bitflags! {
    /// Set of ground directions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// Towards -Z
        const FORWARD = 1 << 0;
        /// Towards +Z
        const BACK = 1 << 1;
        /// Towards -X
        const LEFT = 1 << 2;
        /// Towards +X
        const RIGHT = 1 << 3;
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::empty()
    }
}

/// What happened to each requested direction this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Directions that moved the player
    pub accepted: Directions,
    /// Directions refused by an obstacle
    pub blocked: Directions,
}

impl FrameOutcome {
    /// No direction was requested
    pub fn is_idle(&self) -> bool {
        self.accepted.is_empty() && self.blocked.is_empty()
    }
}

/// One direction: which key, which way, which roll
struct Motion {
    direction: Directions,
    axis: Vec3,
    /// Roll per unit of `roll_speed * dt` about local X and Z
    roll: (f32, f32),
}

impl Motion {
    fn key(&self, bindings: &KeyBindings) -> KeyCode {
        if self.direction == Directions::FORWARD {
            bindings.forward
        } else if self.direction == Directions::BACK {
            bindings.back
        } else if self.direction == Directions::LEFT {
            bindings.left
        } else {
            bindings.right
        }
    }
}

fn motions() -> [Motion; 4] {
    [
        Motion { direction: Directions::FORWARD, axis: Vec3::new(0.0, 0.0, -1.0), roll: (-1.0, 0.0) },
        Motion { direction: Directions::BACK, axis: Vec3::new(0.0, 0.0, 1.0), roll: (1.0, 0.0) },
        Motion { direction: Directions::LEFT, axis: Vec3::new(-1.0, 0.0, 0.0), roll: (0.0, 1.0) },
        Motion { direction: Directions::RIGHT, axis: Vec3::new(1.0, 0.0, 0.0), roll: (0.0, -1.0) },
    ]
}

/// Moves the player and tethered camera from held keys
#[derive(Debug, Clone)]
pub struct MovementController<B: BroadPhase = ProximityFilter> {
    config: MovementConfig,
    bindings: KeyBindings,
    broad_phase: B,
}

impl MovementController {
    /// Controller using a [`ProximityFilter`] of `config.broad_phase_radius`
    pub fn new(config: MovementConfig, bindings: KeyBindings) -> Self {
        let broad_phase = ProximityFilter::new(config.broad_phase_radius);
        Self::with_broad_phase(config, bindings, broad_phase)
    }
}

impl<B: BroadPhase> MovementController<B> {
    /// Controller with a custom broad phase
    pub fn with_broad_phase(config: MovementConfig, bindings: KeyBindings, broad_phase: B) -> Self {
        Self {
            config,
            bindings,
            broad_phase,
        }
    }

    /// Movement tuning
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Key bindings
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Run one frame of movement.
    ///
    /// Directions are evaluated in the order forward, back, left, right. Each
    /// probe starts from wherever earlier directions left the player.
    pub fn step<E: WorldMatrixEvaluator>(
        &self,
        graph: &mut SceneGraph<E>,
        player: NodeKey,
        camera: NodeKey,
        obstacles: &[Obstacle],
        input: &dyn InputState,
        dt: f32,
    ) -> Result<FrameOutcome, SceneError> {
        let mut outcome = FrameOutcome::default();

        for motion in motions() {
            if !input.is_key_down(motion.key(&self.bindings)) {
                continue;
            }

            let delta = motion.axis * (self.config.move_speed * dt);
            if self.is_blocked(graph, player, obstacles, &delta)? {
                log::debug!("Move {:?} blocked", motion.direction);
                outcome.blocked |= motion.direction;
                continue;
            }

            graph.node_mut(camera)?.pre_translate(&delta);

            let roll = self.config.roll_speed * dt;
            let body = graph.node_mut(player)?;
            body.pre_translate(&delta);
            let pivot = body.position();
            body.rotate_around_point(motion.roll.0 * roll, 0.0, motion.roll.1 * roll, &pivot);

            log::trace!("Move {:?} by {:?}", motion.direction, delta);
            outcome.accepted |= motion.direction;
        }

        Ok(outcome)
    }

    /// Orbit the camera about the player by `yaw` radians
    pub fn orbit_camera<E: WorldMatrixEvaluator>(
        &self,
        graph: &mut SceneGraph<E>,
        camera: NodeKey,
        player: NodeKey,
        yaw: f32,
    ) -> Result<(), SceneError> {
        let pivot = graph.node(player)?.position();
        graph.node_mut(camera)?.rotate_around_point(0.0, yaw, 0.0, &pivot);
        Ok(())
    }

    fn is_blocked<E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        player: NodeKey,
        obstacles: &[Obstacle],
        delta: &Vec3,
    ) -> Result<bool, SceneError> {
        let body = graph.world_position(player)?;
        for obstacle in self.broad_phase.find_near(graph, player, obstacles)? {
            if obstacle.blocks(graph, &body, self.config.body_radius, delta)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use crate::input::{KeyAction, KeyboardState};
    use crate::physics::Orientation;
    use crate::scene::TransformNode;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        graph: SceneGraph,
        player: NodeKey,
        camera: NodeKey,
    }

    fn rig() -> Rig {
        let mut graph = SceneGraph::new();
        let player = graph.insert(TransformNode::at(Vec3::new(0.0, 1.0, 22.0))).unwrap();
        let camera = graph.insert(TransformNode::at(Vec3::new(0.0, 3.0, 24.0))).unwrap();
        Rig { graph, player, camera }
    }

    fn holding(keys: &[KeyCode]) -> KeyboardState {
        let mut state = KeyboardState::new();
        for key in keys {
            state.handle_key(*key, KeyAction::Press);
        }
        state
    }

    fn controller() -> MovementController {
        MovementController::new(MovementConfig::default(), KeyBindings::default())
    }

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut rig = rig();
        let before = rig.graph.node(rig.player).unwrap().model_matrix();

        let outcome = controller()
            .step(&mut rig.graph, rig.player, rig.camera, &[], &KeyboardState::new(), DT)
            .unwrap();

        assert!(outcome.is_idle());
        assert_eq!(rig.graph.node(rig.player).unwrap().model_matrix(), before);
    }

    #[test]
    fn test_forward_moves_player_and_camera_alike() {
        let mut rig = rig();
        let outcome = controller()
            .step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[KeyCode::W]), 0.1)
            .unwrap();

        assert_eq!(outcome.accepted, Directions::FORWARD);
        assert_relative_eq!(rig.graph.world_position(rig.player).unwrap(), Vec3::new(0.0, 1.0, 21.5), epsilon = 1e-5);
        assert_relative_eq!(rig.graph.world_position(rig.camera).unwrap(), Vec3::new(0.0, 3.0, 23.5), epsilon = 1e-5);
    }

    #[test]
    fn test_roll_directions() {
        let cases = [
            (KeyCode::W, Mat4::new_rotation(Vec3::new(-0.35, 0.0, 0.0))),
            (KeyCode::S, Mat4::new_rotation(Vec3::new(0.35, 0.0, 0.0))),
            (KeyCode::A, Mat4::new_rotation(Vec3::new(0.0, 0.0, 0.35))),
            (KeyCode::D, Mat4::new_rotation(Vec3::new(0.0, 0.0, -0.35))),
        ];

        for (key, expected_rotation) in cases {
            let mut rig = rig();
            controller()
                .step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[key]), 0.1)
                .unwrap();

            let model = rig.graph.node(rig.player).unwrap().model_matrix();
            let rotation = model.fixed_view::<3, 3>(0, 0).into_owned();
            let expected = expected_rotation.fixed_view::<3, 3>(0, 0).into_owned();
            assert_relative_eq!(rotation, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_camera_only_translates() {
        let mut rig = rig();
        controller()
            .step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[KeyCode::A]), 0.2)
            .unwrap();

        let expected = Mat4::new_translation(&Vec3::new(-1.0, 3.0, 24.0));
        assert_relative_eq!(rig.graph.node(rig.camera).unwrap().model_matrix(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_blocked_direction_mutates_nothing() {
        let mut rig = rig();
        // Long side along X, just in front of the player
        let wall = rig.graph.insert(TransformNode::at(Vec3::new(0.0, 0.0, 20.0))).unwrap();
        let obstacles = [Obstacle::new(wall, Orientation::AlongX, 1.0, 10.0).unwrap()];
        let player_before = rig.graph.node(rig.player).unwrap().model_matrix();
        let camera_before = rig.graph.node(rig.camera).unwrap().model_matrix();

        let outcome = controller()
            .step(&mut rig.graph, rig.player, rig.camera, &obstacles, &holding(&[KeyCode::W]), 0.1)
            .unwrap();

        assert_eq!(outcome.blocked, Directions::FORWARD);
        assert!(outcome.accepted.is_empty());
        assert_eq!(rig.graph.node(rig.player).unwrap().model_matrix(), player_before);
        assert_eq!(rig.graph.node(rig.camera).unwrap().model_matrix(), camera_before);
    }

    #[test]
    fn test_directions_are_independent() {
        let mut rig = rig();
        let wall = rig.graph.insert(TransformNode::at(Vec3::new(0.0, 0.0, 20.0))).unwrap();
        let obstacles = [Obstacle::new(wall, Orientation::AlongX, 1.0, 10.0).unwrap()];

        let outcome = controller()
            .step(
                &mut rig.graph,
                rig.player,
                rig.camera,
                &obstacles,
                &holding(&[KeyCode::W, KeyCode::D]),
                0.1,
            )
            .unwrap();

        assert_eq!(outcome.blocked, Directions::FORWARD);
        assert_eq!(outcome.accepted, Directions::RIGHT);
        assert_relative_eq!(rig.graph.world_position(rig.player).unwrap(), Vec3::new(0.5, 1.0, 22.0), epsilon = 1e-5);
    }

    #[test]
    fn test_far_obstacles_are_skipped_by_broad_phase() {
        let mut rig = rig();
        let wall = rig.graph.insert(TransformNode::at(Vec3::new(0.0, 0.0, 20.0))).unwrap();
        let obstacles = [Obstacle::new(wall, Orientation::AlongX, 1.0, 10.0).unwrap()];

        // A broad phase that sees nothing lets the move through
        let blind = MovementController::with_broad_phase(
            MovementConfig::default(),
            KeyBindings::default(),
            ProximityFilter::new(0.5),
        );
        let outcome = blind
            .step(&mut rig.graph, rig.player, rig.camera, &obstacles, &holding(&[KeyCode::W]), 0.1)
            .unwrap();
        assert_eq!(outcome.accepted, Directions::FORWARD);
    }

    #[test]
    fn test_custom_bindings() {
        let mut rig = rig();
        let bindings = KeyBindings { forward: KeyCode::Up, ..KeyBindings::default() };
        let controller = MovementController::new(MovementConfig::default(), bindings);

        let outcome = controller
            .step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[KeyCode::W]), DT)
            .unwrap();
        assert!(outcome.is_idle());

        let outcome = controller
            .step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[KeyCode::Up]), DT)
            .unwrap();
        assert_eq!(outcome.accepted, Directions::FORWARD);
    }

    #[test]
    fn test_orbit_camera_keeps_distance_to_player() {
        let mut rig = rig();
        let controller = controller();
        controller.orbit_camera(&mut rig.graph, rig.camera, rig.player, 0.7).unwrap();

        let player = rig.graph.world_position(rig.player).unwrap();
        let camera = rig.graph.world_position(rig.camera).unwrap();
        assert_relative_eq!((camera - player).norm(), Vec3::new(0.0, 2.0, 2.0).norm(), epsilon = 1e-5);
        assert_relative_eq!(camera.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_node_is_an_error() {
        let mut rig = rig();
        rig.graph.remove(rig.camera).unwrap();

        let result = controller().step(&mut rig.graph, rig.player, rig.camera, &[], &holding(&[KeyCode::W]), DT);
        assert_eq!(result, Err(SceneError::NodeNotFound(rig.camera)));
    }
}
