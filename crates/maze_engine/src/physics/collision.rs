//! Narrow phase: circle against axis-aligned rectangle on the ground plane
//!
//! The player is a disc of radius `body_radius` in the X/Z plane and each
//! obstacle is a rectangle centred on its world position. The test is an
//! avoidance check on a *proposed* destination: nothing is pushed out or
//! resolved, the caller simply rejects the move when it would overlap.
//!
//! Only the destination point is examined. A step longer than the obstacle
//! thickness can tunnel straight through it.

use thiserror::Error;

use crate::foundation::math::{utils, Vec2, Vec3};
use crate::scene::{NodeKey, SceneError, SceneGraph, WorldMatrixEvaluator};

/// Collision setup errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Footprint extents must be finite and strictly positive
    #[error("Degenerate obstacle footprint: half_width={half_width}, half_height={half_height}")]
    DegenerateFootprint {
        /// Requested extent along world X
        half_width: f32,
        /// Requested extent along world Z
        half_height: f32,
    },
}

/// Ground axis along which an obstacle's long side runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Long side parallel to world Z
    AlongZ,
    /// Long side parallel to world X
    AlongX,
}

impl Orientation {
    /// Classify a yaw tag in degrees: multiples of 180 run along Z, anything
    /// else runs along X.
    pub fn from_degrees(degrees: f32) -> Self {
        if degrees.rem_euclid(180.0) == 0.0 {
            Self::AlongZ
        } else {
            Self::AlongX
        }
    }
}

/// Half extents of an obstacle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Half extent along world X
    pub half_width: f32,
    /// Half extent along world Z
    pub half_height: f32,
}

impl Footprint {
    /// Validated footprint from world-axis half extents
    pub fn new(half_width: f32, half_height: f32) -> Result<Self, CollisionError> {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid(half_width) || !valid(half_height) {
            return Err(CollisionError::DegenerateFootprint { half_width, half_height });
        }
        Ok(Self { half_width, half_height })
    }

    /// Footprint of a wall described by its thickness and length.
    ///
    /// `AlongZ` keeps `(half_thickness, half_length)`, `AlongX` swaps them.
    pub fn oriented(half_thickness: f32, half_length: f32, orientation: Orientation) -> Result<Self, CollisionError> {
        match orientation {
            Orientation::AlongZ => Self::new(half_thickness, half_length),
            Orientation::AlongX => Self::new(half_length, half_thickness),
        }
    }
}

/// A blocking rectangle placed by a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Node whose world position is the rectangle centre
    pub node: NodeKey,
    /// Orientation the footprint was resolved from
    pub orientation: Orientation,
    /// Resolved world-axis extents
    pub footprint: Footprint,
}

impl Obstacle {
    /// Build an obstacle, resolving its footprint once
    pub fn new(
        node: NodeKey,
        orientation: Orientation,
        half_thickness: f32,
        half_length: f32,
    ) -> Result<Self, CollisionError> {
        Ok(Self {
            node,
            orientation,
            footprint: Footprint::oriented(half_thickness, half_length, orientation)?,
        })
    }

    /// Would a body at `body_position` overlap this obstacle after moving by
    /// `proposed_delta`?
    pub fn blocks<E: WorldMatrixEvaluator>(
        &self,
        graph: &SceneGraph<E>,
        body_position: &Vec3,
        body_radius: f32,
        proposed_delta: &Vec3,
    ) -> Result<bool, SceneError> {
        let obstacle_position = graph.world_position(self.node)?;
        Ok(will_collide(
            body_position,
            body_radius,
            &obstacle_position,
            proposed_delta,
            self.footprint.half_width,
            self.footprint.half_height,
        ))
    }
}

/// Closest point of the rectangle `[-hw, hw] x [-hh, hh]` to `v`, relative to
/// the rectangle centre. Points inside the rectangle map to themselves.
fn closest_point(v: &Vec2, half_width: f32, half_height: f32) -> Vec2 {
    let cx = v.x.abs().min(half_width);
    let cz = v.y.abs().min(half_height);
    let signed = |value: f32, component: f32| if component >= 0.0 { value } else { -value };

    if cx == 0.0 {
        Vec2::new(0.0, signed(cz, v.y))
    } else if cz == 0.0 {
        Vec2::new(signed(cx, v.x), 0.0)
    } else {
        Vec2::new(signed(cx, v.x), signed(cz, v.y))
    }
}

/// Circle-vs-rectangle test on a proposed destination.
///
/// Contact happens when the distance from the destination to the nearest
/// point of the rectangle is strictly less than `body_radius`; touching
/// exactly at the radius is free.
pub fn will_collide(
    body_position: &Vec3,
    body_radius: f32,
    obstacle_position: &Vec3,
    proposed_delta: &Vec3,
    half_width: f32,
    half_height: f32,
) -> bool {
    let tentative = utils::ground(&(body_position + proposed_delta));
    let v = tentative - utils::ground(obstacle_position);
    let closest = closest_point(&v, half_width, half_height);
    (closest - v).norm() < body_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RADIUS: f32 = 0.8;

    #[test]
    fn test_orientation_from_degrees() {
        assert_eq!(Orientation::from_degrees(0.0), Orientation::AlongZ);
        assert_eq!(Orientation::from_degrees(180.0), Orientation::AlongZ);
        assert_eq!(Orientation::from_degrees(-180.0), Orientation::AlongZ);
        assert_eq!(Orientation::from_degrees(540.0), Orientation::AlongZ);
        assert_eq!(Orientation::from_degrees(90.0), Orientation::AlongX);
        assert_eq!(Orientation::from_degrees(-90.0), Orientation::AlongX);
        assert_eq!(Orientation::from_degrees(45.0), Orientation::AlongX);
    }

    #[test]
    fn test_footprint_orientation() {
        let along_z = Footprint::oriented(1.0, 10.0, Orientation::AlongZ).unwrap();
        assert_eq!((along_z.half_width, along_z.half_height), (1.0, 10.0));

        let along_x = Footprint::oriented(1.0, 10.0, Orientation::AlongX).unwrap();
        assert_eq!((along_x.half_width, along_x.half_height), (10.0, 1.0));
    }

    #[test]
    fn test_degenerate_footprint_rejected() {
        assert!(Footprint::new(0.0, 1.0).is_err());
        assert!(Footprint::new(1.0, -2.0).is_err());
        assert!(Footprint::new(f32::NAN, 1.0).is_err());
        assert_eq!(
            Footprint::new(f32::INFINITY, 1.0),
            Err(CollisionError::DegenerateFootprint { half_width: f32::INFINITY, half_height: 1.0 })
        );
    }

    #[test]
    fn test_gap_equal_to_radius_is_free() {
        // Destination exactly `radius` to the right of the rectangle edge
        let body = Vec3::new(0.125 + RADIUS, 0.0, 3.0);
        let collides = will_collide(&body, RADIUS, &Vec3::zeros(), &Vec3::zeros(), 0.125, 10.0);
        assert!(!collides);
    }

    #[test]
    fn test_gap_below_radius_collides() {
        let body = Vec3::new(0.125 + 0.79, 0.0, 3.0);
        let collides = will_collide(&body, RADIUS, &Vec3::zeros(), &Vec3::zeros(), 0.125, 10.0);
        assert!(collides);
    }

    #[test]
    fn test_proposed_delta_is_applied() {
        // Currently clear, but the step would bring the disc within range
        let body = Vec3::new(3.0, 1.0, 0.0);
        let obstacle = Vec3::new(0.0, 0.0, 0.0);
        assert!(!will_collide(&body, RADIUS, &obstacle, &Vec3::zeros(), 1.0, 10.0));
        assert!(will_collide(&body, RADIUS, &obstacle, &Vec3::new(-1.5, 0.0, 0.0), 1.0, 10.0));
    }

    #[test]
    fn test_diagonal_corner_distance() {
        // Corner at (1, 10); destination 0.5 out on both axes: distance ~0.7071
        let body = Vec3::new(1.5, 0.0, 10.5);
        assert!(will_collide(&body, RADIUS, &Vec3::zeros(), &Vec3::zeros(), 1.0, 10.0));

        // 0.6 out on both axes: distance ~0.8485, clear
        let body = Vec3::new(-1.6, 0.0, -10.6);
        assert!(!will_collide(&body, RADIUS, &Vec3::zeros(), &Vec3::zeros(), 1.0, 10.0));

        let closest = closest_point(&Vec2::new(-1.6, -10.6), 1.0, 10.0);
        assert_relative_eq!(closest, Vec2::new(-1.0, -10.0));
    }

    #[test]
    fn test_closest_point_axis_branches() {
        // Directly in front along Z: closest lies on the Z axis
        assert_eq!(closest_point(&Vec2::new(0.0, 12.0), 1.0, 10.0), Vec2::new(0.0, 10.0));
        assert_eq!(closest_point(&Vec2::new(0.0, -12.0), 1.0, 10.0), Vec2::new(0.0, -10.0));
        // Directly beside along X
        assert_eq!(closest_point(&Vec2::new(3.0, 0.0), 1.0, 10.0), Vec2::new(1.0, 0.0));
        assert_eq!(closest_point(&Vec2::new(-3.0, 0.0), 1.0, 10.0), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_centre_inside_rectangle_collides() {
        let body = Vec3::new(0.5, 0.0, 2.0);
        assert!(will_collide(&body, RADIUS, &Vec3::zeros(), &Vec3::zeros(), 1.0, 10.0));
    }

    #[test]
    fn test_height_is_ignored() {
        let body = Vec3::new(0.0, 50.0, 10.5);
        assert!(will_collide(&body, RADIUS, &Vec3::new(0.0, -3.0, 0.0), &Vec3::zeros(), 1.0, 10.0));
    }

    #[test]
    fn test_obstacle_blocks_uses_world_position() {
        use crate::scene::TransformNode;

        let mut graph = SceneGraph::new();
        let parent = graph.insert(TransformNode::at(Vec3::new(5.0, 0.0, 0.0))).unwrap();
        let wall = graph.insert(TransformNode::at(Vec3::new(0.0, 0.0, -5.0)).with_parent(parent)).unwrap();
        let obstacle = Obstacle::new(wall, Orientation::AlongX, 1.0, 10.0).unwrap();

        // World centre (5, 0, -5); footprint 10 x 1
        let body = Vec3::new(5.0, 1.0, -2.0);
        assert!(!obstacle.blocks(&graph, &body, RADIUS, &Vec3::zeros()).unwrap());
        assert!(obstacle.blocks(&graph, &body, RADIUS, &Vec3::new(0.0, 0.0, -1.5)).unwrap());
    }
}
