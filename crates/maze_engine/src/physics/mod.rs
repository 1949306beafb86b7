//! Collision gating for the player body
//!
//! Two stages, run per movement direction per frame:
//! - [`proximity`]: broad phase selecting obstacles within a ground radius
//! - [`collision`]: narrow phase testing the proposed destination against
//!   each candidate's rectangle

pub mod collision;
pub mod proximity;

pub use collision::{will_collide, CollisionError, Footprint, Obstacle, Orientation};
pub use proximity::{BroadPhase, ProximityFilter};
