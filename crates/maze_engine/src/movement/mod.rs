//! Player movement
//!
//! [`MovementController`] turns held direction keys into gated translations
//! of the player and its tethered camera. [`LevelBounds`] decides when the
//! player has left the play area or reached the goal, and [`Spawn`] puts both
//! nodes back where they started.

pub mod controller;
pub mod level_bounds;

pub use controller::{Directions, FrameOutcome, MovementController};
pub use level_bounds::{BoundsCheck, LevelBounds, Spawn};
