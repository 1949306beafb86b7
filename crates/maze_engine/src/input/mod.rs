//! Input abstraction
//!
//! The engine never polls a window. Applications feed key and pointer events
//! into a [`KeyboardState`] / [`PointerTracker`] (or implement [`InputState`]
//! over their own windowing layer) and the movement code only ever asks
//! "is this key held right now?".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Key codes the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// R key
    R,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Left Alt modifier
    LeftAlt,
    /// Escape key
    Escape,
}

/// Key transition reported by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

/// Polled key state for the current frame
pub trait InputState {
    /// Whether `key` is held down
    fn is_key_down(&self, key: KeyCode) -> bool;
}

/// Set of currently held keys, driven by key events
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key event
    pub fn handle_key(&mut self, key: KeyCode, action: KeyAction) {
        match action {
            KeyAction::Press | KeyAction::Repeat => {
                self.pressed.insert(key);
            }
            KeyAction::Release => {
                self.pressed.remove(&key);
            }
        }
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

impl InputState for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Mapping from game actions to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Roll towards -Z
    pub forward: KeyCode,
    /// Roll towards +Z
    pub back: KeyCode,
    /// Roll towards -X
    pub left: KeyCode,
    /// Roll towards +X
    pub right: KeyCode,
    /// Put player and camera back at their spawn
    pub reset: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::W,
            back: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
            reset: KeyCode::R,
        }
    }
}

/// Turns absolute pointer positions into yaw angles.
///
/// The first event after construction (or [`reset`](Self::reset)) only
/// records the position; there is no previous sample to diff against.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    last: Option<(f64, f64)>,
    sensitivity: f32,
}

impl PointerTracker {
    /// Tracker producing `-dx * sensitivity` radians per event
    pub fn new(sensitivity: f32) -> Self {
        Self { last: None, sensitivity }
    }

    /// Feed a pointer position; returns the yaw to apply, if any
    pub fn on_move(&mut self, x: f64, y: f64) -> Option<f32> {
        let yaw = self
            .last
            .map(|(last_x, _)| -((x - last_x) as f32) * self.sensitivity);
        self.last = Some((x, y));
        yaw
    }

    /// Forget the last position
    pub fn reset(&mut self) {
        self.last = None;
    }
}
