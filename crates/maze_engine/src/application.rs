//! Application trait and lifecycle management

use thiserror::Error;

use crate::input::{KeyAction, KeyCode};
use crate::render::{RenderBackend, RenderError};
use crate::scene::SceneError;

/// Application lifecycle trait
///
/// Implement this trait to drive your scene from a [`GameLoop`](crate::GameLoop).
/// Every frame the loop first dispatches pending events, then calls
/// [`update`](Self::update) and finally [`render`](Self::render).
pub trait Application {
    /// Advance the simulation
    ///
    /// # Arguments
    /// * `delta_time` - Time since last frame in seconds
    /// * `total_time` - Time since the loop started in seconds
    fn update(&mut self, delta_time: f32, total_time: f32) -> Result<(), AppError>;

    /// Extract the current frame and hand it to `backend`
    fn render(&mut self, backend: &mut dyn RenderBackend, delta_time: f32, total_time: f32) -> Result<(), AppError>;

    /// A key changed state
    fn on_key(&mut self, _key: KeyCode, _action: KeyAction) -> Result<(), AppError> {
        Ok(())
    }

    /// The pointer moved to an absolute window position
    fn on_pointer_move(&mut self, _x: f64, _y: f64) -> Result<(), AppError> {
        Ok(())
    }

    /// The scroll wheel moved
    fn on_scroll(&mut self, _x_offset: f64, _y_offset: f64) -> Result<(), AppError> {
        Ok(())
    }

    /// Called once when the loop exits
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Scene graph error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Render backend error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window close requested
    CloseRequested,

    /// Key input event
    Key {
        /// The key that changed
        key: KeyCode,
        /// What happened to it
        action: KeyAction,
    },

    /// Pointer movement
    PointerMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Mouse wheel
    Scroll {
        /// Horizontal scroll delta
        x_offset: f64,
        /// Vertical scroll delta
        y_offset: f64,
    },
}

impl AppEvent {
    /// Deliver this event to `app`. Returns `false` for a close request.
    pub fn dispatch<A: Application + ?Sized>(self, app: &mut A) -> Result<bool, AppError> {
        match self {
            Self::CloseRequested => return Ok(false),
            Self::Key { key, action } => app.on_key(key, action)?,
            Self::PointerMoved { x, y } => app.on_pointer_move(x, y)?,
            Self::Scroll { x_offset, y_offset } => app.on_scroll(x_offset, y_offset)?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneGraph, TransformNode};

    #[derive(Default)]
    struct Recorder {
        keys: Vec<(KeyCode, KeyAction)>,
        scrolled: f64,
    }

    impl Application for Recorder {
        fn update(&mut self, _delta_time: f32, _total_time: f32) -> Result<(), AppError> {
            Ok(())
        }

        fn render(&mut self, _backend: &mut dyn RenderBackend, _dt: f32, _t: f32) -> Result<(), AppError> {
            Ok(())
        }

        fn on_key(&mut self, key: KeyCode, action: KeyAction) -> Result<(), AppError> {
            self.keys.push((key, action));
            Ok(())
        }

        fn on_scroll(&mut self, _x_offset: f64, y_offset: f64) -> Result<(), AppError> {
            self.scrolled += y_offset;
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut app = Recorder::default();
        assert!(AppEvent::Key { key: KeyCode::W, action: KeyAction::Press }.dispatch(&mut app).unwrap());
        assert!(AppEvent::Scroll { x_offset: 0.0, y_offset: 2.0 }.dispatch(&mut app).unwrap());
        assert!(AppEvent::PointerMoved { x: 1.0, y: 1.0 }.dispatch(&mut app).unwrap());
        assert!(!AppEvent::CloseRequested.dispatch(&mut app).unwrap());

        assert_eq!(app.keys, vec![(KeyCode::W, KeyAction::Press)]);
        assert_eq!(app.scrolled, 2.0);
    }

    #[test]
    fn test_scene_errors_convert() {
        let mut graph = SceneGraph::new();
        let key = graph.insert(TransformNode::new()).unwrap();
        graph.remove(key).unwrap();

        let lookup = || -> Result<(), AppError> {
            graph.node(key)?;
            Ok(())
        };
        assert!(matches!(lookup(), Err(AppError::Scene(SceneError::NodeNotFound(_)))));
    }
}
