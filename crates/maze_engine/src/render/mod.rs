//! # Render extraction
//!
//! The engine does not draw anything itself. Each frame the scene is resolved
//! into a [`FrameData`] of plain uniform records and submitted to whatever
//! [`RenderBackend`] the application plugs in. Shader compilation, mesh upload
//! and window presentation all live behind that trait.

pub mod uniforms;
pub mod frame_data;

use thiserror::Error;

pub use frame_data::{DrawItem, FrameData};
pub use uniforms::{CameraUniform, ObjectUniform, PointLightUniform, SpotLightUniform};

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend could not accept the frame
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Rendering backend consuming extracted frames
pub trait RenderBackend {
    /// Draw one frame
    fn submit_frame(&mut self, frame: &FrameData) -> BackendResult<()>;
}

/// Backend that draws nothing and remembers the last frame.
///
/// Used by the headless runner and by tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frames_submitted: u64,
    last_frame: Option<FrameData>,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames submitted so far
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Most recently submitted frame
    pub fn last_frame(&self) -> Option<&FrameData> {
        self.last_frame.as_ref()
    }
}

impl RenderBackend for HeadlessBackend {
    fn submit_frame(&mut self, frame: &FrameData) -> BackendResult<()> {
        self.frames_submitted += 1;
        log::trace!(
            "Headless frame {}: {} draws, {} point lights, {} spot lights",
            self.frames_submitted,
            frame.draws.len(),
            frame.point_lights.len(),
            frame.spot_lights.len()
        );
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
