//! Frame loop
//!
//! [`GameLoop`] owns the clock and drives an [`Application`] through the
//! fixed `events -> update -> render` sequence. It is windowless: events come
//! from an [`EventSource`] (a platform layer, a replay script, a test) and
//! frames go to any [`RenderBackend`].

use thiserror::Error;

use crate::{
    application::{AppEvent, Application},
    core::EngineConfig,
    foundation::time::Timer,
    render::RenderBackend,
};

/// Supplier of input events, polled once per frame
pub trait EventSource {
    /// Events that arrived before frame `frame` (0-based)
    fn poll_events(&mut self, frame: u64) -> Vec<AppEvent>;
}

/// Event source that never produces anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn poll_events(&mut self, _frame: u64) -> Vec<AppEvent> {
        Vec::new()
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames fully updated and rendered
    pub frames: u64,
    /// Simulated seconds
    pub total_time: f32,
    /// Whether the run ended on a close request
    pub close_requested: bool,
}

/// Fixed-step, single-threaded frame loop
pub struct GameLoop {
    config: EngineConfig,
    timer: Timer,
}

impl GameLoop {
    /// Create a loop from validated configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::InitializationFailed(e.to_string()))?;
        if config.max_frames.is_none() {
            log::warn!("No frame limit set; the loop runs until a close request");
        }

        Ok(Self {
            config,
            timer: Timer::new(),
        })
    }

    /// Loop configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame clock
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Run until the frame limit or a close request
    pub fn run<A, S>(&mut self, app: &mut A, events: &mut S, backend: &mut dyn RenderBackend) -> Result<RunSummary, EngineError>
    where
        A: Application + ?Sized,
        S: EventSource + ?Sized,
    {
        log::info!("Starting main loop (dt = {:.4}s)", self.config.fixed_timestep);
        let mut close_requested = false;

        while !close_requested {
            let frame = self.timer.frame_count();
            if self.config.max_frames.is_some_and(|limit| frame >= limit) {
                break;
            }

            for event in events.poll_events(frame) {
                let keep_running = event
                    .dispatch(app)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {}", e)))?;
                if !keep_running {
                    log::info!("Close requested at frame {}", frame);
                    close_requested = true;
                }
            }
            if close_requested {
                break;
            }

            self.timer.advance(self.config.fixed_timestep);
            let (dt, t) = (self.timer.delta_time(), self.timer.total_time());

            app.update(dt, t)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            app.render(backend, dt, t)
                .map_err(|e| EngineError::RenderError(format!("App render: {}", e)))?;
        }

        app.cleanup();

        let summary = RunSummary {
            frames: self.timer.frame_count(),
            total_time: self.timer.total_time(),
            close_requested,
        };
        log::info!("Main loop finished after {} frames", summary.frames);
        Ok(summary)
    }

}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    RenderError(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
