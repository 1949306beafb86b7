//! Scripted input for headless runs
//!
//! A script is a list of frame-stamped events. It replaces the window's event
//! queue so the same maze run can be replayed in CI or from the demo binary.

use maze_engine::input::{KeyAction, KeyCode};
use maze_engine::{AppEvent, EventSource};

/// Frame-stamped event list
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<(u64, AppEvent)>,
}

impl ScriptedInput {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` before frame `frame`
    pub fn at(mut self, frame: u64, event: AppEvent) -> Self {
        self.events.push((frame, event));
        self
    }

    /// Hold `key` from frame `from` until just before frame `until`
    pub fn hold(self, key: KeyCode, from: u64, until: u64) -> Self {
        self.at(from, AppEvent::Key { key, action: KeyAction::Press })
            .at(until, AppEvent::Key { key, action: KeyAction::Release })
    }

    /// Tap `key` on frame `frame`
    pub fn tap(self, key: KeyCode, frame: u64) -> Self {
        self.at(frame, AppEvent::Key { key, action: KeyAction::Press })
            .at(frame, AppEvent::Key { key, action: KeyAction::Release })
    }

    /// Move the pointer to `(x, y)` on frame `frame`
    pub fn pointer(self, frame: u64, x: f64, y: f64) -> Self {
        self.at(frame, AppEvent::PointerMoved { x, y })
    }

    /// Scroll by `y_offset` steps on frame `frame`
    pub fn scroll(self, frame: u64, y_offset: f64) -> Self {
        self.at(frame, AppEvent::Scroll { x_offset: 0.0, y_offset })
    }

    /// Request the loop to close on frame `frame`
    pub fn close(self, frame: u64) -> Self {
        self.at(frame, AppEvent::CloseRequested)
    }

    /// The run the demo binary plays: a lap of the lower maze with a look
    /// around, ending in a manual reset.
    pub fn demo() -> Self {
        Self::new()
            .hold(KeyCode::W, 0, 90)
            .hold(KeyCode::D, 60, 150)
            .pointer(100, 640.0, 360.0)
            .pointer(110, 700.0, 360.0)
            .pointer(120, 640.0, 360.0)
            .scroll(130, -5.0)
            .hold(KeyCode::A, 150, 300)
            .hold(KeyCode::W, 200, 320)
            .tap(KeyCode::R, 330)
            .close(360)
    }
}

impl EventSource for ScriptedInput {
    fn poll_events(&mut self, frame: u64) -> Vec<AppEvent> {
        self.events
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_emits_press_then_release() {
        let mut script = ScriptedInput::new().hold(KeyCode::W, 2, 5);
        assert!(script.poll_events(0).is_empty());
        assert_eq!(script.poll_events(2), vec![AppEvent::Key { key: KeyCode::W, action: KeyAction::Press }]);
        assert_eq!(script.poll_events(5), vec![AppEvent::Key { key: KeyCode::W, action: KeyAction::Release }]);
    }

    #[test]
    fn test_same_frame_events_keep_order() {
        let mut script = ScriptedInput::new().tap(KeyCode::R, 3).close(3);
        let events = script.poll_events(3);
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], AppEvent::CloseRequested);
    }
}
