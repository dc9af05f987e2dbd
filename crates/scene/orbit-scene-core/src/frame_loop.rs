//! Cancellable per-frame task.
//!
//! Replaces an unconditional render recursion with an explicit start/stop
//! lifecycle so headless hosts can drive frames by hand.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    elapsed_s: f64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames ticked while running.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    /// Returns `true` if the loop was stopped before.
    pub fn start(&mut self) -> bool {
        let was_stopped = self.state == LoopState::Stopped;
        self.state = LoopState::Running;
        was_stopped
    }

    /// Returns `true` if the loop was running before.
    pub fn stop(&mut self) -> bool {
        let was_running = self.state == LoopState::Running;
        self.state = LoopState::Stopped;
        was_running
    }

    /// Account for one frame. Returns the clamped delta to advance by, or
    /// `None` while stopped.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frames += 1;
        self.elapsed_s += f64::from(dt);
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_loop_does_not_tick() {
        let mut fl = FrameLoop::new();
        assert_eq!(fl.tick(0.016), None);
        assert!(fl.start());
        assert!(!fl.start());
        assert_eq!(fl.tick(0.5), Some(0.5));
        assert!(fl.stop());
        assert_eq!(fl.tick(0.5), None);
        assert_eq!(fl.frames(), 1);
        assert_eq!(fl.elapsed_s(), 0.5);
    }

    #[test]
    fn bad_deltas_are_clamped() {
        let mut fl = FrameLoop::new();
        fl.start();
        assert_eq!(fl.tick(-1.0), Some(0.0));
        assert_eq!(fl.tick(f32::NAN), Some(0.0));
    }
}
