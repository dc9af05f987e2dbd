//! Output contracts from the core scene.
//!
//! Outputs carry the property values written on one frame, keyed by the
//! canonical `"{target}/{property}"` string, and a separate list of semantic
//! events. Adapters (Bevy/WASM) apply changes to the host and transport events.

use std::collections::VecDeque;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::ids::TweenId;

/// One property value written this frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    pub value: f32,
}

/// Discrete signals emitted between frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SceneEvent {
    StepChanged { step: usize, direction: i32 },
    /// The step counter wrapped back to zero and the headings reset.
    HeadingsWrapped,
    TweenCompleted { id: TweenId, key: String },
    TweenCancelled { id: TweenId, key: String },
    Resized { width: f32, height: f32, aspect: f32 },
    FrameLoopStarted,
    FrameLoopStopped,
}

/// Outputs returned by a frame tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

impl Outputs {
    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last value written for `key` this frame.
    pub fn value_of(&self, key: &str) -> Option<f32> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.key == key)
            .map(|c| c.value)
    }
}

/// Most events held between frames before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Events waiting for the next running frame. Only the latest `Resized`
/// is kept, and the queue never holds more than its capacity.
#[derive(Clone, Debug)]
pub struct EventQueue {
    events: VecDeque<SceneEvent>,
    capacity: usize,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(MAX_PENDING_EVENTS)
    }
}

impl EventQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: SceneEvent) {
        if matches!(event, SceneEvent::Resized { .. }) {
            self.events.retain(|e| !matches!(e, SceneEvent::Resized { .. }));
        }
        if self.events.len() >= self.capacity {
            if let Some(dropped) = self.events.pop_front() {
                trace!("event queue full, dropping {dropped:?}");
            }
        }
        self.events.push_back(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return every queued event, oldest first.
    pub fn take(&mut self) -> Vec<SceneEvent> {
        self.events.drain(..).collect()
    }
}
