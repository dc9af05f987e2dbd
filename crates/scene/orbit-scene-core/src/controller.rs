//! Scroll-driven heading pager.
//!
//! Wheel events pass a leading-edge throttle, move a wrapping step counter
//! by one, and fire two tweens: the heading list's vertical offset and a
//! fixed relative rotation of the planet group.

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::config::ScrollConfig;
use crate::error::SceneError;
use crate::scheduler::AnimationSink;
use crate::throttle::LeadingThrottle;
use crate::tween::{PropertyKey, TweenRequest};

/// Ordered, fixed-size, non-empty list of heading items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HeadingList(Vec<String>);

impl HeadingList {
    pub fn new(items: Vec<String>) -> Result<Self, SceneError> {
        if items.is_empty() {
            return Err(SceneError::EmptyHeadings);
        }
        Ok(Self(items))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for HeadingList {
    /// One heading per default planet.
    fn default() -> Self {
        Self(
            ["Csilla", "Earth", "Venus", "Volcanic"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl TryFrom<Vec<String>> for HeadingList {
    type Error = SceneError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        HeadingList::new(value)
    }
}

impl From<HeadingList> for Vec<String> {
    fn from(value: HeadingList) -> Self {
        value.0
    }
}

/// A wheel event: vertical delta plus the host timestamp in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub timestamp_ms: f64,
}

impl WheelEvent {
    pub fn new(delta_y: f64, timestamp_ms: f64) -> Self {
        Self {
            delta_y,
            timestamp_ms,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Positive delta scrolls forward; zero and NaN count as backward.
    pub fn from_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            ScrollDirection::Forward => 1,
            ScrollDirection::Backward => -1,
        }
    }
}

/// What the controller did with one event.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WheelOutcome {
    Ignored {
        remaining_ms: f64,
    },
    Stepped {
        step: usize,
        direction: ScrollDirection,
        /// The counter came back to zero and the headings were reset.
        wrapped: bool,
    },
}

/// Step counter state. `step < total_steps` always holds.
#[derive(Clone, Debug)]
pub struct ScrollState {
    throttle: LeadingThrottle,
    step: usize,
    total_steps: usize,
}

impl ScrollState {
    pub fn new(total_steps: usize, cooldown_ms: f64) -> Self {
        Self {
            throttle: LeadingThrottle::new(cooldown_ms),
            step: 0,
            total_steps: total_steps.max(1),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn last_event_ms(&self) -> Option<f64> {
        self.throttle.last_accepted_ms()
    }

    fn apply(&mut self, direction: ScrollDirection) -> usize {
        let total = self.total_steps as i64;
        let next = (self.step as i64 + i64::from(direction.sign()) + total).rem_euclid(total);
        self.step = next as usize;
        self.step
    }
}

#[derive(Clone, Debug)]
pub struct ScrollRotationController {
    cfg: ScrollConfig,
    state: ScrollState,
}

impl ScrollRotationController {
    pub fn new(cfg: ScrollConfig, headings: &HeadingList) -> Self {
        let state = ScrollState::new(headings.len(), cfg.cooldown_ms);
        Self { cfg, state }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn step(&self) -> usize {
        self.state.step
    }

    /// Heading offset (percent) for a given step.
    pub fn offset_for(&self, step: usize) -> f32 {
        -(step as f32 * self.cfg.offset_step_pct)
    }

    /// Handle one wheel event. Events inside the cooldown window are
    /// dropped without touching state or issuing requests.
    pub fn on_wheel<S: AnimationSink + ?Sized>(
        &mut self,
        event: WheelEvent,
        sink: &mut S,
    ) -> WheelOutcome {
        if !self.state.throttle.try_accept(event.timestamp_ms) {
            let remaining_ms = self.state.throttle.remaining_ms(event.timestamp_ms);
            trace!("wheel event dropped, {remaining_ms}ms of cooldown left");
            return WheelOutcome::Ignored { remaining_ms };
        }

        let direction = ScrollDirection::from_delta(event.delta_y);
        let step = self.state.apply(direction);
        let wrapped = step == 0;

        // On wrap the step offset is already 0%, so this single request is
        // also the heading reset.
        sink.request(TweenRequest::to(
            PropertyKey::heading_offset(),
            self.offset_for(step),
            self.cfg.duration_s,
            self.cfg.ease,
        ));

        let rotation = if self.cfg.rotation_follows_direction {
            self.cfg.rotation_step * direction.sign() as f32
        } else {
            self.cfg.rotation_step
        };
        sink.request(TweenRequest::by(
            PropertyKey::group_rotation_y(),
            rotation,
            self.cfg.duration_s,
            self.cfg.ease,
        ));

        info!("Scroll count: {step}");
        WheelOutcome::Stepped {
            step,
            direction,
            wrapped,
        }
    }
}
