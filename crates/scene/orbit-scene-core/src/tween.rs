//! Tween data: animatable keys, requests, and in-flight tween state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ease::{lerp_f32, Ease};
use crate::ids::TweenId;

pub const HEADINGS_TARGET: &str = "headings";
pub const PLANET_GROUP_TARGET: &str = "planet_group";
pub const OFFSET_Y_PCT: &str = "offset_y_pct";
pub const ROTATION_Y: &str = "rotation.y";

/// One animatable scalar, rendered canonically as `"{target}/{property}"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyKey {
    pub target: String,
    pub property: String,
}

impl PropertyKey {
    pub fn new(target: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            property: property.into(),
        }
    }

    /// Vertical offset of the heading list, in percent of one heading.
    pub fn heading_offset() -> Self {
        Self::new(HEADINGS_TARGET, OFFSET_Y_PCT)
    }

    pub fn group_rotation_y() -> Self {
        Self::new(PLANET_GROUP_TARGET, ROTATION_Y)
    }

    pub fn planet_rotation_y(index: usize) -> Self {
        Self::new(planet_target(index), ROTATION_Y)
    }
}

pub fn planet_target(index: usize) -> String {
    format!("planet.{index}")
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.target, self.property)
    }
}

/// Where a tween ends.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndValue {
    Absolute(f32),
    /// Offset from the starting point (`"+=6.28"`).
    Relative(f32),
}

/// Cycle count. Serialized as an integer where `-1` means forever.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Repeat {
    #[default]
    Once,
    /// Extra cycles after the first one.
    Count(u32),
    Infinite,
}

impl From<i32> for Repeat {
    fn from(value: i32) -> Self {
        match value {
            v if v < 0 => Repeat::Infinite,
            0 => Repeat::Once,
            v => Repeat::Count(v as u32),
        }
    }
}

impl From<Repeat> for i32 {
    fn from(value: Repeat) -> Self {
        match value {
            Repeat::Once => 0,
            Repeat::Count(n) => n.min(i32::MAX as u32) as i32,
            Repeat::Infinite => -1,
        }
    }
}

impl Repeat {
    /// Total cycles to run, `None` for infinite.
    fn total_cycles(self) -> Option<u32> {
        match self {
            Repeat::Once => Some(1),
            Repeat::Count(n) => Some(n.saturating_add(1)),
            Repeat::Infinite => None,
        }
    }
}

/// A request handed to the scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenRequest {
    pub key: PropertyKey,
    pub end: EndValue,
    pub duration_s: f32,
    pub ease: Ease,
    #[serde(default)]
    pub repeat: Repeat,
}

impl TweenRequest {
    pub fn to(key: PropertyKey, value: f32, duration_s: f32, ease: Ease) -> Self {
        Self {
            key,
            end: EndValue::Absolute(value),
            duration_s,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn by(key: PropertyKey, delta: f32, duration_s: f32, ease: Ease) -> Self {
        Self {
            key,
            end: EndValue::Relative(delta),
            duration_s,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn repeat(mut self, repeat: impl Into<Repeat>) -> Self {
        self.repeat = repeat.into();
        self
    }
}

/// Result of stepping a tween.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct TweenStep {
    pub value: f32,
    pub finished: bool,
}

/// In-flight tween with resolved endpoints.
#[derive(Clone, Debug)]
pub struct Tween {
    pub id: TweenId,
    pub key: PropertyKey,
    pub from: f32,
    pub to: f32,
    pub duration_s: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Relative tweens shift their endpoints on each repeat so the motion
    /// keeps accumulating instead of jumping back.
    pub relative: bool,
    pub elapsed_s: f32,
    pub cycles_done: u32,
}

impl Tween {
    pub(crate) fn new(id: TweenId, req: &TweenRequest, from: f32, to: f32) -> Self {
        Self {
            id,
            key: req.key.clone(),
            from,
            to,
            duration_s: req.duration_s.max(0.0),
            ease: req.ease,
            repeat: req.repeat,
            relative: matches!(req.end, EndValue::Relative(_)),
            elapsed_s: 0.0,
            cycles_done: 0,
        }
    }

    /// Value at the current elapsed time without advancing.
    pub fn current(&self) -> f32 {
        if self.duration_s <= 0.0 {
            return self.to;
        }
        let t = self.elapsed_s / self.duration_s;
        lerp_f32(self.from, self.to, self.ease.apply(t))
    }

    /// Advance by `dt` seconds, rolling over into the next cycle when the
    /// tween repeats.
    pub(crate) fn advance(&mut self, dt: f32) -> TweenStep {
        if self.duration_s <= 0.0 {
            self.cycles_done = self.cycles_done.saturating_add(1);
            return TweenStep {
                value: self.to,
                finished: true,
            };
        }

        self.elapsed_s += dt.max(0.0);
        while self.elapsed_s >= self.duration_s {
            self.cycles_done = self.cycles_done.saturating_add(1);
            if let Some(total) = self.repeat.total_cycles() {
                if self.cycles_done >= total {
                    self.elapsed_s = self.duration_s;
                    return TweenStep {
                        value: self.to,
                        finished: true,
                    };
                }
            }
            self.elapsed_s -= self.duration_s;
            if self.relative {
                let span = self.to - self.from;
                self.from = self.to;
                self.to += span;
            }
        }

        TweenStep {
            value: self.current(),
            finished: false,
        }
    }
}
