//! Tween scheduler.
//!
//! Owns the current value of every animatable property and the list of
//! in-flight tweens. Callers fire requests and never wait on them; the host
//! frame loop calls [`AnimationScheduler::advance`] and applies the returned
//! changes.

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TweenId};
use crate::outputs::{Change, EventQueue, Outputs, SceneEvent};
use crate::tween::{EndValue, PropertyKey, Tween, TweenRequest};

/// How a request for a property that is already animating is handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// Cancel the in-flight tween on the same key, then start the new one.
    #[default]
    CancelAndReplace,
    /// Let both run; the later tween's write wins each frame.
    Overlap,
}

/// Receiver of fire-and-forget animation requests.
pub trait AnimationSink {
    fn request(&mut self, req: TweenRequest) -> TweenId;
}

#[derive(Debug, Default)]
pub struct AnimationScheduler {
    policy: ReplacePolicy,
    ids: IdAllocator,
    tweens: Vec<Tween>,
    values: HashMap<PropertyKey, f32>,
    pending_events: EventQueue,
}

impl AnimationScheduler {
    pub fn new(policy: ReplacePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }

    /// Current value of a property, if it was ever set or animated.
    pub fn value(&self, key: &PropertyKey) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// Set a property directly. In-flight tweens on the key keep running
    /// and overwrite it on the next frame.
    pub fn set_value(&mut self, key: PropertyKey, value: f32) {
        self.values.insert(key, value);
    }

    pub fn is_animating(&self, key: &PropertyKey) -> bool {
        self.tweens.iter().any(|t| &t.key == key)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn tweens(&self) -> impl Iterator<Item = &Tween> {
        self.tweens.iter()
    }

    /// Cancel every tween on `key`. Returns the most recently started one.
    pub fn cancel(&mut self, key: &PropertyKey) -> Option<Tween> {
        let mut last = None;
        let mut kept = Vec::with_capacity(self.tweens.len());
        for tween in self.tweens.drain(..) {
            if &tween.key == key {
                debug!("tween {:?} on {} cancelled", tween.id, tween.key);
                self.pending_events.push(SceneEvent::TweenCancelled {
                    id: tween.id,
                    key: tween.key.to_string(),
                });
                last = Some(tween);
            } else {
                kept.push(tween);
            }
        }
        self.tweens = kept;
        last
    }

    /// Start a tween. The start value is the property's current value (0
    /// when it has never been written).
    pub fn request(&mut self, req: TweenRequest) -> TweenId {
        let replaced = match self.policy {
            ReplacePolicy::CancelAndReplace => self.cancel(&req.key),
            ReplacePolicy::Overlap => None,
        };
        let from = self.value(&req.key).unwrap_or(0.0);
        let to = match req.end {
            EndValue::Absolute(v) => v,
            // Resolve against the replaced tween's target so interrupted
            // relative steps do not lose distance.
            EndValue::Relative(delta) => replaced.as_ref().map_or(from, |t| t.to) + delta,
        };

        let id = self.ids.alloc_tween();
        debug!(
            "tween {:?} on {}: {} -> {} over {}s ({})",
            id, req.key, from, to, req.duration_s, req.ease
        );
        self.tweens.push(Tween::new(id, &req, from, to));
        id
    }

    /// Advance all tweens by `dt` seconds. Emits one change per active tween
    /// (in start order) plus any cancel/complete events since the last call.
    pub fn advance(&mut self, dt: f32) -> Outputs {
        let mut out = Outputs {
            events: self.pending_events.take(),
            ..Outputs::default()
        };

        let mut finished: Vec<TweenId> = Vec::new();
        for tween in self.tweens.iter_mut() {
            let step = tween.advance(dt);
            self.values.insert(tween.key.clone(), step.value);
            out.push_change(Change {
                key: tween.key.to_string(),
                value: step.value,
            });
            if step.finished {
                finished.push(tween.id);
                out.push_event(SceneEvent::TweenCompleted {
                    id: tween.id,
                    key: tween.key.to_string(),
                });
            }
        }
        if !finished.is_empty() {
            self.tweens.retain(|t| !finished.contains(&t.id));
        }
        out
    }
}

impl AnimationSink for AnimationScheduler {
    fn request(&mut self, req: TweenRequest) -> TweenId {
        AnimationScheduler::request(self, req)
    }
}
