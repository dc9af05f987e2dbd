//! OrbitScene: owns every piece of scene state and exposes the host-facing
//! operations (wheel, resize, frame, start/stop).

use log::info;

use crate::config::SceneConfig;
use crate::controller::{HeadingList, ScrollRotationController, WheelEvent, WheelOutcome};
use crate::error::SceneError;
use crate::frame_loop::FrameLoop;
use crate::layout::SceneLayout;
use crate::outputs::{EventQueue, Outputs, SceneEvent};
use crate::scheduler::AnimationScheduler;
use crate::tween::{PropertyKey, Repeat, TweenRequest};
use crate::viewport::{PerspectiveProjection, ResizeOutcome, Viewport, ViewportState};

#[derive(Debug)]
pub struct OrbitScene {
    cfg: SceneConfig,
    headings: HeadingList,
    layout: SceneLayout,
    controller: ScrollRotationController,
    scheduler: AnimationScheduler,
    viewport: ViewportState,
    frame_loop: FrameLoop,
    spin_started: bool,
    pending_events: EventQueue,
}

impl OrbitScene {
    pub fn new(cfg: SceneConfig, headings: HeadingList) -> Result<Self, SceneError> {
        cfg.validate()?;
        let layout = SceneLayout::from_config(&cfg)?;
        let controller = ScrollRotationController::new(cfg.scroll.clone(), &headings);
        let mut scheduler = AnimationScheduler::new(cfg.replace_policy);

        scheduler.set_value(PropertyKey::heading_offset(), 0.0);
        scheduler.set_value(PropertyKey::group_rotation_y(), 0.0);
        for planet in &layout.planets {
            scheduler.set_value(PropertyKey::planet_rotation_y(planet.index), 0.0);
        }

        let viewport = ViewportState::new(&cfg.camera, cfg.viewport.clone());
        Ok(Self {
            cfg,
            headings,
            layout,
            controller,
            scheduler,
            viewport,
            frame_loop: FrameLoop::new(),
            spin_started: false,
            pending_events: EventQueue::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn headings(&self) -> &HeadingList {
        &self.headings
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn controller(&self) -> &ScrollRotationController {
        &self.controller
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn projection(&self) -> &PerspectiveProjection {
        self.viewport.projection()
    }

    /// Renderer settings from the most recent resize.
    pub fn last_resize(&self) -> Option<&ResizeOutcome> {
        self.viewport.last_resize()
    }

    pub fn step(&self) -> usize {
        self.controller.step()
    }

    pub fn value(&self, key: &PropertyKey) -> Option<f32> {
        self.scheduler.value(key)
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Start the frame loop. The first start also kicks off the endless
    /// planet spins.
    pub fn start(&mut self) {
        if self.frame_loop.start() {
            info!("frame loop started");
            self.pending_events.push(SceneEvent::FrameLoopStarted);
        }
        if !self.spin_started {
            let planets = &self.cfg.planets;
            for planet in &self.layout.planets {
                self.scheduler.request(
                    TweenRequest::by(
                        PropertyKey::planet_rotation_y(planet.index),
                        planets.spin_delta,
                        planets.spin_period_s,
                        planets.spin_ease,
                    )
                    .repeat(Repeat::Infinite),
                );
            }
            self.spin_started = true;
        }
    }

    pub fn stop(&mut self) {
        if self.frame_loop.stop() {
            info!("frame loop stopped");
            self.pending_events.push(SceneEvent::FrameLoopStopped);
        }
    }

    pub fn on_wheel(&mut self, event: WheelEvent) -> WheelOutcome {
        let outcome = self.controller.on_wheel(event, &mut self.scheduler);
        if let WheelOutcome::Stepped {
            step,
            direction,
            wrapped,
        } = outcome
        {
            self.pending_events.push(SceneEvent::StepChanged {
                step,
                direction: direction.sign(),
            });
            if wrapped {
                self.pending_events.push(SceneEvent::HeadingsWrapped);
            }
        }
        outcome
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> ResizeOutcome {
        let outcome = self.viewport.on_resize(viewport);
        self.pending_events.push(SceneEvent::Resized {
            width: outcome.width,
            height: outcome.height,
            aspect: outcome.aspect,
        });
        outcome
    }

    /// Advance one frame by `dt` seconds. Returns `None` while the frame
    /// loop is stopped; queued events wait for the next running frame, with
    /// resizes coalesced to the latest.
    pub fn frame(&mut self, dt: f32) -> Option<Outputs> {
        let dt = self.frame_loop.tick(dt)?;
        let mut out = self.scheduler.advance(dt);
        if !self.pending_events.is_empty() {
            let mut events = self.pending_events.take();
            events.append(&mut out.events);
            out.events = events;
        }
        Some(out)
    }
}
