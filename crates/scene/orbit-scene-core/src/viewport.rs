//! Viewport and camera projection bookkeeping for resize handling.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, ViewportConfig};

/// Host viewport size in logical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f32,
}

fn default_pixel_ratio() -> f32 {
    1.0
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Perspective camera parameters kept in sync with the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveProjection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveProjection {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            fov_degrees: cfg.fov_degrees,
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
        }
    }
}

/// Renderer settings derived from one resize.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeOutcome {
    pub aspect: f32,
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

#[derive(Clone, Debug)]
pub struct ViewportState {
    cfg: ViewportConfig,
    projection: PerspectiveProjection,
    last: Option<ResizeOutcome>,
}

impl ViewportState {
    pub fn new(camera: &CameraConfig, cfg: ViewportConfig) -> Self {
        Self {
            cfg,
            projection: PerspectiveProjection::from_config(camera),
            last: None,
        }
    }

    pub fn projection(&self) -> &PerspectiveProjection {
        &self.projection
    }

    pub fn last_resize(&self) -> Option<&ResizeOutcome> {
        self.last.as_ref()
    }

    /// Recompute aspect, size, and pixel ratio. Runs on every resize with
    /// no throttling. A non-positive height keeps the previous aspect.
    pub fn on_resize(&mut self, vp: Viewport) -> ResizeOutcome {
        if vp.height > 0.0 && vp.width.is_finite() && vp.height.is_finite() {
            self.projection.aspect = vp.width / vp.height;
        } else {
            warn!(
                "degenerate viewport {}x{}, keeping aspect {}",
                vp.width, vp.height, self.projection.aspect
            );
        }
        let dpr = if vp.device_pixel_ratio > 0.0 {
            vp.device_pixel_ratio
        } else {
            1.0
        };
        let outcome = ResizeOutcome {
            aspect: self.projection.aspect,
            width: vp.width.max(0.0),
            height: vp.height.max(0.0),
            pixel_ratio: dpr.min(self.cfg.max_pixel_ratio),
        };
        self.last = Some(outcome);
        outcome
    }
}
