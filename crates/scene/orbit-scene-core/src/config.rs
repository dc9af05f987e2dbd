//! Scene configuration.
//!
//! Every section carries serde defaults equal to the reference scene, so a
//! host can pass `{}` or override a single field.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::ease::Ease;
use crate::error::SceneError;
use crate::layout::parse_hex_color;
use crate::scheduler::ReplacePolicy;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub starfield: StarfieldConfig,
    pub planets: PlanetsConfig,
    pub scroll: ScrollConfig,
    pub environment: EnvironmentConfig,
    pub viewport: ViewportConfig,
    /// How a new tween on an already-animating property is reconciled.
    pub replace_policy: ReplacePolicy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance along +Z from the origin.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            distance: 10.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub radius: f32,
    pub segments: u32,
    pub texture: String,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            segments: 64,
            texture: "stars.jpg".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetsConfig {
    pub radius: f32,
    pub segments: u32,
    /// Radius of the circle the planets are placed on.
    pub ring_radius: f32,
    /// Vertical offset of the planet group.
    pub group_height: f32,
    pub textures: Vec<String>,
    /// `#rrggbb` tints; empty means untinted, otherwise one per texture.
    pub tints: Vec<String>,
    /// Relative Y rotation applied per spin cycle.
    pub spin_delta: f32,
    pub spin_period_s: f32,
    pub spin_ease: Ease,
}

impl Default for PlanetsConfig {
    fn default() -> Self {
        Self {
            radius: 1.3,
            segments: 64,
            ring_radius: 8.0,
            group_height: -2.0,
            textures: vec![
                "csilla/color.png".into(),
                "earth/map.jpg".into(),
                "venus/map.jpg".into(),
                "volcanic/color.png".into(),
            ],
            tints: Vec::new(),
            spin_delta: 6.28,
            spin_period_s: 4.0,
            spin_ease: Ease::Linear,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Leading-edge throttle window.
    pub cooldown_ms: f64,
    pub duration_s: f32,
    pub ease: Ease,
    /// Heading offset per step, in percent of one heading's height.
    pub offset_step_pct: f32,
    /// Relative group rotation per accepted step (radians).
    pub rotation_step: f32,
    /// Flip `rotation_step` when scrolling backward.
    pub rotation_follows_direction: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 2000.0,
            duration_s: 1.0,
            ease: Ease::default(),
            offset_step_pct: 100.0,
            rotation_step: -FRAC_PI_2,
            rotation_follows_direction: false,
        }
    }
}

/// Pre-filtered environment lighting. Either map missing leaves the
/// environment unset.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub intensity: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            diffuse_map: Some("environment/solitude_night_diffuse.ktx2".into()),
            specular_map: Some("environment/solitude_night_specular.ktx2".into()),
            intensity: 900.0,
        }
    }
}

impl EnvironmentConfig {
    pub fn maps(&self) -> Option<(&str, &str)> {
        match (self.diffuse_map.as_deref(), self.specular_map.as_deref()) {
            (Some(d), Some(s)) => Some((d, s)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub max_pixel_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidValue { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidValue { field, value })
    }
}

fn min_segments(field: &'static str, value: u32) -> Result<(), SceneError> {
    if value >= 3 {
        Ok(())
    } else {
        Err(SceneError::InvalidValue {
            field,
            value: value as f32,
        })
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let cfg: SceneConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let cam = &self.camera;
        positive("camera.fov_degrees", cam.fov_degrees)?;
        if cam.fov_degrees >= 180.0 {
            return Err(SceneError::InvalidValue {
                field: "camera.fov_degrees",
                value: cam.fov_degrees,
            });
        }
        positive("camera.near", cam.near)?;
        if cam.far.is_nan() || cam.far <= cam.near {
            return Err(SceneError::InvalidValue {
                field: "camera.far",
                value: cam.far,
            });
        }

        positive("starfield.radius", self.starfield.radius)?;
        min_segments("starfield.segments", self.starfield.segments)?;

        let planets = &self.planets;
        if planets.textures.is_empty() {
            return Err(SceneError::NoPlanets);
        }
        if !planets.tints.is_empty() && planets.tints.len() != planets.textures.len() {
            return Err(SceneError::TintCountMismatch {
                textures: planets.textures.len(),
                tints: planets.tints.len(),
            });
        }
        for tint in &planets.tints {
            parse_hex_color(tint)?;
        }
        positive("planets.radius", planets.radius)?;
        min_segments("planets.segments", planets.segments)?;
        non_negative("planets.ring_radius", planets.ring_radius)?;
        non_negative("planets.spin_period_s", planets.spin_period_s)?;

        let scroll = &self.scroll;
        non_negative("scroll.cooldown_ms", scroll.cooldown_ms as f32)?;
        non_negative("scroll.duration_s", scroll.duration_s)?;

        positive("viewport.max_pixel_ratio", self.viewport.max_pixel_ratio)?;
        Ok(())
    }
}
