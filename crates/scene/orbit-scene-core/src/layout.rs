//! Declarative scene layout computed from configuration.
//!
//! Hosts spawn whatever their engine needs from these specs; nothing here
//! touches a renderer.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::tween::planet_target;

/// Parse `#rrggbb` into `[r, g, b]` components in 0..=1.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], SceneError> {
    let invalid = || SceneError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut rgb = [0.0f32; 3];
    for (i, slot) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        *slot = f32::from(byte) / 255.0;
    }
    Ok(rgb)
}

/// `count` points evenly spaced on a circle of `radius` in the XZ plane,
/// starting on +X. Point `i` sits at angle `i / count * 2π`.
pub fn ring_positions(count: usize, radius: f32) -> Vec<[f32; 3]> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            [radius * angle.cos(), 0.0, radius * angle.sin()]
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

/// Inward-facing textured backdrop sphere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarfieldSpec {
    pub radius: f32,
    pub segments: u32,
    pub texture: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    pub index: usize,
    /// Target name used in property keys (`planet.{index}`).
    pub target: String,
    /// Position relative to the planet group.
    pub position: [f32; 3],
    pub radius: f32,
    pub segments: u32,
    pub texture: String,
    pub tint: Option<[f32; 3]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub camera: CameraSpec,
    pub starfield: StarfieldSpec,
    pub group_position: [f32; 3],
    pub planets: Vec<PlanetSpec>,
}

impl SceneLayout {
    pub fn from_config(cfg: &SceneConfig) -> Result<Self, SceneError> {
        let p = &cfg.planets;
        if p.textures.is_empty() {
            return Err(SceneError::NoPlanets);
        }
        let tints = p
            .tints
            .iter()
            .map(|t| parse_hex_color(t))
            .collect::<Result<Vec<_>, _>>()?;

        let group_position = [0.0, p.group_height, 0.0];
        let planets = ring_positions(p.textures.len(), p.ring_radius)
            .into_iter()
            .zip(&p.textures)
            .enumerate()
            .map(|(index, (position, texture))| PlanetSpec {
                index,
                target: planet_target(index),
                position,
                radius: p.radius,
                segments: p.segments,
                texture: texture.clone(),
                tint: tints.get(index).copied(),
            })
            .collect();

        Ok(Self {
            camera: CameraSpec {
                fov_degrees: cfg.camera.fov_degrees,
                near: cfg.camera.near,
                far: cfg.camera.far,
                position: [0.0, 0.0, cfg.camera.distance],
                look_at: group_position,
            },
            starfield: StarfieldSpec {
                radius: cfg.starfield.radius,
                segments: cfg.starfield.segments,
                texture: cfg.starfield.texture.clone(),
            },
            group_position,
            planets,
        })
    }
}
