//! Errors surfaced while building a scene from configuration.

use thiserror::Error;

/// Errors produced by scene construction and configuration parsing.
///
/// Runtime paths (`on_wheel`, `frame`, `on_resize`) never fail; everything
/// that can go wrong is caught up front by [`crate::SceneConfig::validate`]
/// or the constructors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("heading list must contain at least one item")]
    EmptyHeadings,
    #[error("scene needs at least one planet")]
    NoPlanets,
    #[error("planet texture count ({textures}) does not match tint count ({tints})")]
    TintCountMismatch { textures: usize, tints: usize },
    #[error("invalid tint colour '{0}': expected #rrggbb")]
    InvalidColor(String),
    #[error("unknown ease '{0}'")]
    UnknownEase(String),
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}
