//! Easing curves:
//! - linear (`none`)
//! - power curves `power1..power4` with in/out/inOut modes
//! - sine in/out/inOut
//! - cubic-bezier timing (x1, y1, x2, y2)
//!
//! Identifiers parse from the names used by web tweening libraries so scene
//! configs can be written the same way (`"power2.inOut"`, `"none"`).

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

impl EaseMode {
    fn suffix(self) -> &'static str {
        match self {
            EaseMode::In => "in",
            EaseMode::Out => "out",
            EaseMode::InOut => "inOut",
        }
    }
}

/// Easing curve identifier. Serialized as its string name.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    /// `powerN`: order 1 is quadratic, 4 is quintic.
    Power { order: u8, mode: EaseMode },
    Sine(EaseMode),
    CubicBezier([f32; 4]),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power {
            order: 2,
            mode: EaseMode::InOut,
        }
    }
}

impl Ease {
    /// Map normalized time `t` to eased progress. `t` is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power { order, mode } => power(t, i32::from(order) + 1, mode),
            Ease::Sine(mode) => sine(t, mode),
            Ease::CubicBezier([x1, y1, x2, y2]) => bezier_ease_t(t, x1, y1, x2, y2),
        }
    }
}

#[inline]
fn power(t: f32, exp: i32, mode: EaseMode) -> f32 {
    match mode {
        EaseMode::In => t.powi(exp),
        EaseMode::Out => 1.0 - (1.0 - t).powi(exp),
        EaseMode::InOut => {
            if t < 0.5 {
                (2.0 * t).powi(exp) * 0.5
            } else {
                1.0 - (2.0 * (1.0 - t)).powi(exp) * 0.5
            }
        }
    }
}

#[inline]
fn sine(t: f32, mode: EaseMode) -> f32 {
    match mode {
        EaseMode::In => 1.0 - (t * PI * 0.5).cos(),
        EaseMode::Out => (t * PI * 0.5).sin(),
        EaseMode::InOut => -((PI * t).cos() - 1.0) * 0.5,
    }
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

fn parse_mode(s: &str) -> Option<EaseMode> {
    match s {
        "in" => Some(EaseMode::In),
        "out" => Some(EaseMode::Out),
        "inOut" => Some(EaseMode::InOut),
        _ => None,
    }
}

fn parse_bezier(args: &str) -> Option<[f32; 4]> {
    let parts: Vec<f32> = args
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
            Some([*x1, *y1, *x2, *y2])
        }
        _ => None,
    }
}

impl FromStr for Ease {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unknown = || SceneError::UnknownEase(name.to_string());

        if name == "none" || name == "linear" {
            return Ok(Ease::Linear);
        }
        if let Some(args) = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_bezier(args).map(Ease::CubicBezier).ok_or_else(unknown);
        }

        // Bare family names default to the `out` variant.
        let (family, mode) = match name.split_once('.') {
            Some((family, mode)) => (family, parse_mode(mode).ok_or_else(unknown)?),
            None => (name, EaseMode::Out),
        };
        match family {
            "sine" => Ok(Ease::Sine(mode)),
            "power1" => Ok(Ease::Power { order: 1, mode }),
            "power2" => Ok(Ease::Power { order: 2, mode }),
            "power3" => Ok(Ease::Power { order: 3, mode }),
            "power4" => Ok(Ease::Power { order: 4, mode }),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => f.write_str("none"),
            Ease::Power { order, mode } => write!(f, "power{order}.{}", mode.suffix()),
            Ease::Sine(mode) => write!(f, "sine.{}", mode.suffix()),
            Ease::CubicBezier([x1, y1, x2, y2]) => {
                write!(f, "cubic-bezier({x1},{y1},{x2},{y2})")
            }
        }
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}
