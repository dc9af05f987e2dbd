//! Orbit scene core (engine-agnostic)
//!
//! Scene state for a starfield backdrop, a ring of spinning planets, and a
//! scroll-driven heading pager. The crate owns configuration, easing, a tween
//! scheduler, the throttled scroll controller, layout math, and resize
//! bookkeeping. Adapters (Bevy/WASM) feed host events in and apply the
//! returned property changes.

pub mod config;
pub mod controller;
pub mod ease;
pub mod error;
pub mod frame_loop;
pub mod ids;
pub mod layout;
pub mod outputs;
pub mod scene;
pub mod scheduler;
pub mod throttle;
pub mod tween;
pub mod viewport;

// Re-exports for consumers (adapters)
pub use config::{
    CameraConfig, EnvironmentConfig, PlanetsConfig, SceneConfig, ScrollConfig, StarfieldConfig,
    ViewportConfig,
};
pub use controller::{
    HeadingList, ScrollDirection, ScrollRotationController, ScrollState, WheelEvent, WheelOutcome,
};
pub use ease::{Ease, EaseMode};
pub use error::SceneError;
pub use frame_loop::{FrameLoop, LoopState};
pub use ids::TweenId;
pub use layout::{ring_positions, CameraSpec, PlanetSpec, SceneLayout, StarfieldSpec};
pub use outputs::{Change, EventQueue, Outputs, SceneEvent, MAX_PENDING_EVENTS};
pub use scene::OrbitScene;
pub use scheduler::{AnimationScheduler, AnimationSink, ReplacePolicy};
pub use throttle::LeadingThrottle;
pub use tween::{EndValue, PropertyKey, Repeat, Tween, TweenRequest};
pub use viewport::{PerspectiveProjection, ResizeOutcome, Viewport};
