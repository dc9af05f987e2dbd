use bevy::prelude::*;

/// Names the entity that property changes for `target` are written to.
/// The index system maps these names to entities each frame.
#[derive(Component, Debug, Clone)]
pub struct SceneTarget(pub String);

#[derive(Component)]
pub struct OrbitCamera;

/// Parent of the planet ring; rotated a quarter turn per scroll step.
#[derive(Component)]
pub struct PlanetGroup;

/// UI column holding one full-height node per heading.
#[derive(Component)]
pub struct HeadingStrip;
