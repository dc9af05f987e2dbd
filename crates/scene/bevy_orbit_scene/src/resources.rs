use bevy::prelude::*;
use std::collections::HashMap;

use orbit_scene_core::Change;

/// Index from target name (e.g. "planet_group", "planet.2") to entity.
/// Populated from every entity carrying a SceneTarget.
#[derive(Resource, Default)]
pub struct TargetIndex {
    pub map: HashMap<String, Entity>,
}

/// Changes produced by the last core frame, applied in a separate system
/// (keeps ordering explicit: Compute -> Apply).
#[derive(Resource, Default)]
pub struct PendingChanges {
    pub changes: Vec<Change>,
}

/// Environment map handles waiting to be attached to the camera.
#[derive(Resource)]
pub struct EnvironmentMapHandles {
    pub diffuse: Handle<Image>,
    pub specular: Handle<Image>,
    pub intensity: f32,
}
