use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::WindowResized;

pub mod components;
pub mod resources;
pub mod systems;

use orbit_scene_core::{HeadingList, OrbitScene, SceneConfig, SceneError};

use crate::resources::{PendingChanges, TargetIndex};
use crate::systems::{
    apply_changes_system, attach_environment_map_system, build_target_index_system,
    frame_loop_running, frame_system, load_environment_system, resize_system,
    spawn_scene_system, start_frame_loop_system, wheel_input_system,
};

/// The core scene, owned by the ECS world.
#[derive(Resource)]
pub struct OrbitSceneResource(pub OrbitScene);

/// Installs the orbit scene. With `spawn_scene` off (headless) only the
/// input, frame, and apply systems run, and the host spawns its own
/// `SceneTarget` entities.
pub struct OrbitScenePlugin {
    config: SceneConfig,
    headings: HeadingList,
    spawn_scene: bool,
}

impl OrbitScenePlugin {
    pub fn new(config: SceneConfig, headings: Vec<String>) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self {
            config,
            headings: HeadingList::new(headings)?,
            spawn_scene: true,
        })
    }

    pub fn headless(mut self) -> Self {
        self.spawn_scene = false;
        self
    }
}

impl Default for OrbitScenePlugin {
    fn default() -> Self {
        Self {
            config: SceneConfig::default(),
            headings: HeadingList::default(),
            spawn_scene: true,
        }
    }
}

impl Plugin for OrbitScenePlugin {
    fn build(&self, app: &mut App) {
        let scene = match OrbitScene::new(self.config.clone(), self.headings.clone()) {
            Ok(scene) => scene,
            Err(err) => {
                error!("orbit scene disabled: {err}");
                return;
            }
        };

        app.insert_resource(OrbitSceneResource(scene))
            .init_resource::<TargetIndex>()
            .init_resource::<PendingChanges>()
            .add_event::<MouseWheel>()
            .add_event::<WindowResized>();

        if self.spawn_scene {
            app.add_systems(
                Startup,
                (spawn_scene_system, load_environment_system).before(start_frame_loop_system),
            )
            .add_systems(Update, attach_environment_map_system);
        }

        app.add_systems(Startup, start_frame_loop_system).add_systems(
            Update,
            (
                wheel_input_system,
                resize_system,
                frame_system.run_if(frame_loop_running),
                build_target_index_system,
                apply_changes_system,
            )
                .chain(),
        );
    }
}
