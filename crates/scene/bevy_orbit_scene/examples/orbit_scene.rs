//! Runs the orbit scene in a window.
//!
//! Textures are read from `assets/` next to the working directory
//! (`stars.jpg`, `earth/map.jpg`, ...). Missing files render untextured.
//! Pass a JSON scene config path as the first argument to override defaults.

use bevy::prelude::*;
use bevy_orbit_scene::OrbitScenePlugin;
use orbit_scene_core::{HeadingList, SceneConfig};

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
            SceneConfig::from_json_str(&text).unwrap_or_else(|e| panic!("{path}: {e}"))
        }
        None => SceneConfig::default(),
    };
    let headings: Vec<String> = HeadingList::default().into();
    let plugin = OrbitScenePlugin::new(config, headings).expect("valid scene config");

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbit".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(plugin)
        .run();
}
