use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{WindowResized, WindowResolution};
use bevy_orbit_scene::components::{HeadingStrip, OrbitCamera, PlanetGroup, SceneTarget};
use bevy_orbit_scene::resources::{EnvironmentMapHandles, TargetIndex};
use bevy_orbit_scene::{OrbitScenePlugin, OrbitSceneResource};
use orbit_scene_core::SceneConfig;
use orbit_test_fixtures::headings;

fn headless_app() -> App {
    let plugin = OrbitScenePlugin::new(
        SceneConfig::default(),
        headings::load("planets").unwrap(),
    )
    .unwrap()
    .headless();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            100,
        )))
        .add_plugins(plugin);
    app
}

/// Full scene spawn with assets but no renderer.
fn scene_app(config: SceneConfig) -> App {
    let plugin = OrbitScenePlugin::new(config, headings::load("planets").unwrap()).unwrap();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Image>()
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .add_plugins(plugin);
    app
}

fn resized(app: &mut App, window: Entity) -> Option<f32> {
    app.world_mut().send_event(WindowResized {
        window,
        width: 1600.0,
        height: 800.0,
    });
    app.update();
    app.world()
        .resource::<OrbitSceneResource>()
        .0
        .last_resize()
        .map(|r| r.pixel_ratio)
}

fn scroll_down() -> MouseWheel {
    MouseWheel {
        unit: MouseScrollUnit::Line,
        x: 0.0,
        y: -1.0,
        window: Entity::PLACEHOLDER,
    }
}

#[test]
fn plugin_inserts_scene_resource() {
    let app = headless_app();
    assert!(app.world().get_resource::<OrbitSceneResource>().is_some());
    assert!(app.world().get_resource::<TargetIndex>().is_some());
}

#[test]
fn empty_headings_are_rejected_by_the_plugin() {
    assert!(OrbitScenePlugin::new(SceneConfig::default(), Vec::new()).is_err());
}

#[test]
fn startup_starts_the_frame_loop() {
    let mut app = headless_app();
    app.update();
    let scene = app.world().resource::<OrbitSceneResource>();
    assert!(scene.0.is_running());
}

#[test]
fn wheel_steps_once_per_cooldown_and_rotates_group() {
    let mut app = headless_app();
    let group = app
        .world_mut()
        .spawn((Transform::default(), SceneTarget("planet_group".into())))
        .id();
    let strip = app
        .world_mut()
        .spawn((Style::default(), SceneTarget("headings".into())))
        .id();
    app.update();

    app.world_mut().send_event(scroll_down());
    app.update();
    assert_eq!(app.world().resource::<OrbitSceneResource>().0.step(), 1);

    // Inside the 2s cooldown.
    app.world_mut().send_event(scroll_down());
    app.update();
    assert_eq!(app.world().resource::<OrbitSceneResource>().0.step(), 1);

    for _ in 0..15 {
        app.update();
    }

    let rotation = app.world().get::<Transform>(group).unwrap().rotation;
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    assert!((yaw + FRAC_PI_2).abs() < 1e-3, "yaw={yaw}");

    let top = app.world().get::<Style>(strip).unwrap().top;
    assert_eq!(top, Val::Percent(-100.0));
}

#[test]
fn resize_updates_scene_projection() {
    let mut app = headless_app();
    app.update();
    app.world_mut().send_event(WindowResized {
        window: Entity::PLACEHOLDER,
        width: 1600.0,
        height: 800.0,
    });
    app.update();
    let scene = app.world().resource::<OrbitSceneResource>();
    assert_eq!(scene.0.projection().aspect, 2.0);
}

#[test]
fn pixel_ratio_follows_the_device_and_leaves_window_scale_alone() {
    let mut app = headless_app();
    let mut resolution = WindowResolution::new(1600.0, 800.0);
    resolution.set_scale_factor(3.0);
    let window = app
        .world_mut()
        .spawn(Window {
            resolution,
            ..default()
        })
        .id();
    app.update();

    assert_eq!(resized(&mut app, window), Some(2.0));
    let res = &app.world().get::<Window>(window).unwrap().resolution;
    assert_eq!(res.scale_factor_override(), None);
    assert_eq!(res.scale_factor(), 3.0);

    // Window moved to a 1x display.
    app.world_mut()
        .get_mut::<Window>(window)
        .unwrap()
        .resolution
        .set_scale_factor(1.0);
    assert_eq!(resized(&mut app, window), Some(1.0));
    let res = &app.world().get::<Window>(window).unwrap().resolution;
    assert_eq!(res.scale_factor_override(), None);
}

#[test]
fn scene_spawn_builds_group_strip_and_camera() {
    let mut cfg = SceneConfig::default();
    cfg.environment.diffuse_map = None;
    let mut app = scene_app(cfg);
    app.update();

    let world = app.world_mut();
    assert_eq!(world.query::<&PlanetGroup>().iter(world).count(), 1);
    assert_eq!(world.query::<&HeadingStrip>().iter(world).count(), 1);
    assert_eq!(world.query::<&OrbitCamera>().iter(world).count(), 1);
    assert!(world.get_resource::<EnvironmentMapHandles>().is_none());

    let index = world.resource::<TargetIndex>();
    for target in ["planet_group", "headings", "planet.0", "planet.3"] {
        assert!(index.map.contains_key(target), "missing {target}");
    }
}

#[test]
fn missing_environment_map_is_dropped_without_lighting() {
    let mut cfg = SceneConfig::default();
    cfg.environment.diffuse_map = Some("missing/diffuse.ktx2".into());
    cfg.environment.specular_map = Some("missing/specular.ktx2".into());
    let mut app = scene_app(cfg);
    app.update();

    for _ in 0..400 {
        if app
            .world()
            .get_resource::<EnvironmentMapHandles>()
            .is_none()
        {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
        app.update();
    }
    assert!(app
        .world()
        .get_resource::<EnvironmentMapHandles>()
        .is_none());

    // No retry on later frames.
    app.update();
    let world = app.world_mut();
    let lit: Vec<bool> = world
        .query_filtered::<Option<&EnvironmentMapLight>, With<OrbitCamera>>()
        .iter(world)
        .map(|light| light.is_some())
        .collect();
    assert_eq!(lit, vec![false]);
}
