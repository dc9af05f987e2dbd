use bevy::asset::LoadState;
use bevy::input::mouse::MouseWheel;
use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::window::WindowResized;
use std::collections::HashMap;

use crate::components::{HeadingStrip, OrbitCamera, PlanetGroup, SceneTarget};
use crate::resources::{EnvironmentMapHandles, PendingChanges, TargetIndex};
use crate::OrbitSceneResource;
use orbit_scene_core::tween::{HEADINGS_TARGET, OFFSET_Y_PCT, PLANET_GROUP_TARGET, ROTATION_Y};
use orbit_scene_core::{Viewport, WheelEvent};

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

/// Spawns camera, starfield, planet ring, and the heading UI from the
/// core's layout.
pub fn spawn_scene_system(
    mut commands: Commands,
    scene: Res<OrbitSceneResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let layout = scene.0.layout();

    let cam = &layout.camera;
    commands.spawn((
        Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: cam.fov_degrees.to_radians(),
                near: cam.near,
                far: cam.far,
                ..default()
            }),
            transform: Transform::from_translation(vec3(cam.position))
                .looking_at(vec3(cam.look_at), Vec3::Y),
            ..default()
        },
        OrbitCamera,
        Name::new("camera"),
    ));

    // Backdrop is seen from inside, so cull the outward faces.
    let stars = &layout.starfield;
    let segments = stars.segments as usize;
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(stars.radius).mesh().uv(segments, segments)),
            material: materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(stars.texture.clone())),
                unlit: true,
                cull_mode: Some(Face::Front),
                ..default()
            }),
            ..default()
        },
        Name::new("starfield"),
    ));

    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_translation(vec3(
                layout.group_position,
            ))),
            PlanetGroup,
            SceneTarget(PLANET_GROUP_TARGET.to_string()),
            Name::new(PLANET_GROUP_TARGET),
        ))
        .with_children(|group| {
            for planet in &layout.planets {
                let segments = planet.segments as usize;
                let base_color = planet
                    .tint
                    .map(|[r, g, b]| Color::srgb(r, g, b))
                    .unwrap_or(Color::WHITE);
                group.spawn((
                    PbrBundle {
                        mesh: meshes.add(Sphere::new(planet.radius).mesh().uv(segments, segments)),
                        material: materials.add(StandardMaterial {
                            base_color,
                            base_color_texture: Some(asset_server.load(planet.texture.clone())),
                            ..default()
                        }),
                        transform: Transform::from_translation(vec3(planet.position)),
                        ..default()
                    },
                    SceneTarget(planet.target.clone()),
                    Name::new(planet.target.clone()),
                ));
            }
        });

    // Each heading fills the viewport, so a -100% top offset shows the next one.
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
            ..default()
        })
        .with_children(|root| {
            root.spawn((
                NodeBundle {
                    style: Style {
                        position_type: PositionType::Relative,
                        flex_direction: FlexDirection::Column,
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        top: Val::Percent(0.0),
                        ..default()
                    },
                    ..default()
                },
                HeadingStrip,
                SceneTarget(HEADINGS_TARGET.to_string()),
            ))
            .with_children(|strip| {
                for heading in scene.0.headings().iter() {
                    strip
                        .spawn(NodeBundle {
                            style: Style {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                flex_shrink: 0.0,
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                ..default()
                            },
                            ..default()
                        })
                        .with_children(|cell| {
                            cell.spawn(TextBundle::from_section(
                                heading,
                                TextStyle {
                                    font_size: 72.0,
                                    color: Color::WHITE,
                                    ..default()
                                },
                            ));
                        });
                }
            });
        });
}

/// Kicks off the environment map load when both maps are configured.
pub fn load_environment_system(
    mut commands: Commands,
    scene: Res<OrbitSceneResource>,
    asset_server: Res<AssetServer>,
) {
    let env = &scene.0.config().environment;
    if let Some((diffuse, specular)) = env.maps() {
        commands.insert_resource(EnvironmentMapHandles {
            diffuse: asset_server.load(diffuse.to_string()),
            specular: asset_server.load(specular.to_string()),
            intensity: env.intensity,
        });
    }
}

/// Attaches the environment map once both images are loaded. A failed load
/// leaves the environment unset; there is no retry.
pub fn attach_environment_map_system(
    mut commands: Commands,
    handles: Option<Res<EnvironmentMapHandles>>,
    asset_server: Res<AssetServer>,
    cameras: Query<Entity, With<OrbitCamera>>,
) {
    let Some(handles) = handles else {
        return;
    };
    let diffuse = asset_server.load_state(handles.diffuse.id());
    let specular = asset_server.load_state(handles.specular.id());

    if matches!(diffuse, LoadState::Failed(_)) || matches!(specular, LoadState::Failed(_)) {
        warn!("environment map failed to load; rendering without it");
        commands.remove_resource::<EnvironmentMapHandles>();
        return;
    }
    if !matches!(diffuse, LoadState::Loaded) || !matches!(specular, LoadState::Loaded) {
        return;
    }

    for camera in cameras.iter() {
        commands.entity(camera).insert(EnvironmentMapLight {
            diffuse_map: handles.diffuse.clone(),
            specular_map: handles.specular.clone(),
            intensity: handles.intensity,
        });
    }
    info!("environment map attached");
    commands.remove_resource::<EnvironmentMapHandles>();
}

pub fn start_frame_loop_system(mut scene: ResMut<OrbitSceneResource>) {
    scene.0.start();
}

/// Run condition: frames only advance while the core loop is running.
pub fn frame_loop_running(scene: Option<Res<OrbitSceneResource>>) -> bool {
    scene.is_some_and(|s| s.0.is_running())
}

/// Feeds wheel input into the scroll controller. Bevy reports scrolling
/// down as negative `y`, the controller expects it as positive `delta_y`.
pub fn wheel_input_system(
    mut wheel: EventReader<MouseWheel>,
    time: Res<Time<Real>>,
    mut scene: ResMut<OrbitSceneResource>,
) {
    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    for ev in wheel.read() {
        scene.0.on_wheel(WheelEvent::new(-f64::from(ev.y), now_ms));
    }
}

/// Recomputes the projection on every resize. The device ratio comes from
/// the window's base scale factor; the capped render ratio stays in the
/// core's resize outcome and never touches the window's logical scale.
pub fn resize_system(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window>,
    mut scene: ResMut<OrbitSceneResource>,
    mut cameras: Query<&mut Projection, With<OrbitCamera>>,
) {
    for ev in resized.read() {
        let dpr = windows
            .get(ev.window)
            .map_or(1.0, |w| w.resolution.base_scale_factor());
        let out = scene.0.on_resize(Viewport::new(ev.width, ev.height, dpr));
        debug!(
            "resized to {}x{}, aspect {}, pixel ratio {}",
            out.width, out.height, out.aspect, out.pixel_ratio
        );

        for mut projection in cameras.iter_mut() {
            if let Projection::Perspective(p) = projection.as_mut() {
                p.aspect_ratio = out.aspect;
            }
        }
    }
}

/// Advance the core one frame and stash its changes into PendingChanges.
pub fn frame_system(
    time: Res<Time>,
    mut scene: ResMut<OrbitSceneResource>,
    mut pending: ResMut<PendingChanges>,
) {
    if let Some(out) = scene.0.frame(time.delta_seconds()) {
        for event in &out.events {
            debug!("scene event: {event:?}");
        }
        pending.changes = out.changes;
    }
}

/// Rebuilds the target-name -> entity index.
pub fn build_target_index_system(
    targets: Query<(Entity, &SceneTarget)>,
    mut index: ResMut<TargetIndex>,
) {
    let mut map = HashMap::with_capacity(index.map.len());
    for (entity, target) in targets.iter() {
        map.insert(target.0.clone(), entity);
    }
    index.map = map;
}

/// Apply staged changes: rotations go to Transform, heading offsets to the
/// strip's UI Style. Keys without a matching entity are skipped.
pub fn apply_changes_system(
    mut pending: ResMut<PendingChanges>,
    index: Res<TargetIndex>,
    mut transforms: Query<&mut Transform>,
    mut styles: Query<&mut Style>,
) {
    for change in pending.changes.drain(..) {
        let Some((target, property)) = change.key.split_once('/') else {
            continue;
        };
        let Some(&entity) = index.map.get(target) else {
            continue;
        };
        match property {
            ROTATION_Y => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    tf.rotation = Quat::from_rotation_y(change.value);
                }
            }
            OFFSET_Y_PCT => {
                if let Ok(mut style) = styles.get_mut(entity) {
                    style.top = Val::Percent(change.value);
                }
            }
            _ => {}
        }
    }
}
