//! Bevy host for a dice tray session
//!
//! The session runs inside a non-send resource and records its visual
//! commands; [`apply_scene_commands`] replays them onto entities each frame.

mod mesh;

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use bevy::window::WindowResized;

use dicetray::tray::meshes::labels::{face_labels, label_geometry, label_placement, label_scale};
use dicetray::tray::{
    DieId, DieKind, FaceDescriptor, RapierWorld, RecordingScene, RollMode, SimulationSession,
    VisualCommand,
};

use mesh::flat_mesh;

pub struct TrayState(pub SimulationSession<RapierWorld, RecordingScene>);

/// Entities standing in for live dice
#[derive(Resource, Default)]
pub struct DieEntities {
    dice: HashMap<DieId, Entity>,
    /// Current number shown on each percentile die
    percentile_labels: HashMap<DieId, Vec<Entity>>,
}

#[derive(Resource)]
pub struct DiceAssets {
    materials: HashMap<DieKind, Handle<StandardMaterial>>,
    label_material: Handle<StandardMaterial>,
    label_meshes: HashMap<u32, Handle<Mesh>>,
}

impl DiceAssets {
    fn label_mesh(&mut self, value: u32, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.label_meshes
            .entry(value)
            .or_insert_with(|| meshes.add(flat_mesh(&label_geometry(value))))
            .clone()
    }
}

#[derive(Component)]
pub struct DieVisual(pub DieId);

#[derive(Component)]
pub struct StatusText;

const ASSET_ROOT: &str = "assets";

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    state: NonSend<TrayState>,
) {
    let camera = state.0.arena().camera();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, camera.height, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 40.0, 15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            ..default()
        },
        Transform::from_xyz(-20.0, 30.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Table felt, larger than any window so the edges never show
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(400.0, 400.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.12, 0.3, 0.18),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    let mut die_materials = HashMap::new();
    for kind in DieKind::ALL {
        let path = kind.base_texture_path();
        let [r, g, b, a] = kind.fallback_color();
        let material = if Path::new(ASSET_ROOT).join(&path).exists() {
            StandardMaterial {
                base_color_texture: Some(asset_server.load(path)),
                ..default()
            }
        } else {
            warn!("No face image for {} at {}, using a flat colour", kind, path);
            StandardMaterial {
                base_color: Color::srgba(r, g, b, a),
                perceptual_roughness: 0.6,
                ..default()
            }
        };
        die_materials.insert(kind, materials.add(material));
    }

    commands.insert_resource(DiceAssets {
        materials: die_materials,
        label_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.08, 0.1),
            unlit: true,
            ..default()
        }),
        label_meshes: HashMap::new(),
    });

    commands.spawn((
        Text::new(state.0.status().to_string()),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        StatusText,
    ));

    commands.spawn((
        Text::new("1-7: d4 d6 d8 d10 d12 d20 d100   C: clear   N/A/D: normal/advantage/disadvantage   Esc: quit"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(16.0),
            ..default()
        },
    ));
}

/// Keyboard controls for spawning, clearing and the roll mode.
pub fn handle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: NonSendMut<TrayState>,
    mut exit: MessageWriter<AppExit>,
) {
    const SPAWN_KEYS: [KeyCode; 7] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
    ];

    for (key, kind) in SPAWN_KEYS.iter().zip(DieKind::ALL) {
        if keyboard.just_pressed(*key) {
            state.0.spawn(kind);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        state.0.clear_all();
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        state.0.set_roll_mode(RollMode::Normal);
    }
    if keyboard.just_pressed(KeyCode::KeyA) {
        state.0.set_roll_mode(RollMode::Advantage);
    }
    if keyboard.just_pressed(KeyCode::KeyD) {
        state.0.set_roll_mode(RollMode::Disadvantage);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

pub fn handle_resize(mut resized: MessageReader<WindowResized>, mut state: NonSendMut<TrayState>) {
    for event in resized.read() {
        // Minimised windows report zero sizes; the session logs and ignores them
        let _ = state.0.on_resize(event.width, event.height);
    }
}

pub fn step_tray(time: Res<Time>, mut state: NonSendMut<TrayState>) {
    state.0.step(time.delta_secs());
}

/// Replay the session's visual commands onto entities.
pub fn apply_scene_commands(
    mut commands: Commands,
    mut state: NonSendMut<TrayState>,
    mut entities: ResMut<DieEntities>,
    mut assets: ResMut<DiceAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut transforms: Query<&mut Transform, With<DieVisual>>,
) {
    let pending = state.0.scene_mut().drain();

    for command in pending {
        match command {
            VisualCommand::Add { id, .. } => {
                let Some(die) = state.0.dice().iter().find(|d| d.id == id) else {
                    continue;
                };
                let material = assets.materials.get(&die.kind).cloned().unwrap_or_default();
                let entity = commands
                    .spawn((
                        Mesh3d(meshes.add(flat_mesh(&die.polyhedron.mesh))),
                        MeshMaterial3d(material),
                        Transform::default(),
                        DieVisual(id),
                    ))
                    .id();

                let scale = label_scale(die.kind);
                let label_material = assets.label_material.clone();
                for label in face_labels(&die.polyhedron) {
                    let label_mesh = assets.label_mesh(label.value, &mut meshes);
                    commands.entity(entity).with_children(|parent| {
                        parent.spawn((
                            Mesh3d(label_mesh),
                            MeshMaterial3d(label_material.clone()),
                            Transform {
                                translation: label.translation,
                                rotation: label.rotation,
                                scale: Vec3::splat(scale),
                            },
                        ));
                    });
                }
                entities.dice.insert(id, entity);
            }
            VisualCommand::Remove(id) => {
                entities.percentile_labels.remove(&id);
                if let Some(entity) = entities.dice.remove(&id) {
                    commands.entity(entity).despawn();
                }
            }
            VisualCommand::Sync { id, pose } => {
                let Some(&entity) = entities.dice.get(&id) else {
                    continue;
                };
                let transform = Transform::from_translation(pose.position).with_rotation(pose.rotation);
                match transforms.get_mut(entity) {
                    Ok(mut current) => *current = transform,
                    // Spawned this frame, not queryable yet
                    Err(_) => {
                        commands.entity(entity).insert(transform);
                    }
                }
            }
            VisualCommand::ShowValue { id, value } => {
                let Some(&entity) = entities.dice.get(&id) else {
                    continue;
                };
                for old in entities.percentile_labels.remove(&id).unwrap_or_default() {
                    commands.entity(old).despawn();
                }

                let radius = state
                    .0
                    .dice()
                    .iter()
                    .find(|d| d.id == id)
                    .map(|d| d.polyhedron.radius())
                    .unwrap_or(1.0);
                let scale = label_scale(DieKind::D100);
                let label_mesh = assets.label_mesh(value, &mut meshes);
                let label_material = assets.label_material.clone();

                let mut labels = Vec::with_capacity(6);
                for normal in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
                    let face = FaceDescriptor {
                        face_index: 0,
                        value,
                        normal,
                        center: normal * radius,
                    };
                    let (translation, rotation) = label_placement(&face);
                    commands.entity(entity).with_children(|parent| {
                        labels.push(
                            parent
                                .spawn((
                                    Mesh3d(label_mesh.clone()),
                                    MeshMaterial3d(label_material.clone()),
                                    Transform {
                                        translation,
                                        rotation,
                                        scale: Vec3::splat(scale),
                                    },
                                ))
                                .id(),
                        );
                    });
                }
                entities.percentile_labels.insert(id, labels);
            }
        }
    }
}

pub fn update_status_text(
    state: NonSend<TrayState>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let status = state.0.status();
    for mut text in query.iter_mut() {
        if text.0 != status {
            text.0 = status.to_string();
        }
    }
}
