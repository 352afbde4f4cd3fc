//! Scene domain: startup composition, the per-frame controller pass and camera follow.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::path::Path;

use crate::content::{ControllerTuning, SceneConfig, SheetConfig};
use crate::core::GameState;
use crate::map::load_tiled_map;
use crate::movement::{CharacterState, GameLayer, InputIntent, Obstacle, Player};
use crate::scene::controller::CharacterController;
use crate::scene::frame::SceneFrame;
use crate::scene::setup::{SceneHandles, SceneSetup, SceneSetupError};
use crate::sprites::{
    AnimationController, AnimationFinished, AnimationStateChanged, SheetHandles, TileLayerRoot,
    spawn_layered_actor,
};

/// Keeps the camera centred on `target`.
#[derive(Component, Debug)]
pub struct CameraFollow {
    pub target: Entity,
}

/// Load and lay out the map. Spawns nothing: a failed setup leaves the world empty.
pub(crate) fn resolve_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut frame: ResMut<SceneFrame>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Ok(window) = windows.single() {
        *frame = SceneFrame::new(window.width(), window.height());
    }

    let resolved = load_tiled_map(Path::new(&config.map_path))
        .map_err(SceneSetupError::from)
        .and_then(|map| SceneHandles::resolve(&map, &config, *frame));

    match resolved {
        Ok(handles) => {
            commands.insert_resource(SceneSetup::Ready(handles));
            next_state.set(GameState::Playing);
        }
        Err(e) => {
            error!("Scene setup failed: {}", e);
            commands.insert_resource(SceneSetup::Failed(e));
            next_state.set(GameState::SetupFailed);
        }
    }
}

/// Spawn tiles, obstacles, the knight and the camera following it.
pub(crate) fn compose_scene(
    mut commands: Commands,
    setup: Res<SceneSetup>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let Some(handles) = setup.handles() else {
        return;
    };

    spawn_tile_layers(&mut commands, handles, &config, &asset_server, &mut layouts);
    spawn_obstacles(&mut commands, handles);

    let body = sheet_handles(&config.player_sheet, &asset_server, &mut layouts);
    let weapon = config
        .weapon_sheet
        .as_ref()
        .map(|sheet| sheet_handles(sheet, &asset_server, &mut layouts));
    let actor = spawn_knight(&mut commands, handles, &config, &body, weapon.as_ref());

    commands.spawn((Camera2d, CameraFollow { target: actor }));

    info!(
        "Scene composed: {} tile layers, {} collision shapes, knight at ({}, {})",
        handles.layers.len(),
        handles.collision_shapes.len(),
        handles.actor_spawn.x,
        handles.actor_spawn.y
    );
}

fn sheet_handles(
    sheet: &SheetConfig,
    asset_server: &AssetServer,
    layouts: &mut Assets<TextureAtlasLayout>,
) -> SheetHandles {
    let layout = TextureAtlasLayout::from_grid(
        UVec2::splat(sheet.frame_size),
        sheet.columns,
        sheet.rows,
        None,
        None,
    );

    SheetHandles {
        image: asset_server.load(sheet.path.clone()),
        layout: layouts.add(layout),
        frame_size: sheet.frame_size as f32,
    }
}

/// One root per tile layer at its depth slot, one sprite per non-empty cell.
fn spawn_tile_layers(
    commands: &mut Commands,
    handles: &SceneHandles,
    config: &SceneConfig,
    asset_server: &AssetServer,
    layouts: &mut Assets<TextureAtlasLayout>,
) {
    let tileset = &handles.tileset;
    let tile_px = UVec2::new(
        if tileset.tilewidth > 0 { tileset.tilewidth } else { handles.tile_size.x as u32 },
        if tileset.tileheight > 0 { tileset.tileheight } else { handles.tile_size.y as u32 },
    );
    let image: Handle<Image> =
        asset_server.load(format!("{}/{}", config.map_asset_dir, tileset.image));
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        tile_px,
        tileset.columns,
        tileset.rows(),
        None,
        None,
    ));
    let tile_size = handles.tile_size * handles.scale;

    for placed in &handles.layers {
        let visibility = if placed.layer.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        let root = commands
            .spawn((
                Name::new(placed.layer.name.clone()),
                TileLayerRoot {
                    layer: placed.depth,
                },
                Transform::from_xyz(0.0, 0.0, placed.depth.z()),
                visibility,
            ))
            .id();

        for (column, row, gid) in placed.layer.cells() {
            let Some(index) = tileset.local_id(gid) else {
                continue;
            };

            let mut sprite = Sprite::from_atlas_image(
                image.clone(),
                TextureAtlas {
                    layout: layout.clone(),
                    index: index as usize,
                },
            );
            sprite.custom_size = Some(tile_size);
            sprite.color = Color::WHITE.with_alpha(placed.layer.opacity);

            let at = handles.frame.to_world(handles.tile_center(column, row));
            let tile = commands
                .spawn((sprite, Transform::from_xyz(at.x, at.y, 0.0)))
                .id();
            commands.entity(root).add_child(tile);
        }
    }
}

/// Invisible static bodies for every collision shape.
fn spawn_obstacles(commands: &mut Commands, handles: &SceneHandles) {
    let layers = CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Actor]);

    for shape in &handles.collision_shapes {
        let at = handles.frame.to_world(shape.center());
        commands.spawn((
            Obstacle,
            Transform::from_xyz(at.x, at.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(shape.width, shape.height),
            layers,
        ));
    }
}

fn spawn_knight(
    commands: &mut Commands,
    handles: &SceneHandles,
    config: &SceneConfig,
    body: &SheetHandles,
    weapon: Option<&SheetHandles>,
) -> Entity {
    let collider = Vec2::from(config.actor_collider) * handles.scale;

    let root = (
        Name::new("knight"),
        Player,
        CharacterState {
            position: handles.actor_spawn,
            ..default()
        },
        AnimationController::default(),
        (
            RigidBody::Dynamic,
            Collider::rectangle(collider.x, collider.y),
            LockedAxes::ROTATION_LOCKED,
            GravityScale(0.0),
            Friction::new(0.0),
            LinearVelocity::default(),
            CollisionLayers::new(GameLayer::Actor, [GameLayer::Obstacle]),
        ),
    );

    spawn_layered_actor(
        commands,
        root,
        handles.frame.to_world(handles.actor_spawn),
        handles.scale,
        body,
        weapon,
    )
}

/// The per-frame controller pass. Runs between input sampling and physics.
pub(crate) fn drive_character(
    time: Res<Time>,
    intent: Res<InputIntent>,
    tuning: Res<ControllerTuning>,
    frame: Res<SceneFrame>,
    mut actors: Query<
        (
            Entity,
            &Transform,
            &mut CharacterState,
            &mut AnimationController,
        ),
        With<Player>,
    >,
    mut changed: MessageWriter<AnimationStateChanged>,
    mut finished: MessageWriter<AnimationFinished>,
) {
    let controller = CharacterController::from(tuning.as_ref());

    for (entity, transform, mut state, mut playback) in &mut actors {
        state.position = frame.to_scene(transform.translation.truncate());

        let outcome = controller.step(&intent, &mut state, &mut playback, time.delta_secs());

        if let Some(from) = outcome.changed_from {
            debug!("Knight clip {:?} -> {:?}", from, outcome.clip);
            changed.write(AnimationStateChanged {
                entity,
                from,
                to: outcome.clip,
            });
        }
        if let Some(clip) = outcome.finished {
            finished.write(AnimationFinished { entity, clip });
        }
    }
}

pub(crate) fn follow_camera(
    targets: Query<&Transform, Without<CameraFollow>>,
    mut cameras: Query<(&CameraFollow, &mut Transform)>,
) {
    for (follow, mut camera) in &mut cameras {
        if let Ok(target) = targets.get(follow.target) {
            camera.translation.x = target.translation.x;
            camera.translation.y = target.translation.y;
        }
    }
}
