//! Debug domain: overlay toggles, collision outlines and animation logging.

use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, describe_state, spawn_debug_info_overlay};
use crate::movement::{CharacterState, Player};
use crate::scene::SceneSetup;
use crate::sprites::{AnimationFinished, AnimationStateChanged};

const COLLISION_COLOR: Color = Color::srgb(0.9, 0.2, 0.3);

/// F3 toggles collision outlines, F4 the state readout
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        let on = debug_state.toggle_collisions();
        info!("[DEBUG] Collision outlines {}", if on { "ON" } else { "OFF" });
    }

    if keyboard.just_pressed(KeyCode::F4) {
        let on = debug_state.toggle_info();
        info!("[DEBUG] Debug info {}", if on { "ON" } else { "OFF" });
    }
}

pub(crate) fn draw_collision_shapes(setup: Option<Res<SceneSetup>>, mut gizmos: Gizmos) {
    let Some(handles) = setup.as_deref().and_then(SceneSetup::handles) else {
        return;
    };

    for shape in &handles.collision_shapes {
        let center = handles.frame.to_world(shape.center());
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            shape.size(),
            COLLISION_COLOR,
        );
    }
}

/// Update the debug info overlay with current knight state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<&CharacterState, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some(state), Ok(mut text)) = (player_query.iter().next(), overlay_query.single_mut()) {
        **text = describe_state(state);
    }
}

pub(crate) fn log_animation_messages(
    mut changed: MessageReader<AnimationStateChanged>,
    mut finished: MessageReader<AnimationFinished>,
) {
    for message in changed.read() {
        debug!(
            "[DEBUG] {:?}: {:?} -> {:?}",
            message.entity, message.from, message.to
        );
    }
    for message in finished.read() {
        debug!("[DEBUG] {:?}: {} finished", message.entity, message.clip.name());
    }
}
