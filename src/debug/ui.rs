//! Debug domain: the knight state readout.

use bevy::prelude::*;

use crate::movement::{ActiveClip, CharacterState};

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn describe_state(state: &CharacterState) -> String {
    let clip = match state.active_clip {
        ActiveClip::Idle => "idle".to_string(),
        ActiveClip::Walk(direction) => format!("walk-{}", direction.name()),
        ActiveClip::Attack(direction) => format!("attack-{}", direction.name()),
    };

    format!(
        "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nFacing: {}\nClip: {}\nAttacking: {}",
        state.position.x,
        state.position.y,
        state.velocity.x,
        state.velocity.y,
        state.direction.name(),
        clip,
        state.is_attacking
    )
}
