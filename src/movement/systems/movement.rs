//! Movement domain: handing the resolved velocity to the physics body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CharacterState, Player};

/// Scene space grows downward, physics space grows upward.
pub(crate) fn scene_to_physics_velocity(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y)
}

pub(crate) fn apply_velocity(
    mut query: Query<(&CharacterState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        velocity.0 = scene_to_physics_velocity(state.velocity);
    }
}
