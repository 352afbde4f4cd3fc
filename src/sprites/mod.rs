//! Sprites module for layered sprite rendering and animation.
//!
//! This module handles:
//! - Scene depth slots and layered actor sprites (body, weapon)
//! - The directional animation state machine and clip playback
//! - Weapon attachment with per-frame offsets

pub mod animation;
pub mod layers;
pub mod weapon;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use animation::*;
pub use layers::*;
pub use weapon::*;

use crate::core::FrameSet;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationStateChanged>()
            .add_message::<AnimationFinished>()
            .add_systems(
                Update,
                (present_body_frame, update_weapon_attachment)
                    .chain()
                    .in_set(FrameSet::Present),
            );
    }
}
