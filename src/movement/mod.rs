//! Movement domain: input sampling, intent resolution and physics velocity.

mod components;
mod controller;
mod intent;
mod resources;
mod systems;


pub use components::{ActiveClip, CharacterState, Direction, GameLayer, Obstacle, Player};
pub use controller::{MovementController, MovementResolution, RUN_BONUS};
pub use intent::{AnalogSample, DigitalSample, aggregate};
pub use resources::InputIntent;

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::movement::systems::{apply_velocity, sample_input};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputIntent>()
            .add_systems(Update, sample_input.in_set(FrameSet::Sample))
            .add_systems(Update, apply_velocity.in_set(FrameSet::Apply));
    }
}
