//! Scene domain: composing the map and knight, and driving the knight each frame.

mod controller;
mod frame;
mod setup;
mod systems;


pub use controller::{CharacterController, FrameOutcome};
pub use frame::SceneFrame;
pub use setup::{
    PlacedLayer, SINGLE_DECORATION_LAYER, SPAWN_OBJECT, SceneHandles, SceneSetup,
    SceneSetupError,
};
pub use systems::CameraFollow;

use bevy::prelude::*;

use crate::core::{FrameSet, GameState};
use crate::scene::systems::{compose_scene, drive_character, follow_camera, resolve_scene};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, resolve_scene)
            .add_systems(OnEnter(GameState::Playing), compose_scene)
            .add_systems(Update, drive_character.in_set(FrameSet::Drive))
            .add_systems(Update, follow_camera.in_set(FrameSet::Camera));
    }
}
