//! Core domain: app states and the ordering of the per-frame pass.

mod state;
mod systems;

pub use state::{FrameSet, GameState};

use bevy::prelude::*;

use crate::core::systems::{log_playing, log_setup_failed, report_state};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(
                Update,
                (
                    FrameSet::Sample,
                    FrameSet::Drive,
                    FrameSet::Apply,
                    FrameSet::Present,
                    FrameSet::Camera,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Playing), log_playing)
            .add_systems(OnEnter(GameState::SetupFailed), log_setup_failed)
            .add_systems(Update, report_state.run_if(state_changed::<GameState>));
    }
}
