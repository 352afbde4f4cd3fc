//! Core domain: state transition logging.

use bevy::prelude::*;

use crate::core::state::GameState;

pub(crate) fn log_playing() {
    info!("Scene ready, knight is controllable");
}

pub(crate) fn log_setup_failed() {
    error!("Scene setup failed, nothing to play");
}

pub(crate) fn report_state(state: Res<State<GameState>>) {
    debug!("Game state: {:?}", state.get());
}
