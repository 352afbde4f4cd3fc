//! Debug overlays for tuning the scene (`dev-tools` feature).
//!
//! Features:
//! - F3: outline every static collision shape
//! - F4: readout of the knight's controller state
//! - Animation clip changes logged at debug level

mod state;
mod systems;
mod ui;


pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{
    draw_collision_shapes, handle_debug_hotkeys, log_animation_messages,
    update_debug_info_overlay,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, log_animation_messages))
            .add_systems(
                Update,
                draw_collision_shapes.run_if(|state: Res<DebugState>| state.show_collisions),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}
