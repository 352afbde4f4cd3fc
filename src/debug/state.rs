//! Debug domain: overlay toggles.

use bevy::prelude::*;

/// Resource tracking which debug overlays are shown
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Outline every static collision shape
    pub show_collisions: bool,
    /// Text readout of the knight's controller state
    pub show_info: bool,
}

impl DebugState {
    pub fn toggle_collisions(&mut self) -> bool {
        self.show_collisions = !self.show_collisions;
        self.show_collisions
    }

    pub fn toggle_info(&mut self) -> bool {
        self.show_info = !self.show_info;
        self.show_info
    }
}
