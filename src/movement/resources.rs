//! Movement domain: the per-frame input intent resource.

use bevy::prelude::*;

/// Normalized input for one frame. Rewritten every frame by the input sampler.
///
/// Axes use scene orientation: `move_x = -1` is left, `move_y = -1` is up.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub move_x: i8,
    pub move_y: i8,
    pub running: bool,
    /// True only on the frame the action input is first pressed.
    pub attacking: bool,
}

impl InputIntent {
    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_y == 0
    }
}
