//! Core domain: app state and per-frame ordering.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Scene is being composed.
    #[default]
    Boot,
    /// Scene is ready and the knight is controllable.
    Playing,
    /// Scene composition failed; nothing was spawned.
    SetupFailed,
}

/// Fixed order of the per-frame pass. Chained in `CorePlugin`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FrameSet {
    /// Read keyboard and gamepad into the frame's intent.
    Sample,
    /// Resolve movement, update the attack flag, select clip and flip.
    Drive,
    /// Push the frame's results to physics bodies.
    Apply,
    /// Write sprite frames, flips and the weapon overlay.
    Present,
    /// Move the camera onto its target.
    Camera,
}
