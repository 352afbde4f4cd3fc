//! Movement domain: turning an intent into a velocity and a facing.

use bevy::prelude::*;

use crate::content::ControllerTuning;
use crate::movement::{Direction, InputIntent};

/// Outcome of resolving one frame of intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementResolution {
    /// Scene-space velocity (y grows downward).
    pub velocity: Vec2,
    pub direction: Direction,
}

/// Added to the walking speed while running. Not configurable.
pub const RUN_BONUS: f32 = 100.0;

/// Resolves intents with a configurable walking speed and a flat running bonus.
#[derive(Debug, Clone, Copy)]
pub struct MovementController {
    pub base_speed: f32,
}

impl From<&ControllerTuning> for MovementController {
    fn from(tuning: &ControllerTuning) -> Self {
        Self {
            base_speed: tuning.base_speed,
        }
    }
}

impl MovementController {
    /// Only one axis ever moves: Left, then Right, then Up, then Down wins.
    /// An idle intent keeps `previous` so attacks reuse the last facing.
    pub fn resolve(&self, intent: &InputIntent, previous: Direction) -> MovementResolution {
        let direction = if intent.move_x < 0 {
            Direction::Left
        } else if intent.move_x > 0 {
            Direction::Right
        } else if intent.move_y < 0 {
            Direction::Up
        } else if intent.move_y > 0 {
            Direction::Down
        } else {
            return MovementResolution {
                velocity: Vec2::ZERO,
                direction: previous,
            };
        };

        MovementResolution {
            velocity: direction.scene_vector() * self.speed(intent.running),
            direction,
        }
    }

    pub fn speed(&self, running: bool) -> f32 {
        if running {
            self.base_speed + RUN_BONUS
        } else {
            self.base_speed
        }
    }
}
