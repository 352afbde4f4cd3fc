//! Movement domain: merging keyboard and gamepad samples into one intent.

use crate::movement::InputIntent;

/// Digital keys held this frame, already mapped to logical directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitalSample {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub run: bool,
    pub action_just_pressed: bool,
}

/// Gamepad state this frame. Stick Y is up-positive, as the device reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalogSample {
    pub axis_x: f32,
    pub axis_y: f32,
    pub run: bool,
    pub action_just_pressed: bool,
}

/// Combine both sources. A key and a deflected stick on the same logical
/// direction both count as pressed. A missing gamepad contributes nothing.
pub fn aggregate(keys: DigitalSample, pad: Option<AnalogSample>, dead_zone: f32) -> InputIntent {
    let pad = pad.unwrap_or_default();

    let left = keys.left || pad.axis_x < -dead_zone;
    let right = keys.right || pad.axis_x > dead_zone;
    let up = keys.up || pad.axis_y > dead_zone;
    let down = keys.down || pad.axis_y < -dead_zone;

    // Left before right and up before down, matching the movement priority.
    let move_x = if left {
        -1
    } else if right {
        1
    } else {
        0
    };
    let move_y = if up {
        -1
    } else if down {
        1
    } else {
        0
    };

    InputIntent {
        move_x,
        move_y,
        running: keys.run || pad.run,
        attacking: keys.action_just_pressed || pad.action_just_pressed,
    }
}
