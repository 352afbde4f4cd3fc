//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::content::ControllerTuning;
use crate::movement::intent::{AnalogSample, DigitalSample, aggregate};
use crate::movement::InputIntent;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const UP_KEYS: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::KeyW];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::ArrowDown, KeyCode::KeyS];
const RUN_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];
const ACTION_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyJ];

const PAD_RUN_BUTTON: GamepadButton = GamepadButton::RightTrigger;
const PAD_ACTION_BUTTON: GamepadButton = GamepadButton::West;

pub(crate) fn sample_keyboard(keyboard: &ButtonInput<KeyCode>) -> DigitalSample {
    DigitalSample {
        left: keyboard.any_pressed(LEFT_KEYS),
        right: keyboard.any_pressed(RIGHT_KEYS),
        up: keyboard.any_pressed(UP_KEYS),
        down: keyboard.any_pressed(DOWN_KEYS),
        run: keyboard.any_pressed(RUN_KEYS),
        action_just_pressed: keyboard.any_just_pressed(ACTION_KEYS),
    }
}

pub(crate) fn sample_gamepad(gamepad: &Gamepad) -> AnalogSample {
    AnalogSample {
        axis_x: gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
        axis_y: gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
        run: gamepad.pressed(PAD_RUN_BUTTON),
        action_just_pressed: gamepad.just_pressed(PAD_ACTION_BUTTON),
    }
}

pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    tuning: Res<ControllerTuning>,
    mut intent: ResMut<InputIntent>,
) {
    // Only the first connected gamepad drives the knight.
    let pad = gamepads.iter().next().map(sample_gamepad);

    *intent = aggregate(sample_keyboard(&keyboard), pad, tuning.stick_dead_zone);
}
