//! Scene domain: the per-frame controller pass for one actor.

use crate::content::ControllerTuning;
use crate::movement::{ActiveClip, CharacterState, InputIntent, MovementController};
use crate::sprites::{AnimationController, AnimationStateMachine, ClipKey, WeaponPose, weapon_pose};

/// Movement and animation rules, applied in a fixed order every frame.
#[derive(Debug, Clone, Copy)]
pub struct CharacterController {
    pub movement: MovementController,
    pub animation: AnimationStateMachine,
}

impl From<&ControllerTuning> for CharacterController {
    fn from(tuning: &ControllerTuning) -> Self {
        Self {
            movement: MovementController::from(tuning),
            animation: AnimationStateMachine::from(tuning),
        }
    }
}

/// What one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub clip: ActiveClip,
    /// Previous clip, when the selection changed this frame.
    pub changed_from: Option<ActiveClip>,
    /// Non-looping clip that completed this frame.
    pub finished: Option<ClipKey>,
    /// `None` until a clip has played.
    pub flip_x: Option<bool>,
    pub weapon: Option<WeaponPose>,
}

impl CharacterController {
    /// Resolve movement, update the attack flag, select the clip, then advance
    /// playback by `dt` seconds.
    pub fn step(
        &self,
        intent: &InputIntent,
        state: &mut CharacterState,
        playback: &mut AnimationController,
        dt: f32,
    ) -> FrameOutcome {
        let previous_clip = state.active_clip;

        let resolution = self.movement.resolve(intent, state.direction);
        state.velocity = resolution.velocity;
        state.direction = resolution.direction;

        self.animation
            .update_attack_flag(state, intent.attacking, playback);
        let clip = self.animation.select(state, intent.attacking, playback);
        let finished = playback.tick(dt);

        let weapon = match (playback.clip, playback.frame_index()) {
            (Some(body_clip), Some(index)) => Some(weapon_pose(
                body_clip.direction,
                body_clip,
                index,
                playback.is_playing_attack(),
            )),
            _ => None,
        };

        FrameOutcome {
            clip,
            changed_from: (previous_clip != clip).then_some(previous_clip),
            finished,
            flip_x: playback.flip_x(),
            weapon,
        }
    }
}
