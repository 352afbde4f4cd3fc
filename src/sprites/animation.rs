//! Animation state machine and playback.
//!
//! Clips are addressed by action and facing. Frame sequences are fixed tables
//! of sheet indices; playback keeps a cursor into the sequence and a timer.
//! The "frame index" exposed to gameplay is the 1-based position of the
//! displayed frame within its clip, which is what the mirroring rule and the
//! weapon table are keyed by.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::BodyLayer;
use crate::content::ControllerTuning;
use crate::movement::{ActiveClip, CharacterState, Direction};

/// What a clip depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipAction {
    /// Looping walk cycle on the body sheet.
    Walk,
    /// One-shot swing on the body sheet, playable while moving.
    AttackWalk,
    /// One-shot swing on the weapon sheet.
    WeaponAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipKey {
    pub action: ClipAction,
    pub direction: Direction,
}

// Body sheet: down {0,1}, up {2,3}, side {4,5,6}. Left reuses the side art.
const BODY_DOWN: [usize; 4] = [0, 1, 0, 1];
const BODY_UP: [usize; 4] = [2, 3, 2, 3];
const BODY_SIDE: [usize; 4] = [4, 5, 4, 6];

// Weapon sheet: down {0,1,2}, up {3,4,5}, side {6,7,8}.
const WEAPON_DOWN: [usize; 4] = [0, 1, 2, 1];
const WEAPON_UP: [usize; 4] = [3, 4, 5, 4];
const WEAPON_SIDE: [usize; 4] = [6, 7, 8, 7];

/// Vertical clips are mirrored on this frame index only.
pub const MIRRORED_VERTICAL_FRAME: usize = 2;

impl ClipKey {
    pub fn walk(direction: Direction) -> Self {
        Self {
            action: ClipAction::Walk,
            direction,
        }
    }

    pub fn attack_walk(direction: Direction) -> Self {
        Self {
            action: ClipAction::AttackWalk,
            direction,
        }
    }

    pub fn weapon_attack(direction: Direction) -> Self {
        Self {
            action: ClipAction::WeaponAttack,
            direction,
        }
    }

    /// Key name in the `<action>-<direction>` convention of the asset set.
    pub fn name(&self) -> String {
        let action = match self.action {
            ClipAction::Walk => "walk",
            ClipAction::AttackWalk => "attack-walk",
            ClipAction::WeaponAttack => "attack",
        };
        format!("{}-{}", action, self.direction.name())
    }

    pub fn looping(&self) -> bool {
        self.action == ClipAction::Walk
    }

    pub fn is_attack(&self) -> bool {
        !self.looping()
    }

    /// Sheet indices of the clip, in playback order.
    pub fn frames(&self) -> &'static [usize] {
        match (self.action, self.direction) {
            (ClipAction::Walk | ClipAction::AttackWalk, Direction::Down) => &BODY_DOWN,
            (ClipAction::Walk | ClipAction::AttackWalk, Direction::Up) => &BODY_UP,
            (ClipAction::Walk | ClipAction::AttackWalk, Direction::Left | Direction::Right) => {
                &BODY_SIDE
            }
            (ClipAction::WeaponAttack, Direction::Down) => &WEAPON_DOWN,
            (ClipAction::WeaponAttack, Direction::Up) => &WEAPON_UP,
            (ClipAction::WeaponAttack, Direction::Left | Direction::Right) => &WEAPON_SIDE,
        }
    }

    /// The matching clip on the weapon sheet.
    pub fn weapon_counterpart(&self) -> Option<ClipKey> {
        match self.action {
            ClipAction::AttackWalk | ClipAction::WeaponAttack => {
                Some(ClipKey::weapon_attack(self.direction))
            }
            ClipAction::Walk => None,
        }
    }
}

/// Horizontal mirroring for a facing and frame index.
///
/// The sheet has no left-facing art, so Left is always the mirrored side art.
/// Vertical cycles fake the opposite stride by mirroring one frame.
pub fn flip_x(direction: Direction, frame_index: usize) -> bool {
    match direction {
        Direction::Left => true,
        Direction::Right => false,
        Direction::Up | Direction::Down => frame_index == MIRRORED_VERTICAL_FRAME,
    }
}

/// Component for animation playback on the actor.
#[derive(Component, Debug, Default)]
pub struct AnimationController {
    /// Clip last started. Kept after `stop` so the held frame stays addressable.
    pub clip: Option<ClipKey>,
    /// 0-based position within the clip's frame sequence.
    pub cursor: usize,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub playing: bool,
    /// Whether a non-looping clip reached its last frame.
    pub finished: bool,
}

impl AnimationController {
    /// Start `clip`. Without `restart`, a clip that is already playing keeps
    /// its position.
    pub fn play(&mut self, clip: ClipKey, frame_rate: f32, restart: bool) -> bool {
        if !restart && self.playing && self.clip == Some(clip) {
            return false;
        }

        self.clip = Some(clip);
        self.cursor = 0;
        self.frame_timer = 0.0;
        self.frame_duration = if frame_rate > 0.0 { 1.0 / frame_rate } else { 0.0 };
        self.playing = true;
        self.finished = false;
        true
    }

    /// Halt on the frame currently displayed.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance by `dt` seconds. Returns the clip if it finished during this call.
    pub fn tick(&mut self, dt: f32) -> Option<ClipKey> {
        let clip = self.clip?;
        if !self.playing || self.frame_duration <= 0.0 {
            return None;
        }

        let len = clip.frames().len();
        self.frame_timer += dt;

        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.cursor += 1;

            if self.cursor >= len {
                if clip.looping() {
                    self.cursor = 0;
                } else {
                    self.cursor = len - 1;
                    self.playing = false;
                    self.finished = true;
                    self.frame_timer = 0.0;
                    return Some(clip);
                }
            }
        }

        None
    }

    /// 1-based position of the displayed frame, `None` before any clip played.
    pub fn frame_index(&self) -> Option<usize> {
        self.clip.map(|_| self.cursor + 1)
    }

    /// Sheet index of the displayed frame.
    pub fn sheet_frame(&self) -> Option<usize> {
        let clip = self.clip?;
        clip.frames().get(self.cursor).copied()
    }

    /// Mirroring for the displayed frame, `None` before any clip played.
    pub fn flip_x(&self) -> Option<bool> {
        let clip = self.clip?;
        Some(flip_x(clip.direction, self.cursor + 1))
    }

    pub fn is_playing_attack(&self) -> bool {
        self.playing && self.clip.is_some_and(|clip| clip.is_attack())
    }
}

/// Chooses the body clip from movement and attack state.
#[derive(Debug, Clone, Copy)]
pub struct AnimationStateMachine {
    pub walk_frame_rate: f32,
    pub attack_frame_rate: f32,
}

impl From<&ControllerTuning> for AnimationStateMachine {
    fn from(tuning: &ControllerTuning) -> Self {
        Self {
            walk_frame_rate: tuning.walk_frame_rate,
            attack_frame_rate: tuning.attack_frame_rate(),
        }
    }
}

impl AnimationStateMachine {
    /// A fresh attack raises the flag; it stays up while the swing plays.
    pub fn update_attack_flag(
        &self,
        state: &mut CharacterState,
        attacking: bool,
        controller: &AnimationController,
    ) {
        state.is_attacking = attacking || (state.is_attacking && controller.is_playing_attack());
    }

    /// Select the clip for this frame and record it on `state`.
    ///
    /// An attack restarts on every fresh press and a swing in progress is left
    /// to finish, whether or not the knight moves. Otherwise moving selects the
    /// walk clip and standing still stops on the held frame.
    pub fn select(
        &self,
        state: &mut CharacterState,
        attacking: bool,
        controller: &mut AnimationController,
    ) -> ActiveClip {
        let direction = state.direction;

        state.active_clip = if attacking {
            controller.play(ClipKey::attack_walk(direction), self.attack_frame_rate, true);
            ActiveClip::Attack(direction)
        } else if state.is_attacking {
            state.active_clip
        } else if state.is_moving() {
            controller.play(ClipKey::walk(direction), self.walk_frame_rate, false);
            ActiveClip::Walk(direction)
        } else {
            controller.stop();
            ActiveClip::Idle
        };

        state.active_clip
    }
}

/// Message fired when the selected clip changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: ActiveClip,
    pub to: ActiveClip,
}

impl Message for AnimationStateChanged {}

/// Message fired when a non-looping clip completes.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: ClipKey,
}

impl Message for AnimationFinished {}

/// Copy the displayed frame and mirroring onto the body sprite.
pub fn present_body_frame(
    parent_query: Query<(&AnimationController, &Children)>,
    mut body_query: Query<&mut Sprite, With<BodyLayer>>,
) {
    for (controller, children) in &parent_query {
        // Nothing has played yet: leave the sprite as spawned.
        let (Some(frame), Some(flip)) = (controller.sheet_frame(), controller.flip_x()) else {
            continue;
        };

        for child in children.iter() {
            if let Ok(mut sprite) = body_query.get_mut(child) {
                if let Some(atlas) = sprite.texture_atlas.as_mut() {
                    atlas.index = frame;
                }
                sprite.flip_x = flip;
            }
        }
    }
}
