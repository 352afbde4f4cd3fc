//! Weapon attachment and positioning.
//!
//! The sword is a separate sprite parented to the actor. Its offset from the
//! body is hand-tuned per facing and per swing frame, so it lives in a table
//! instead of a formula. Offsets are in scene pixels (y grows downward) before
//! render scale.

use bevy::prelude::*;

use super::{AnimationController, ClipKey, SpriteLayer, WeaponLayer, flip_x};
use crate::movement::Direction;

/// One hand-tuned swing pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponOffsetEntry {
    pub direction: Direction,
    pub frame_index: usize,
    pub dx: f32,
    pub dy: f32,
    pub flip_x: bool,
}

const fn swing(
    direction: Direction,
    frame_index: usize,
    dx: f32,
    dy: f32,
    flip_x: bool,
) -> WeaponOffsetEntry {
    WeaponOffsetEntry {
        direction,
        frame_index,
        dx,
        dy,
        flip_x,
    }
}

/// Swing poses. Side swings push outward toward full extension on frame 3 and
/// pull back on frame 4; vertical swings hold a constant reach.
pub const WEAPON_SWING_OFFSETS: [WeaponOffsetEntry; 16] = [
    swing(Direction::Right, 1, 8.0, 4.0, false),
    swing(Direction::Right, 2, 12.0, 4.0, false),
    swing(Direction::Right, 3, 16.0, 4.0, false),
    swing(Direction::Right, 4, 12.0, 4.0, false),
    swing(Direction::Left, 1, -8.0, 4.0, true),
    swing(Direction::Left, 2, -12.0, 4.0, true),
    swing(Direction::Left, 3, -16.0, 4.0, true),
    swing(Direction::Left, 4, -12.0, 4.0, true),
    swing(Direction::Up, 1, 0.0, -12.0, false),
    swing(Direction::Up, 2, 0.0, -12.0, true),
    swing(Direction::Up, 3, 0.0, -12.0, false),
    swing(Direction::Up, 4, 0.0, -12.0, false),
    swing(Direction::Down, 1, 0.0, 12.0, false),
    swing(Direction::Down, 2, 0.0, 12.0, true),
    swing(Direction::Down, 3, 0.0, 12.0, false),
    swing(Direction::Down, 4, 0.0, 12.0, false),
];

/// Where the sword hangs outside a swing: (facing, dx, dy, weapon sheet frame).
pub const WEAPON_REST_OFFSETS: [(Direction, f32, f32, usize); 4] = [
    (Direction::Right, 6.0, 6.0, 6),
    (Direction::Left, -6.0, 6.0, 6),
    (Direction::Up, 5.0, -2.0, 3),
    (Direction::Down, -5.0, 6.0, 0),
];

/// Resolved placement of the weapon sprite for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponPose {
    /// Offset from the body centre in scene pixels.
    pub offset: Vec2,
    pub flip_x: bool,
    /// Index into the weapon sheet.
    pub sheet_frame: usize,
}

pub fn swing_entry(direction: Direction, frame_index: usize) -> Option<&'static WeaponOffsetEntry> {
    WEAPON_SWING_OFFSETS
        .iter()
        .find(|entry| entry.direction == direction && entry.frame_index == frame_index)
}

fn rest_pose(direction: Direction, body_frame_index: usize) -> WeaponPose {
    let (dx, dy, sheet_frame) = WEAPON_REST_OFFSETS
        .iter()
        .find(|(d, ..)| *d == direction)
        .map(|(_, dx, dy, frame)| (*dx, *dy, *frame))
        .unwrap_or((0.0, 0.0, 0));

    WeaponPose {
        offset: Vec2::new(dx, dy),
        flip_x: flip_x(direction, body_frame_index),
        sheet_frame,
    }
}

/// Weapon placement for the body's current clip and frame index.
///
/// The swing table applies only while `swinging`; a finished or stopped swing
/// clip rests the weapon like any other clip.
pub fn weapon_pose(
    direction: Direction,
    body_clip: ClipKey,
    frame_index: usize,
    swinging: bool,
) -> WeaponPose {
    let swing_clip = body_clip.weapon_counterpart().filter(|_| swinging);

    match (swing_clip, swing_entry(direction, frame_index)) {
        (Some(weapon_clip), Some(entry)) => WeaponPose {
            offset: Vec2::new(entry.dx, entry.dy),
            flip_x: entry.flip_x,
            sheet_frame: weapon_clip
                .frames()
                .get(frame_index - 1)
                .copied()
                .unwrap_or(0),
        },
        _ => rest_pose(direction, frame_index),
    }
}

/// Component storing weapon attachment configuration.
#[derive(Component, Debug)]
pub struct WeaponAttachment {
    /// Render scale applied to the table offsets.
    pub scale: f32,
}

impl Default for WeaponAttachment {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// System to update weapon position based on body animation frame.
pub fn update_weapon_attachment(
    parent_query: Query<(&AnimationController, &Children)>,
    mut weapon_query: Query<(&mut Transform, &mut Sprite, &WeaponAttachment), With<WeaponLayer>>,
) {
    for (controller, children) in &parent_query {
        // No clip has played yet, so there is no frame to align to.
        let (Some(clip), Some(frame_index)) = (controller.clip, controller.frame_index()) else {
            continue;
        };

        // Follow the facing of the clip on screen, which a swing keeps until it ends.
        let pose = weapon_pose(
            clip.direction,
            clip,
            frame_index,
            controller.is_playing_attack(),
        );

        for child in children.iter() {
            if let Ok((mut transform, mut sprite, attachment)) = weapon_query.get_mut(child) {
                let offset = pose.offset * attachment.scale;
                transform.translation.x = offset.x;
                transform.translation.y = -offset.y;
                transform.translation.z = SpriteLayer::weapon_for(clip.direction).z_index();

                sprite.flip_x = pose.flip_x;
                if let Some(atlas) = sprite.texture_atlas.as_mut() {
                    atlas.index = pose.sheet_frame;
                }
            }
        }
    }
}
