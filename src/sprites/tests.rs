//! Sprites domain: tests for clips, playback, mirroring, weapon poses and depth.

use bevy::prelude::*;

use super::{
    AnimationController, AnimationStateMachine, BodyLayer, ClipAction, ClipKey,
    MIRRORED_VERTICAL_FRAME, SceneLayer, SheetHandles, SpriteLayer, WEAPON_SWING_OFFSETS,
    WeaponLayer, flip_x, spawn_layered_actor, swing_entry, weapon_pose,
};
use crate::movement::{ActiveClip, CharacterState, Direction};

const WALK_RATE: f32 = 10.0;
const ATTACK_RATE: f32 = 40.0;

fn machine() -> AnimationStateMachine {
    AnimationStateMachine {
        walk_frame_rate: WALK_RATE,
        attack_frame_rate: ATTACK_RATE,
    }
}

fn moving(direction: Direction) -> CharacterState {
    CharacterState {
        velocity: direction.scene_vector() * 200.0,
        ..CharacterState::facing(direction)
    }
}

// -----------------------------------------------------------------------------
// Clip table tests
// -----------------------------------------------------------------------------

#[test]
fn test_body_frame_contract() {
    assert_eq!(ClipKey::walk(Direction::Down).frames(), &[0, 1, 0, 1]);
    assert_eq!(ClipKey::walk(Direction::Up).frames(), &[2, 3, 2, 3]);
    assert_eq!(ClipKey::walk(Direction::Right).frames(), &[4, 5, 4, 6]);
    assert_eq!(
        ClipKey::walk(Direction::Left).frames(),
        ClipKey::walk(Direction::Right).frames()
    );
}

#[test]
fn test_attack_clips_reuse_body_frames_and_do_not_loop() {
    for direction in Direction::ALL {
        let walk = ClipKey::walk(direction);
        let attack = ClipKey::attack_walk(direction);
        assert_eq!(walk.frames(), attack.frames());
        assert!(walk.looping());
        assert!(!attack.looping());
        assert!(!ClipKey::weapon_attack(direction).looping());
    }
}

#[test]
fn test_clip_names() {
    assert_eq!(ClipKey::walk(Direction::Left).name(), "walk-left");
    assert_eq!(ClipKey::attack_walk(Direction::Up).name(), "attack-walk-up");
    assert_eq!(ClipKey::weapon_attack(Direction::Down).name(), "attack-down");
}

#[test]
fn test_weapon_counterpart_only_for_swings() {
    assert_eq!(ClipKey::walk(Direction::Right).weapon_counterpart(), None);
    let counterpart = ClipKey::attack_walk(Direction::Right).weapon_counterpart();
    assert_eq!(
        counterpart.map(|clip| clip.action),
        Some(ClipAction::WeaponAttack)
    );
}

// -----------------------------------------------------------------------------
// Mirroring tests
// -----------------------------------------------------------------------------

#[test]
fn test_vertical_flip_only_on_frame_two() {
    for direction in [Direction::Up, Direction::Down] {
        for frame_index in 0..=8 {
            assert_eq!(
                flip_x(direction, frame_index),
                frame_index == MIRRORED_VERTICAL_FRAME
            );
        }
    }
}

#[test]
fn test_side_flip_is_constant() {
    for frame_index in 0..=8 {
        assert!(flip_x(Direction::Left, frame_index));
        assert!(!flip_x(Direction::Right, frame_index));
    }
}

#[test]
fn test_controller_flip_follows_displayed_frame() {
    let mut controller = AnimationController::default();
    assert_eq!(controller.flip_x(), None);

    controller.play(ClipKey::walk(Direction::Down), WALK_RATE, false);
    assert_eq!(controller.flip_x(), Some(false));

    controller.tick(0.1);
    assert_eq!(controller.frame_index(), Some(2));
    assert_eq!(controller.sheet_frame(), Some(1));
    assert_eq!(controller.flip_x(), Some(true));

    controller.tick(0.1);
    assert_eq!(controller.frame_index(), Some(3));
    assert_eq!(controller.flip_x(), Some(false));
}

// -----------------------------------------------------------------------------
// Playback tests
// -----------------------------------------------------------------------------

#[test]
fn test_nothing_played_is_empty() {
    let controller = AnimationController::default();
    assert_eq!(controller.frame_index(), None);
    assert_eq!(controller.sheet_frame(), None);
    assert!(!controller.is_playing_attack());
}

#[test]
fn test_walk_loops() {
    let mut controller = AnimationController::default();
    controller.play(ClipKey::walk(Direction::Right), WALK_RATE, false);

    for _ in 0..4 {
        assert_eq!(controller.tick(0.1), None);
    }
    assert_eq!(controller.frame_index(), Some(1));
    assert!(controller.playing);
}

#[test]
fn test_play_without_restart_keeps_position() {
    let mut controller = AnimationController::default();
    let clip = ClipKey::walk(Direction::Right);
    controller.play(clip, WALK_RATE, false);
    controller.tick(0.1);

    assert!(!controller.play(clip, WALK_RATE, false));
    assert_eq!(controller.frame_index(), Some(2));

    assert!(controller.play(clip, WALK_RATE, true));
    assert_eq!(controller.frame_index(), Some(1));
}

#[test]
fn test_stopped_clip_restarts_on_play() {
    let mut controller = AnimationController::default();
    let clip = ClipKey::walk(Direction::Up);
    controller.play(clip, WALK_RATE, false);
    controller.tick(0.1);
    controller.stop();

    // Stop holds the displayed frame.
    assert_eq!(controller.frame_index(), Some(2));
    assert_eq!(controller.tick(1.0), None);
    assert_eq!(controller.frame_index(), Some(2));

    assert!(controller.play(clip, WALK_RATE, false));
    assert_eq!(controller.frame_index(), Some(1));
}

#[test]
fn test_attack_finishes_on_last_frame() {
    let mut controller = AnimationController::default();
    let clip = ClipKey::attack_walk(Direction::Left);
    controller.play(clip, ATTACK_RATE, true);
    assert!(controller.is_playing_attack());

    assert_eq!(controller.tick(1.0), Some(clip));
    assert!(controller.finished);
    assert!(!controller.is_playing_attack());
    assert_eq!(controller.frame_index(), Some(4));
    assert_eq!(controller.tick(0.1), None);
}

// -----------------------------------------------------------------------------
// State machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_moving_selects_walk() {
    let mut state = moving(Direction::Left);
    let mut controller = AnimationController::default();

    let clip = machine().select(&mut state, false, &mut controller);
    assert_eq!(clip, ActiveClip::Walk(Direction::Left));
    assert_eq!(controller.clip, Some(ClipKey::walk(Direction::Left)));
    assert_eq!(controller.flip_x(), Some(true));
}

#[test]
fn test_standing_still_stops() {
    let mut state = moving(Direction::Up);
    let mut controller = AnimationController::default();
    machine().select(&mut state, false, &mut controller);

    state.velocity = Vec2::ZERO;
    let clip = machine().select(&mut state, false, &mut controller);
    assert_eq!(clip, ActiveClip::Idle);
    assert!(!controller.playing);
    assert_eq!(controller.clip, Some(ClipKey::walk(Direction::Up)));
}

#[test]
fn test_attack_uses_current_facing_and_restarts() {
    let m = machine();
    let mut state = CharacterState::facing(Direction::Right);
    let mut controller = AnimationController::default();

    m.update_attack_flag(&mut state, true, &controller);
    let clip = m.select(&mut state, true, &mut controller);
    assert_eq!(clip, ActiveClip::Attack(Direction::Right));
    assert!(state.is_attacking);

    controller.tick(0.03);
    assert_eq!(controller.frame_index(), Some(2));

    m.update_attack_flag(&mut state, true, &controller);
    m.select(&mut state, true, &mut controller);
    assert_eq!(controller.frame_index(), Some(1));
}

#[test]
fn test_swing_is_not_stopped_while_playing() {
    let m = machine();
    let mut state = CharacterState::facing(Direction::Down);
    let mut controller = AnimationController::default();

    m.update_attack_flag(&mut state, true, &controller);
    m.select(&mut state, true, &mut controller);
    controller.tick(0.03);

    m.update_attack_flag(&mut state, false, &controller);
    let clip = m.select(&mut state, false, &mut controller);
    assert_eq!(clip, ActiveClip::Attack(Direction::Down));
    assert!(controller.playing);
}

#[test]
fn test_swing_survives_movement_until_finished() {
    let m = machine();
    let mut state = CharacterState::facing(Direction::Right);
    let mut controller = AnimationController::default();

    m.update_attack_flag(&mut state, true, &controller);
    m.select(&mut state, true, &mut controller);

    state.velocity = Vec2::new(200.0, 0.0);
    m.update_attack_flag(&mut state, false, &controller);
    assert_eq!(
        m.select(&mut state, false, &mut controller),
        ActiveClip::Attack(Direction::Right)
    );

    controller.tick(1.0);
    m.update_attack_flag(&mut state, false, &controller);
    assert!(!state.is_attacking);
    assert_eq!(
        m.select(&mut state, false, &mut controller),
        ActiveClip::Walk(Direction::Right)
    );
}

#[test]
fn test_finished_swing_then_idle() {
    let m = machine();
    let mut state = CharacterState::facing(Direction::Up);
    let mut controller = AnimationController::default();

    m.update_attack_flag(&mut state, true, &controller);
    m.select(&mut state, true, &mut controller);
    controller.tick(1.0);

    m.update_attack_flag(&mut state, false, &controller);
    assert_eq!(m.select(&mut state, false, &mut controller), ActiveClip::Idle);
    // The last swing frame stays on screen.
    assert_eq!(controller.frame_index(), Some(4));
}

#[test]
fn test_attack_rate_is_faster_than_walk() {
    let tuning = crate::content::ControllerTuning::default();
    let m = AnimationStateMachine::from(&tuning);
    assert!(m.attack_frame_rate >= m.walk_frame_rate * 2.5);
    assert!(m.attack_frame_rate <= m.walk_frame_rate * 7.0);
}

// -----------------------------------------------------------------------------
// Weapon overlay tests
// -----------------------------------------------------------------------------

#[test]
fn test_swing_table_covers_every_direction_and_frame() {
    for direction in Direction::ALL {
        for frame_index in 1..=4 {
            assert!(swing_entry(direction, frame_index).is_some());
        }
    }
    assert_eq!(WEAPON_SWING_OFFSETS.len(), 16);
}

#[test]
fn test_swing_flip_mirrors_body() {
    for entry in WEAPON_SWING_OFFSETS {
        assert_eq!(entry.flip_x, flip_x(entry.direction, entry.frame_index));
    }
}

#[test]
fn test_side_swing_peaks_at_full_extension() {
    let reach: Vec<f32> = (1..=4)
        .map(|frame| swing_entry(Direction::Right, frame).map(|e| e.dx).unwrap_or(0.0))
        .collect();

    assert!(reach[0] < reach[1]);
    assert!(reach[1] < reach[2]);
    assert!(reach[3] < reach[2]);
}

#[test]
fn test_left_swing_mirrors_right() {
    for frame in 1..=4 {
        let right = swing_entry(Direction::Right, frame).copied();
        let left = swing_entry(Direction::Left, frame).copied();
        let (Some(right), Some(left)) = (right, left) else {
            panic!("missing swing entry for frame {}", frame);
        };
        assert_eq!(left.dx, -right.dx);
        assert_eq!(left.dy, right.dy);
    }
}

#[test]
fn test_vertical_swing_reach_is_constant() {
    for direction in [Direction::Up, Direction::Down] {
        let first = swing_entry(direction, 1).map(|e| (e.dx, e.dy));
        for frame in 2..=4 {
            assert_eq!(swing_entry(direction, frame).map(|e| (e.dx, e.dy)), first);
        }
    }
}

#[test]
fn test_weapon_pose_during_swing() {
    let pose = weapon_pose(Direction::Right, ClipKey::attack_walk(Direction::Right), 3, true);
    assert_eq!(pose.offset, Vec2::new(16.0, 4.0));
    assert!(!pose.flip_x);
    assert_eq!(pose.sheet_frame, 8);

    let pose = weapon_pose(Direction::Down, ClipKey::attack_walk(Direction::Down), 2, true);
    assert!(pose.flip_x);
    assert_eq!(pose.sheet_frame, 1);
}

#[test]
fn test_weapon_rests_outside_swings() {
    let pose = weapon_pose(Direction::Left, ClipKey::walk(Direction::Left), 3, false);
    assert_eq!(pose.offset, Vec2::new(-6.0, 6.0));
    assert!(pose.flip_x);
    assert_eq!(pose.sheet_frame, 6);

    let pose = weapon_pose(Direction::Up, ClipKey::walk(Direction::Up), 2, false);
    assert!(pose.flip_x);
}

#[test]
fn test_finished_swing_clip_rests_weapon() {
    // Last frame of a swing clip that is no longer playing.
    let pose = weapon_pose(
        Direction::Right,
        ClipKey::attack_walk(Direction::Right),
        4,
        false,
    );
    assert_eq!(pose.offset, Vec2::new(6.0, 6.0));
    assert_eq!(pose.sheet_frame, 6);

    let swinging = weapon_pose(
        Direction::Right,
        ClipKey::attack_walk(Direction::Right),
        4,
        true,
    );
    assert_ne!(swinging, pose);
}

// -----------------------------------------------------------------------------
// Depth tests
// -----------------------------------------------------------------------------

#[test]
fn test_actor_between_decorations() {
    let depth = |layer: SceneLayer| layer.spec().depth_order;
    assert!(depth(SceneLayer::Background) < depth(SceneLayer::DecorationBack));
    assert!(depth(SceneLayer::DecorationBack) < depth(SceneLayer::Actor));
    assert!(depth(SceneLayer::Actor) < depth(SceneLayer::DecorationUp));
    assert_eq!(SceneLayer::Background.spec().depth_order, 0);
    assert_eq!(SceneLayer::DecorationUp.spec().depth_order, 3);
}

#[test]
fn test_layer_z_follows_depth_order() {
    for layer in SceneLayer::ALL {
        assert_eq!(layer.z(), f32::from(layer.spec().depth_order));
    }
    assert_eq!(SceneLayer::Actor.z(), 2.0);
}

#[test]
fn test_layered_actor_tags_body_and_weapon() {
    let sheet = SheetHandles {
        image: Handle::default(),
        layout: Handle::default(),
        frame_size: 32.0,
    };
    let mut world = World::new();

    let root = spawn_layered_actor(
        &mut world.commands(),
        Name::new("knight"),
        Vec2::ZERO,
        2.0,
        &sheet,
        Some(&sheet),
    );
    world.flush();

    let bodies: Vec<_> = world
        .query_filtered::<(&ChildOf, &Transform), With<BodyLayer>>()
        .iter(&world)
        .map(|(parent, transform)| (parent.parent(), transform.translation.z))
        .collect();
    let weapons: Vec<_> = world
        .query_filtered::<(&ChildOf, &Transform), With<WeaponLayer>>()
        .iter(&world)
        .map(|(parent, transform)| (parent.parent(), transform.translation.z))
        .collect();

    assert_eq!(bodies, vec![(root, SpriteLayer::Body.z_index())]);
    assert_eq!(weapons, vec![(root, SpriteLayer::Weapon.z_index())]);
}

#[test]
fn test_actor_children_stay_inside_actor_slot() {
    for layer in [SpriteLayer::WeaponBack, SpriteLayer::Body, SpriteLayer::Weapon] {
        let z = SceneLayer::Actor.z() + layer.z_index();
        assert!(z >= SceneLayer::Actor.z());
        assert!(z < SceneLayer::DecorationUp.z());
    }
    assert!(SpriteLayer::weapon_for(Direction::Up) < SpriteLayer::Body);
    assert!(SpriteLayer::weapon_for(Direction::Right) > SpriteLayer::Body);
}
