//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// The player-controlled actor
    Actor,
    /// Static map geometry (collision objects, collidable tiles, map bounds)
    Obstacle,
}

/// Marker for the root entity of the player-controlled actor.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for static map colliders
#[derive(Component, Debug)]
pub struct Obstacle;

/// Facing of the actor. Survives input release: it is the last nonzero facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in scene coordinates (y grows downward).
    pub fn scene_vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Clip the character is showing, as seen by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveClip {
    #[default]
    Idle,
    Walk(Direction),
    Attack(Direction),
}

/// Per-actor controller state. Written only by the per-frame controller pass.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterState {
    /// Scene-space position, mirrored from the physics body each frame.
    pub position: Vec2,
    /// Scene-space velocity chosen this frame.
    pub velocity: Vec2,
    pub direction: Direction,
    pub is_attacking: bool,
    pub active_clip: ActiveClip,
}

impl CharacterState {
    pub fn facing(direction: Direction) -> Self {
        Self {
            direction,
            ..default()
        }
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }
}
