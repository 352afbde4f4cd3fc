//! Scene depth ordering and layered actor sprites.
//!
//! Scene layers are painted in a fixed order; the actor sits between the two
//! decoration layers so it walks in front of floor scenery and behind overhead
//! scenery. Inside the actor, body and weapon are child sprites ordered by a
//! small z offset.

use bevy::prelude::*;

use crate::movement::Direction;

/// Depth slots of the scene, lower values render behind higher values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneLayer {
    Background = 0,
    DecorationBack = 1,
    Actor = 2,
    DecorationUp = 3,
}

/// A named depth slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSpec {
    pub name: &'static str,
    pub depth_order: u8,
}

impl SceneLayer {
    pub const ALL: [SceneLayer; 4] = [
        SceneLayer::Background,
        SceneLayer::DecorationBack,
        SceneLayer::Actor,
        SceneLayer::DecorationUp,
    ];

    pub fn spec(self) -> LayerSpec {
        LayerSpec {
            name: self.name(),
            depth_order: self as u8,
        }
    }

    /// Layer name as used in the tile map.
    pub fn name(self) -> &'static str {
        match self {
            SceneLayer::Background => "background",
            SceneLayer::DecorationBack => "decoration-back",
            SceneLayer::Actor => "actor",
            SceneLayer::DecorationUp => "decoration-up",
        }
    }

    /// Convert to Z coordinate for 2D ordering.
    pub fn z(self) -> f32 {
        f32::from(self.spec().depth_order)
    }
}

/// Defines the render order for sprite layers inside the actor.
/// Lower values render behind higher values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteLayer {
    /// Weapon carried on the far side of the body (facing away from camera).
    WeaponBack = 0,
    /// Character body (base layer).
    Body = 10,
    /// Weapon layer.
    Weapon = 30,
}

impl SpriteLayer {
    /// Convert to Z coordinate relative to the actor root.
    pub fn z_index(&self) -> f32 {
        (*self as i32) as f32 * 0.01
    }

    /// Facing up, the sword is held in front of the knight and so behind it on screen.
    pub fn weapon_for(direction: Direction) -> SpriteLayer {
        match direction {
            Direction::Up => SpriteLayer::WeaponBack,
            _ => SpriteLayer::Weapon,
        }
    }
}

/// Component for body layer sprites.
#[derive(Component, Debug, Default)]
pub struct BodyLayer;

/// Component for weapon layer sprites.
#[derive(Component, Debug, Default)]
pub struct WeaponLayer;

/// Marker on the root entity of a tile layer.
#[derive(Component, Debug)]
pub struct TileLayerRoot {
    pub layer: SceneLayer,
}

/// Texture and grid of one sprite sheet.
#[derive(Debug, Clone)]
pub struct SheetHandles {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub frame_size: f32,
}

impl SheetHandles {
    fn sprite(&self, index: usize, scale: f32) -> Sprite {
        let mut sprite = Sprite::from_atlas_image(
            self.image.clone(),
            TextureAtlas {
                layout: self.layout.clone(),
                index,
            },
        );
        sprite.custom_size = Some(Vec2::splat(self.frame_size * scale));
        sprite
    }
}

/// Helper to spawn a complete layered character sprite.
///
/// `root` carries the gameplay and physics components; body and weapon hang
/// under it so the camera and physics move them as a unit.
pub fn spawn_layered_actor(
    commands: &mut Commands,
    root: impl Bundle,
    position: Vec2,
    scale: f32,
    body: &SheetHandles,
    weapon: Option<&SheetHandles>,
) -> Entity {
    let parent = commands
        .spawn((
            root,
            Transform::from_xyz(position.x, position.y, SceneLayer::Actor.z()),
            Visibility::default(),
        ))
        .id();

    let body_child = commands
        .spawn((
            BodyLayer,
            body.sprite(0, scale),
            Transform::from_xyz(0.0, 0.0, SpriteLayer::Body.z_index()),
        ))
        .id();

    commands.entity(parent).add_child(body_child);

    if let Some(weapon) = weapon {
        let weapon_child = commands
            .spawn((
                WeaponLayer,
                super::WeaponAttachment { scale },
                weapon.sprite(0, scale),
                Transform::from_xyz(0.0, 0.0, SpriteLayer::Weapon.z_index()),
            ))
            .id();

        commands.entity(parent).add_child(weapon_child);
    }

    parent
}
