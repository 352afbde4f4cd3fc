//! Scene domain: viewport placement and coordinate conversion.

use bevy::prelude::*;

/// The viewport the scene is composed in.
///
/// Scene coordinates follow the map format: pixels, origin at the viewport's
/// top-left corner, y growing downward. World coordinates are Bevy's: origin at
/// the viewport centre, y growing upward.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub size: Vec2,
}

impl SceneFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn scene_center(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Top-left corner that centres a map of `map_size` pixels drawn at `scale`.
    pub fn layer_origin(&self, map_size: Vec2, scale: f32) -> Vec2 {
        self.scene_center() - map_size * scale / 2.0
    }

    pub fn to_world(&self, scene: Vec2) -> Vec2 {
        Vec2::new(scene.x - self.size.x / 2.0, self.size.y / 2.0 - scene.y)
    }

    pub fn to_scene(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }
}
