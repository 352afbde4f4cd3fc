//! Static collision geometry derived from map metadata.
//!
//! Shapes are built once at scene setup and never change afterwards. All
//! coordinates are scene coordinates: pixels, y grows downward, and the layer
//! origin is the top-left corner where the map is placed.

use bevy::prelude::*;

use super::tiled::{TileLayer, TiledObject, TiledTileset};

/// Property that marks an object or tile as solid.
pub const COLLIDES_PROPERTY: &str = "collides";

/// Axis-aligned rectangle, positioned by its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CollisionShape {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Rectangle centred in the cell whose top-left corner is `top_left`.
    fn from_corner(origin: Vec2, top_left: Vec2, size: Vec2, scale: f32) -> Self {
        let center = origin + (top_left + size / 2.0) * scale;
        let size = size * scale;
        Self {
            x: center.x,
            y: center.y,
            width: size.x,
            height: size.y,
        }
    }
}

/// Turns map metadata into collision rectangles.
///
/// `origin` must be the same placement origin the tile layers are drawn at,
/// otherwise the shapes drift away from the rendered scenery.
#[derive(Debug, Clone, Copy)]
pub struct CollisionGeometryBuilder {
    pub origin: Vec2,
    pub scale: f32,
    /// One tile unit, used when an object has no usable size.
    pub tile_size: Vec2,
}

impl CollisionGeometryBuilder {
    /// One shape per object whose `collides` property is truthy. Objects
    /// without the property are skipped.
    pub fn from_objects(&self, objects: &[TiledObject]) -> Vec<CollisionShape> {
        objects
            .iter()
            .filter(|object| object.properties.is_truthy(COLLIDES_PROPERTY))
            .map(|object| {
                let size = Vec2::new(
                    positive_or(object.width, self.tile_size.x),
                    positive_or(object.height, self.tile_size.y),
                );
                CollisionShape::from_corner(
                    self.origin,
                    Vec2::new(object.x, object.y),
                    size,
                    self.scale,
                )
            })
            .collect()
    }

    /// One tile-sized shape per cell whose tileset tile is marked `collides`.
    pub fn from_tiles(&self, layer: &TileLayer, tileset: &TiledTileset) -> Vec<CollisionShape> {
        layer
            .cells()
            .filter(|(_, _, gid)| {
                tileset
                    .local_id(*gid)
                    .and_then(|id| tileset.tile_properties(id))
                    .is_some_and(|props| props.is_truthy(COLLIDES_PROPERTY))
            })
            .map(|(column, row, _)| {
                let top_left = Vec2::new(column as f32, row as f32) * self.tile_size;
                CollisionShape::from_corner(self.origin, top_left, self.tile_size, self.scale)
            })
            .collect()
    }

    /// Four walls, one tile thick, just outside a map of `map_size` pixels.
    pub fn map_bounds(&self, map_size: Vec2) -> [CollisionShape; 4] {
        let t = self.tile_size;
        let (w, h) = (map_size.x, map_size.y);
        let wall = |top_left: Vec2, size: Vec2| {
            CollisionShape::from_corner(self.origin, top_left, size, self.scale)
        };

        [
            wall(Vec2::new(-t.x, -t.y), Vec2::new(w + 2.0 * t.x, t.y)),
            wall(Vec2::new(-t.x, h), Vec2::new(w + 2.0 * t.x, t.y)),
            wall(Vec2::new(-t.x, 0.0), Vec2::new(t.x, h)),
            wall(Vec2::new(w, 0.0), Vec2::new(t.x, h)),
        ]
    }
}

/// Tiled writes 0 for objects drawn without a size.
fn positive_or(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| *v > 0.0).unwrap_or(fallback)
}
