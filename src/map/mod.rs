//! Map domain: Tiled map data and the collision shapes derived from it.

mod collision;
mod tiled;

#[cfg(test)]
mod tests;

pub use collision::{COLLIDES_PROPERTY, CollisionGeometryBuilder, CollisionShape};
pub use tiled::{
    GID_FLAG_MASK, MapLoadError, ObjectLayer, PropertyBag, TileLayer, TiledLayer, TiledMap,
    TiledObject, TiledProperty, TiledTileDef, TiledTileset, load_tiled_map, parse_tiled_map,
};
