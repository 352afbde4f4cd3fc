//! Scene domain: resolving a map into everything the scene spawns.
//!
//! Resolution is pure and happens before any entity exists, so a broken map
//! leaves the world empty instead of half built.

use bevy::prelude::*;

use crate::content::SceneConfig;
use crate::map::{
    CollisionGeometryBuilder, CollisionShape, MapLoadError, TileLayer, TiledMap, TiledTileset,
};
use crate::scene::SceneFrame;
use crate::sprites::SceneLayer;

/// Object in the collision layer that marks where the knight starts.
pub const SPAWN_OBJECT: &str = "spawn";

/// Layer used by simple maps in place of the back/up decoration pair.
pub const SINGLE_DECORATION_LAYER: &str = "decoration";

#[derive(Debug)]
pub enum SceneSetupError {
    MapLoad(MapLoadError),
    MissingTileset(String),
    /// The tileset lives in its own file, which is not supported.
    ExternalTileset(String),
    MissingLayer(String),
}

impl std::fmt::Display for SceneSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSetupError::MapLoad(e) => write!(f, "{}", e),
            SceneSetupError::MissingTileset(name) => write!(f, "Tileset '{}' not found", name),
            SceneSetupError::ExternalTileset(name) => {
                write!(f, "Tileset '{}' is not embedded in the map", name)
            }
            SceneSetupError::MissingLayer(name) => write!(f, "Tile layer '{}' not found", name),
        }
    }
}

impl From<MapLoadError> for SceneSetupError {
    fn from(e: MapLoadError) -> Self {
        SceneSetupError::MapLoad(e)
    }
}

/// A tile layer assigned to its depth slot.
#[derive(Debug, Clone)]
pub struct PlacedLayer {
    pub depth: SceneLayer,
    pub layer: TileLayer,
}

/// Everything needed to spawn the scene, in scene coordinates.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub frame: SceneFrame,
    /// Top-left corner of the map, shared by tiles and collision shapes.
    pub origin: Vec2,
    pub scale: f32,
    /// Map tile size in unscaled pixels.
    pub tile_size: Vec2,
    /// Map size in unscaled pixels.
    pub map_size: Vec2,
    pub tileset: TiledTileset,
    /// Back to front.
    pub layers: Vec<PlacedLayer>,
    pub collision_shapes: Vec<CollisionShape>,
    pub actor_spawn: Vec2,
}

/// Outcome of scene initialization.
#[derive(Resource, Debug)]
pub enum SceneSetup {
    Ready(SceneHandles),
    Failed(SceneSetupError),
}

impl SceneSetup {
    pub fn handles(&self) -> Option<&SceneHandles> {
        match self {
            SceneSetup::Ready(handles) => Some(handles),
            SceneSetup::Failed(_) => None,
        }
    }
}

impl SceneHandles {
    /// Validate `map` against `config` and lay it out inside `frame`.
    pub fn resolve(
        map: &TiledMap,
        config: &SceneConfig,
        frame: SceneFrame,
    ) -> Result<Self, SceneSetupError> {
        let tileset = map
            .tileset(&config.tileset_name)
            .ok_or_else(|| SceneSetupError::MissingTileset(config.tileset_name.clone()))?;
        if tileset.source.is_some() || tileset.image.is_empty() || tileset.columns == 0 {
            return Err(SceneSetupError::ExternalTileset(tileset.name.clone()));
        }

        let layers = place_layers(map)?;

        let scale = config.render_scale;
        let map_size = map.size_in_pixels();
        let tile_size = map.tile_size();
        let origin = frame.layer_origin(map_size, scale);
        let builder = CollisionGeometryBuilder {
            origin,
            scale,
            tile_size,
        };

        let mut collision_shapes = Vec::new();
        let object_layer = map.object_layer(&config.collision_layer);
        match object_layer {
            Some(objects) => collision_shapes.extend(builder.from_objects(&objects.objects)),
            None => debug!(
                "No '{}' object layer, skipping collision objects",
                config.collision_layer
            ),
        }
        // The ground never blocks, whatever its tiles say.
        for placed in layers.iter().filter(|p| p.depth != SceneLayer::Background) {
            collision_shapes.extend(builder.from_tiles(&placed.layer, tileset));
        }
        if config.bound_to_map {
            collision_shapes.extend(builder.map_bounds(map_size));
        }

        let actor_spawn = object_layer
            .and_then(|objects| objects.objects.iter().find(|o| o.name == SPAWN_OBJECT))
            .map(|spawn| origin + Vec2::new(spawn.x, spawn.y) * scale)
            .unwrap_or_else(|| frame.scene_center());

        Ok(Self {
            frame,
            origin,
            scale,
            tile_size,
            map_size,
            tileset: tileset.clone(),
            layers,
            collision_shapes,
            actor_spawn,
        })
    }

    /// Scene-space centre of the tile at `column`, `row`.
    pub fn tile_center(&self, column: u32, row: u32) -> Vec2 {
        let cell = Vec2::new(column as f32, row as f32) + Vec2::splat(0.5);
        self.origin + cell * self.tile_size * self.scale
    }
}

/// Background first, then the decoration pair or the single decoration layer.
fn place_layers(map: &TiledMap) -> Result<Vec<PlacedLayer>, SceneSetupError> {
    let find = |depth: SceneLayer| map.tile_layer(depth.name());

    let background = find(SceneLayer::Background)
        .ok_or_else(|| SceneSetupError::MissingLayer(SceneLayer::Background.name().to_string()))?;

    let decorations = match (
        find(SceneLayer::DecorationBack),
        find(SceneLayer::DecorationUp),
        map.tile_layer(SINGLE_DECORATION_LAYER),
    ) {
        (Some(back), Some(up), _) => vec![
            (SceneLayer::DecorationBack, back),
            (SceneLayer::DecorationUp, up),
        ],
        (None, None, Some(single)) => vec![(SceneLayer::DecorationBack, single)],
        (Some(_), None, _) => {
            return Err(SceneSetupError::MissingLayer(
                SceneLayer::DecorationUp.name().to_string(),
            ));
        }
        (None, _, _) => {
            return Err(SceneSetupError::MissingLayer(
                SceneLayer::DecorationBack.name().to_string(),
            ));
        }
    };

    Ok(std::iter::once((SceneLayer::Background, background))
        .chain(decorations)
        .map(|(depth, layer)| PlacedLayer {
            depth,
            layer: layer.clone(),
        })
        .collect())
}
