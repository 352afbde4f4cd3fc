//! Tiled JSON map format, the subset the scene reads.
//!
//! Mirrors the structure written by the Tiled editor ("Save As JSON" with
//! embedded tilesets). Unknown layer kinds are kept as `Other` and ignored.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use bevy::prelude::*;

/// High bits of a tile GID carry flip/rotation flags.
pub const GID_FLAG_MASK: u32 = 0xF000_0000;

/// Error type for map loading failures.
#[derive(Debug)]
pub struct MapLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for MapLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load map {}: {}", self.file, self.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledMap {
    /// Size in tiles.
    pub width: u32,
    pub height: u32,
    /// Size of one tile in pixels.
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub layers: Vec<TiledLayer>,
    #[serde(default)]
    pub tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TiledLayer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// Size in tiles.
    pub width: u32,
    pub height: u32,
    /// Row-major GIDs, 0 for an empty cell.
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<TiledObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledObject {
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub properties: PropertyBag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledTileset {
    pub firstgid: u32,
    #[serde(default)]
    pub name: String,
    /// Image path relative to the map file.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub tilecount: u32,
    #[serde(default)]
    pub tilewidth: u32,
    #[serde(default)]
    pub tileheight: u32,
    /// Set instead of the fields above when the tileset lives in its own file.
    #[serde(default)]
    pub source: Option<String>,
    /// Per-tile metadata, only present for tiles that carry any.
    #[serde(default)]
    pub tiles: Vec<TiledTileDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledTileDef {
    pub id: u32,
    #[serde(default)]
    pub properties: PropertyBag,
}

/// One custom property as Tiled writes it: `{name, type, value}`. The type
/// tag is not needed since the JSON value already carries it.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledProperty {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Custom properties of an object or tile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(pub Vec<TiledProperty>);

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

impl PropertyBag {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Boolean reading of a property. Booleans map directly, numbers are true
    /// when nonzero and the strings "true"/"false" parse. Anything else, or a
    /// missing property, is `None`, which callers treat as false.
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            Value::String(s) => s.parse::<bool>().ok(),
            _ => None,
        }
    }

    pub fn is_truthy(&self, name: &str) -> bool {
        self.bool(name).unwrap_or(false)
    }
}

impl TiledMap {
    /// Map size in unscaled pixels.
    pub fn size_in_pixels(&self) -> Vec2 {
        Vec2::new(
            (self.width * self.tilewidth) as f32,
            (self.height * self.tileheight) as f32,
        )
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tilewidth as f32, self.tileheight as f32)
    }

    pub fn tile_layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find_map(|layer| match layer {
            TiledLayer::Tiles(tiles) if tiles.name == name => Some(tiles),
            _ => None,
        })
    }

    pub fn object_layer(&self, name: &str) -> Option<&ObjectLayer> {
        self.layers.iter().find_map(|layer| match layer {
            TiledLayer::Objects(objects) if objects.name == name => Some(objects),
            _ => None,
        })
    }

    pub fn tileset(&self, name: &str) -> Option<&TiledTileset> {
        self.tilesets.iter().find(|tileset| tileset.name == name)
    }
}

impl TileLayer {
    /// Non-empty cells as `(column, row, gid)` with flip flags stripped.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .take((self.width * self.height) as usize)
            .enumerate()
            .map(|(i, raw)| (i as u32, raw & !GID_FLAG_MASK))
            .filter(|(_, gid)| *gid != 0)
            .map(move |(i, gid)| (i % width, i / width, gid))
    }
}

impl TiledTileset {
    /// Local tile id of a GID, if the GID belongs to this tileset.
    pub fn local_id(&self, gid: u32) -> Option<u32> {
        let local = gid.checked_sub(self.firstgid)?;
        if self.tilecount == 0 || local < self.tilecount {
            Some(local)
        } else {
            None
        }
    }

    pub fn tile_properties(&self, local_id: u32) -> Option<&PropertyBag> {
        self.tiles
            .iter()
            .find(|tile| tile.id == local_id)
            .map(|tile| &tile.properties)
    }

    /// Rows of the tileset grid, derived from the tile count.
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tilecount.div_ceil(self.columns)
        }
    }
}

/// Parse a map from JSON text.
pub fn parse_tiled_map(file: &str, contents: &str) -> Result<TiledMap, MapLoadError> {
    serde_json::from_str(contents).map_err(|e| MapLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Read and parse a map file.
pub fn load_tiled_map(path: &Path) -> Result<TiledMap, MapLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| MapLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_tiled_map(&file_name, &contents)
}
