//! Data definitions for the RON configuration file.
//!
//! These structs mirror the structure in assets/data/game_config.ron. Every
//! field has a compiled default so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level file (game_config.ron)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub schema_version: u32,
    pub window: WindowConfig,
    pub controller: ControllerTuning,
    pub scene: SceneConfig,
}

// ============================================================================
// Window
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Desert Knight".to_string(),
            width: 1024,
            height: 720,
        }
    }
}

// ============================================================================
// Character controller tuning
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerTuning {
    /// Walking speed in scene units per second.
    pub base_speed: f32,
    /// Frames per second of the walk clips.
    pub walk_frame_rate: f32,
    /// Attack clips play this many times faster than walk clips.
    pub attack_rate_multiplier: f32,
    /// Analog stick values at or below this magnitude count as released.
    pub stick_dead_zone: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            base_speed: 200.0,
            walk_frame_rate: 10.0,
            attack_rate_multiplier: 4.0,
            stick_dead_zone: 0.2,
        }
    }
}

impl ControllerTuning {
    pub fn attack_frame_rate(&self) -> f32 {
        self.walk_frame_rate * self.attack_rate_multiplier
    }
}

// ============================================================================
// Scene assets and layout
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Tiled JSON map, read from disk at startup.
    pub map_path: String,
    /// Asset directory the map's tileset images are relative to.
    pub map_asset_dir: String,
    /// Tileset the tile layers are drawn with.
    pub tileset_name: String,
    /// Name of the object layer holding collision rectangles.
    pub collision_layer: String,
    /// Global render scale applied to tiles, actor and collision shapes.
    pub render_scale: f32,
    /// Surround the map with static walls so the actor cannot leave it.
    pub bound_to_map: bool,
    pub player_sheet: SheetConfig,
    /// Equipment sheet; absent means the knight carries no separate weapon sprite.
    pub weapon_sheet: Option<SheetConfig>,
    /// Collider size of the actor body in unscaled pixels.
    pub actor_collider: Vec2Def,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            map_path: "assets/maps/desert.json".to_string(),
            map_asset_dir: "maps".to_string(),
            tileset_name: "mountain_landscape".to_string(),
            collision_layer: "collisions".to_string(),
            render_scale: 1.0,
            bound_to_map: true,
            player_sheet: SheetConfig::default(),
            weapon_sheet: None,
            actor_collider: Vec2Def { x: 14.0, y: 16.0 },
        }
    }
}

/// A sprite sheet sliced into a regular grid of square frames.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SheetConfig {
    pub path: String,
    pub frame_size: u32,
    pub columns: u32,
    pub rows: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            path: "the_knight.png".to_string(),
            frame_size: 32,
            columns: 7,
            rows: 1,
        }
    }
}

impl SheetConfig {
    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Serializable Vec2 for RON.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}
