//! Map domain: tests for Tiled parsing and collision geometry.

use bevy::prelude::Vec2;
use serde_json::json;

use super::{
    CollisionGeometryBuilder, GID_FLAG_MASK, PropertyBag, TileLayer, TiledMap, TiledObject,
    parse_tiled_map,
};

const SAMPLE_MAP: &str = include_str!("../../assets/maps/desert.json");

fn builder(origin: Vec2, scale: f32) -> CollisionGeometryBuilder {
    CollisionGeometryBuilder {
        origin,
        scale,
        tile_size: Vec2::splat(32.0),
    }
}

fn object(value: serde_json::Value) -> TiledObject {
    serde_json::from_value(value).unwrap()
}

fn sample_map() -> TiledMap {
    parse_tiled_map("desert.json", SAMPLE_MAP).unwrap()
}

// -----------------------------------------------------------------------------
// Property tests
// -----------------------------------------------------------------------------

#[test]
fn test_property_bag_reads_bools_numbers_and_strings() {
    let bag: PropertyBag = serde_json::from_value(json!([
        { "name": "solid", "type": "bool", "value": true },
        { "name": "count", "type": "int", "value": 0 },
        { "name": "label", "type": "string", "value": "true" },
        { "name": "color", "type": "color", "value": "#ff0000" },
    ]))
    .unwrap();

    assert_eq!(bag.bool("solid"), Some(true));
    assert_eq!(bag.bool("count"), Some(false));
    assert_eq!(bag.bool("label"), Some(true));
    assert_eq!(bag.bool("color"), None);
    assert!(!bag.is_truthy("missing"));
}

// -----------------------------------------------------------------------------
// Object collision tests
// -----------------------------------------------------------------------------

#[test]
fn test_object_shape_is_centred_and_offset_by_origin() {
    let objects = vec![object(json!({
        "x": 10, "y": 20, "width": 32, "height": 32,
        "properties": [{ "name": "collides", "type": "bool", "value": true }]
    }))];

    let shapes = builder(Vec2::new(100.0, 100.0), 1.0).from_objects(&objects);

    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].center(), Vec2::new(126.0, 136.0));
    assert_eq!(shapes[0].size(), Vec2::new(32.0, 32.0));
}

#[test]
fn test_object_without_collides_is_skipped() {
    let objects = vec![
        object(json!({ "x": 0, "y": 0, "width": 32, "height": 32 })),
        object(json!({
            "x": 0, "y": 0, "width": 32, "height": 32,
            "properties": [{ "name": "collides", "type": "bool", "value": false }]
        })),
    ];

    assert!(builder(Vec2::ZERO, 1.0).from_objects(&objects).is_empty());
}

#[test]
fn test_object_without_size_uses_one_tile() {
    let objects = vec![
        object(json!({
            "x": 64, "y": 64,
            "properties": [{ "name": "collides", "type": "bool", "value": true }]
        })),
        object(json!({
            "x": 64, "y": 64, "width": 0, "height": -4,
            "properties": [{ "name": "collides", "type": "bool", "value": true }]
        })),
    ];

    let shapes = builder(Vec2::ZERO, 1.0).from_objects(&objects);

    assert_eq!(shapes.len(), 2);
    for shape in shapes {
        assert_eq!(shape.size(), Vec2::splat(32.0));
        assert_eq!(shape.center(), Vec2::new(80.0, 80.0));
    }
}

#[test]
fn test_object_shape_scales_with_render_scale() {
    let objects = vec![object(json!({
        "x": 10, "y": 20, "width": 32, "height": 16,
        "properties": [{ "name": "collides", "type": "bool", "value": true }]
    }))];

    let shapes = builder(Vec2::new(50.0, 0.0), 2.0).from_objects(&objects);

    assert_eq!(shapes[0].center(), Vec2::new(50.0 + 26.0 * 2.0, 28.0 * 2.0));
    assert_eq!(shapes[0].size(), Vec2::new(64.0, 32.0));
}

// -----------------------------------------------------------------------------
// Tile collision tests
// -----------------------------------------------------------------------------

#[test]
fn test_cells_strip_flip_flags_and_skip_empty() {
    let layer: TileLayer = serde_json::from_value(json!({
        "name": "decoration",
        "width": 2,
        "height": 2,
        "data": [0, 5 | GID_FLAG_MASK, 7, 0],
    }))
    .unwrap();

    let cells: Vec<_> = layer.cells().collect();

    assert_eq!(cells, vec![(1, 0, 5), (0, 1, 7)]);
}

#[test]
fn test_tiles_marked_collides_produce_shapes() {
    let map = sample_map();
    let layer = map.tile_layer("decoration-back").unwrap();
    let tileset = map.tileset("mountain_landscape").unwrap();

    let shapes = builder(Vec2::ZERO, 1.0).from_tiles(layer, tileset);

    // Three rocks use the solid tile; the other decorations do not collide.
    assert_eq!(shapes.len(), 3);
    assert!(shapes.iter().any(|s| s.center() == Vec2::new(80.0, 80.0)));
    assert!(shapes.iter().all(|s| s.size() == Vec2::splat(32.0)));
}

#[test]
fn test_map_bounds_surround_the_map() {
    let walls = builder(Vec2::ZERO, 1.0).map_bounds(Vec2::new(320.0, 320.0));

    let top = walls[0];
    assert_eq!(top.center(), Vec2::new(160.0, -16.0));
    assert_eq!(top.size(), Vec2::new(384.0, 32.0));

    let right = walls[3];
    assert_eq!(right.center(), Vec2::new(336.0, 160.0));
    assert_eq!(right.size(), Vec2::new(32.0, 320.0));
}

// -----------------------------------------------------------------------------
// Sample map tests
// -----------------------------------------------------------------------------

#[test]
fn test_sample_map_layers_and_tileset() {
    let map = sample_map();

    assert_eq!(map.size_in_pixels(), Vec2::new(320.0, 320.0));
    assert!(map.tile_layer("background").is_some());
    assert!(map.tile_layer("decoration-back").is_some());
    assert!(map.tile_layer("decoration-up").is_some());
    assert!(map.object_layer("collisions").is_some());
    assert!(map.tile_layer("collisions").is_none());

    let tileset = map.tileset("mountain_landscape").unwrap();
    assert_eq!(tileset.rows(), 8);
    assert_eq!(tileset.local_id(18), Some(17));
    assert_eq!(tileset.local_id(0), None);
    assert_eq!(tileset.local_id(65), None);
}

#[test]
fn test_sample_map_collision_objects() {
    let map = sample_map();
    let layer = map.object_layer("collisions").unwrap();

    let shapes = builder(Vec2::ZERO, 1.0).from_objects(&layer.objects);

    // The spawn point carries no property.
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].size(), Vec2::new(320.0, 32.0));
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tiled_map("broken.json", "{ not json").unwrap_err();

    assert_eq!(err.file, "broken.json");
    assert!(err.to_string().starts_with("Failed to load map broken.json"));
}
