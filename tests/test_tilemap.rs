use std::io::Cursor;

use spaceships::error::TileMapError;
use spaceships::tilemap::{TileMap, TILEMAP_VERSION};

fn header(version: u8, width: u64, height: u64) -> Vec<u8> {
    let mut bytes = vec![version];
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes
}

#[test]
fn default_map_is_empty_32_by_18() {
    let map = TileMap::default();
    assert_eq!((map.width(), map.height()), (32, 18));
    assert_eq!(map.solid_count(), 0);
    assert_eq!(map.tile(31, 17), Some(false));
    assert_eq!(map.tile(32, 0), None);
    assert_eq!(map.tile(0, 18), None);
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut map = TileMap::new(4, 3);
    map.set_tile(3, 2, true);
    map.set_tile(4, 0, true);
    map.set_tile(0, 3, true);
    assert_eq!(map.tile(3, 2), Some(true));
    assert_eq!(map.solid_count(), 1);
}

#[test]
fn pixel_lookup_maps_to_tiles() {
    let map = TileMap::default();
    assert_eq!(map.tile_at_pixel(0, 0, 40), Some((0, 0)));
    assert_eq!(map.tile_at_pixel(85, 39, 40), Some((2, 0)));
    assert_eq!(map.tile_at_pixel(1279, 719, 40), Some((31, 17)));
    assert_eq!(map.tile_at_pixel(1280, 0, 40), None);
    assert_eq!(map.tile_at_pixel(-1, 10, 40), None);
    assert_eq!(map.tile_at_pixel(10, 10, 0), None);
}

#[test]
fn file_layout_is_version_then_dimensions_then_tiles() {
    let mut map = TileMap::new(2, 1);
    map.set_tile(1, 0, true);

    let mut bytes = Vec::new();
    map.write_to(&mut bytes).unwrap();

    let mut expected = header(TILEMAP_VERSION, 2, 1);
    expected.extend_from_slice(&[0, 1]);
    assert_eq!(bytes, expected);
}

#[test]
fn written_map_reads_back_identically() {
    let mut map = TileMap::default();
    for col in 0..32 {
        map.set_tile(col, 17, true);
    }
    map.set_tile(5, 3, true);

    let mut bytes = Vec::new();
    map.write_to(&mut bytes).unwrap();
    let loaded = TileMap::read_from(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(loaded, map);
    assert_eq!(loaded.solid_count(), 33);
}

#[test]
fn any_nonzero_byte_is_solid() {
    let mut bytes = header(1, 3, 1);
    bytes.extend_from_slice(&[0, 7, 255]);
    let map = TileMap::read_from(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(map.tile(0, 0), Some(false));
    assert_eq!(map.tile(1, 0), Some(true));
    assert_eq!(map.tile(2, 0), Some(true));
}

#[test]
fn unknown_version_is_rejected() {
    let bytes = header(2, 1, 1);
    let err = TileMap::read_from(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, TileMapError::UnsupportedVersion { found: 2 }));
    assert!(err.to_string().contains("0x2"));
}

#[test]
fn short_header_is_reported_as_truncated() {
    let bytes = vec![1, 2, 0, 0];
    let err = TileMap::read_from(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        TileMapError::Truncated {
            expected: 17,
            actual: 4
        }
    ));
}

#[test]
fn empty_input_is_reported_as_truncated() {
    let err = TileMap::read_from(&mut Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(
        err,
        TileMapError::Truncated {
            expected: 17,
            actual: 0
        }
    ));
}

#[test]
fn version_is_checked_before_the_header_length() {
    let err = TileMap::read_from(&mut Cursor::new(vec![9, 0])).unwrap_err();
    assert!(matches!(err, TileMapError::UnsupportedVersion { found: 9 }));
}

#[test]
fn missing_tile_bytes_are_reported() {
    let mut bytes = header(1, 2, 2);
    bytes.extend_from_slice(&[1, 0, 1]);
    let err = TileMap::read_from(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        TileMapError::Truncated {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn absurd_dimensions_are_rejected_before_allocating() {
    let bytes = header(1, u64::MAX, 2);
    let err = TileMap::read_from(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, TileMapError::TooLarge { .. }));
}

#[test]
fn save_and_load_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.bin");

    let mut map = TileMap::default();
    map.set_tile(0, 0, true);
    map.set_tile(31, 17, true);
    map.save(&path).unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), 1 + 8 + 8 + 32 * 18);
    assert_eq!(TileMap::load(&path).unwrap(), map);
}

#[test]
fn loading_a_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = TileMap::load(dir.path().join("nope.bin")).unwrap_err();
    assert!(matches!(err, TileMapError::Io(_)));
}
