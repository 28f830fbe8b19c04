//! Level-editor tile map and its binary file format.
//!
//! Layout, all little-endian:
//!
//! ```text
//! u8  version (= 1)
//! u64 width
//! u64 height
//! width * height bytes, one per tile, row-major, non-zero = solid
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::TileMapError;

pub const TILEMAP_VERSION: u8 = 1;
pub const DEFAULT_WIDTH: u64 = 32; // 1280 / 40
pub const DEFAULT_HEIGHT: u64 = 18; // 720 / 40

/// Refuse headers that would need more than this many tile bytes.
const MAX_TILES: u64 = 1 << 28;

/// Version byte plus the two dimension words.
const HEADER_LEN: u64 = 1 + 8 + 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: u64,
    height: u64,
    tiles: Vec<bool>,
}

impl Default for TileMap {
    fn default() -> Self {
        TileMap::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl TileMap {
    pub fn new(width: u64, height: u64) -> Self {
        TileMap {
            width,
            height,
            tiles: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    fn index(&self, col: u64, row: u64) -> Option<usize> {
        (col < self.width && row < self.height).then(|| (row * self.width + col) as usize)
    }

    /// `None` outside the map.
    pub fn tile(&self, col: u64, row: u64) -> Option<bool> {
        self.index(col, row).map(|i| self.tiles[i])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, col: u64, row: u64, solid: bool) {
        if let Some(i) = self.index(col, row) {
            self.tiles[i] = solid;
        }
    }

    /// Tile under a pixel position, for mouse painting.
    pub fn tile_at_pixel(&self, x: i32, y: i32, tile_size: u32) -> Option<(u64, u64)> {
        if x < 0 || y < 0 || tile_size == 0 {
            return None;
        }
        let col = x as u64 / u64::from(tile_size);
        let row = y as u64 / u64::from(tile_size);
        self.index(col, row).map(|_| (col, row))
    }

    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t).count()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), TileMapError> {
        out.write_all(&[TILEMAP_VERSION])?;
        out.write_all(&self.width.to_le_bytes())?;
        out.write_all(&self.height.to_le_bytes())?;
        let bytes: Vec<u8> = self.tiles.iter().map(|&t| u8::from(t)).collect();
        out.write_all(&bytes)?;
        Ok(())
    }

    pub fn read_from<R: Read>(input: &mut R) -> Result<Self, TileMapError> {
        let header = read_section(input, HEADER_LEN)?;
        if header.first().is_some_and(|&v| v != TILEMAP_VERSION) {
            return Err(TileMapError::UnsupportedVersion { found: header[0] });
        }
        if (header.len() as u64) < HEADER_LEN {
            return Err(TileMapError::Truncated {
                expected: HEADER_LEN,
                actual: header.len() as u64,
            });
        }
        let word = |at: usize| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&header[at..at + 8]);
            u64::from_le_bytes(bytes)
        };
        let width = word(1);
        let height = word(9);

        let expected = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_TILES)
            .ok_or(TileMapError::TooLarge { width, height })?;

        let bytes = read_section(input, expected)?;
        if (bytes.len() as u64) < expected {
            return Err(TileMapError::Truncated {
                expected,
                actual: bytes.len() as u64,
            });
        }

        Ok(TileMap {
            width,
            height,
            tiles: bytes.into_iter().map(|b| b != 0).collect(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TileMapError> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        info!(path = %path.display(), width = self.width, height = self.height, "saved tile map");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TileMapError> {
        let path = path.as_ref();
        let map = Self::read_from(&mut BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), width = map.width, height = map.height, "loaded tile map");
        Ok(map)
    }
}

/// Read up to `len` bytes; fewer come back only when the input ends early.
fn read_section<R: Read>(input: &mut R, len: u64) -> Result<Vec<u8>, TileMapError> {
    let mut bytes = Vec::with_capacity(len as usize);
    input.take(len).read_to_end(&mut bytes)?;
    Ok(bytes)
}
