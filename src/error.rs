use std::fmt;
use std::io;

/// Errors from reading or writing a tile map.
#[derive(Debug)]
pub enum TileMapError {
    Io(io::Error),
    UnsupportedVersion { found: u8 },
    /// The input ended inside the header or the tile section; counts are
    /// for that section only.
    Truncated { expected: u64, actual: u64 },
    TooLarge { width: u64, height: u64 },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "tile map i/o error: {err}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "expected tile map version to be equal to 1, got: {found:#x}")
            }
            Self::Truncated { expected, actual } => {
                write!(f, "tile map truncated: expected {expected} bytes, got {actual}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "tile map dimensions {width}x{height} are too large")
            }
        }
    }
}

impl std::error::Error for TileMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TileMapError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Errors from loading a `GameConfig`.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to open {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
