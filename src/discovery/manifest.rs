//! `.res` manifest parsing.
//!
//! A manifest holds one resource record per line, whitespace separated,
//! the first token naming the record kind:
//!
//! ```text
//! PALETTE  Name File
//! TILESET  Name File [Compression] [Option]
//! ITILESET Name File [Compression] [Option]
//! MAP      Name File Tileset [Compression] [MapBase]
//! IMAP     Name File Tileset [Compression] [MapBase]
//! SPRITE   Name File Width Height [Compression] [Time] [Collision] [Option] [Iteration]
//! ```
//!
//! File tokens may be double-quoted. Sprite width and height are given in
//! 8-pixel units. Unknown kinds and blank lines are skipped; numeric
//! fields that fail to parse fall back to their defaults.

use std::path::PathBuf;

use crate::error::{Result, TileError};

/// Default sprite iteration count when the record omits it.
pub const DEFAULT_SPRITE_ITERATION: u32 = 500_000;

/// One resource record from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Palette {
        name: String,
        file: PathBuf,
    },
    Tileset {
        name: String,
        file: PathBuf,
        compression: Option<String>,
        option: Option<String>,
    },
    /// Tileset in image mode: 8x8 cells, BAT-style addressing.
    ImageTileset {
        name: String,
        file: PathBuf,
        compression: Option<String>,
        option: Option<String>,
    },
    Map {
        name: String,
        file: PathBuf,
        tileset: String,
        compression: Option<String>,
        map_base: u32,
    },
    ImageMap {
        name: String,
        file: PathBuf,
        tileset: String,
        compression: Option<String>,
        map_base: u32,
    },
    Sprite {
        name: String,
        file: PathBuf,
        /// Width in 8-pixel units.
        width: u32,
        /// Height in 8-pixel units.
        height: u32,
        compression: Option<String>,
        time: u32,
        collision: Option<String>,
        option: Option<String>,
        iteration: u32,
    },
}

impl Record {
    pub fn name(&self) -> &str {
        match self {
            Record::Palette { name, .. }
            | Record::Tileset { name, .. }
            | Record::ImageTileset { name, .. }
            | Record::Map { name, .. }
            | Record::ImageMap { name, .. }
            | Record::Sprite { name, .. } => name,
        }
    }

    pub fn file(&self) -> &std::path::Path {
        match self {
            Record::Palette { file, .. }
            | Record::Tileset { file, .. }
            | Record::ImageTileset { file, .. }
            | Record::Map { file, .. }
            | Record::ImageMap { file, .. }
            | Record::Sprite { file, .. } => file,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Record::Palette { .. } => "palette",
            Record::Tileset { .. } => "tileset",
            Record::ImageTileset { .. } => "image tileset",
            Record::Map { .. } => "map",
            Record::ImageMap { .. } => "image map",
            Record::Sprite { .. } => "sprite",
        }
    }
}

/// Parse one manifest line. Blank lines and unknown record kinds yield
/// `None`; a recognized kind with missing required fields is an error.
pub fn parse_line(line: &str) -> Result<Option<Record>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&kind) = tokens.first() else {
        return Ok(None);
    };

    let field = |i: usize| tokens.get(i).map(|s| s.to_string());
    let require = |i: usize, what: &str| -> Result<String> {
        tokens.get(i).map(|s| s.to_string()).ok_or_else(|| TileError::Parse {
            message: format!("{kind} record is missing its {what} field"),
            help: Some(format!("expected: {kind} Name File ...")),
        })
    };
    let number = |i: usize, default: u32| {
        tokens
            .get(i)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(default)
    };

    let record = match kind {
        "PALETTE" => Record::Palette {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
        },
        "TILESET" => Record::Tileset {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
            compression: field(3),
            option: field(4),
        },
        "ITILESET" => Record::ImageTileset {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
            compression: field(3),
            option: field(4),
        },
        "MAP" => Record::Map {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
            tileset: require(3, "tileset")?,
            compression: field(4),
            map_base: number(5, 0),
        },
        "IMAP" => Record::ImageMap {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
            tileset: require(3, "tileset")?,
            compression: field(4),
            map_base: number(5, 0),
        },
        "SPRITE" => Record::Sprite {
            name: require(1, "name")?,
            file: unquote(&require(2, "file")?),
            width: number(3, 0),
            height: number(4, 0),
            compression: field(5),
            time: number(6, 0),
            collision: field(7),
            option: field(8),
            iteration: number(9, DEFAULT_SPRITE_ITERATION),
        },
        _ => return Ok(None),
    };

    // width/height are required tokens even though bad numbers default
    if let Record::Sprite { .. } = record {
        require(3, "width")?;
        require(4, "height")?;
    }

    Ok(Some(record))
}

/// Parse a whole manifest; each line yields at most one result so a bad
/// record skips only itself.
pub fn parse_manifest(content: &str) -> Vec<Result<Record>> {
    content
        .lines()
        .filter_map(|line| parse_line(line).transpose())
        .collect()
}

/// Strip every double quote; `"file.png"` and bare tokens are both
/// accepted.
fn unquote(token: &str) -> PathBuf {
    PathBuf::from(token.replace('"', ""))
}
