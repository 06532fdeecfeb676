//! retrotile - bitmap to retro console asset pipeline
//!
//! A library for converting source bitmaps into the palette, pattern, and
//! map binaries consumed by retro console graphics hardware (PCE, FC, GB).

pub mod cli;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod output;
pub mod platform;
pub mod preview;
pub mod raster;
pub mod tile;

pub use discovery::{find_manifests, parse_manifest, Record};
pub use error::{Result, TileError};
pub use platform::{Bgr, ColorModel, PaletteCaps, Platform, PlatformColor};
pub use raster::Raster;
pub use tile::{tilize, GroupingPolicy, Tilization, TilizeConfig};
