//! Platform emitters.
//!
//! Serialize a finished [`Tilization`](crate::tile::Tilization) into the
//! blobs each target loads: bit-plane pattern data, palette tables, maps,
//! and attribute/BAT words. Formats are per-platform; the plain
//! pattern-id map is shared.

pub mod fc;
pub mod gb;
pub mod hex;
pub mod pce;

pub use hex::HexArtifact;

use crate::platform::{PaletteCaps, PlatformColor};
use crate::tile::{Palette, Tilization};

/// Value written into reserved and padding palette slots.
const TRANSPARENT: PlatformColor = 0x0000;

/// Flatten a palette to the platform's full colour count: reserved slots
/// first, then the colours, zero-padded up to the cap. An over-budget
/// palette keeps its extra colours; the capacity check reports it.
pub(crate) fn padded_palette(palette: &Palette, caps: PaletteCaps) -> Vec<u16> {
    let mut out = Vec::with_capacity(caps.color_cap);
    for _ in 0..caps.reserved {
        out.push(TRANSPARENT);
    }
    out.extend_from_slice(palette.colors());
    while out.len() < caps.color_cap {
        out.push(TRANSPARENT);
    }
    out
}

/// Plain map blob: the pattern id of every cell as one byte, one text
/// line per map row.
pub fn map_artifact(t: &Tilization, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for row in t.map().rows() {
        art.push_line(row.iter().map(|c| (c.pattern as u8) as u16).collect());
    }
    art
}

/// Capacity findings for a finished conversion. Overruns are reported and
/// the blobs are still written.
#[derive(Debug, Clone)]
pub struct CapacityNote {
    pub code: &'static str,
    pub message: String,
}

/// Check a conversion against the platform caps.
pub fn check_capacity(
    t: &Tilization,
    caps: PaletteCaps,
    pattern_cap: Option<usize>,
) -> Vec<CapacityNote> {
    let mut notes = Vec::new();

    if t.palettes().len() > caps.palette_cap {
        notes.push(CapacityNote {
            code: "palette-count",
            message: format!(
                "{} palettes exceed the platform limit of {}",
                t.palettes().len(),
                caps.palette_cap
            ),
        });
    }

    for (i, pal) in t.palettes().iter().enumerate() {
        if pal.len() > caps.budget() {
            notes.push(CapacityNote {
                code: "palette-colors",
                message: format!(
                    "palette {} holds {} colours, limit is {}",
                    i,
                    pal.len(),
                    caps.budget()
                ),
            });
        }
    }

    if let Some(cap) = pattern_cap {
        if t.patterns().len() > cap {
            notes.push(CapacityNote {
                code: "pattern-count",
                message: format!(
                    "{} patterns exceed the platform limit of {}",
                    t.patterns().len(),
                    cap
                ),
            });
        }
    }

    notes
}
