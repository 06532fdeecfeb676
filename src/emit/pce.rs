//! PCE emitters.
//!
//! Pattern data is 4-bitplane. For BG and image tiles an 8x8 block packs
//! plane pairs into u16 rows: the first eight words carry planes 0/1 in
//! their low/high bytes, the next eight carry planes 2/3. 16x16 BG tiles
//! emit their four 8x8 quadrants in LT, RT, LB, RB order. Sprites emit
//! four full planes of u16 column words. Colour indices are offset past
//! the reserved transparent slot before packing.

use crate::platform::PaletteCaps;
use crate::tile::{IndexedPattern, Tilization};

use super::hex::HexArtifact;
use super::padded_palette;

/// First pattern id applications may use; BAT entries offset past it.
const BAT_PATTERN_BASE: u16 = 256;

/// Palette id shift for BG pattern sidecars. Image and sprite sidecars
/// keep the id unshifted.
pub const BG_PALETTE_SHIFT: u8 = 4;

/// u16 palette blob, one padded palette per line.
pub fn palette_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u16(name);
    for pal in t.palettes() {
        art.push_line(padded_palette(pal, caps));
    }
    art
}

/// Plane-pair words for the 8x8 region of `pat` at (x0, y0).
fn block_words(pat: &IndexedPattern, x0: usize, y0: usize, reserved: usize) -> Vec<u16> {
    let mut words = Vec::with_capacity(16);
    for pair in 0..2 {
        for y in 0..8 {
            let mut word = 0u16;
            for x in 0..8 {
                let index = pat.get(x0 + x, y0 + y) as u16 + reserved as u16;
                word |= ((index >> (pair * 2)) & 1) << (7 - x);
                word |= ((index >> (pair * 2 + 1)) & 1) << (15 - x);
            }
            words.push(word);
        }
    }
    words
}

/// 16x16 BG tiles: four quadrant lines of sixteen words each.
pub fn bg_pattern_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u16(name);
    for pat in t.patterns() {
        let (hw, hh) = (pat.width() / 2, pat.height() / 2);
        for (x0, y0) in [(0, 0), (hw, 0), (0, hh), (hw, hh)] {
            art.push_line(block_words(pat, x0, y0, caps.reserved));
        }
    }
    art
}

/// 8x8 image tiles: one sixteen-word line per pattern.
pub fn image_pattern_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u16(name);
    for pat in t.patterns() {
        art.push_line(block_words(pat, 0, 0, caps.reserved));
    }
    art
}

/// Sprite patterns: four planes per pattern, one u16 per 16-pixel row
/// chunk, left to right.
pub fn sprite_pattern_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u16(name);
    for pat in t.patterns() {
        let chunks = pat.width() / 16;
        let mut words = Vec::with_capacity(4 * pat.height() * chunks);
        for plane in 0..4 {
            for y in 0..pat.height() {
                for chunk in 0..chunks {
                    let mut word = 0u16;
                    for x in 0..16 {
                        let index = pat.get(chunk * 16 + x, y) as u16 + caps.reserved as u16;
                        word |= ((index >> plane) & 1) << (15 - x);
                    }
                    words.push(word);
                }
            }
        }
        art.push_line(words);
    }
    art
}

/// Per-pattern palette id sidecar (`Name_PAL`), one byte per line.
pub fn pattern_palette_artifact(t: &Tilization, shift: u8, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(format!("{name}_PAL"));
    for pat in t.patterns() {
        art.push_line(vec![((pat.palette() as u8) << shift) as u16]);
    }
    art
}

/// BAT words: palette id in the top nibble, offset pattern id below.
pub fn bat_artifact(t: &Tilization, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u16(name);
    for row in t.map().rows() {
        art.push_line(
            row.iter()
                .map(|cell| {
                    let pal = t.palette_index_of(cell.pattern) as u16;
                    (pal << 12) | (cell.pattern as u16 + BAT_PATTERN_BASE)
                })
                .collect(),
        );
    }
    art
}
