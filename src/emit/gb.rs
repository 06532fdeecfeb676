//! GB emitters.
//!
//! Pattern data is 2-bitplane with the planes interleaved per row: row 0
//! plane 0, row 0 plane 1, row 1 plane 0, and so on. Palettes are not
//! colour tables but a single packed register byte, two bits per slot,
//! slot 0 in the low bits.

use crate::platform::PaletteCaps;
use crate::tile::Tilization;

use super::hex::HexArtifact;
use super::padded_palette;

/// Packed palette register blob, one byte per palette.
pub fn palette_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for pal in t.palettes() {
        let padded = padded_palette(pal, caps);
        let mut mask = 0u8;
        for (slot, &shade) in padded.iter().take(4).enumerate() {
            mask |= ((shade as u8) & 0x3) << (slot * 2);
        }
        art.push_line(vec![mask as u16]);
    }
    art
}

/// Interleaved 2-plane pattern blob, one line per pattern.
pub fn pattern_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for pat in t.patterns() {
        let mut bytes = Vec::with_capacity(2 * pat.height());
        for y in 0..pat.height() {
            for plane in 0..2 {
                let mut byte = 0u16;
                for x in 0..pat.width() {
                    let index = pat.get(x, y) as u16 + caps.reserved as u16;
                    byte |= ((index >> plane) & 1) << (7 - x);
                }
                bytes.push(byte);
            }
        }
        art.push_line(bytes);
    }
    art
}
