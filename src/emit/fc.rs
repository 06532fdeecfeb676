//! FC emitters.
//!
//! Pattern data is 2-bitplane: plane 0 rows first, then plane 1. The
//! palette id of a map cell lives in the attribute table, one byte per
//! 4x4-cell group, two bits per 2x2-cell quadrant (TL, TR, BL, BR from
//! the low bits up). All four cells of a quadrant must agree on their
//! palette, which holds by construction under the 2x2 grouping policy.

use crate::platform::PaletteCaps;
use crate::tile::Tilization;

use super::hex::HexArtifact;
use super::padded_palette;

/// u8 palette blob, one padded palette per line.
pub fn palette_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for pal in t.palettes() {
        art.push_line(padded_palette(pal, caps));
    }
    art
}

/// Grouped 2-plane pattern blob, one line per pattern.
pub fn pattern_artifact(t: &Tilization, caps: PaletteCaps, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for pat in t.patterns() {
        let mut bytes = Vec::with_capacity(2 * pat.height());
        for plane in 0..2 {
            for y in 0..pat.height() {
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

/// Attribute table: one byte per 4x4 cells, each 2x2 quadrant contributing
/// two bits. Quadrants outside the map read as palette 0.
pub fn attribute_artifact(t: &Tilization, name: &str) -> HexArtifact {
    let mut art = HexArtifact::u8(name);
    for i in (0..t.map().height()).step_by(4) {
        let mut line = Vec::new();
        for j in (0..t.map().width()).step_by(4) {
            let tl = quadrant_palette(t, j, i);
            let tr = quadrant_palette(t, j + 2, i);
            let bl = quadrant_palette(t, j, i + 2);
            let br = quadrant_palette(t, j + 2, i + 2);
            line.push((br << 6) | (bl << 4) | (tr << 2) | tl);
        }
        art.push_line(line);
    }
    art
}

/// Palette id of the 2x2 quadrant whose top-left cell is (x, y).
fn quadrant_palette(t: &Tilization, x: usize, y: usize) -> u16 {
    let map = t.map();
    if x >= map.width() || y >= map.height() {
        return 0;
    }

    let palette = t.palette_index_of(map.get(x, y).pattern);
    // every in-bounds cell of the quadrant must agree
    for (dx, dy) in [(1, 0), (0, 1), (1, 1)] {
        let (qx, qy) = (x + dx, y + dy);
        if qx < map.width() && qy < map.height() {
            debug_assert_eq!(
                t.palette_index_of(map.get(qx, qy).pattern),
                palette,
                "2x2 cells at ({x},{y}) disagree on their palette"
            );
        }
    }
    palette as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Bgr, ColorModel, Platform};
    use crate::raster::Raster;
    use crate::tile::{tilize, GroupingPolicy, TilizeConfig};

    fn solid_cells(colors: &[Bgr], cells_w: usize, cells_h: usize) -> Raster {
        let width = cells_w * 8;
        let height = cells_h * 8;
        let mut pixels = vec![Bgr::BLACK; width * height];
        for cy in 0..cells_h {
            for cx in 0..cells_w {
                let colour = colors[cy * cells_w + cx];
                for y in 0..8 {
                    for x in 0..8 {
                        pixels[(cy * 8 + y) * width + cx * 8 + x] = colour;
                    }
                }
            }
        }
        Raster::from_pixels(width, height, pixels)
    }

    #[test]
    fn test_palette_blob_padded_to_four() {
        let white = Bgr::new(255, 255, 255);
        let raster = solid_cells(&[white], 1, 1);
        let config = TilizeConfig::new(8, 8, Platform::Fc.bg_caps());
        let t = tilize(&raster, ColorModel::Fc, &config);

        let art = palette_artifact(&t, Platform::Fc.bg_caps(), "PAL");

        // transparent, white (entry 32), two padding slots
        assert_eq!(art.to_bytes(), vec![0x00, 32, 0x00, 0x00]);
    }

    #[test]
    fn test_pattern_planes_grouped() {
        let white = Bgr::new(255, 255, 255);
        let raster = solid_cells(&[white], 1, 1);
        let config = TilizeConfig::new(8, 8, Platform::Fc.bg_caps());
        let t = tilize(&raster, ColorModel::Fc, &config);

        let art = pattern_artifact(&t, Platform::Fc.bg_caps(), "TILES");

        // single colour at palette offset 0 -> index 1: plane 0 full,
        // plane 1 empty
        let bytes = art.to_bytes();
        assert_eq!(bytes.len(), 16);
        assert!(bytes[..8].iter().all(|&b| b == 0xFF));
        assert!(bytes[8..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_attribute_packing() {
        // 4x4 cells: the left 2x2 blocks and the right 2x2 blocks use
        // disjoint three-colour sets, so their palettes cannot merge
        let b = Bgr::BLACK;
        let c1 = Bgr::new(255, 255, 255); // -> 32
        let c2 = Bgr::new(171, 0, 0); // -> 2
        let c4 = Bgr::new(0, 81, 0); // -> 10
        let c5 = Bgr::new(188, 188, 188); // -> 16
        let c6 = Bgr::new(239, 115, 0); // -> 17
        #[rustfmt::skip]
        let colors = [
            b,  c1, c4, c5,
            c2, b,  c6, c4,
            b,  c1, c4, c5,
            c2, b,  c6, c4,
        ];
        let raster = solid_cells(&colors, 4, 4);
        let config =
            TilizeConfig::new(8, 8, Platform::Fc.bg_caps()).with_policy(GroupingPolicy::Per2x2);
        let t = tilize(&raster, ColorModel::Fc, &config);

        let art = attribute_artifact(&t, "ATTR");

        assert_eq!(art.word_count(), 1);
        let byte = art.to_bytes()[0];
        let tl = byte & 0x3;
        let tr = (byte >> 2) & 0x3;
        let bl = (byte >> 4) & 0x3;
        let br = (byte >> 6) & 0x3;
        // left and right columns repeat vertically, so top and bottom
        // quadrants share palettes
        assert_eq!(tl, bl);
        assert_eq!(tr, br);
        assert_ne!(tl, tr);
    }

    #[test]
    fn test_attribute_outside_map_reads_zero() {
        // a 2x2-cell map has only the TL quadrant
        let white = Bgr::new(255, 255, 255);
        let raster = solid_cells(&[white, white, white, white], 2, 2);
        let config =
            TilizeConfig::new(8, 8, Platform::Fc.bg_caps()).with_policy(GroupingPolicy::Per2x2);
        let t = tilize(&raster, ColorModel::Fc, &config);

        let art = attribute_artifact(&t, "ATTR");

        assert_eq!(art.to_bytes(), vec![0x00]);
    }
}
