//! The tilization kernel.
//!
//! Turns a borrowed raster into the four artefacts every emitter consumes:
//! deduplicated colour patterns, a cell map, merged palettes, and
//! palette-indexed patterns. The stages run strictly in order; each one
//! consumes its predecessor's output by move.

pub mod extract;
pub mod index;
pub mod merge;
pub mod palette;
pub mod pattern;

pub use palette::{GroupingPolicy, Palette};
pub use pattern::{ColorPattern, IndexedPattern, MapCell, TileMap, UNASSIGNED};

use crate::platform::{ColorModel, PaletteCaps};
use crate::raster::Raster;

/// Kernel configuration for one conversion.
#[derive(Debug, Clone, Copy)]
pub struct TilizeConfig {
    pub cell_width: usize,
    pub cell_height: usize,
    pub policy: GroupingPolicy,
    pub caps: PaletteCaps,
}

impl TilizeConfig {
    pub fn new(cell_width: usize, cell_height: usize, caps: PaletteCaps) -> Self {
        Self {
            cell_width,
            cell_height,
            policy: GroupingPolicy::default(),
            caps,
        }
    }

    pub fn with_policy(mut self, policy: GroupingPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Finished tilization, immutable once built. The read-only accessors are
/// the whole emitter interface.
#[derive(Debug)]
pub struct Tilization {
    color_patterns: Vec<ColorPattern>,
    map: TileMap,
    palettes: Vec<Palette>,
    patterns: Vec<IndexedPattern>,
}

impl Tilization {
    /// Surviving palettes in compacted order.
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Indexed patterns, in first-seen order.
    pub fn patterns(&self) -> &[IndexedPattern] {
        &self.patterns
    }

    /// The original platform-colour patterns, index-aligned with
    /// [`Self::patterns`].
    pub fn color_patterns(&self) -> &[ColorPattern] {
        &self.color_patterns
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Palette assigned to a pattern.
    pub fn palette_index_of(&self, pattern_id: u32) -> u32 {
        self.patterns[pattern_id as usize].palette()
    }
}

/// Run the full kernel: extract, build, merge, index.
pub fn tilize(raster: &Raster, model: ColorModel, config: &TilizeConfig) -> Tilization {
    let extract::Extraction { patterns, map } =
        extract::extract(raster, model, config.cell_width, config.cell_height);

    let mut palettes = palette::build_palettes(&patterns, &map, config.policy);
    let redirect = merge::merge_palettes(&mut palettes, config.caps.budget());
    let indexed = index::index_patterns(&patterns, &palettes, &redirect, &map, config.policy);

    Tilization {
        color_patterns: patterns,
        map,
        palettes,
        patterns: indexed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Bgr, Platform};

    fn solid_cells(colors: &[Bgr], cells_w: usize, cells_h: usize, size: usize) -> Raster {
        let width = cells_w * size;
        let height = cells_h * size;
        let mut pixels = vec![Bgr::BLACK; width * height];
        for cy in 0..cells_h {
            for cx in 0..cells_w {
                let colour = colors[cy * cells_w + cx];
                for y in 0..size {
                    for x in 0..size {
                        pixels[(cy * size + y) * width + cx * size + x] = colour;
                    }
                }
            }
        }
        Raster::from_pixels(width, height, pixels)
    }

    #[test]
    fn test_single_grey_tile() {
        // 8x8 solid 0x20 grey on PCE: one pattern, one palette [0x049]
        let raster = solid_cells(&[Bgr::new(0x20, 0x20, 0x20)], 1, 1, 8);
        let config = TilizeConfig::new(8, 8, Platform::Pce.bg_caps());

        let t = tilize(&raster, ColorModel::Pce, &config);

        assert_eq!(t.color_patterns().len(), 1);
        assert_eq!(t.palettes().len(), 1);
        assert_eq!(t.palettes()[0].colors(), &[0x049]);
        assert_eq!(t.map().width(), 1);
        assert_eq!(t.map().height(), 1);
        assert_eq!(t.map().get(0, 0), MapCell { pattern: 0, flags: 0 });
        let pat = &t.patterns()[0];
        assert_eq!(pat.palette(), 0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(pat.get(x, y), 0);
            }
        }
    }

    #[test]
    fn test_two_tiles_merge_to_one_palette() {
        // grey tile then white tile: two per-pattern palettes collapse into
        // [0x049, 0x1FF]
        let raster = solid_cells(
            &[Bgr::new(0x20, 0x20, 0x20), Bgr::new(0xE0, 0xE0, 0xE0)],
            2,
            1,
            8,
        );
        let config = TilizeConfig::new(8, 8, Platform::Pce.bg_caps());

        let t = tilize(&raster, ColorModel::Pce, &config);

        assert_eq!(t.color_patterns().len(), 2);
        assert_eq!(t.palettes().len(), 1);
        assert_eq!(t.palettes()[0].colors(), &[0x049, 0x1FF]);
        assert_eq!(t.map().get(0, 0).pattern, 0);
        assert_eq!(t.map().get(1, 0).pattern, 1);
        assert!(t.patterns()[0].get(0, 0) == 0);
        assert!(t.patterns()[1].get(0, 0) == 1);
        assert_eq!(t.palette_index_of(0), 0);
        assert_eq!(t.palette_index_of(1), 0);
    }

    #[test]
    fn test_gb_four_shades_single_palette() {
        // all four shades in one tile; no reserved slot on the GB BG
        let shades = crate::platform::color::GB_SHADES;
        let mut pixels = vec![Bgr::BLACK; 64];
        for (i, px) in pixels.iter_mut().enumerate() {
            *px = shades[i % 4];
        }
        let raster = Raster::from_pixels(8, 8, pixels);
        let config = TilizeConfig::new(8, 8, Platform::Gb.bg_caps());

        let t = tilize(&raster, ColorModel::Gb, &config);

        assert_eq!(t.palettes().len(), 1);
        assert_eq!(t.palettes()[0].colors(), &[0, 1, 2, 3]);
        // indices map straight onto palette positions
        let pat = &t.patterns()[0];
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(pat.get(x, y) as usize, (y * 8 + x) % 4);
            }
        }
    }

    #[test]
    fn test_universal_invariants() {
        // a busier image: 4x2 cells of mixed colours on FC
        let colors = [
            Bgr::new(0, 0, 0),
            Bgr::new(255, 255, 255),
            Bgr::new(0, 0, 255),
            Bgr::new(255, 0, 0),
            Bgr::new(0, 255, 0),
            Bgr::new(255, 255, 255),
            Bgr::new(0, 0, 0),
            Bgr::new(128, 128, 128),
        ];
        let raster = solid_cells(&colors, 4, 2, 8);
        let config = TilizeConfig::new(8, 8, Platform::Fc.bg_caps());

        let t = tilize(&raster, ColorModel::Fc, &config);

        // map shape and pattern id bounds
        assert_eq!(
            t.map().cells().len(),
            (raster.height() / 8) * (raster.width() / 8)
        );
        for cell in t.map().cells() {
            assert!((cell.pattern as usize) < t.patterns().len());
        }

        // every pattern colour is present in its assigned palette
        for (cp, ip) in t.color_patterns().iter().zip(t.patterns()) {
            assert!((ip.palette() as usize) < t.palettes().len());
            let pal = &t.palettes()[ip.palette() as usize];
            for &c in cp.cells() {
                assert!(pal.contains(c));
            }
        }

        // palettes are sorted strictly ascending and within budget
        for pal in t.palettes() {
            assert!(pal.colors().windows(2).all(|w| w[0] < w[1]));
            assert!(pal.len() <= config.caps.budget());
        }

        // saturation: no surviving pair could still merge
        for i in 0..t.palettes().len() {
            for j in (i + 1)..t.palettes().len() {
                let union = t.palettes()[i].union(&t.palettes()[j]);
                assert!(union.len() > config.caps.budget());
            }
        }
    }

    #[test]
    fn test_determinism_end_to_end() {
        let colors = [
            Bgr::new(10, 20, 30),
            Bgr::new(200, 100, 50),
            Bgr::new(10, 20, 30),
            Bgr::new(0, 0, 0),
        ];
        let raster = solid_cells(&colors, 2, 2, 8);
        let config = TilizeConfig::new(8, 8, Platform::Pce.bg_caps());

        let a = tilize(&raster, ColorModel::Pce, &config);
        let b = tilize(&raster, ColorModel::Pce, &config);

        assert_eq!(a.color_patterns(), b.color_patterns());
        assert_eq!(a.map().cells(), b.map().cells());
        assert_eq!(a.palettes(), b.palettes());
        for (x, y) in a.patterns().iter().zip(b.patterns()) {
            assert_eq!(x.palette(), y.palette());
        }
    }
}
