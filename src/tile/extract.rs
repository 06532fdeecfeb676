//! Cell extraction and pattern deduplication.
//!
//! Slices the raster into fixed-size cells in row-major order, encodes
//! each cell through the platform colour model, and collapses structurally
//! identical cells into a unique-pattern list plus an index map.

use std::collections::HashMap;

use crate::platform::{ColorModel, PlatformColor};
use crate::raster::Raster;

use super::pattern::{ColorPattern, MapCell, TileMap};

/// Unique patterns plus the map referencing them.
#[derive(Debug)]
pub struct Extraction {
    pub patterns: Vec<ColorPattern>,
    pub map: TileMap,
}

/// Tilize the raster into `cell_w` x `cell_h` patterns.
///
/// Cells that do not fit on the right or bottom edge are silently
/// truncated. The first occurrence of a pattern in scan order keeps the
/// smaller id; the hash index only accelerates the lookup and does not
/// change the observable ordering.
pub fn extract(raster: &Raster, model: ColorModel, cell_w: usize, cell_h: usize) -> Extraction {
    let map_w = raster.width() / cell_w;
    let map_h = raster.height() / cell_h;

    let mut patterns: Vec<ColorPattern> = Vec::new();
    let mut seen: HashMap<Vec<PlatformColor>, u32> = HashMap::new();
    let mut cells = Vec::with_capacity(map_w * map_h);

    for i in 0..map_h {
        for j in 0..map_w {
            let mut grid = Vec::with_capacity(cell_w * cell_h);
            for y in 0..cell_h {
                for x in 0..cell_w {
                    grid.push(model.encode(raster.get(j * cell_w + x, i * cell_h + y)));
                }
            }

            let pattern = match seen.get(&grid) {
                Some(&id) => id,
                None => {
                    let id = patterns.len() as u32;
                    seen.insert(grid.clone(), id);
                    patterns.push(ColorPattern::new(cell_w, cell_h, grid));
                    id
                }
            };
            cells.push(MapCell { pattern, flags: 0 });
        }
    }

    Extraction {
        patterns,
        map: TileMap::new(map_w, map_h, cells),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Bgr;

    fn raster_of_cells(cell_px: &[Bgr], cells_w: usize, cells_h: usize, size: usize) -> Raster {
        // tile the given per-cell colours into a (cells_w x cells_h) grid
        // of solid size x size cells
        let width = cells_w * size;
        let height = cells_h * size;
        let mut pixels = vec![Bgr::BLACK; width * height];
        for cy in 0..cells_h {
            for cx in 0..cells_w {
                let colour = cell_px[cy * cells_w + cx];
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
    fn test_identical_cells_deduplicate() {
        let grey = Bgr::new(0x20, 0x20, 0x20);
        let raster = raster_of_cells(&[grey, grey, grey, grey], 2, 2, 8);

        let ex = extract(&raster, ColorModel::Pce, 8, 8);

        assert_eq!(ex.patterns.len(), 1);
        assert_eq!(ex.map.width(), 2);
        assert_eq!(ex.map.height(), 2);
        assert!(ex.map.cells().iter().all(|c| c.pattern == 0 && c.flags == 0));
    }

    #[test]
    fn test_first_occurrence_keeps_smaller_id() {
        let a = Bgr::new(0x20, 0x20, 0x20);
        let b = Bgr::new(0xE0, 0xE0, 0xE0);
        let raster = raster_of_cells(&[a, b, b, a], 2, 2, 8);

        let ex = extract(&raster, ColorModel::Pce, 8, 8);

        assert_eq!(ex.patterns.len(), 2);
        assert_eq!(ex.map.get(0, 0).pattern, 0);
        assert_eq!(ex.map.get(1, 0).pattern, 1);
        assert_eq!(ex.map.get(0, 1).pattern, 1);
        assert_eq!(ex.map.get(1, 1).pattern, 0);
    }

    #[test]
    fn test_trailing_pixels_truncated() {
        // 20x13 image with 8x8 cells leaves a 4-wide and 5-tall remainder
        let raster = Raster::from_pixels(20, 13, vec![Bgr::BLACK; 20 * 13]);

        let ex = extract(&raster, ColorModel::Pce, 8, 8);

        assert_eq!(ex.map.width(), 2);
        assert_eq!(ex.map.height(), 1);
    }

    #[test]
    fn test_cell_pixels_encode_in_place() {
        // 8x8 cell with one white pixel at (3, 2)
        let mut pixels = vec![Bgr::BLACK; 64];
        pixels[2 * 8 + 3] = Bgr::new(0xE0, 0xE0, 0xE0);
        let raster = Raster::from_pixels(8, 8, pixels);

        let ex = extract(&raster, ColorModel::Pce, 8, 8);

        assert_eq!(ex.patterns.len(), 1);
        assert_eq!(ex.patterns[0].get(3, 2), 0x1FF);
        assert_eq!(ex.patterns[0].get(0, 0), 0x000);
    }
}
