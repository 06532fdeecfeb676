//! Reconstruction of finished conversions back into bitmaps.
//!
//! Expanding every map cell through its pattern and palette rebuilds the
//! image as the target hardware would show it. The conversion loop dumps
//! these as `.preview.png` files when asked; the same expansion is what
//! the round-trip tests check.

use std::path::Path;

use image::RgbImage;

use crate::error::{Result, TileError};
use crate::platform::{ColorModel, PaletteCaps};
use crate::raster::Raster;
use crate::tile::Tilization;

/// Rebuild the tilized image, one decoded pixel per source pixel.
pub fn reconstruct(t: &Tilization, model: ColorModel) -> Raster {
    let (cell_w, cell_h) = cell_size(t);
    let width = t.map().width() * cell_w;
    let height = t.map().height() * cell_h;

    let mut pixels = vec![crate::platform::Bgr::BLACK; width * height];
    for my in 0..t.map().height() {
        for mx in 0..t.map().width() {
            let cell = t.map().get(mx, my);
            let pat = &t.patterns()[cell.pattern as usize];
            let palette = &t.palettes()[pat.palette() as usize];
            for y in 0..cell_h {
                for x in 0..cell_w {
                    let color = palette.colors()[pat.get(x, y) as usize];
                    pixels[(my * cell_h + y) * width + mx * cell_w + x] = model.decode(color);
                }
            }
        }
    }
    Raster::from_pixels(width, height, pixels)
}

/// Write the reconstructed map image, nearest-neighbour upscaled.
pub fn write_map_preview(t: &Tilization, model: ColorModel, path: &Path) -> Result<()> {
    write_png(&reconstruct(t, model), path, 2)
}

/// Write every pattern on a 16-column sheet.
pub fn write_pattern_preview(t: &Tilization, model: ColorModel, path: &Path) -> Result<()> {
    const COLUMNS: usize = 16;
    let (cell_w, cell_h) = cell_size(t);
    let count = t.patterns().len();
    let rows = count.div_ceil(COLUMNS);
    let width = COLUMNS * cell_w;
    let height = rows.max(1) * cell_h;

    let mut pixels = vec![crate::platform::Bgr::BLACK; width * height];
    for (p, pat) in t.patterns().iter().enumerate() {
        let palette = &t.palettes()[pat.palette() as usize];
        let (ox, oy) = ((p % COLUMNS) * cell_w, (p / COLUMNS) * cell_h);
        for y in 0..cell_h {
            for x in 0..cell_w {
                let color = palette.colors()[pat.get(x, y) as usize];
                pixels[(oy + y) * width + ox + x] = model.decode(color);
            }
        }
    }
    write_png(&Raster::from_pixels(width, height, pixels), path, 4)
}

/// Write the palettes as a swatch grid, one row per palette.
pub fn write_palette_preview(
    t: &Tilization,
    model: ColorModel,
    caps: PaletteCaps,
    path: &Path,
) -> Result<()> {
    let width = caps.budget().max(1);
    let height = t.palettes().len().max(1);

    let mut pixels = vec![crate::platform::Bgr::BLACK; width * height];
    for (row, palette) in t.palettes().iter().enumerate() {
        for (col, &color) in palette.colors().iter().take(width).enumerate() {
            pixels[row * width + col] = model.decode(color);
        }
    }
    write_png(&Raster::from_pixels(width, height, pixels), path, 32)
}

fn cell_size(t: &Tilization) -> (usize, usize) {
    t.patterns()
        .first()
        .map_or((1, 1), |p| (p.width(), p.height()))
}

fn write_png(raster: &Raster, path: &Path, scale: usize) -> Result<()> {
    let scale = scale.max(1);
    let width = (raster.width() * scale) as u32;
    let height = (raster.height() * scale) as u32;

    let img = RgbImage::from_fn(width.max(1), height.max(1), |x, y| {
        if raster.width() == 0 || raster.height() == 0 {
            return image::Rgb([0, 0, 0]);
        }
        let px = raster.get(x as usize / scale, y as usize / scale);
        image::Rgb([px.r, px.g, px.b])
    });

    img.save(path).map_err(|e| TileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write preview: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Bgr, Platform};
    use crate::tile::{tilize, TilizeConfig};
    use tempfile::tempdir;

    fn sample_raster() -> Raster {
        // 16x16 of four solid 8x8 cells in three colours
        let colors = [
            Bgr::new(0x20, 0x20, 0x20),
            Bgr::new(0xE0, 0xE0, 0xE0),
            Bgr::new(0x20, 0x20, 0x20),
            Bgr::new(0x00, 0x80, 0xFF),
        ];
        let mut pixels = vec![Bgr::BLACK; 256];
        for cy in 0..2 {
            for cx in 0..2 {
                for y in 0..8 {
                    for x in 0..8 {
                        pixels[(cy * 8 + y) * 16 + cx * 8 + x] = colors[cy * 2 + cx];
                    }
                }
            }
        }
        Raster::from_pixels(16, 16, pixels)
    }

    #[test]
    fn test_round_trip_platform_colors() {
        // expanding map -> pattern -> palette reproduces the platform
        // colour of every source pixel exactly
        let raster = sample_raster();
        let model = ColorModel::Pce;
        let t = tilize(&raster, model, &TilizeConfig::new(8, 8, Platform::Pce.bg_caps()));

        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let expected = model.encode(raster.get(x, y));
                let cell = t.map().get(x / 8, y / 8);
                let pat = &t.patterns()[cell.pattern as usize];
                let palette = &t.palettes()[pat.palette() as usize];
                let got = palette.colors()[pat.get(x % 8, y % 8) as usize];
                assert_eq!(got, expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_reconstruct_pce_pixels() {
        // PCE decode recovers channel_bits * 32; re-encoding the
        // reconstruction gives back the same platform colours
        let raster = sample_raster();
        let model = ColorModel::Pce;
        let t = tilize(&raster, model, &TilizeConfig::new(8, 8, Platform::Pce.bg_caps()));

        let rebuilt = reconstruct(&t, model);

        assert_eq!(rebuilt.width(), raster.width());
        assert_eq!(rebuilt.height(), raster.height());
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                assert_eq!(
                    model.encode(rebuilt.get(x, y)),
                    model.encode(raster.get(x, y))
                );
            }
        }
    }

    #[test]
    fn test_preview_files_written() {
        let dir = tempdir().unwrap();
        let raster = sample_raster();
        let model = ColorModel::Pce;
        let caps = Platform::Pce.bg_caps();
        let t = tilize(&raster, model, &TilizeConfig::new(8, 8, caps));

        let map_png = dir.path().join("m.preview.png");
        let pat_png = dir.path().join("p.preview.png");
        let pal_png = dir.path().join("c.preview.png");
        write_map_preview(&t, model, &map_png).unwrap();
        write_pattern_preview(&t, model, &pat_png).unwrap();
        write_palette_preview(&t, model, caps, &pal_png).unwrap();

        let img = image::open(&map_png).unwrap();
        assert_eq!(img.width(), 32); // 16 source pixels at scale 2
        assert!(pat_png.exists());
        assert!(pal_png.exists());
    }
}
