//! The conversion loop.
//!
//! Scans the working directory for manifests, decodes each referenced
//! image, runs the tilization kernel, and writes the platform blobs. A
//! failing resource is reported and skipped; the batch always runs to
//! completion and the process exits 0.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::{find_manifests, parse_manifest, Record};
use crate::emit::{self, check_capacity};
use crate::error::{Result, TileError};
use crate::output::{display_path, plural, Printer};
use crate::platform::{ColorModel, PaletteCaps, Platform, PlatformArg};
use crate::preview;
use crate::raster::Raster;
use crate::tile::{tilize, GroupingPolicy, Tilization, TilizeConfig};

use super::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let printer = Printer::new();

    let platform = match cli.platform.as_deref().and_then(Platform::from_token) {
        Some(PlatformArg::Platform(p)) => p,
        Some(PlatformArg::Help) => {
            print_usage();
            return Ok(());
        }
        None => Platform::Pce,
    };

    printer.info("Platform", platform.name());
    if platform == Platform::Gbc {
        printer.warning("Skipping", "CGB conversion is not implemented");
        return Ok(());
    }

    let dir = cli.directory.clone().unwrap_or_else(|| PathBuf::from("."));
    let out_dir = cli.output.clone().unwrap_or_else(|| dir.clone());
    if !out_dir.exists() {
        fs::create_dir_all(&out_dir).map_err(|e| TileError::Io {
            path: out_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let manifests = find_manifests(&dir)?;
    if manifests.is_empty() {
        printer.warning(
            "Discovered",
            &format!("no .res manifests in {}", display_path(&dir)),
        );
        return Ok(());
    }
    printer.info(
        "Discovered",
        &plural(manifests.len(), "manifest", "manifests"),
    );

    let job = Job {
        platform,
        dir: &dir,
        out_dir: &out_dir,
        preview: cli.preview,
        printer: &printer,
    };

    let mut converted = 0usize;
    let mut failed = 0usize;
    for manifest in &manifests {
        printer.status("Reading", &display_path(manifest));
        let content = match fs::read_to_string(manifest) {
            Ok(content) => content,
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", display_path(manifest), e));
                failed += 1;
                continue;
            }
        };

        for record in parse_manifest(&content) {
            match record {
                Err(e) => {
                    printer.error("Skipping", &format!("{}: {}", display_path(manifest), e));
                    failed += 1;
                }
                Ok(record) => match process_record(&job, &record) {
                    Ok(true) => converted += 1,
                    Ok(false) => {}
                    Err(e) => {
                        printer.error(
                            "Failed",
                            &format!("{} {}: {}", record.kind(), record.name(), e),
                        );
                        failed += 1;
                    }
                },
            }
        }
    }

    printer.status(
        "Finished",
        &format!(
            "{}, {} failed",
            plural(converted, "resource", "resources"),
            failed
        ),
    );
    Ok(())
}

fn print_usage() {
    println!("Usage : retrotile [Platform] [Resource folder]");
    println!("\tPlatform : PCE, FC, GB, CGB(GBC)");
}

/// Everything a single record conversion needs.
struct Job<'a> {
    platform: Platform,
    dir: &'a Path,
    out_dir: &'a Path,
    preview: bool,
    printer: &'a Printer,
}

impl Job<'_> {
    fn model(&self) -> ColorModel {
        self.platform.color_model()
    }

    /// Resolve and decode a record's source image, relative to the
    /// resource directory.
    fn load(&self, record: &Record) -> Result<Raster> {
        let file = record.file();
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dir.join(file)
        };
        Raster::load(&path)
    }

    fn announce(&self, record: &Record) {
        self.printer.status(
            "Converting",
            &format!(
                "{} ({} {})",
                record.name(),
                self.platform.name(),
                record.kind()
            ),
        );
    }

    fn preview_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.preview.png"))
    }

    fn report_capacity(&self, t: &Tilization, caps: PaletteCaps) {
        self.printer.info(
            "Emitted",
            &format!(
                "{} / {} palettes, {}",
                t.palettes().len(),
                caps.palette_cap,
                plural(t.patterns().len(), "pattern", "patterns")
            ),
        );
        for note in check_capacity(t, caps, self.platform.pattern_cap()) {
            self.printer.warning("Capacity", &note.message);
        }
        if self.platform == Platform::Gb && t.patterns().len() > 128 {
            self.printer.warning(
                "Capacity",
                &format!(
                    "{} patterns spill into the shared pattern area (128 dedicated)",
                    t.patterns().len()
                ),
            );
        }
    }

    /// Per-row animation frame report for sprite sheets.
    fn report_animation(&self, t: &Tilization) {
        self.printer
            .info("Sprites", &plural(t.map().height(), "strip", "strips"));
        for (i, row) in t.map().rows().enumerate() {
            let frames: Vec<String> = row.iter().map(|c| c.pattern.to_string()).collect();
            self.printer
                .info("Animation", &format!("strip {}: {}", i, frames.join(", ")));
        }
    }
}

fn process_record(job: &Job, record: &Record) -> Result<bool> {
    match job.platform {
        Platform::Pce => process_pce(job, record),
        Platform::Fc => process_fc(job, record),
        Platform::Gb => process_gb(job, record),
        Platform::Gbc => Ok(false),
    }
}

/// PCE: 16x16 BG tiles with per-pattern palette sidecars, an 8x8 image
/// mode addressed through the BAT, and multi-size sprites.
fn process_pce(job: &Job, record: &Record) -> Result<bool> {
    let caps = job.platform.bg_caps();
    match record {
        Record::Palette { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(16, 16, caps));
            emit::pce::palette_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_palette_preview(&t, job.model(), caps, &job.preview_path(name))?;
            }
        }
        Record::Tileset { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(16, 16, caps));
            emit::pce::bg_pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            emit::pce::pattern_palette_artifact(&t, emit::pce::BG_PALETTE_SHIFT, name)
                .write(job.out_dir, &format!("{name}.pal"))?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::ImageTileset { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::pce::image_pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::Map { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(16, 16, caps));
            emit::map_artifact(&t, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_map_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::ImageMap { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::pce::bat_artifact(&t, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_map_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::Sprite {
            name,
            width,
            height,
            ..
        } => {
            let (w, h) = sprite_size(job.platform, *width, *height)?;
            let caps = job.platform.sprite_caps();
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(w, h, caps));
            emit::pce::sprite_pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            emit::pce::pattern_palette_artifact(&t, 0, name)
                .write(job.out_dir, &format!("{name}.pal"))?;
            job.report_capacity(&t, caps);
            job.report_animation(&t);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
    }
    Ok(true)
}

/// FC: 8x8 tiles, palette ids carried per 2x2 cells through the packed
/// attribute table. Image mode does not exist here.
fn process_fc(job: &Job, record: &Record) -> Result<bool> {
    let caps = job.platform.bg_caps();
    match record {
        Record::Palette { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::fc::palette_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_palette_preview(&t, job.model(), caps, &job.preview_path(name))?;
            }
        }
        Record::Tileset { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::fc::pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::Map { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            // the attribute table shares one palette per 2x2 cells, so
            // palettes are grouped that way from the start
            let config =
                TilizeConfig::new(8, 8, caps).with_policy(GroupingPolicy::Per2x2);
            let t = tilize(&raster, job.model(), &config);
            emit::fc::attribute_artifact(&t, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_map_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::ImageTileset { .. } | Record::ImageMap { .. } => return Ok(false),
        Record::Sprite {
            name,
            width,
            height,
            ..
        } => {
            let (w, h) = sprite_size(job.platform, *width, *height)?;
            let caps = job.platform.sprite_caps();
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(w, h, caps));
            emit::fc::pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            job.report_animation(&t);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
    }
    Ok(true)
}

/// GB: 8x8 four-shade tiles, packed palette registers, plain id maps.
fn process_gb(job: &Job, record: &Record) -> Result<bool> {
    let caps = job.platform.bg_caps();
    match record {
        Record::Palette { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::gb::palette_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_palette_preview(&t, job.model(), caps, &job.preview_path(name))?;
            }
        }
        Record::Tileset { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::gb::pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::Map { name, .. } => {
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(8, 8, caps));
            emit::map_artifact(&t, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            if job.preview {
                preview::write_map_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
        Record::ImageTileset { .. } | Record::ImageMap { .. } => return Ok(false),
        Record::Sprite {
            name,
            width,
            height,
            ..
        } => {
            let (w, h) = sprite_size(job.platform, *width, *height)?;
            let caps = job.platform.sprite_caps();
            let raster = job.load(record)?;
            job.announce(record);
            let t = tilize(&raster, job.model(), &TilizeConfig::new(w, h, caps));
            emit::gb::pattern_artifact(&t, caps, name).write(job.out_dir, name)?;
            job.report_capacity(&t, caps);
            job.report_animation(&t);
            if job.preview {
                preview::write_pattern_preview(&t, job.model(), &job.preview_path(name))?;
            }
        }
    }
    Ok(true)
}

fn sprite_size(platform: Platform, width_units: u32, height_units: u32) -> Result<(usize, usize)> {
    platform
        .sprite_size(width_units, height_units)
        .ok_or_else(|| TileError::Resource {
            message: format!(
                "Sprite size not supported: {}x{}",
                width_units * 8,
                height_units * 8
            ),
            help: Some(match platform {
                Platform::Pce => "PCE sprites are 16 or 32 wide and 16, 32, or 64 tall".to_string(),
                _ => "sprites are 8 wide and 8 or 16 tall".to_string(),
            }),
        })
}
