//! Command line interface.

pub mod convert;

use std::path::PathBuf;

use clap::Parser;

/// retrotile - bitmap to retro console tile data converter
#[derive(Parser, Debug)]
#[command(name = "retrotile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target platform: PCE, FC, GB, or CGB (case-insensitive substring
    /// match; unknown tokens fall back to PCE)
    pub platform: Option<String>,

    /// Directory scanned for .res manifests (defaults to the current
    /// directory)
    pub directory: Option<PathBuf>,

    /// Write artifacts here instead of next to the manifests
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write a reconstructed .preview.png per conversion
    #[arg(long)]
    pub preview: bool,
}
