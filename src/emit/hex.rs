//! Paired artifact output: a raw binary blob plus its hex transcription.
//!
//! Every emitted resource lands as `Name.bin` and `Name.txt`, the latter a
//! C array (`const uN Name[] = { 0x.., ... };`) ready to paste into
//! homebrew source. Multi-byte words are written little-endian.

use std::fs;
use std::path::Path;

use crate::error::{Result, TileError};

/// A platform blob under construction: words grouped into text lines.
#[derive(Debug, Clone)]
pub struct HexArtifact {
    ident: String,
    word_bits: usize,
    lines: Vec<Vec<u16>>,
}

impl HexArtifact {
    /// An artifact of 8-bit words.
    pub fn u8(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            word_bits: 8,
            lines: Vec::new(),
        }
    }

    /// An artifact of 16-bit words.
    pub fn u16(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            word_bits: 16,
            lines: Vec::new(),
        }
    }

    /// Append one text line's worth of words.
    pub fn push_line(&mut self, words: Vec<u16>) {
        self.lines.push(words);
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|l| l.len()).sum()
    }

    /// Serialize to raw bytes; u16 words become little-endian pairs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.word_count() * self.word_bits / 8);
        for word in self.lines.iter().flatten() {
            match self.word_bits {
                8 => bytes.push(*word as u8),
                _ => bytes.extend_from_slice(&word.to_le_bytes()),
            }
        }
        bytes
    }

    /// Render the C array transcription.
    pub fn render_text(&self) -> String {
        let digits = self.word_bits / 4;
        let total = self.word_count();
        let mut out = format!("const u{} {}[] = {{\n", self.word_bits, self.ident);
        let mut written = 0usize;
        for line in &self.lines {
            if line.is_empty() {
                continue;
            }
            out.push('\t');
            for word in line {
                written += 1;
                out.push_str(&format!("0x{:0digits$x}", word, digits = digits));
                if written < total {
                    out.push_str(", ");
                }
            }
            out.push('\n');
        }
        out.push_str("};\n");
        out
    }

    /// Write `stem.bin` and `stem.txt` into `dir`.
    pub fn write(&self, dir: &Path, stem: &str) -> Result<()> {
        let bin_path = dir.join(format!("{stem}.bin"));
        fs::write(&bin_path, self.to_bytes()).map_err(|e| TileError::Io {
            path: bin_path.clone(),
            message: format!("Failed to write blob: {}", e),
        })?;

        let txt_path = dir.join(format!("{stem}.txt"));
        fs::write(&txt_path, self.render_text()).map_err(|e| TileError::Io {
            path: txt_path.clone(),
            message: format!("Failed to write transcription: {}", e),
        })?;

        Ok(())
    }
}
