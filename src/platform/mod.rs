//! Target platform selection and hardware capacity profiles.
//!
//! Platform differences are carried as data (colour model, palette caps,
//! accepted sprite sizes) rather than behavior; emitters select on the
//! [`Platform`] value.

pub mod color;

pub use color::{Bgr, ColorModel, PlatformColor};

/// A target graphics subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Pce,
    Fc,
    Gb,
    /// Recognized on the command line but not implemented.
    Gbc,
}

/// Result of matching a platform token on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    Platform(Platform),
    Help,
}

impl Platform {
    /// Match a command-line token against the known platform names.
    ///
    /// Matching is case-insensitive and accepts substrings ("pce-fast"
    /// selects PCE). Precedence: PCE, then FC, then GBC/CGB, then GB, then
    /// HELP, so "gbc" never falls through to the GB arm.
    pub fn from_token(token: &str) -> Option<PlatformArg> {
        let t = token.to_uppercase();
        if t.contains("PCE") {
            Some(PlatformArg::Platform(Platform::Pce))
        } else if t.contains("FC") {
            Some(PlatformArg::Platform(Platform::Fc))
        } else if t.contains("GBC") || t.contains("CGB") {
            Some(PlatformArg::Platform(Platform::Gbc))
        } else if t.contains("GB") {
            Some(PlatformArg::Platform(Platform::Gb))
        } else if t.contains("HELP") {
            Some(PlatformArg::Help)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Pce => "PCE",
            Platform::Fc => "FC",
            Platform::Gb => "GB",
            Platform::Gbc => "CGB(GBC)",
        }
    }

    pub fn color_model(self) -> ColorModel {
        match self {
            Platform::Pce => ColorModel::Pce,
            Platform::Fc => ColorModel::Fc,
            Platform::Gb | Platform::Gbc => ColorModel::Gb,
        }
    }

    /// Palette capacities for background conversions.
    pub fn bg_caps(self) -> PaletteCaps {
        match self {
            Platform::Pce => PaletteCaps::new(16, 16, 1),
            Platform::Fc => PaletteCaps::new(4, 4, 1),
            // GB BG palette has no dedicated transparent slot
            Platform::Gb | Platform::Gbc => PaletteCaps::new(1, 4, 0),
        }
    }

    /// Palette capacities for sprite conversions.
    pub fn sprite_caps(self) -> PaletteCaps {
        match self {
            Platform::Pce => PaletteCaps::new(16, 16, 1),
            Platform::Fc => PaletteCaps::new(4, 4, 1),
            Platform::Gb | Platform::Gbc => PaletteCaps::new(2, 4, 1),
        }
    }

    /// Hard cap on unique patterns, where the hardware has one.
    pub fn pattern_cap(self) -> Option<usize> {
        match self {
            Platform::Pce => None,
            Platform::Fc | Platform::Gb | Platform::Gbc => Some(256),
        }
    }

    /// Validate a sprite size given in 8-pixel units; returns the pixel
    /// dimensions when the hardware supports them.
    pub fn sprite_size(self, width_units: u32, height_units: u32) -> Option<(usize, usize)> {
        let w = (width_units * 8) as usize;
        let h = (height_units * 8) as usize;
        let ok = match self {
            Platform::Pce => matches!(w, 16 | 32) && matches!(h, 16 | 32 | 64),
            Platform::Fc | Platform::Gb => w == 8 && matches!(h, 8 | 16),
            Platform::Gbc => false,
        };
        ok.then_some((w, h))
    }
}

/// Palette capacity profile for one conversion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteCaps {
    /// How many palettes the hardware offers.
    pub palette_cap: usize,
    /// Colours per palette, counting the reserved slot.
    pub color_cap: usize,
    /// Reserved slots at the front of each palette (transparent/background).
    pub reserved: usize,
}

impl PaletteCaps {
    pub const fn new(palette_cap: usize, color_cap: usize, reserved: usize) -> Self {
        Self {
            palette_cap,
            color_cap,
            reserved,
        }
    }

    /// Colours a palette may actually hold.
    pub const fn budget(self) -> usize {
        self.color_cap - self.reserved
    }
}
