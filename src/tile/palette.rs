//! Candidate palette construction.
//!
//! Every grouping policy yields one palette per group: per unique pattern
//! (the default), per map row, or per 2x2 block of map cells. Palettes are
//! kept sorted and duplicate-free at all times.

use crate::platform::PlatformColor;

use super::pattern::{ColorPattern, TileMap};

/// An ordered, duplicate-free set of platform colours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette(Vec<PlatformColor>);

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary colours; sorts and deduplicates.
    pub fn from_colors(mut colors: Vec<PlatformColor>) -> Self {
        colors.sort_unstable();
        colors.dedup();
        Self(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[PlatformColor] {
        &self.0
    }

    pub fn contains(&self, color: PlatformColor) -> bool {
        self.0.binary_search(&color).is_ok()
    }

    /// Offset of a colour within the palette.
    pub fn position(&self, color: PlatformColor) -> Option<usize> {
        self.0.binary_search(&color).ok()
    }

    /// Add every distinct colour of a pattern, keeping sort order.
    pub fn absorb(&mut self, pattern: &ColorPattern) {
        for &c in pattern.cells() {
            if let Err(at) = self.0.binary_search(&c) {
                self.0.insert(at, c);
            }
        }
    }

    /// Union of two palettes, merging the sorted runs.
    pub fn union(&self, other: &Palette) -> Palette {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let next = if a[i] <= b[j] {
                if a[i] == b[j] {
                    j += 1;
                }
                let c = a[i];
                i += 1;
                c
            } else {
                let c = b[j];
                j += 1;
                c
            };
            merged.push(next);
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        Palette(merged)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// How patterns are grouped into candidate palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingPolicy {
    /// One palette per unique pattern.
    #[default]
    PerPattern,
    /// One palette per map row; every pattern in the row shares it.
    PerRow,
    /// One palette per 2x2 block of map cells. Odd trailing rows or
    /// columns form partial blocks of their own.
    Per2x2,
}

/// Build the candidate palettes for the chosen policy.
pub fn build_palettes(
    patterns: &[ColorPattern],
    map: &TileMap,
    policy: GroupingPolicy,
) -> Vec<Palette> {
    match policy {
        GroupingPolicy::PerPattern => patterns
            .iter()
            .map(|p| {
                let mut pal = Palette::new();
                pal.absorb(p);
                pal
            })
            .collect(),
        GroupingPolicy::PerRow => map
            .rows()
            .map(|row| {
                let mut pal = Palette::new();
                for cell in row {
                    pal.absorb(&patterns[cell.pattern as usize]);
                }
                pal
            })
            .collect(),
        GroupingPolicy::Per2x2 => {
            let mut palettes = Vec::new();
            for i in (0..map.height()).step_by(2) {
                for j in (0..map.width()).step_by(2) {
                    let mut pal = Palette::new();
                    for di in 0..2 {
                        for dj in 0..2 {
                            let (y, x) = (i + di, j + dj);
                            if y < map.height() && x < map.width() {
                                pal.absorb(&patterns[map.get(x, y).pattern as usize]);
                            }
                        }
                    }
                    palettes.push(pal);
                }
            }
            palettes
        }
    }
}
