//! Palette assignment and colour-index rewriting.
//!
//! After the merge, every pattern is bound to exactly one surviving
//! palette (chosen by the grouping policy) and its platform colours are
//! rewritten as offsets into that palette.

use super::palette::{GroupingPolicy, Palette};
use super::pattern::{ColorPattern, IndexedPattern, TileMap};

/// Rewrite every colour pattern against its assigned palette.
///
/// The output is index-aligned with `patterns`. For the row and 2x2
/// policies a pattern referenced by several groups keeps the first
/// assignment it receives in scan order.
pub fn index_patterns(
    patterns: &[ColorPattern],
    palettes: &[Palette],
    redirect: &[u32],
    map: &TileMap,
    policy: GroupingPolicy,
) -> Vec<IndexedPattern> {
    match policy {
        GroupingPolicy::PerPattern => patterns
            .iter()
            .enumerate()
            .map(|(i, p)| rewrite(p, redirect[i], palettes))
            .collect(),
        GroupingPolicy::PerRow => {
            let mut indexed: Vec<IndexedPattern> = patterns
                .iter()
                .map(|p| IndexedPattern::unassigned(p.width(), p.height()))
                .collect();
            for (row_idx, row) in map.rows().enumerate() {
                let palette = redirect[row_idx];
                for cell in row {
                    let id = cell.pattern as usize;
                    if !indexed[id].is_assigned() {
                        indexed[id] = rewrite(&patterns[id], palette, palettes);
                    }
                }
            }
            indexed
        }
        GroupingPolicy::Per2x2 => {
            let mut indexed: Vec<IndexedPattern> = patterns
                .iter()
                .map(|p| IndexedPattern::unassigned(p.width(), p.height()))
                .collect();
            let mut block = 0usize;
            for i in (0..map.height()).step_by(2) {
                for j in (0..map.width()).step_by(2) {
                    let palette = redirect[block];
                    block += 1;
                    for di in 0..2 {
                        for dj in 0..2 {
                            let (y, x) = (i + di, j + dj);
                            if y >= map.height() || x >= map.width() {
                                continue;
                            }
                            let id = map.get(x, y).pattern as usize;
                            if !indexed[id].is_assigned() {
                                indexed[id] = rewrite(&patterns[id], palette, palettes);
                            }
                        }
                    }
                }
            }
            indexed
        }
    }
}

fn rewrite(pattern: &ColorPattern, palette_id: u32, palettes: &[Palette]) -> IndexedPattern {
    let palette = &palettes[palette_id as usize];
    let indices = pattern
        .cells()
        .iter()
        .map(|&c| {
            // the merge preserved every group union, so the colour must be
            // present; a miss is a tilization bug
            palette.position(c).unwrap_or_else(|| {
                debug_assert!(false, "colour {c:#x} missing from palette {palette_id}");
                0
            }) as u8
        })
        .collect();
    IndexedPattern::new(palette_id, pattern.width(), pattern.height(), indices)
}
