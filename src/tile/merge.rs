//! Greedy palette merging.
//!
//! Collapses the per-group candidate palettes into as few palettes as the
//! per-palette colour budget allows. Pairs are tried first-fit in
//! lexicographic order and the scan restarts after every merge, so an
//! enlarged palette gets another chance to absorb later ones. The result
//! is deterministic for a given input.

use super::palette::Palette;

/// Merge palettes in place, then compact away the emptied slots.
///
/// Returns the redirection table: `redirect[old_id]` is the surviving
/// palette id after compaction. On return, no two surviving palettes have
/// a union that still fits `budget`.
pub fn merge_palettes(palettes: &mut Vec<Palette>, budget: usize) -> Vec<u32> {
    let mut redirect: Vec<u32> = (0..palettes.len() as u32).collect();

    'scan: loop {
        for i in 0..palettes.len() {
            for j in (i + 1)..palettes.len() {
                if palettes[i].is_empty() || palettes[j].is_empty() {
                    continue;
                }
                let union = palettes[i].union(&palettes[j]);
                if union.len() <= budget {
                    palettes[i] = union;
                    palettes[j].clear();
                    for r in redirect.iter_mut() {
                        if *r == j as u32 {
                            *r = i as u32;
                        }
                    }
                    continue 'scan;
                }
            }
        }
        break;
    }

    compact(palettes, &mut redirect);
    redirect
}

/// Renumber surviving ids densely and drop emptied palettes.
fn compact(palettes: &mut Vec<Palette>, redirect: &mut [u32]) {
    let mut survivors: Vec<u32> = redirect.to_vec();
    survivors.sort_unstable();
    survivors.dedup();

    for r in redirect.iter_mut() {
        // survivors is sorted, so the rank is the new id
        *r = survivors.binary_search(r).expect("id must survive") as u32;
    }

    palettes.retain(|p| !p.is_empty());
}
