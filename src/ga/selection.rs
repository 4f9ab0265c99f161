//! Tournament selection.
//!
//! Both the full-route and the fixed-endpoint variants choose parents the
//! same way: sample `k` distinct tours, keep the shortest.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use super::types::Tour;

/// Tournament selection without replacement.
///
/// Draws `k` distinct tours (clamped to `1..=population.len()`) and returns
/// the index of the one with the smallest distance. Ties go to the tour
/// drawn first.
///
/// Higher `k` = stronger selection pressure.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Tour], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.clamp(1, population.len());
    let mut best: Option<usize> = None;
    for idx in index::sample(rng, population.len(), k).iter() {
        match best {
            Some(b) if population[idx].distance() >= population[b].distance() => {}
            _ => best = Some(idx),
        }
    }
    best.unwrap_or(0)
}
