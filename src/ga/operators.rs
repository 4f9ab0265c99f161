//! Permutation operators for route chromosomes.
//!
//! These operate on slices of stop indices. The values need not be
//! `0..n`: the fixed-endpoint variant evolves permutations of an arbitrary
//! subset of stops. Every operator maps permutations to permutations of
//! the same value set.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation
//!
//! - [`swap_mutation`]: per-position swap with a random partner
//! - [`inversion_mutation`]: reverse a random segment (2-opt move)
//! - [`mutate`]: swap followed by inversion, as applied to every offspring
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::seq::{index, SliceRandom};
use rand::Rng;

// ============================================================================
// Initialization
// ============================================================================

/// Returns a uniformly random permutation of `genes`.
pub fn random_permutation<R: Rng>(genes: &[usize], rng: &mut R) -> Vec<usize> {
    let mut perm = genes.to_vec();
    perm.shuffle(rng);
    perm
}

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) for permutations.
///
/// Preserves the **relative order** of stops from both parents.
///
/// # Algorithm
///
/// 1. Pick two distinct cut points `a < b`
/// 2. Copy `parent[a..=b]` into the child at the same positions
/// 3. Starting after `b` and wrapping around, fill the remaining positions
///    with the other parent's stops in their circular order from `b + 1`,
///    skipping stops already present
///
/// The two children swap the segment-donor role.
///
/// # Complexity
/// O(n) time, O(max value) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (a, b) = cut_points(n, rng);

    let child1 = ox_build_child(parent1, parent2, a, b);
    let child2 = ox_build_child(parent2, parent1, a, b);

    (child1, child2)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = template.len();
    let bound = template.iter().copied().max().map_or(0, |m| m + 1);
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; bound];

    for i in a..=b {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    // n - (b - a + 1) values remain, so `pos` never reaches the segment.
    let mut pos = (b + 1) % n;
    for offset in 0..n {
        let val = donor[(b + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: each position independently, with probability `rate`,
/// exchanges its stop with a uniformly random position (possibly itself).
///
/// # Complexity
/// O(n)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) {
    let n = perm.len();
    for i in 0..n {
        if rng.random_range(0.0..1.0) < rate {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
        }
    }
}

/// Inversion mutation: with probability `rate`, reverse the segment between
/// two distinct random positions. Tours of two stops or fewer are left
/// unchanged.
///
/// # Complexity
/// O(n) worst case for segment reversal
pub fn inversion_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) {
    if rng.random_range(0.0..1.0) < rate && perm.len() > 2 {
        let (a, b) = cut_points(perm.len(), rng);
        perm[a..=b].reverse();
    }
}

/// Applies swap mutation at `mutation_rate`, then inversion mutation at
/// half that rate.
pub fn mutate<R: Rng>(perm: &mut [usize], mutation_rate: f64, rng: &mut R) {
    swap_mutation(perm, mutation_rate, rng);
    inversion_mutation(perm, mutation_rate / 2.0, rng);
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct positions in `0..n`, sorted. Requires `n >= 2`.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (x, y) = (picked.index(0), picked.index(1));
    if x < y {
        (x, y)
    } else {
        (y, x)
    }
}

// ============================================================================
// Tests
// ============================================================================
