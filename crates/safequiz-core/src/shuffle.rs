//! In-place Fisher-Yates shuffle.

use rand::Rng;

/// Shuffle `items` in place so every permutation is equally likely.
///
/// Walks from the last index down to 1, swapping each slot with a partner
/// drawn uniformly from `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A fresh presentation order for `len` options: a shuffled `0..len`.
pub fn shuffled_positions<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    fisher_yates(&mut order, rng);
    order
}
