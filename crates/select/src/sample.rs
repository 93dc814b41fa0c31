//! Uniform subsampling without replacement.

use rand::Rng;

/// Keeps `k` items drawn uniformly without replacement, in draw order.
///
/// Partial Fisher-Yates: only the first `k` positions are shuffled.
/// Requires `k <= items.len()`.
pub(crate) fn subsample_in_place<T>(items: &mut Vec<T>, k: usize, rng: &mut impl Rng) {
    debug_assert!(k <= items.len());
    let n = items.len();
    for i in 0..k {
        let j = rng.random_range(i..n);
        items.swap(i, j);
    }
    items.truncate(k);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn keeps_exactly_k_distinct_items() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<usize> = (0..100).collect();
        subsample_in_place(&mut items, 30, &mut rng);
        assert_eq!(items.len(), 30);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 30);
        assert!(items.iter().all(|&i| i < 100));
    }

    #[test]
    fn full_size_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut items: Vec<usize> = (0..20).collect();
        subsample_in_place(&mut items, 20, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn zero_empties() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut items = vec![1, 2, 3];
        subsample_in_place(&mut items, 0, &mut rng);
        assert!(items.is_empty());
    }

    #[test]
    fn roughly_uniform_inclusion() {
        // Each of 10 items should be kept about half the time when k = 5.
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 10];
        for _ in 0..4000 {
            let mut items: Vec<usize> = (0..10).collect();
            subsample_in_place(&mut items, 5, &mut rng);
            for i in items {
                counts[i] += 1;
            }
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!((1800..=2200).contains(&c), "item {i} kept {c} times");
        }
    }
}
