//! Deterministic inlining-site selection
//!
//! Every randomized trial activates a subset of inlining sites chosen from a
//! seed and an inclusion threshold. The same rule generates the subset file
//! for a trial build and reconstructs that trial's row of the regression
//! matrix, so it must be bit-for-bit reproducible:
//!
//! - generator: `Xoshiro256PlusPlus::seed_from_u64(seed as u64)`
//! - draw: `next_u32()` reduced to `[0, 100)` with Lemire's widening
//!   multiply, rejecting the biased low zone
//! - site `i` is active iff the `i`th draw is strictly below the threshold
//!
//! Changing any of these silently invalidates every existing trial file.

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Draws are uniform over `0..DRAW_RANGE`; thresholds are percentages
pub const DRAW_RANGE: u32 = 100;

/// Default inclusion percentage for generated subsets
pub const DEFAULT_THRESHOLD: i32 = 67;

/// Uniform integer in `0..n` from a full-range 32-bit draw
///
/// Lemire's nearly-divisionless method: `x * n` is split into a high word
/// (the result) and a low word, and draws whose low word falls under
/// `2^32 mod n` are retried.
pub fn draw_below<R: RngCore + ?Sized>(rng: &mut R, n: u32) -> u32 {
    debug_assert!(n > 0, "draw range must be non-empty");

    let mut m = u64::from(rng.next_u32()) * u64::from(n);
    let mut low = m as u32;
    if low < n {
        let zone = n.wrapping_neg() % n;
        while low < zone {
            m = u64::from(rng.next_u32()) * u64::from(n);
            low = m as u32;
        }
    }
    (m >> 32) as u32
}

/// Active/inactive flag for each of `site_count` sites in one trial
///
/// Thresholds at or below 0 activate nothing; at or above 100, everything.
pub fn select(seed: i64, threshold: i32, site_count: usize) -> Vec<bool> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed as u64);
    (0..site_count)
        .map(|_| (draw_below(&mut rng, DRAW_RANGE) as i64) < i64::from(threshold))
        .collect()
}

/// Indices of the active sites, in ascending order
pub fn active_indices(seed: i64, threshold: i32, site_count: usize) -> Vec<usize> {
    select(seed, threshold, site_count)
        .into_iter()
        .enumerate()
        .filter_map(|(i, active)| active.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of 32-bit outputs
    struct SequenceRng {
        values: Vec<u32>,
        pos: usize,
    }

    impl SequenceRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                pos: 0,
            }
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.pos];
            self.pos += 1;
            v
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!("not used by draw_below")
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_draw_below_maps_high_word() {
        let mut rng = SequenceRng::new(&[1_803_886_266]);
        assert_eq!(draw_below(&mut rng, 100), 42);
        assert_eq!(rng.pos, 1);
    }

    #[test]
    fn test_draw_below_max_input() {
        let mut rng = SequenceRng::new(&[u32::MAX]);
        assert_eq!(draw_below(&mut rng, 100), 99);
    }

    #[test]
    fn test_draw_below_rejects_biased_zone() {
        // 0 * 100 has a low word of 0, inside the 96-wide rejection zone
        let mut rng = SequenceRng::new(&[0, u32::MAX]);
        assert_eq!(draw_below(&mut rng, 100), 99);
        assert_eq!(rng.pos, 2);

        // low word 68 is below n but also inside the zone
        let mut rng = SequenceRng::new(&[1_803_886_265, 1_803_886_266]);
        assert_eq!(draw_below(&mut rng, 100), 42);
        assert_eq!(rng.pos, 2);
    }

    #[test]
    fn test_draw_below_stays_in_range() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(draw_below(&mut rng, DRAW_RANGE) < DRAW_RANGE);
        }
    }

    #[test]
    fn test_select_is_deterministic() {
        let a = select(12345, 67, 500);
        let b = select(12345, 67, 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_prefix_stable() {
        // Site i's decision depends only on the first i+1 draws
        let long = select(99, 50, 200);
        let short = select(99, 50, 50);
        assert_eq!(&long[..50], &short[..]);
    }

    #[test]
    fn test_select_seed_changes_selection() {
        assert_ne!(select(1, 50, 256), select(2, 50, 256));
    }

    #[test]
    fn test_threshold_zero_selects_nothing() {
        for seed in [1, 42, -7, i64::MAX] {
            assert!(select(seed, 0, 300).iter().all(|&a| !a));
        }
    }

    #[test]
    fn test_threshold_hundred_selects_everything() {
        for seed in [1, 42, -7, i64::MAX] {
            assert!(select(seed, 100, 300).iter().all(|&a| a));
        }
    }

    #[test]
    fn test_out_of_range_thresholds() {
        assert!(select(5, -10, 100).iter().all(|&a| !a));
        assert!(select(5, 250, 100).iter().all(|&a| a));
    }

    #[test]
    fn test_threshold_roughly_matches_fraction() {
        let active = select(2024, 67, 10_000).iter().filter(|&&a| a).count();
        assert!((6_300..=7_100).contains(&active), "active = {}", active);
    }

    #[test]
    fn test_larger_threshold_is_superset() {
        // Same draws, looser cut
        let narrow = select(31, 30, 400);
        let wide = select(31, 70, 400);
        for (n, w) in narrow.iter().zip(&wide) {
            assert!(!n || *w);
        }
    }

    #[test]
    fn test_active_indices() {
        let mask = select(8, 50, 64);
        let indices = active_indices(8, 50, 64);
        assert_eq!(indices.len(), mask.iter().filter(|&&a| a).count());
        for i in indices {
            assert!(mask[i]);
        }
    }

    #[test]
    fn test_zero_sites() {
        assert!(select(1, 67, 0).is_empty());
    }
}
