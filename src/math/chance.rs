//! "1 in N" random events

use rand::Rng;

/// Roll a "1 in `n`" event: fires when a uniform draw from `[0, n)` is zero.
///
/// `n == 0` disables the event and consumes no randomness.
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n != 0 && rng.random_range(0..n) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TRIALS: u32 = 100_000;

    #[test]
    fn test_one_in_four_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hits = (0..TRIALS).filter(|_| one_in(&mut rng, 4)).count();
        let rate = hits as f64 / TRIALS as f64;
        // Standard deviation is ~0.00137 at this trial count
        assert!((rate - 0.25).abs() < 0.01, "rate was {}", rate);
    }

    #[test]
    fn test_one_in_zero_never_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hits = (0..TRIALS).filter(|_| one_in(&mut rng, 0)).count();
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_one_in_zero_consumes_nothing() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            one_in(&mut a, 0);
        }
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_one_in_one_always_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..1000).all(|_| one_in(&mut rng, 1)));
    }
}
