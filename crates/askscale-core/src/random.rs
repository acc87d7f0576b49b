//! Injectable random source for tie-breaking among eligible entries.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Uniform index generator used by every selection policy.
pub trait RandomSource {
    /// Uniformly random index in `0..len`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;
}

/// Pick one element uniformly at random, or `None` for an empty slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.index(items.len());
    items.get(idx)
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Production source: the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a scripted sequence of draws, each reduced modulo `len`.
///
/// Once the script runs out it keeps returning `0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    draws: Vec<usize>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            pos: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceSource {
    fn index(&mut self, len: usize) -> usize {
        let draw = self.draws.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        draw % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SequenceSource::default();
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn sequence_wraps_into_range() {
        let mut rng = SequenceSource::new(vec![7, 1]);
        let items = ["a", "b", "c"];
        assert_eq!(choose(&mut rng, &items), Some(&"b"));
        assert_eq!(choose(&mut rng, &items), Some(&"b"));
        assert_eq!(choose(&mut rng, &items), Some(&"a"));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn seeded_source_is_reproducible_and_in_range() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for len in 1..50 {
            let x = a.index(len);
            assert_eq!(x, b.index(len));
            assert!(x < len);
        }
    }

    #[test]
    fn thread_source_in_range() {
        let mut rng = RngSource::thread();
        for _ in 0..100 {
            assert!(rng.index(3) < 3);
        }
    }
}
