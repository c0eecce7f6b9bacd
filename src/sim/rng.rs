//! Injectable randomness
//!
//! Everything random in a session (classification, label, position, speed)
//! goes through [`RandomSource`] so tests can script the outcomes.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the random draws the spawner needs
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_f32(&mut self) -> f32;

    /// `true` with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in `[0, len)`
    ///
    /// Always consumes one sample, even for a single-element pool.
    fn pick_index(&mut self, len: usize) -> usize {
        let sample = self.next_f32();
        ((sample * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniform sample in `[lo, hi]`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f32() * (hi - lo)
    }
}

/// Seeded PCG source used by real sessions
#[derive(Debug, Clone)]
pub struct PcgRandom {
    rng: Pcg32,
}

impl PcgRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place, driven by this source
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl RandomSource for PcgRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, then repeats the last one (or wraps)
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRandom {
    samples: Vec<f32>,
    cursor: usize,
    wrap: bool,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(samples: &[f32]) -> Self {
        Self {
            samples: samples.to_vec(),
            cursor: 0,
            wrap: false,
        }
    }

    pub(crate) fn cycling(samples: &[f32]) -> Self {
        Self {
            wrap: true,
            ..Self::new(samples)
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let len = self.samples.len();
        let index = if self.wrap && len > 0 {
            self.cursor % len
        } else {
            self.cursor.min(len.saturating_sub(1))
        };
        self.cursor += 1;
        self.samples.get(index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = PcgRandom::new(42);
        let mut b = PcgRandom::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_pick_index_in_bounds() {
        let mut rng = ScriptedRandom::new(&[0.0, 0.5, 0.999_999]);
        assert_eq!(rng.pick_index(4), 0);
        assert_eq!(rng.pick_index(4), 2);
        assert_eq!(rng.pick_index(4), 3);
    }

    #[test]
    fn test_scripted_wraps() {
        let mut rng = ScriptedRandom::cycling(&[0.1, 0.2]);
        let drawn: Vec<f32> = (0..5).map(|_| rng.next_f32()).collect();
        assert_eq!(drawn, [0.1, 0.2, 0.1, 0.2, 0.1]);
    }

    #[test]
    fn test_range_degenerate() {
        let mut rng = ScriptedRandom::new(&[0.7]);
        assert_eq!(rng.range(10.0, 10.0), 10.0);
        assert_eq!(rng.range(10.0, 5.0), 10.0);
        assert!((rng.range(0.0, 10.0) - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = PcgRandom::new(7);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        PcgRandom::new(11).shuffle(&mut a);
        PcgRandom::new(11).shuffle(&mut b);
        assert_eq!(a, b);
    }
}
