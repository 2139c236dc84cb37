//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1].
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / ((1u64 << 24) - 1) as f32
    }

    /// Uniform float in [min, max].
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.next_f32() * (max - min) + min
    }

    /// Either 1.0 or -1.0 with equal odds.
    pub fn sign(&mut self) -> f32 {
        if self.next_u64() & 1 == 0 { 1.0 } else { -1.0 }
    }

    /// Random integer in [0, upper_bound). Returns 0 for a zero bound.
    pub fn int_below(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Random integer in an inclusive range.
    pub fn int_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        let (lo, hi) = (*range.start(), *range.end());
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        (lo as i64 + (self.next_u64() % span) as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.int_below(1000), rng2.int_below(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.int_below(100);
    }

    #[test]
    fn floats_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..=1.0).contains(&f));
            let r = rng.range_f32(-5.0, 5.0);
            assert!((-5.0..=5.0).contains(&r));
        }
    }

    #[test]
    fn ints_cover_inclusive_range() {
        let mut rng = Rng::new(99);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let v = rng.int_in(2..=5);
            assert!((2..=5).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(rng.int_in(3..=3), 3);
        assert_eq!(rng.int_below(0), 0);
    }

    #[test]
    fn sign_is_unit() {
        let mut rng = Rng::new(5);
        for _ in 0..20 {
            assert_eq!(rng.sign().abs(), 1.0);
        }
    }
}
