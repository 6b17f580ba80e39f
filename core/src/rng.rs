use serde::{Deserialize, Serialize};

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;

/// Deterministic stream derived from a string seed.
///
/// Every step is exact integer arithmetic on a 32-bit state, so the output is
/// identical on every platform. The daily puzzle relies on this: clients and
/// server must compute the same board from the same seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self {
            state: u64::from(hash_seed(seed)),
        }
    }

    pub fn state(&self) -> u32 {
        // always reduced modulo 2^32
        self.state as u32
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Next integer in `[min, max)`; returns `min` when the range is empty.
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max.saturating_sub(min));
        (self.next_f64() * span).floor() as u32 + min
    }
}

/// Multiply-by-31 rolling hash over UTF-16 code units, wrapped to 32 bits,
/// absolute value taken last.
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(hash_seed(""), 0);
        assert_eq!(hash_seed("abc"), 96354);
        assert_eq!(hash_seed("daily-2024-01-01"), 385_358_452);
    }

    #[test]
    fn stream_matches_known_values() {
        let mut rng = SeededRng::new("abc");

        assert_eq!(rng.next_f64(), 0.5782945363316685);
        assert_eq!(rng.next_f64(), 0.9491554433479905);
        assert_eq!(rng.next_int(0, 10), 2);
    }

    #[test]
    fn empty_seed_still_advances() {
        let mut rng = SeededRng::new("");

        assert_eq!(rng.state(), 0);
        assert_eq!(rng.next_f64(), 0.23606797284446657);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new("daily-2024-03-09");
        let mut b = SeededRng::new("daily-2024-03-09");
        let mut c = SeededRng::new("daily-2024-03-10");

        let seq_a: Vec<_> = (0..64).map(|_| a.next_int(0, 30)).collect();
        let seq_b: Vec<_> = (0..64).map(|_| b.next_int(0, 30)).collect();
        let seq_c: Vec<_> = (0..64).map(|_| c.next_int(0, 30)).collect();

        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn next_int_stays_in_range() {
        let mut rng = SeededRng::new("range");
        for _ in 0..1000 {
            let value = rng.next_int(3, 9);
            assert!((3..9).contains(&value));
        }
        assert_eq!(rng.next_int(4, 4), 4);
    }
}
