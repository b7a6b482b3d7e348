//! Deterministic pseudo-random streams keyed by strings
//!
//! The same key always yields the same sequence, which is what makes
//! seeding idempotent: a (region, date, hour) triple synthesizes the same
//! forecast on every run.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit FNV-1a hash over the UTF-16 code units of `key`
///
/// Each unit is folded in whole, so a Thai character contributes one step
/// rather than three UTF-8 bytes.
pub fn hash_key(key: &str) -> u32 {
    key.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// mulberry32 generator
///
/// Yields `f64` values in `[0, 1)` forever. Cloning a generator forks the
/// stream at its current position.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a raw 32-bit seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from a string key
    pub fn from_key(key: &str) -> Self {
        Self::new(hash_key(key))
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / TWO_POW_32
    }

    /// Uniform value in `[-half_width, half_width)`
    pub fn centered(&mut self, half_width: f64) -> f64 {
        (self.next_f64() - 0.5) * half_width * 2.0
    }

    /// Uniform index in `0..len`
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64).floor() as usize
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Round half up to the nearest integer
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half up to one decimal place
pub fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_vectors() {
        assert_eq!(hash_key(""), 2_166_136_261);
        assert_eq!(hash_key("a"), 0xe40c_292c);
        assert_eq!(hash_key("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_hash_thai_key_uses_utf16_units() {
        assert_eq!(hash_key("fields:ภาคกลาง"), 0x3efd_494d);
        assert_ne!(hash_key("fields:ภาคกลาง"), 0x4389_a21d);
    }

    #[test]
    fn test_mulberry32_reference_values() {
        let mut rng = SeededRng::new(0);
        assert_eq!(rng.next_f64(), 0.26642920868471265);
        assert_eq!(rng.next_f64(), 0.0003297457005828619);
        assert_eq!(rng.next_f64(), 0.2232720274478197);
    }

    #[test]
    fn test_same_key_same_stream() {
        let a: Vec<f64> = SeededRng::from_key("data:ภาคกลาง:2025-11-01:7").take(32).collect();
        let b: Vec<f64> = SeededRng::from_key("data:ภาคกลาง:2025-11-01:7").take(32).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_keys_diverge() {
        let a: Vec<f64> = SeededRng::from_key("fields:ภาคเหนือ").take(8).collect();
        let b: Vec<f64> = SeededRng::from_key("fields:ภาคใต้(ฝั่งตะวันตก)").take(8).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_values_in_unit_interval() {
        for value in SeededRng::new(0).take(10_000) {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_index_bounds() {
        let mut rng = SeededRng::from_key("index");
        for _ in 0..1_000 {
            assert!(rng.index(77) < 77);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round1(31.25), 31.3);
        assert_eq!(round1(-0.04), 0.0);
    }
}
