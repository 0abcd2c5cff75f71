//! Seedable Xorshift64 random source used to perturb the attractor set.
//!
//! Every render draws its 12 perturbation values from this generator, so a
//! render is fully reproducible from its `u64` seed. The core algorithm is
//! pure integer arithmetic and produces the same sequence on every platform.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with the standard (13, 7, 17) shift triple.
///
/// A seed of 0 is a fixed point of xorshift and is replaced by a non-zero
/// fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed` (0 maps to the fallback seed).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [0, amount). This is the `U(0, amount)` draw applied to
    /// each attractor coordinate and mass.
    pub fn uniform_offset(&mut self, amount: f64) -> f64 {
        self.next_f64() * amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_matches_golden_value_for_seed_42() {
        // Changing this breaks every saved render recipe.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn next_u64_matches_golden_sequence_for_seed_7() {
        let mut rng = Xorshift64::new(7);
        assert_eq!(rng.next_u64(), 7_575_888_327);
        assert_eq!(rng.next_u64(), 8_070_950_887_952_051_652);
        assert_eq!(rng.next_u64(), 13_931_920_357_059_763_743);
    }

    #[test]
    fn seed_zero_uses_fallback() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        for _ in 0..5 {
            let v = zero.next_u64();
            assert_ne!(v, 0);
            assert_eq!(v, fallback.next_u64());
        }
    }

    #[test]
    fn uniform_offset_with_zero_amount_is_zero() {
        let mut rng = Xorshift64::new(1234);
        for _ in 0..100 {
            assert_eq!(rng.uniform_offset(0.0), 0.0);
        }
    }

    #[test]
    fn serialized_state_resumes_sequence() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..12 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn uniform_offset_stays_below_amount(seed: u64, amount in 1e-6_f64..10.0) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.uniform_offset(amount);
                    prop_assert!(v >= 0.0 && v < amount, "offset {v} outside [0, {amount})");
                }
            }
        }
    }
}
