//! 在线率末位随机数字的来源。

use counter_runtime::JitterSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 基于 `StdRng` 的抖动源，给定种子时结果可复现
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl JitterSource for SeededJitter {
    fn next_digit(&mut self) -> u8 {
        self.rng.gen_range(0..9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_digits() {
        let mut a = SeededJitter::from_seed(7);
        let mut b = SeededJitter::from_seed(7);
        let left: Vec<u8> = (0..32).map(|_| a.next_digit()).collect();
        let right: Vec<u8> = (0..32).map(|_| b.next_digit()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_digit_range() {
        let mut jitter = SeededJitter::from_entropy();
        for _ in 0..1000 {
            assert!(jitter.next_digit() <= 8);
        }
    }
}
