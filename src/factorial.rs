//! Factorials over `u128`, which holds every value up to 34!.

use crate::exact::{integer, ExactValue};

const MAX_FACTORIAL_ENTRIES: usize = 35;

pub trait Factorial {
    fn get(&self, n: u8) -> u128;

    /// `n! / (n - k)!`: the number of ordered selections of `k` items from `n`.
    fn falling(&self, n: u8, k: u8) -> u128 {
        assert!(k <= n, "k ({k}) > n ({n})");
        self.get(n) / self.get(n - k)
    }

    fn exact(&self, n: u8) -> ExactValue {
        integer(self.get(n))
    }
}

#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        assert!((n as usize) < MAX_FACTORIAL_ENTRIES, "{n}! overflows");
        (2..=n as u128).product()
    }

    fn falling(&self, n: u8, k: u8) -> u128 {
        assert!(k <= n, "k ({k}) > n ({n})");
        (n as u128 - k as u128 + 1..=n as u128).product()
    }
}

pub struct Lookup {
    entries: [u128; MAX_FACTORIAL_ENTRIES],
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        self.entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1u128; MAX_FACTORIAL_ENTRIES];
        for i in 2..MAX_FACTORIAL_ENTRIES {
            entries[i] = i as u128 * entries[i - 1];
        }
        Self { entries }
    }
}
