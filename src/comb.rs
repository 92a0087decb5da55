//! Combinatorics.

use crate::exact::{integer, ExactValue};
use crate::factorial::Factorial;

/// Binomial coefficient `C(n, k)`; zero when `k > n`. Evaluated multiplicatively, so `n` is not
/// bounded by the factorial table.
pub fn choose(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = u64::min(k, n - k);
    let mut product = 1u128;
    for i in 1..=k as u128 {
        product = product * (n as u128 - k as u128 + i) / i;
    }
    product
}

/// Number of derangements of `n` items, by the recurrence `D(n) = (n - 1)(D(n - 1) + D(n - 2))`.
pub fn derangements(n: u8) -> u128 {
    match n {
        0 => 1,
        1 => 0,
        _ => {
            let (mut d_prev2, mut d_prev1) = (1u128, 0u128);
            for k in 2..=n as u128 {
                (d_prev2, d_prev1) = (d_prev1, (k - 1) * (d_prev1 + d_prev2));
            }
            d_prev1
        }
    }
}

/// The truncated alternating series `Σ_{k=0}^{n} (-1)^k / k!`, which equals `D(n) / n!`.
pub fn alternating_reciprocal_factorials(n: u8, factorial: &impl Factorial) -> ExactValue {
    (0..=n).fold(ExactValue::from_integer(0.into()), |sum, k| {
        let term = ExactValue::new(1.into(), factorial.get(k).into());
        if k % 2 == 0 {
            sum + term
        } else {
            sum - term
        }
    })
}

/// Hypergeometric probability of drawing exactly `hits` marked items when `draws` items are
/// sampled without replacement from `population` items of which `marked` are marked.
pub fn hypergeometric(population: u64, marked: u64, draws: u64, hits: u64) -> ExactValue {
    assert!(marked <= population, "marked ({marked}) > population ({population})");
    assert!(draws <= population, "draws ({draws}) > population ({population})");
    if hits > draws {
        return ExactValue::from_integer(0.into());
    }
    let favourable = choose(marked, hits) * choose(population - marked, draws - hits);
    integer(favourable) / integer(choose(population, draws))
}

/// Decodes a `combination` index into per-position ordinals, each in `0..cardinalities[i]`.
pub fn pick(cardinalities: &[usize], combination: u64, ordinals: &mut [usize]) {
    let mut residual = combination;
    for (index, &cardinality) in cardinalities.iter().enumerate() {
        let cardinality = cardinality as u64;
        let (quotient, remainder) = (residual / cardinality, residual % cardinality);
        residual = quotient;
        ordinals[index] = remainder as usize;
    }
}

pub fn count_combinations(cardinalities: &[usize]) -> u64 {
    cardinalities.iter().product::<usize>() as u64
}

/// Whether `elements` are pairwise distinct, using `bitmap` (sized to exceed every element) as
/// scratch space.
pub fn is_unique_linear(elements: &[usize], bitmap: &mut [bool]) -> bool {
    bitmap.fill(false);
    for &element in elements {
        if bitmap[element] {
            return false;
        }
        bitmap[element] = true;
    }
    true
}

/// Enumerates the ways of placing `total` items into `groups` labelled groups of `capacity` each,
/// yielding the occupancy of every group.
pub struct Occupancies {
    cardinalities: Vec<usize>,
    combinations: u64,
    combination: u64,
    total: usize,
    min_occupancy: usize,
}
impl Occupancies {
    pub fn new(groups: usize, capacity: usize, total: usize) -> Self {
        let cardinalities = vec![capacity + 1; groups];
        let combinations = count_combinations(&cardinalities);
        Self {
            cardinalities,
            combinations,
            combination: 0,
            total,
            min_occupancy: 0,
        }
    }

    /// Only yields occupancies in which every group holds at least `min_occupancy` items.
    pub fn with_min_occupancy(mut self, min_occupancy: usize) -> Self {
        self.min_occupancy = min_occupancy;
        self
    }
}

impl Iterator for Occupancies {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut ordinals = vec![0; self.cardinalities.len()];
        while self.combination != self.combinations {
            pick(&self.cardinalities, self.combination, &mut ordinals);
            self.combination += 1;
            if ordinals.iter().sum::<usize>() == self.total
                && ordinals.iter().all(|&occupancy| occupancy >= self.min_occupancy)
            {
                return Some(ordinals);
            }
        }
        None
    }
}

/// Number of distinct orderings of a multiset of group sizes, e.g. 6 for `[4, 2, 1]` and 3 for
/// `[3, 3, 1]`.
pub fn distinct_orderings(pattern: &[usize], factorial: &impl Factorial) -> u128 {
    let mut sorted = pattern.to_vec();
    sorted.sort_unstable();
    let mut orderings = factorial.get(pattern.len() as u8);
    for run in sorted.chunk_by(|a, b| a == b) {
        orderings /= factorial.get(run.len() as u8);
    }
    orderings
}
