//! Statistics, homework 1.

use std::f64::consts::PI;

use crate::comb::{choose, distinct_orderings, hypergeometric, Occupancies};
use crate::evaluate::{ensure_eq, Derivation, Evaluation, SelfCheckError};
use crate::exact::{integer, ratio, to_decimal};
use crate::factorial::{Calculator, Factorial};

/// Compartments in the carriage.
pub const COMPARTMENTS: u64 = 9;

/// Seats per compartment.
pub const SEATS_PER_COMPARTMENT: u64 = 4;

/// Passengers boarding the carriage.
pub const PASSENGERS: u64 = 7;

/// Occupancy patterns of exactly three compartments seating all passengers.
pub const THREE_COMPARTMENT_PATTERNS: [[usize; 3]; 3] = [[4, 2, 1], [3, 3, 1], [3, 2, 2]];

pub fn evaluate_all() -> Result<Vec<Evaluation>, SelfCheckError> {
    let mut evaluations = vec![
        best_teams_apart()?,
        hypergeometric_tail()?,
        chess_pairings()?,
        inscribed_square()?,
    ];
    evaluations.extend(compartments()?);
    evaluations.push(gold_plots()?);
    Ok(evaluations)
}

/// Sixteen teams are split at random into two groups of eight. Probability that the two best teams
/// land in different groups.
pub fn best_teams_apart() -> Result<Evaluation, SelfCheckError> {
    let favourable = 2 * choose(14, 7);
    let splits = choose(16, 8);
    let result = integer(favourable) / integer(splits);

    let mut derivation = Derivation::new("Problem 1");
    derivation
        .step(format!("2 × C(14,7) = {favourable}, C(16,8) = {splits}"))
        .step(format!("Probability = {result} ≈ {}", to_decimal(&result, 4)));
    derivation.conclude(result, ratio(8, 15))
}

/// Three items are drawn from twenty, eight of which are marked. Probability that at least two of
/// the drawn items are marked.
pub fn hypergeometric_tail() -> Result<Evaluation, SelfCheckError> {
    let exactly_two = hypergeometric(20, 8, 3, 2);
    let exactly_three = hypergeometric(20, 8, 3, 3);
    let result = &exactly_two + &exactly_three;

    let mut derivation = Derivation::new("Problem 2");
    derivation
        .step(format!(
            "P(X=2) = C(8,2) C(12,1) / C(20,3) = {} × {} / {} = {exactly_two}",
            choose(8, 2),
            choose(12, 1),
            choose(20, 3)
        ))
        .step(format!(
            "P(X=3) = C(8,3) C(12,0) / C(20,3) = {} × {} / {} = {exactly_three}",
            choose(8, 3),
            choose(12, 0),
            choose(20, 3)
        ))
        .step(format!("P(X≥2) = {result} ≈ {}", to_decimal(&result, 4)));
    derivation.conclude(result, ratio(98, 285))
}

/// Twenty players are paired into ten boards, with the colour of each player significant.
pub fn chess_pairings() -> Result<Evaluation, SelfCheckError> {
    let pairings = Calculator.falling(20, 10);
    let mut derivation = Derivation::new("Problem 3");
    derivation.step(format!("20! / 10! = {pairings}"));
    derivation.conclude(integer(pairings), integer(670_442_572_800u64))
}

/// A point is thrown uniformly into a circle. Probability that it lands inside the inscribed
/// square: `2r² / πr²`.
pub fn inscribed_square() -> Result<Evaluation, SelfCheckError> {
    let result = 2.0 / PI;
    let mut derivation = Derivation::new("Problem 4");
    derivation.step(format!("Probability = 2/π ≈ {result:.4}"));
    derivation.conclude_approx(result, "0.6366")
}

/// Seven passengers take seats at random in a carriage of nine four-seat compartments.
/// Probabilities that they occupy exactly two, seven and three compartments.
pub fn compartments() -> Result<Vec<Evaluation>, SelfCheckError> {
    let factorial = Calculator;
    let seats = choose(COMPARTMENTS * SEATS_PER_COMPARTMENT, PASSENGERS);
    let seats_in = |occupants: usize| choose(SEATS_PER_COMPARTMENT, occupants as u64);

    let two_numerator = choose(COMPARTMENTS, 2) * 2 * seats_in(4) * seats_in(3);
    let two = integer(two_numerator) / integer(seats);
    let mut derivation = Derivation::new("Problem 5a");
    derivation
        .step(format!("C(36,7) = {seats}"))
        .step(format!(
            "C(9,2) × 2 × C(4,4) × C(4,3) = {two_numerator}"
        ))
        .step(format!("Probability = {two} ≈ {}", to_decimal(&two, 6)));
    let two = derivation.conclude(two, ratio(1, 28_985))?;

    let seven_numerator = choose(COMPARTMENTS, 7) * seats_in(1).pow(PASSENGERS as u32);
    let seven = integer(seven_numerator) / integer(seats);
    let mut derivation = Derivation::new("Problem 5b");
    derivation
        .step(format!("C(9,7) × 4^7 = {seven_numerator}"))
        .step(format!("Probability = {seven} ≈ {}", to_decimal(&seven, 6)));
    let seven = derivation.conclude(seven, ratio(2_048, 28_985))?;

    let mut derivation = Derivation::new("Problem 5c");
    let mut arrangements = 0u128;
    for pattern in &THREE_COMPARTMENT_PATTERNS {
        let orderings = distinct_orderings(pattern, &factorial);
        let ways = orderings
            * pattern
                .iter()
                .map(|&occupants| seats_in(occupants))
                .product::<u128>();
        derivation.step(format!(
            "pattern {}-{}-{}: {orderings} × C(4,{}) × C(4,{}) × C(4,{}) = {ways}",
            pattern[0], pattern[1], pattern[2], pattern[0], pattern[1], pattern[2]
        ));
        arrangements += ways;
    }
    let enumerated: u128 = Occupancies::new(3, SEATS_PER_COMPARTMENT as usize, PASSENGERS as usize)
        .with_min_occupancy(1)
        .map(|occupancy| occupancy.into_iter().map(seats_in).product::<u128>())
        .sum();
    ensure_eq(
        "Problem 5c (enumerated occupancies)",
        &integer(enumerated),
        &integer(arrangements),
    )?;
    let three_numerator = choose(COMPARTMENTS, 3) * arrangements;
    let three = integer(three_numerator) / integer(seats);
    derivation
        .step(format!("total ways = {arrangements}"))
        .step(format!("C(9,3) × {arrangements} = {three_numerator}"))
        .step(format!("Probability = {three} ≈ {}", to_decimal(&three, 6)));
    let three = derivation.conclude(three, ratio(224, 28_985))?;

    Ok(vec![two, seven, three])
}

/// A prospector picks one of two regions with equal probability; the first region has three gold
/// plots in four, the second two in four. The first plot dug holds gold. Probability that a second
/// plot from the same region, dug without replacement, holds gold too.
pub fn gold_plots() -> Result<Evaluation, SelfCheckError> {
    let priors = [ratio(1, 2), ratio(1, 2)];
    let first_success = [ratio(3, 4), ratio(1, 2)];
    let second_success = [ratio(2, 3), ratio(1, 3)];

    let evidence = &priors[0] * &first_success[0] + &priors[1] * &first_success[1];
    let posteriors = [
        &priors[0] * &first_success[0] / &evidence,
        &priors[1] * &first_success[1] / &evidence,
    ];
    let result = &posteriors[0] * &second_success[0] + &posteriors[1] * &second_success[1];

    let mut derivation = Derivation::new("Problem 6");
    derivation
        .step(format!("P(R1 | success) = {}", posteriors[0]))
        .step(format!("P(R2 | success) = {}", posteriors[1]))
        .step(format!(
            "P(second success | first success) = {} × {} + {} × {} = {result}",
            posteriors[0], second_success[0], posteriors[1], second_success[1]
        ));
    derivation.conclude(result, ratio(8, 15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::Answer;
    use assert_float_eq::*;

    #[test]
    fn teams() {
        assert_eq!(Answer::Exact(ratio(8, 15)), best_teams_apart().unwrap().answer);
    }

    #[test]
    fn tail() {
        let evaluation = hypergeometric_tail().unwrap();
        assert_eq!(
            "P(X=2) = C(8,2) C(12,1) / C(20,3) = 28 × 12 / 1140 = 28/95",
            evaluation.steps[0]
        );
        assert_eq!(Answer::Exact(ratio(98, 285)), evaluation.answer);
    }

    #[test]
    fn pairings() {
        assert_eq!(Answer::Exact(integer(670_442_572_800u64)), chess_pairings().unwrap().answer);
    }

    #[test]
    fn square() {
        match inscribed_square().unwrap().answer {
            Answer::Approx(value) => assert_float_absolute_eq!(0.6366, value, 5e-5),
            other => panic!("unexpected answer {other:?}"),
        }
    }

    #[test]
    fn compartment_occupancy() {
        let answers = compartments()
            .unwrap()
            .into_iter()
            .map(|evaluation| evaluation.answer)
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                Answer::Exact(ratio(1, 28_985)),
                Answer::Exact(ratio(2_048, 28_985)),
                Answer::Exact(ratio(224, 28_985)),
            ],
            answers
        );
    }

    #[test]
    fn three_compartment_patterns() {
        let evaluation = compartments().unwrap().remove(2);
        assert_eq!("pattern 4-2-1: 6 × C(4,4) × C(4,2) × C(4,1) = 144", evaluation.steps[0]);
        assert_eq!("pattern 3-3-1: 3 × C(4,3) × C(4,3) × C(4,1) = 192", evaluation.steps[1]);
        assert_eq!("pattern 3-2-2: 3 × C(4,3) × C(4,2) × C(4,2) = 432", evaluation.steps[2]);
        assert_eq!("total ways = 768", evaluation.steps[3]);
    }

    #[test]
    fn gold() {
        let evaluation = gold_plots().unwrap();
        assert_eq!("P(R1 | success) = 3/5", evaluation.steps[0]);
        assert_eq!(Answer::Exact(ratio(8, 15)), evaluation.answer);
    }
}
