//! Probability theory, homework 2.

use crate::comb::{alternating_reciprocal_factorials, choose, derangements};
use crate::evaluate::{ensure_eq, Derivation, Evaluation, SelfCheckError};
use crate::exact::{integer, ratio, to_decimal, ExactValue};
use crate::factorial::{Factorial, Lookup};

/// Number of visitors whose hats are shuffled in the hat-check problem.
pub const HAT_CHECK_VISITORS: u8 = 4;

/// Prevalences at which the positive-test posterior is evaluated, with their known posteriors.
pub const SCREENING_PRIORS: [((i64, i64), (i64, i64)); 2] =
    [((1, 100), (999, 1_098)), ((1, 10_000), (999, 10_998))];

pub fn evaluate_all() -> Result<Vec<Evaluation>, SelfCheckError> {
    let mut evaluations = vec![
        alternating_shooters()?,
        urn_transfer()?,
        risk_class_posterior()?,
        hat_check(HAT_CHECK_VISITORS)?,
    ];
    evaluations.extend(positive_test_posteriors()?);
    evaluations.push(two_baskets()?);
    Ok(evaluations)
}

/// Two shooters fire in turn until the first hit; the first shooter hits with `1/5`, the second
/// with `3/10`. Probability that the first shooter fires more shots, i.e. scores the first hit.
pub fn alternating_shooters() -> Result<Evaluation, SelfCheckError> {
    let p1 = ratio(1, 5);
    let p2 = ratio(3, 10);
    let one = ratio(1, 1);
    let both_miss = (&one - &p1) * (&one - &p2);
    let result = &p1 / (&one - &both_miss);

    let mut derivation = Derivation::new("Problem 1");
    derivation
        .step(format!("p1 = {p1}, p2 = {p2}"))
        .step(format!("P(both miss a round) = (1 - p1)(1 - p2) = {both_miss}"))
        .step(format!("P(shooter 1 fires more) = p1 / (1 - {both_miss}) = {result}"));
    derivation.conclude(result, ratio(5, 11))
}

/// Three balls are moved from an urn of 5 white and 6 black into an urn of 4 white and 8 black;
/// four balls are then drawn from the second urn. Probability that all four are white.
pub fn urn_transfer() -> Result<Evaluation, SelfCheckError> {
    let mut derivation = Derivation::new("Problem 2");
    let mut total = ratio(0, 1);
    for k in 0..=3u64 {
        let moved = integer(choose(5, k) * choose(6, 3 - k)) / integer(choose(11, 3));
        let draw = integer(choose(4 + k, 4)) / integer(choose(15, 4));
        let contribution = &moved * &draw;
        derivation.step(format!(
            "k={k}: P(move)={moved}, P(draw|k)={draw}, contribution={contribution}"
        ));
        total += contribution;
    }
    derivation.step(format!("total = {total} ≈ {}", to_decimal(&total, 6)));
    derivation.conclude(total, ratio(47, 6_435))
}

/// Policyholders are low, medium or high risk with priors `1/2`, `3/10`, `1/5` and claim rates
/// `1/100`, `3/100`, `8/100`. Posterior probability of low risk given a payout.
pub fn risk_class_posterior() -> Result<Evaluation, SelfCheckError> {
    let classes = [
        ("low", ratio(1, 2), ratio(1, 100)),
        ("medium", ratio(3, 10), ratio(3, 100)),
        ("high", ratio(1, 5), ratio(8, 100)),
    ];
    let mut derivation = Derivation::new("Problem 3");
    let mut evidence = ratio(0, 1);
    for (name, prior, claim) in &classes {
        let joint = prior * claim;
        derivation.step(format!("P({name}) P(payout | {name}) = {prior} × {claim} = {joint}"));
        evidence += joint;
    }
    let (_, low_prior, low_claim) = &classes[0];
    let result = low_prior * low_claim / &evidence;
    derivation.step(format!("P(payout) = {evidence}"));
    derivation.step(format!("P(low | payout) = {result}"));
    derivation.conclude(result, ratio(1, 6))
}

/// `visitors` hats are handed back at random. Probability that at least one visitor receives the
/// correct hat, by inclusion-exclusion and, as a cross-check, by counting derangements.
pub fn hat_check(visitors: u8) -> Result<Evaluation, SelfCheckError> {
    let factorial = Lookup::default();
    let one = ratio(1, 1);
    let by_inclusion_exclusion = &one - alternating_reciprocal_factorials(visitors, &factorial);
    let deranged = derangements(visitors);
    let by_derangements = &one - integer(deranged) / factorial.exact(visitors);

    let mut derivation = Derivation::new("Problem 4");
    derivation
        .step(format!(
            "inclusion-exclusion: 1 - Σ (-1)^k/k! = {by_inclusion_exclusion}"
        ))
        .step(format!(
            "derangements: D_{visitors} = {deranged}, so 1 - D_n/n! = {by_derangements}"
        ));
    ensure_eq("Problem 4 (derangements)", &by_derangements, &by_inclusion_exclusion)?;
    derivation.conclude(by_inclusion_exclusion, ratio(5, 8))
}

/// Posterior probability of disease given a positive test, for a test with a true-positive rate
/// of `999/1000` and a false-positive rate of `1/1000`.
pub fn posterior_positive(prior: &ExactValue) -> ExactValue {
    let true_positive = ratio(999, 1_000);
    let false_positive = ratio(1, 1_000);
    let numerator = &true_positive * prior;
    let denominator = &numerator + false_positive * (ratio(1, 1) - prior);
    numerator / denominator
}

pub fn positive_test_posteriors() -> Result<Vec<Evaluation>, SelfCheckError> {
    SCREENING_PRIORS
        .iter()
        .map(|&((prior_numer, prior_denom), (numer, denom))| {
            let prior = ratio(prior_numer, prior_denom);
            let posterior = posterior_positive(&prior);
            let mut derivation = Derivation::new(format!("Problem 5 (prior={prior})"));
            derivation.step(format!(
                "P(disease | +) = {posterior} ≈ {}",
                to_decimal(&posterior, 6)
            ));
            derivation.conclude(posterior, ratio(numer, denom))
        })
        .collect()
}

/// One of two baskets is chosen at random: the first holds only white balls, the second is half
/// white. The first ball drawn is white. Probability that the second ball is white too.
pub fn two_baskets() -> Result<Evaluation, SelfCheckError> {
    let p_b1 = ratio(1, 2);
    let p_b2 = ratio(1, 2);
    let p_white_given_b1 = ratio(1, 1);
    let p_white_given_b2 = ratio(1, 2);

    let p_white = &p_white_given_b1 * &p_b1 + &p_white_given_b2 * &p_b2;
    let p_b1_given_white = &p_white_given_b1 * &p_b1 / &p_white;
    let result = &p_b1_given_white * ratio(1, 1);

    let mut derivation = Derivation::new("Problem 6");
    derivation
        .step(format!("P(first white) = {p_white}"))
        .step(format!("P(B1 | first white) = {p_b1_given_white}"))
        .step(format!("P(second white | first white) = {result}"));
    derivation.conclude(result, ratio(2, 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::Answer;

    fn exact(evaluation: Evaluation) -> ExactValue {
        match evaluation.answer {
            Answer::Exact(value) => value,
            Answer::Approx(value) => panic!("unexpected approximate answer {value}"),
        }
    }

    #[test]
    fn shooters() {
        assert_eq!(ratio(5, 11), exact(alternating_shooters().unwrap()));
    }

    #[test]
    fn urn() {
        let evaluation = urn_transfer().unwrap();
        assert_eq!(5, evaluation.steps.len());
        assert!(evaluation.steps[0].starts_with("k=0: P(move)=4/33"), "{}", evaluation.steps[0]);
        assert_eq!(ratio(47, 6_435), exact(evaluation));
    }

    #[test]
    fn risk_classes() {
        assert_eq!(ratio(1, 6), exact(risk_class_posterior().unwrap()));
    }

    #[test]
    fn hats() {
        assert_eq!(ratio(5, 8), exact(hat_check(HAT_CHECK_VISITORS).unwrap()));
    }

    #[test]
    fn hats_other_than_four_fail_self_check() {
        let err = hat_check(5).unwrap_err();
        assert!(matches!(err, SelfCheckError::Mismatch { .. }), "{err:?}");
    }

    #[test]
    fn screening() {
        let posteriors = positive_test_posteriors()
            .unwrap()
            .into_iter()
            .map(exact)
            .collect::<Vec<_>>();
        assert_eq!(vec![ratio(999, 1_098), ratio(999, 10_998)], posteriors);
    }

    #[test]
    fn posterior_positive_limits() {
        assert_eq!(ratio(0, 1), posterior_positive(&ratio(0, 1)));
        assert_eq!(ratio(1, 1), posterior_positive(&ratio(1, 1)));
        assert_eq!(ratio(999, 1_000), posterior_positive(&ratio(1, 2)));
    }

    #[test]
    fn baskets() {
        assert_eq!(ratio(2, 3), exact(two_baskets().unwrap()));
    }

    #[test]
    fn all_in_order() {
        let labels = evaluate_all()
            .unwrap()
            .into_iter()
            .map(|evaluation| evaluation.label)
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                "Problem 1",
                "Problem 2",
                "Problem 3",
                "Problem 4",
                "Problem 5 (prior=1/100)",
                "Problem 5 (prior=1/10000)",
                "Problem 6",
            ],
            labels
        );
    }
}
