//! Cross-checks the probability theory write-up against independent derivations of each answer.
//!
//! Every answer is restated with the formula used in [crate::evaluate::probability] and derived
//! once more along a different route; the two must agree.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::{debug, warn};

use crate::comb::{choose, count_combinations, is_unique_linear, pick};
use crate::document::{
    check_decimal_match, check_fraction_presence, check_percentage_match, contains_decimal,
    contains_percentage, fraction_markup, Document,
};
use crate::evaluate::{ensure_eq, SelfCheckError};
use crate::exact::{integer, ratio, DisplayExact, ExactValue, InvalidDecimal};
use crate::factorial::{Factorial, Lookup};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0}")]
    SelfCheck(#[from] SelfCheckError),

    #[error("{0}")]
    InvalidDecimal(#[from] InvalidDecimal),
}

/// How an answer is expected to be reported besides its fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reported {
    Decimal(&'static str),
    Percentage(&'static str),
}

impl Display for Reported {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Reported::Decimal(text) => write!(f, "decimal {text}"),
            Reported::Percentage(text) => write!(f, "percentage {text}%"),
        }
    }
}

/// The outcome of checking one answer against the document.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub label: String,
    pub expected: ExactValue,
    pub latex_repr_ok: bool,
    pub decimal_repr_ok: Option<bool>,
    pub message: String,
}
impl CheckResult {
    /// The fraction must be present and, where a decimal or percentage was checked, that must
    /// match too.
    pub fn passed(&self) -> bool {
        self.latex_repr_ok && self.decimal_repr_ok.unwrap_or(true)
    }
}

/// Checks that `value` is reported in `document` as a fraction and, optionally, as a decimal or
/// percentage.
pub fn check(
    document: &Document,
    label: impl Into<String>,
    value: ExactValue,
    reported: Option<Reported>,
) -> Result<CheckResult, InvalidDecimal> {
    let label = label.into();
    let markup = fraction_markup(&value);
    let latex_repr_ok = check_fraction_presence(&document.text, &value);
    let mut messages = vec![if latex_repr_ok {
        format!("found {markup}")
    } else {
        format!("{markup} not found in document")
    }];

    let decimal_repr_ok = match reported {
        None => None,
        Some(reported) => {
            let (present, compared) = match reported {
                Reported::Decimal(text) => (
                    contains_decimal(&document.text, text),
                    check_decimal_match(text, &value)?,
                ),
                Reported::Percentage(text) => (
                    contains_percentage(&document.text, text),
                    check_percentage_match(text, &value)?,
                ),
            };
            if present {
                messages.push(compared.diagnostic);
                Some(compared.within_tolerance)
            } else {
                messages.push(format!("{reported} not found in document"));
                Some(false)
            }
        }
    };

    let result = CheckResult {
        label,
        expected: value,
        latex_repr_ok,
        decimal_repr_ok,
        message: messages.join("; "),
    };
    if result.passed() {
        debug!("{}: {}", result.label, result.message);
    } else {
        warn!("{}: {}", result.label, result.message);
    }
    Ok(result)
}

/// Recomputes every probability theory answer and checks how the document reports it.
pub fn validate_document(document: &Document) -> Result<Vec<CheckResult>, ValidationError> {
    let mut results = vec![
        check(document, "Problem 1", shooters()?, None)?,
        check(document, "Problem 2", urn()?, Some(Reported::Decimal("0.00730")))?,
        check(document, "Problem 3", risk_classes()?, None)?,
        check(document, "Problem 4", hats()?, Some(Reported::Decimal("0.625")))?,
    ];
    for ((prior, posterior), percentage) in screening()?.into_iter().zip(["90.98", "9.08"]) {
        results.push(check(
            document,
            format!("Problem 5 (prior={prior})"),
            posterior,
            Some(Reported::Percentage(percentage)),
        )?);
    }
    results.push(check(document, "Problem 6", baskets()?, None)?);
    Ok(results)
}

/// Each answer is derived twice more here: once by the evaluator's formula, restated rather than
/// called, and once along a different route. Both must agree with each other and with the known
/// answer.
fn cross_derived(
    label: &str,
    restated: ExactValue,
    rerouted: ExactValue,
    expected: &ExactValue,
) -> Result<ExactValue, SelfCheckError> {
    ensure_eq(&format!("{label} (rerouted)"), &rerouted, &restated)?;
    ensure_eq(label, &restated, expected)?;
    Ok(restated)
}

/// Geometric series over rounds; rerouted as the first shooter winning the first decisive round,
/// i.e. one in which somebody hits.
fn shooters() -> Result<ExactValue, SelfCheckError> {
    let p1 = ratio(1, 5);
    let p2 = ratio(3, 10);
    let one = ratio(1, 1);
    let restated = &p1 / (&one - (&one - &p1) * (&one - &p2));
    let second_decides = (&one - &p1) * &p2;
    let rerouted = &p1 / (&p1 + second_decides);
    cross_derived("Problem 1", restated, rerouted, &ratio(5, 11))
}

/// Total probability over the number of white balls moved; rerouted by counting ordered
/// selections and drawing as a product of successive conditional probabilities.
fn urn() -> Result<ExactValue, SelfCheckError> {
    let mut restated = ratio(0, 1);
    for k in 0..=3u64 {
        restated += integer(choose(5, k) * choose(6, 3 - k)) / integer(choose(11, 3))
            * integer(choose(4 + k, 4))
            / integer(choose(15, 4));
    }

    let factorial = Lookup::default();
    let ordered_transfers = factorial.falling(11, 3);
    let mut rerouted = ratio(0, 1);
    for white_moved in 0..=3u8 {
        let arrangements = factorial.falling(5, white_moved)
            * factorial.falling(6, 3 - white_moved)
            * choose(3, white_moved as u64);
        let transfer = integer(arrangements) / integer(ordered_transfers);
        let whites = 4 + white_moved as i64;
        let draw = (0..4).fold(ratio(1, 1), |product, drawn| {
            product * ratio(whites - drawn, 15 - drawn)
        });
        rerouted += transfer * draw;
    }
    cross_derived("Problem 2", restated, rerouted, &ratio(47, 6_435))
}

/// Bayes over the three risk classes; rerouted by normalising integer joint weights.
fn risk_classes() -> Result<ExactValue, SelfCheckError> {
    let low = ratio(1, 2) * ratio(1, 100);
    let evidence = &low + ratio(3, 10) * ratio(3, 100) + ratio(1, 5) * ratio(8, 100);
    let restated = low / evidence;

    let weights = [(50, 1), (30, 3), (20, 8)].map(|(percent, claims)| percent * claims);
    let rerouted = ratio(weights[0], weights.iter().sum());
    cross_derived("Problem 3", restated, rerouted, &ratio(1, 6))
}

/// Inclusion-exclusion over four visitors; rerouted by enumerating every assignment of hats and
/// counting the permutations with a fixed point.
fn hats() -> Result<ExactValue, SelfCheckError> {
    const VISITORS: usize = 4;
    let factorial = Lookup::default();
    let mut alternating = ratio(0, 1);
    for k in 0..=VISITORS as u8 {
        let term = ratio(1, 1) / factorial.exact(k);
        if k % 2 == 0 {
            alternating += term;
        } else {
            alternating -= term;
        }
    }
    let restated = ratio(1, 1) - alternating;

    let cardinalities = [VISITORS; VISITORS];
    let mut ordinals = [0; VISITORS];
    let mut bitmap = [false; VISITORS];
    let (mut permutations, mut with_fixed_point) = (0i64, 0i64);
    for combination in 0..count_combinations(&cardinalities) {
        pick(&cardinalities, combination, &mut ordinals);
        if !is_unique_linear(&ordinals, &mut bitmap) {
            continue;
        }
        permutations += 1;
        if ordinals.iter().enumerate().any(|(visitor, &hat)| visitor == hat) {
            with_fixed_point += 1;
        }
    }
    let rerouted = ratio(with_fixed_point, permutations);
    cross_derived("Problem 4", restated, rerouted, &ratio(5, 8))
}

/// Bayes' rule at each prior; rerouted as the prior odds scaled by the likelihood ratio of a
/// positive result.
fn screening() -> Result<Vec<(ExactValue, ExactValue)>, SelfCheckError> {
    let true_positive = ratio(999, 1_000);
    let false_positive = ratio(1, 1_000);
    let likelihood_ratio = &true_positive / &false_positive;
    [
        (ratio(1, 100), ratio(999, 1_098)),
        (ratio(1, 10_000), ratio(999, 10_998)),
    ]
    .into_iter()
    .map(|(prior, expected)| {
        let positive = &true_positive * &prior;
        let restated = &positive / (&positive + &false_positive * (ratio(1, 1) - &prior));

        let prior_odds = &prior / (ratio(1, 1) - &prior);
        let posterior_odds = prior_odds * &likelihood_ratio;
        let rerouted = &posterior_odds / (ratio(1, 1) + &posterior_odds);

        let posterior = cross_derived(
            &format!("Problem 5 (prior={prior})"),
            restated,
            rerouted,
            &expected,
        )?;
        Ok((prior, posterior))
    })
    .collect()
}

/// Posterior-weighted second draw; rerouted as the joint probability of two white draws over the
/// marginal of a white first draw. The half-white basket holds one white and one black ball.
fn baskets() -> Result<ExactValue, SelfCheckError> {
    let first_white = ratio(1, 2) * ratio(1, 1) + ratio(1, 2) * ratio(1, 2);
    let all_white_given_white = ratio(1, 2) / &first_white;
    let restated = &all_white_given_white * ratio(1, 1)
        + (ratio(1, 1) - &all_white_given_white) * ratio(0, 1);

    let both_white = ratio(1, 2) * ratio(1, 1) + ratio(1, 2) * ratio(1, 2) * ratio(0, 1);
    let rerouted = both_white / first_white;
    cross_derived("Problem 6", restated, rerouted, &ratio(2, 3))
}

impl Display for CheckResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: expected {} | fraction {}",
            if self.passed() { "PASS" } else { "FAIL" },
            self.label,
            DisplayExact::from(&self.expected),
            if self.latex_repr_ok { "OK" } else { "MISSING" }
        )?;
        if let Some(decimal_repr_ok) = self.decimal_repr_ok {
            write!(
                f,
                " | decimal {}",
                if decimal_repr_ok { "OK" } else { "MISMATCH" }
            )?;
        }
        write!(f, " | {}", self.message)
    }
}
