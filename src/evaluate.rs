//! Closed-form evaluators. Each evaluator derives one answer from fixed constants, records its
//! derivation, and checks the result against the answer it is known to have. A disagreement is an
//! internal consistency failure and aborts the run.

use std::fmt::{Display, Formatter};

use num::BigRational;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::debug;

use crate::exact::{parse_decimal, to_decimal, DisplayExact, ExactValue, InvalidDecimal};

pub mod probability;
pub mod statistics;

#[derive(Debug, Error, PartialEq)]
pub enum SelfCheckError {
    #[error("{label}: expected {expected}, got {actual}")]
    Mismatch {
        label: String,
        expected: ExactValue,
        actual: ExactValue,
    },

    #[error("{label}: {actual} is not within {tolerance} of {expected}")]
    OutOfTolerance {
        label: String,
        expected: String,
        actual: f64,
        tolerance: String,
    },

    #[error("{label}: {source}")]
    InvalidLiteral {
        label: String,
        #[source]
        source: InvalidDecimal,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Exact(ExactValue),
    Approx(f64),
}
impl Answer {
    pub fn exact(&self) -> Option<&ExactValue> {
        match self {
            Answer::Exact(value) => Some(value),
            Answer::Approx(_) => None,
        }
    }

    pub fn decimal(&self, digits: usize) -> String {
        match self {
            Answer::Exact(value) => to_decimal(value, digits),
            Answer::Approx(value) => format!("{value:.digits$}"),
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Exact(value) => write!(f, "{}", DisplayExact::from(value)),
            Answer::Approx(value) => write!(f, "≈ {value:.6}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub label: String,
    pub steps: Vec<String>,
    pub answer: Answer,
}

/// Accumulates the steps of one derivation until it is concluded against its known answer.
#[derive(Debug)]
pub struct Derivation {
    label: String,
    steps: Vec<String>,
}
impl Derivation {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: vec![],
        }
    }

    pub fn step(&mut self, step: impl Into<String>) -> &mut Self {
        self.steps.push(step.into());
        self
    }

    pub fn conclude(
        self,
        actual: ExactValue,
        expected: ExactValue,
    ) -> Result<Evaluation, SelfCheckError> {
        ensure_eq(&self.label, &actual, &expected)?;
        debug!("{}: {}", self.label, DisplayExact::from(&actual));
        Ok(Evaluation {
            label: self.label,
            steps: self.steps,
            answer: Answer::Exact(actual),
        })
    }

    /// Concludes an irrational answer, which can only be checked against its rounded literal to
    /// within half a unit in the last digit.
    pub fn conclude_approx(self, actual: f64, rounded: &str) -> Result<Evaluation, SelfCheckError> {
        let expected = parse_decimal(rounded).map_err(|source| SelfCheckError::InvalidLiteral {
            label: self.label.clone(),
            source,
        })?;
        let tolerance = crate::document::tolerance_for_decimal(rounded);
        let within = BigRational::from_float(actual)
            .map(|actual| num::Signed::abs(&(actual - &expected)) <= tolerance)
            .unwrap_or(false);
        if !within {
            return Err(SelfCheckError::OutOfTolerance {
                label: self.label,
                expected: rounded.to_string(),
                actual,
                tolerance: to_decimal(&tolerance, crate::exact::fractional_digits(rounded) + 1),
            });
        }
        debug!("{}: ≈ {actual}", self.label);
        Ok(Evaluation {
            label: self.label,
            steps: self.steps,
            answer: Answer::Approx(actual),
        })
    }
}

/// Fails with [SelfCheckError::Mismatch] unless `actual` equals `expected`.
pub fn ensure_eq(
    label: &str,
    actual: &ExactValue,
    expected: &ExactValue,
) -> Result<(), SelfCheckError> {
    if actual != expected {
        return Err(SelfCheckError::Mismatch {
            label: label.to_string(),
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, EnumIter)]
pub enum ProblemSet {
    #[strum(serialize = "probability")]
    ProbabilityTheory,
    #[strum(serialize = "statistics")]
    Statistics,
}
impl ProblemSet {
    pub fn title(&self) -> &'static str {
        match self {
            ProblemSet::ProbabilityTheory => "Probability Theory Homework 2",
            ProblemSet::Statistics => "Statistics Homework 1",
        }
    }

    pub fn evaluate(&self) -> Result<Vec<Evaluation>, SelfCheckError> {
        match self {
            ProblemSet::ProbabilityTheory => probability::evaluate_all(),
            ProblemSet::Statistics => statistics::evaluate_all(),
        }
    }
}
