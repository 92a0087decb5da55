//! Scanning a written report for the fraction, decimal and percentage renderings of an exact
//! value.
//!
//! Fractions must appear verbatim in lowest terms, in any of the `\frac`, `\dfrac` and `\tfrac`
//! markups. Decimals and percentages are accepted when they are within half a unit of their last
//! reported digit of the exact value.

use std::fs;
use std::path::{Path, PathBuf};

use num::Signed;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::exact::{
    fractional_digits, integer, parse_decimal, power_of_ten, ratio, to_decimal, to_scientific,
    ExactValue, InvalidDecimal,
};

/// Digits shown when rendering a recomputed value alongside a reported one.
const DIAGNOSTIC_DIGITS: usize = 8;

/// Opening of every recognised fraction markup.
const FRACTION_MARKUP: &str = r"\\(?:d|t)?frac";

/// The percent marker following a number, with or without the LaTeX escape.
const PERCENT_MARKER: &str = r"\s*\\?%";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document {} could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A report, read once in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}
impl Document {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|source| DocumentError::Unreadable {
            path: path.clone(),
            source,
        })?;
        debug!("read {} bytes from {}", text.len(), path.display());
        Ok(Self { path, text })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            text: text.into(),
        }
    }
}

/// Outcome of comparing a reported decimal (or percentage) with an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalMatch {
    pub within_tolerance: bool,
    pub diagnostic: String,
}

/// The fraction markup of `value`, as it is expected to appear in the report.
pub fn fraction_markup(value: &ExactValue) -> String {
    format!(r"\frac{{{}}}{{{}}}", value.numer(), value.denom())
}

fn fraction_pattern(value: &ExactValue) -> Regex {
    let pattern = format!(
        r"{}\{{\s*{}\s*\}}\{{\s*{}\s*\}}",
        FRACTION_MARKUP,
        regex::escape(&value.numer().to_string()),
        regex::escape(&value.denom().to_string())
    );
    Regex::new(&pattern).expect("escaped literals always compile")
}

/// Whether the reduced fraction `value` occurs in `document_text` as `\frac{n}{d}`, `\dfrac{n}{d}`
/// or `\tfrac{n}{d}`. Whitespace is tolerated inside the braces; unreduced forms do not match.
pub fn check_fraction_presence(document_text: &str, value: &ExactValue) -> bool {
    fraction_pattern(value).is_match(document_text)
}

/// Half a unit in the last reported digit: `5 × 10^-(digits + 1)`, or `1/2` for a literal with no
/// fractional part.
pub fn tolerance_for_decimal(decimal_text: &str) -> ExactValue {
    match fractional_digits(decimal_text) {
        0 => ratio(1, 2),
        digits => integer(5) / power_of_ten(digits + 1),
    }
}

/// Compares the literal `decimal_text` with `value`.
pub fn check_decimal_match(
    decimal_text: &str,
    value: &ExactValue,
) -> Result<DecimalMatch, InvalidDecimal> {
    compare(decimal_text, value, "")
}

/// Compares the literal percentage `percent_text` (without its marker) with `value × 100`.
pub fn check_percentage_match(
    percent_text: &str,
    value: &ExactValue,
) -> Result<DecimalMatch, InvalidDecimal> {
    compare(percent_text, &(value * integer(100)), "%")
}

fn compare(text: &str, value: &ExactValue, unit: &str) -> Result<DecimalMatch, InvalidDecimal> {
    let reported = parse_decimal(text)?;
    let tolerance = tolerance_for_decimal(text);
    let delta = (&reported - value).abs();
    let within_tolerance = delta <= tolerance;
    let diagnostic = format!(
        "reported {}{unit}, recomputed {}{unit}, |Δ| = {} {} {}",
        text.trim(),
        to_decimal(value, DIAGNOSTIC_DIGITS),
        to_scientific(&delta, 3),
        if within_tolerance { "≤" } else { ">" },
        to_scientific(&tolerance, 0),
    );
    debug!("{diagnostic}");
    Ok(DecimalMatch {
        within_tolerance,
        diagnostic,
    })
}

/// Whether the literal `decimal_text` occurs in `document_text` as a whole number, i.e. not as the
/// prefix or suffix of a longer one.
pub fn contains_decimal(document_text: &str, decimal_text: &str) -> bool {
    let pattern = format!(
        r"(?:^|[^\d.]){}(?:$|[^\d])",
        regex::escape(decimal_text.trim())
    );
    Regex::new(&pattern).expect("escaped literals always compile").is_match(document_text)
}

/// Whether the literal `percent_text` occurs in `document_text` followed by `%` or `\%`.
pub fn contains_percentage(document_text: &str, percent_text: &str) -> bool {
    let pattern = format!(
        r"(?:^|[^\d.]){}{}",
        regex::escape(percent_text.trim()),
        PERCENT_MARKER
    );
    Regex::new(&pattern).expect("escaped literals always compile").is_match(document_text)
}
