//! Exact rational values and their decimal renderings.

use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use num::{BigInt, BigRational, One, Signed, Zero};
use regex::Regex;
use thiserror::Error;

/// An exact rational number, always held in lowest terms with a positive denominator.
pub type ExactValue = BigRational;

lazy_static! {
    static ref DECIMAL_LITERAL: Regex = Regex::new(r"^(-)?(\d+)(?:\.(\d+))?$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a decimal literal")]
pub struct InvalidDecimal(pub String);

/// Constructs a reduced fraction `numer/denom`.
///
/// # Panics
/// If `denom` is zero.
pub fn ratio(numer: i64, denom: i64) -> ExactValue {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

pub fn integer(value: impl Into<BigInt>) -> ExactValue {
    BigRational::from_integer(value.into())
}

/// `10^exponent` as an exact value.
pub fn power_of_ten(exponent: usize) -> ExactValue {
    integer(num::pow(BigInt::from(10), exponent))
}

/// Parses a literal such as `0.00730` or `-12.5` without any loss of precision.
pub fn parse_decimal(text: &str) -> Result<ExactValue, InvalidDecimal> {
    let captures = DECIMAL_LITERAL
        .captures(text.trim())
        .ok_or_else(|| InvalidDecimal(text.to_string()))?;
    let negative = captures.get(1).is_some();
    let whole = &captures[2];
    let fraction = captures.get(3).map_or("", |m| m.as_str());
    let digits: BigInt = format!("{whole}{fraction}")
        .parse()
        .map_err(|_| InvalidDecimal(text.to_string()))?;
    let magnitude = integer(digits) / power_of_ten(fraction.len());
    Ok(if negative { -magnitude } else { magnitude })
}

/// Number of digits after the decimal point in a literal; zero when there is no fractional part.
pub fn fractional_digits(text: &str) -> usize {
    text.trim()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Renders `value` with exactly `digits` fractional digits, rounding half away from zero.
pub fn to_decimal(value: &ExactValue, digits: usize) -> String {
    let scaled = (value * power_of_ten(digits)).round().to_integer();
    let sign = if scaled.is_negative() { "-" } else { "" };
    let magnitude = scaled.abs().to_string();
    if digits == 0 {
        return format!("{sign}{magnitude}");
    }
    let padded = format!("{magnitude:0>width$}", width = digits + 1);
    let (whole, fraction) = padded.split_at(padded.len() - digits);
    format!("{sign}{whole}.{fraction}")
}

/// Renders a value in scientific notation with `digits` significant fractional digits; used for
/// deltas, which are typically tiny.
pub fn to_scientific(value: &ExactValue, digits: usize) -> String {
    if value.is_zero() {
        return format!("{}e0", to_decimal(value, digits));
    }
    let ten = integer(10);
    let mut mantissa = value.abs();
    let mut exponent = 0i32;
    while mantissa >= ten {
        mantissa /= &ten;
        exponent += 1;
    }
    while mantissa < ExactValue::one() {
        mantissa *= &ten;
        exponent -= 1;
    }
    let mut rounded = to_decimal(&mantissa, digits);
    if (mantissa * power_of_ten(digits)).round() >= integer(10) * power_of_ten(digits) {
        exponent += 1;
        rounded = to_decimal(&ExactValue::one(), digits);
    }
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}{rounded}e{exponent}")
}

/// Displays a value as `numer/denom ≈ decimal`, or just the integer when the denominator is one.
pub struct DisplayExact<'a> {
    value: &'a ExactValue,
    digits: usize,
}
impl<'a> DisplayExact<'a> {
    pub fn with_digits(value: &'a ExactValue, digits: usize) -> Self {
        Self { value, digits }
    }
}

impl<'a> From<&'a ExactValue> for DisplayExact<'a> {
    fn from(value: &'a ExactValue) -> Self {
        Self::with_digits(value, 6)
    }
}

impl<'a> Display for DisplayExact<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.value.is_integer() {
            write!(f, "{}", self.value.numer())
        } else {
            write!(
                f,
                "{}/{} ≈ {}",
                self.value.numer(),
                self.value.denom(),
                to_decimal(self.value, self.digits)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_reduced() {
        let half = ratio(2, 4);
        assert_eq!(&BigInt::from(1), half.numer());
        assert_eq!(&BigInt::from(2), half.denom());

        let negative = ratio(3, -9);
        assert_eq!(&BigInt::from(-1), negative.numer());
        assert_eq!(&BigInt::from(3), negative.denom());
    }

    #[test]
    fn parse_decimal_literals() {
        assert_eq!(Ok(ratio(5, 8)), parse_decimal("0.625"));
        assert_eq!(Ok(ratio(73, 10_000)), parse_decimal("0.00730"));
        assert_eq!(Ok(integer(3)), parse_decimal("3"));
        assert_eq!(Ok(ratio(-25, 2)), parse_decimal("-12.5"));
        assert_eq!(Ok(ratio(9098, 100)), parse_decimal(" 90.98 "));
    }

    #[test]
    fn parse_decimal_rejects_junk() {
        assert_eq!(Err(InvalidDecimal("".into())), parse_decimal(""));
        assert_eq!(Err(InvalidDecimal(".5".into())), parse_decimal(".5"));
        assert_eq!(Err(InvalidDecimal("1.".into())), parse_decimal("1."));
        assert_eq!(Err(InvalidDecimal("1,5".into())), parse_decimal("1,5"));
        assert_eq!(Err(InvalidDecimal("5%".into())), parse_decimal("5%"));
    }

    #[test]
    fn fractional_digit_count() {
        assert_eq!(3, fractional_digits("0.625"));
        assert_eq!(5, fractional_digits("0.00730"));
        assert_eq!(0, fractional_digits("42"));
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!("0.454545", to_decimal(&ratio(5, 11), 6));
        assert_eq!("0.007304", to_decimal(&ratio(47, 6435), 6));
        assert_eq!("0.63", to_decimal(&ratio(5, 8), 2));
        assert_eq!("-0.63", to_decimal(&ratio(-5, 8), 2));
        assert_eq!("2", to_decimal(&ratio(3, 2), 0));
        assert_eq!("0.000035", to_decimal(&ratio(1, 28985), 6));
    }

    #[test]
    fn scientific_rendering() {
        assert_eq!("3.807e-6", to_scientific(&(ratio(47, 6435) - ratio(73, 10_000)), 3));
        assert_eq!("-2.500e1", to_scientific(&ratio(-25, 1), 3));
        assert_eq!("0.000e0", to_scientific(&ExactValue::zero(), 3));
        assert_eq!("1.000e-5", to_scientific(&ratio(99_996, 10_000_000_000), 3));
        assert_eq!("-1.000e1", to_scientific(&ratio(-99_996, 10_000), 3));
        assert_eq!("9.999e-6", to_scientific(&ratio(99_994, 10_000_000_000), 3));
    }

    #[test]
    fn display_exact() {
        assert_eq!("5/11 ≈ 0.454545", DisplayExact::from(&ratio(5, 11)).to_string());
        assert_eq!("2/3 ≈ 0.67", DisplayExact::with_digits(&ratio(2, 3), 2).to_string());
        assert_eq!("670442572800", DisplayExact::from(&integer(670_442_572_800u64)).to_string());
    }
}
