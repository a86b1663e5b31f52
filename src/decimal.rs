// decimal.rs

//! Exact decimal numbers backed by dashu-float.

use std::fmt;
use std::str::FromStr;

use dashu_float::DBig;

use crate::error::CalcError;

/// Significant digits kept by division. Every other operation is exact.
const DIVISION_PRECISION: usize = 28;

/// Largest accepted operand magnitude: exponent plus significand digits, either direction.
const MAX_SCALE: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Decimal(DBig);

impl Decimal {
    pub fn is_zero(&self) -> bool {
        self.0 == DBig::ZERO
    }

    // Precision 0 means unlimited in dashu.
    fn exact(&self) -> DBig {
        self.0.clone().with_precision(0).value()
    }

    fn rounded(&self) -> DBig {
        self.0.clone().with_precision(DIVISION_PRECISION).value()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(self.exact() + other.exact())
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self(self.exact() - other.exact())
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self(self.exact() * other.exact())
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Self(self.rounded() / other.rounded()))
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let starts_ok = s
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
        if !starts_ok {
            return Err(CalcError::InvalidNumber(s.to_string()));
        }
        let value = s
            .parse::<DBig>()
            .map_err(|_| CalcError::InvalidNumber(s.to_string()))?;
        let (significand, exponent) = value.clone().into_repr().into_parts();
        let digits = significand.to_string().trim_start_matches('-').len();
        if exponent.unsigned_abs().saturating_add(digits) > MAX_SCALE {
            return Err(CalcError::InvalidNumber(s.to_string()));
        }
        Ok(Self(value))
    }
}

/// Plain positional notation without trailing fractional zeros: `11.0` prints as `11`.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The repr is normalized, so the significand carries no trailing zeros.
        let (significand, exponent) = self.0.clone().into_repr().into_parts();
        let text = significand.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        if exponent >= 0 {
            return write!(f, "{sign}{digits}{}", "0".repeat(exponent as usize));
        }
        let scale = exponent.unsigned_abs();
        if digits.len() > scale {
            let (whole, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{whole}.{frac}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}
