//! Decimal-precise arithmetic for KSM amounts.
//!
//! Amounts travel as integers scaled by 10^12 ("base units"). Conversion to
//! and from human-readable values only moves the decimal point, so
//! `from_base_units(to_base_units(x, p), p) == x` for any `x` with at most
//! `p` fractional digits.
//!
//! Every operation is checked: overflow and division by zero surface as
//! [`ArithmeticError`] instead of panicking.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MAX_DECIMAL_PRECISION;
use crate::error::ArithmeticError;

/// `10^precision` as a `Decimal`.
fn power_of_ten(precision: u32) -> Result<Decimal, ArithmeticError> {
    if precision > MAX_DECIMAL_PRECISION {
        return Err(ArithmeticError::PrecisionTooLarge(precision));
    }
    Decimal::try_from_i128_with_scale(10i128.pow(precision), 0)
        .map_err(|_| ArithmeticError::Overflow)
}

/// Convert a human-readable amount (e.g. `1.5` KSM) into base units.
pub fn to_base_units(human: Decimal, precision: u32) -> Result<Decimal, ArithmeticError> {
    mul(human, power_of_ten(precision)?).map(|d| d.normalize())
}

/// Convert a base-unit amount back into its human-readable value.
///
/// Shifts the scale rather than dividing. Exact unless the shifted value
/// would need more than 28 fractional digits, in which case it is rounded
/// to 28.
pub fn from_base_units(base: Decimal, precision: u32) -> Result<Decimal, ArithmeticError> {
    if precision > MAX_DECIMAL_PRECISION {
        return Err(ArithmeticError::PrecisionTooLarge(precision));
    }
    // Drop trailing zeros first; a base-unit integer usually has plenty.
    let mut human = base.normalize();
    let room = MAX_DECIMAL_PRECISION - precision;
    if human.scale() > room {
        human = round_to(human, room);
    }
    human.set_scale(human.scale() + precision).map_err(|_| ArithmeticError::Overflow)?;
    Ok(human.normalize())
}

/// Parse a decimal string such as `"1000000000000"` or `"0.1375"`.
pub fn parse_decimal(s: &str) -> Result<Decimal, ArithmeticError> {
    Decimal::from_str(s.trim()).map_err(|_| ArithmeticError::InvalidDecimal(s.to_string()))
}

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, ArithmeticError> {
    a.checked_add(b).ok_or(ArithmeticError::Overflow)
}

pub fn sub(a: Decimal, b: Decimal) -> Result<Decimal, ArithmeticError> {
    a.checked_sub(b).ok_or(ArithmeticError::Overflow)
}

pub fn mul(a: Decimal, b: Decimal) -> Result<Decimal, ArithmeticError> {
    a.checked_mul(b).ok_or(ArithmeticError::Overflow)
}

/// Checked division. Callers guard zero divisors where a zero has meaning.
pub fn div(a: Decimal, b: Decimal) -> Result<Decimal, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ArithmeticError::Overflow)
}

/// Round to `precision` fractional digits, halves away from zero.
pub fn round_to(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}
