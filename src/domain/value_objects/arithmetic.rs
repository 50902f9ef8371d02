//! # Quote Arithmetic
//!
//! Checked decimal helpers for deriving and rounding quote figures.
//!
//! Upstream providers speak `f64`; everything past the adapter boundary is
//! [`Decimal`]. Derived values (change, percent change) are computed on the
//! unrounded inputs and rounded once at the end with [`round_quote`].
//!
//! # Examples
//!
//! ```
//! use quote_proxy::domain::value_objects::arithmetic::{percent_change, round_quote};
//! use rust_decimal::Decimal;
//!
//! let change = Decimal::new(250, 2); // 2.50
//! let base = Decimal::new(10000, 2); // 100.00
//! assert_eq!(round_quote(percent_change(change, base).unwrap()), Decimal::new(250, 2));
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places exposed on the wire for every price-like field.
pub const QUOTE_DECIMAL_PLACES: u32 = 2;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Checked arithmetic that reports failures instead of panicking.
pub trait CheckedArithmetic: Sized {
    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result is out of range.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result is out of range.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Rounds to [`QUOTE_DECIMAL_PLACES`], midpoints away from zero.
#[inline]
#[must_use]
pub fn round_quote(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUOTE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an upstream float to a decimal.
///
/// NaN and infinities map to `None`, same as a missing field.
#[must_use]
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

/// Percent change of `change` relative to `base`.
///
/// A non-positive base yields zero rather than an error or a sign flip.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the intermediate product overflows.
pub fn percent_change(change: Decimal, base: Decimal) -> ArithmeticResult<Decimal> {
    if base <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    change.safe_div(base)?.safe_mul(Decimal::ONE_HUNDRED)
}
