// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Precision and scale of an exact decimal as written
pub fn precision_and_scale(value: &BigDecimal) -> (u32, u32) {
	let (digits, exponent) = value.as_bigint_and_exponent();
	if exponent < 0 {
		return (integer_digit_count(&value.with_scale(0)).max(1), 0);
	}
	let scale = exponent as u32;
	let count = if digits.is_zero() {
		1
	} else {
		digits.abs().to_string().len() as u32
	};
	(count.max(scale), scale)
}

/// Digits left of the decimal point, zero for |value| < 1
pub fn integer_digit_count(value: &BigDecimal) -> u32 {
	let truncated: BigInt = value.with_scale(0).as_bigint_and_exponent().0;
	if truncated.is_zero() {
		0
	} else {
		truncated.abs().to_string().len() as u32
	}
}

/// Rounds half away from zero to `scale` fractional digits
pub fn round_to_scale(value: &BigDecimal, scale: u32) -> BigDecimal {
	value.with_scale_round(scale as i64, RoundingMode::HalfUp)
}

pub fn pow10(exp: u32) -> BigInt {
	num_traits::pow(BigInt::from(10), exp as usize)
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	fn dec(s: &str) -> BigDecimal {
		BigDecimal::from_str(s).unwrap()
	}

	#[test]
	fn test_precision_and_scale() {
		assert_eq!(precision_and_scale(&dec("123.45")), (5, 2));
		assert_eq!(precision_and_scale(&dec("-7")), (1, 0));
		assert_eq!(precision_and_scale(&dec("0")), (1, 0));
		assert_eq!(precision_and_scale(&dec("0.05")), (2, 2));
		assert_eq!(precision_and_scale(&dec("1E+3")), (4, 0));
	}

	#[test]
	fn test_integer_digit_count() {
		assert_eq!(integer_digit_count(&dec("999.99")), 3);
		assert_eq!(integer_digit_count(&dec("-0.99")), 0);
	}

	#[test]
	fn test_round_half_away_from_zero() {
		assert_eq!(round_to_scale(&dec("1.005"), 2), dec("1.01"));
		assert_eq!(round_to_scale(&dec("-1.005"), 2), dec("-1.01"));
		assert_eq!(round_to_scale(&dec("2.5"), 0), dec("3"));
	}
}
