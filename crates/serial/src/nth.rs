// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Exact serial arithmetic.
//!
//! Serial values are NUMERIC(38,0) and routinely exceed 64 bits, so every
//! step is computed on [`BigDecimal`]. A cyclic serial that runs past its
//! bound restarts at the opposite bound, it does not carry the excess over.
//!
//! A reserved block of a cyclic serial never spans the wrap: it ends at the
//! last value before the bound, or when reserved at the bound it starts the
//! next lap. The stored boundary therefore never trails a handed out value.

use bigdecimal::BigDecimal;
use num_traits::{ToPrimitive, Zero};
use strata_catalog::def::SerialRecord;
use strata_type::Result;
use tracing::warn;

use crate::error::SerialError;

/// Increment, bounds and wraparound of a serial
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
	pub increment: BigDecimal,
	pub min: BigDecimal,
	pub max: BigDecimal,
	pub cyclic: bool,
}

impl Progression {
	pub fn of(record: &SerialRecord) -> Self {
		Self {
			increment: record.increment_val.clone(),
			min: record.min_val.clone(),
			max: record.max_val.clone(),
			cyclic: record.cyclic,
		}
	}

	pub fn ascending(&self) -> bool {
		self.increment > BigDecimal::zero()
	}

	/// Value a cyclic serial wraps to
	pub fn restart(&self) -> &BigDecimal {
		if self.ascending() {
			&self.min
		} else {
			&self.max
		}
	}

	/// Value a serial cannot advance past
	pub fn bound(&self) -> &BigDecimal {
		if self.ascending() {
			&self.max
		} else {
			&self.min
		}
	}

	/// Steps `current` can still take before crossing its bound. For a
	/// cyclic serial these are the steps left in the current lap.
	pub fn remaining(&self, current: &BigDecimal) -> u64 {
		let span = if self.ascending() {
			&self.max - current
		} else {
			current - &self.min
		};
		if span <= BigDecimal::zero() {
			return 0;
		}
		let steps = (span / self.increment.abs()).with_scale(0);
		steps.to_u64().unwrap_or(u64::MAX)
	}

	/// Steps of one full lap, counting the step that wraps onto the restart
	/// value
	fn lap(&self) -> u64 {
		self.remaining(self.restart()).saturating_add(1)
	}
}

/// Value `n` increments after `current`
pub fn compute_nth(serial: &str, progression: &Progression, current: &BigDecimal, n: u64) -> Result<BigDecimal> {
	let candidate = current + &progression.increment * BigDecimal::from(n);

	if progression.ascending() && candidate > progression.max {
		if progression.cyclic {
			return Ok(progression.min.clone());
		}
		warn!(serial, max = %progression.max, "serial overflow");
		return Err(SerialError::RangeOverflow {
			name: serial.to_string(),
			bound: progression.max.clone(),
		}
		.into());
	}

	if !progression.ascending() && candidate < progression.min {
		if progression.cyclic {
			return Ok(progression.max.clone());
		}
		warn!(serial, min = %progression.min, "serial underflow");
		return Err(SerialError::RangeOverflow {
			name: serial.to_string(),
			bound: progression.min.clone(),
		}
		.into());
	}

	Ok(candidate)
}

/// Value `n` steps after `current`, walking a cyclic serial through its
/// wrap: the step past the bound lands on the restart value and the
/// following steps continue from there.
pub fn advance(serial: &str, progression: &Progression, current: &BigDecimal, n: u64) -> Result<BigDecimal> {
	let left = progression.remaining(current);
	if n <= left || !progression.cyclic {
		return compute_nth(serial, progression, current, n);
	}
	let rest = (n - left - 1) % progression.lap();
	compute_nth(serial, progression, progression.restart(), rest)
}

/// Steps reserved after a stored value and the new boundary they lead to
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
	pub steps: u64,
	pub boundary: BigDecimal,
}

/// Reserves `wanted` steps after `current`. Near the bound the reservation
/// shrinks to the steps left, fewer than `needed` is a range overflow.
///
/// A cyclic serial at its bound reserves from the next lap instead. When
/// `needed` itself crosses the wrap exactly `needed` steps are reserved,
/// at most one lap.
pub fn reserve(
	serial: &str,
	progression: &Progression,
	current: &BigDecimal,
	wanted: u64,
	needed: u64,
) -> Result<Reservation> {
	let left = progression.remaining(current);
	let steps = if !progression.cyclic || (left > 0 && needed <= left) {
		wanted.min(left)
	} else if left == 0 {
		wanted.min(progression.lap())
	} else {
		needed.min(progression.lap())
	};
	if steps < needed {
		warn!(serial, steps, needed, "serial exhausted");
		return Err(SerialError::RangeOverflow {
			name: serial.to_string(),
			bound: progression.bound().clone(),
		}
		.into());
	}
	let boundary = advance(serial, progression, current, steps)?;
	Ok(Reservation {
		steps,
		boundary,
	})
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;
	use crate::error::RANGE_OVERFLOW;

	fn progression(increment: i64, min: i64, max: i64, cyclic: bool) -> Progression {
		Progression {
			increment: BigDecimal::from(increment),
			min: BigDecimal::from(min),
			max: BigDecimal::from(max),
			cyclic,
		}
	}

	fn nth(p: &Progression, current: i64, n: u64) -> Result<BigDecimal> {
		compute_nth("s", p, &BigDecimal::from(current), n)
	}

	mod compute_nth {
		use super::*;

		#[test]
		fn test_monotonic_until_overflow() {
			let p = progression(1, 1, 1_000_000, false);
			let mut current = BigDecimal::from(5);
			for expected in 6..=100 {
				current = compute_nth("s", &p, &current, 1).unwrap();
				assert_eq!(current, BigDecimal::from(expected));
			}

			let last = BigDecimal::from(1_000_000);
			let err = compute_nth("s", &p, &last, 1).unwrap_err();
			assert_eq!(err.code(), RANGE_OVERFLOW);
		}

		#[test]
		fn test_steps() {
			let p = progression(3, 1, 100, false);
			assert_eq!(nth(&p, 10, 4).unwrap(), BigDecimal::from(22));
			assert_eq!(nth(&p, 10, 0).unwrap(), BigDecimal::from(10));
			assert_eq!(nth(&p, 97, 1).unwrap(), BigDecimal::from(100));
			assert!(nth(&p, 98, 1).is_err());
		}

		#[test]
		fn test_descending() {
			let p = progression(-2, -10, -1, false);
			assert_eq!(nth(&p, -1, 2).unwrap(), BigDecimal::from(-5));
			assert_eq!(nth(&p, -8, 1).unwrap(), BigDecimal::from(-10));
			let err = nth(&p, -9, 1).unwrap_err();
			assert_eq!(err.code(), RANGE_OVERFLOW);
			assert_eq!(err.message, "serial `s` cannot advance past -10");
		}

		#[test]
		fn test_cyclic_wraps_to_opposite_bound() {
			let p = progression(5, 1, 20, true);
			assert_eq!(nth(&p, 18, 1).unwrap(), BigDecimal::from(1));
			assert_eq!(nth(&p, 18, 10).unwrap(), BigDecimal::from(1));

			let p = progression(-5, 1, 20, true);
			assert_eq!(nth(&p, 3, 1).unwrap(), BigDecimal::from(20));
		}

		#[test]
		fn test_beyond_64_bits() {
			let p = Progression {
				increment: BigDecimal::from_str("1000000000000000000000").unwrap(),
				min: BigDecimal::from(1),
				max: BigDecimal::from_str("99999999999999999999999999999999999999").unwrap(),
				cyclic: false,
			};
			let current = BigDecimal::from_str("18446744073709551615").unwrap();
			assert_eq!(
				compute_nth("s", &p, &current, 3).unwrap(),
				BigDecimal::from_str("3018446744073709551615").unwrap()
			);
		}
	}

	mod reserve {
		use super::*;

		fn reserve(p: &Progression, current: i64, wanted: u64, needed: u64) -> Result<Reservation> {
			super::super::reserve("s", p, &BigDecimal::from(current), wanted, needed)
		}

		#[test]
		fn test_full_block() {
			let p = progression(2, 1, 100, false);
			assert_eq!(
				reserve(&p, 1, 10, 1).unwrap(),
				Reservation {
					steps: 10,
					boundary: BigDecimal::from(21),
				}
			);
		}

		#[test]
		fn test_shrinks_near_bound() {
			let p = progression(1, 1, 10, false);
			assert_eq!(
				reserve(&p, 8, 5, 1).unwrap(),
				Reservation {
					steps: 2,
					boundary: BigDecimal::from(10),
				}
			);
			assert_eq!(reserve(&p, 8, 5, 3).unwrap_err().code(), RANGE_OVERFLOW);
			assert_eq!(reserve(&p, 10, 5, 1).unwrap_err().code(), RANGE_OVERFLOW);
		}

		#[test]
		fn test_nothing_needed_at_bound() {
			let p = progression(1, 1, 10, false);
			let reservation = reserve(&p, 10, 5, 0).unwrap();
			assert_eq!(reservation.steps, 0);
			assert_eq!(reservation.boundary, BigDecimal::from(10));
		}

		#[test]
		fn test_cyclic_block_stops_at_bound() {
			let p = progression(1, 1, 10, true);
			assert_eq!(
				reserve(&p, 8, 5, 1).unwrap(),
				Reservation {
					steps: 2,
					boundary: BigDecimal::from(10),
				}
			);
		}

		#[test]
		fn test_cyclic_request_crossing_wrap_reserves_what_it_needs() {
			let p = progression(1, 1, 10, true);
			assert_eq!(
				reserve(&p, 8, 5, 3).unwrap(),
				Reservation {
					steps: 3,
					boundary: BigDecimal::from(1),
				}
			);
			assert_eq!(reserve(&p, 8, 20, 10).unwrap().boundary, BigDecimal::from(8));
			assert_eq!(reserve(&p, 8, 20, 11).unwrap_err().code(), RANGE_OVERFLOW);
		}

		#[test]
		fn test_cyclic_block_at_bound_starts_next_lap() {
			let p = progression(1, 1, 10, true);
			assert_eq!(
				reserve(&p, 10, 5, 1).unwrap(),
				Reservation {
					steps: 5,
					boundary: BigDecimal::from(5),
				}
			);

			let p = progression(1, 1, 3, true);
			assert_eq!(
				reserve(&p, 3, 10, 1).unwrap(),
				Reservation {
					steps: 3,
					boundary: BigDecimal::from(3),
				}
			);
			assert_eq!(reserve(&p, 3, 10, 4).unwrap_err().code(), RANGE_OVERFLOW);

			let p = progression(-2, 1, 9, true);
			assert_eq!(
				reserve(&p, 2, 3, 1).unwrap(),
				Reservation {
					steps: 3,
					boundary: BigDecimal::from(5),
				}
			);
		}
	}

	mod advance {
		use super::*;

		fn advance(p: &Progression, current: i64, n: u64) -> BigDecimal {
			super::super::advance("s", p, &BigDecimal::from(current), n).unwrap()
		}

		#[test]
		fn test_within_lap() {
			let p = progression(1, 1, 10, true);
			assert_eq!(advance(&p, 3, 4), BigDecimal::from(7));
			assert_eq!(advance(&p, 3, 7), BigDecimal::from(10));
		}

		#[test]
		fn test_continues_after_wrap() {
			let p = progression(1, 1, 10, true);
			assert_eq!(advance(&p, 10, 1), BigDecimal::from(1));
			assert_eq!(advance(&p, 10, 5), BigDecimal::from(5));
			assert_eq!(advance(&p, 8, 5), BigDecimal::from(3));
			assert_eq!(advance(&p, 8, 22), BigDecimal::from(10));

			let p = progression(5, 1, 20, true);
			assert_eq!(advance(&p, 18, 2), BigDecimal::from(6));
		}

		#[test]
		fn test_non_cyclic_overflows() {
			let p = progression(1, 1, 10, false);
			let err = super::super::advance("s", &p, &BigDecimal::from(8), 3).unwrap_err();
			assert_eq!(err.code(), RANGE_OVERFLOW);
		}
	}

	mod remaining {
		use super::*;

		#[test]
		fn test_ascending() {
			let p = progression(3, 1, 100, false);
			assert_eq!(p.remaining(&BigDecimal::from(1)), 33);
			assert_eq!(p.remaining(&BigDecimal::from(98)), 0);
			assert_eq!(p.remaining(&BigDecimal::from(100)), 0);
		}

		#[test]
		fn test_descending() {
			let p = progression(-1, -5, -1, false);
			assert_eq!(p.remaining(&BigDecimal::from(-1)), 4);
			assert_eq!(p.remaining(&BigDecimal::from(-5)), 0);
		}

		#[test]
		fn test_cyclic_counts_rest_of_lap() {
			let p = progression(1, 1, 2, true);
			assert_eq!(p.remaining(&BigDecimal::from(1)), 1);
			assert_eq!(p.remaining(&BigDecimal::from(2)), 0);
		}
	}
}
