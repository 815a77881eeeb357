// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A calendar date without time information.
///
/// Internally stored as days since Unix epoch (1970-01-01). Valid years are
/// 1 through 9999.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
	days_since_epoch: i32,
}

// Calendar utilities
impl Date {
	pub const MIN_YEAR: i32 = 1;
	pub const MAX_YEAR: i32 = 9999;

	#[inline]
	fn is_leap_year(year: i32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	#[inline]
	pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	fn ymd_to_days_since_epoch(year: i32, month: u32, day: u32) -> Option<i32> {
		if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
			return None;
		}
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}

		// Howard Hinnant's days_from_civil, months counted from March
		let (y, m) = if month <= 2 {
			(year - 1, month as i32 + 9)
		} else {
			(year, month as i32 - 3)
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400;
		let doy = (153 * m + 2) / 5 + day as i32 - 1;
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
		Some(era * 146097 + doe - 719468)
	}

	fn days_since_epoch_to_ymd(days: i32) -> (i32, u32, u32) {
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097;
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
		let mp = (5 * doy + 2) / 153;
		let d = doy - (153 * mp + 2) / 5 + 1;
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		};
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year, m as u32, d as u32)
	}
}

impl Date {
	pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
		Self::ymd_to_days_since_epoch(year, month, day).map(|days_since_epoch| Self {
			days_since_epoch,
		})
	}

	/// Earliest representable date, 0001-01-01
	pub fn min() -> Self {
		Self {
			days_since_epoch: -719162,
		}
	}

	pub fn year(&self) -> i32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).0
	}

	pub fn month(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).1
	}

	pub fn day(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).2
	}

	pub fn to_days_since_epoch(&self) -> i32 {
		self.days_since_epoch
	}

	pub fn from_days_since_epoch(days: i32) -> Option<Self> {
		let date = Self {
			days_since_epoch: days,
		};
		let year = date.year();
		if (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
			Some(date)
		} else {
			None
		}
	}

	/// Parses `YYYY-MM-DD`
	pub fn parse(text: &str) -> Option<Self> {
		let mut parts = text.trim().splitn(3, '-');
		let year = parts.next()?.parse::<i32>().ok()?;
		let month = parts.next()?.parse::<u32>().ok()?;
		let day = parts.next()?.parse::<u32>().ok()?;
		Self::new(year, month, day)
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (year, month, day) = Self::days_since_epoch_to_ymd(self.days_since_epoch);
		write!(f, "{:04}-{:02}-{:02}", year, month, day)
	}
}
