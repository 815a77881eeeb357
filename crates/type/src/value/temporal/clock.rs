// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Date;

const SECONDS_PER_DAY: i64 = 86_400;
const MILLIS_PER_DAY: i64 = SECONDS_PER_DAY * 1000;

/// Time of day with second precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
	seconds_since_midnight: u32,
}

impl Time {
	pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
		if hour > 23 || minute > 59 || second > 59 {
			return None;
		}
		Some(Self {
			seconds_since_midnight: hour * 3600 + minute * 60 + second,
		})
	}

	pub fn midnight() -> Self {
		Self::default()
	}

	pub fn hour(&self) -> u32 {
		self.seconds_since_midnight / 3600
	}

	pub fn minute(&self) -> u32 {
		(self.seconds_since_midnight / 60) % 60
	}

	pub fn second(&self) -> u32 {
		self.seconds_since_midnight % 60
	}

	pub fn seconds_since_midnight(&self) -> u32 {
		self.seconds_since_midnight
	}

	/// Parses `HH:MM:SS` or `HH:MM`
	pub fn parse(text: &str) -> Option<Self> {
		let (h, m, s, millis) = parse_clock(text.trim())?;
		if millis != 0 {
			return None;
		}
		Self::new(h, m, s)
	}
}

impl Display for Time {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
	}
}

/// Seconds since Unix epoch, limited to 1970-01-01 00:00:00 through
/// 2038-01-19 03:14:07 UTC.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
	seconds_since_epoch: i64,
}

impl Timestamp {
	pub const MAX_SECONDS: i64 = i32::MAX as i64;

	pub fn from_seconds(seconds: i64) -> Option<Self> {
		if (0..=Self::MAX_SECONDS).contains(&seconds) {
			Some(Self {
				seconds_since_epoch: seconds,
			})
		} else {
			None
		}
	}

	pub fn from_parts(date: Date, time: Time) -> Option<Self> {
		let seconds = date.to_days_since_epoch() as i64 * SECONDS_PER_DAY + time.seconds_since_midnight() as i64;
		Self::from_seconds(seconds)
	}

	pub fn seconds_since_epoch(&self) -> i64 {
		self.seconds_since_epoch
	}

	pub fn date(&self) -> Date {
		let days = self.seconds_since_epoch.div_euclid(SECONDS_PER_DAY) as i32;
		// always within 1970..2038
		Date::from_days_since_epoch(days).unwrap_or_default()
	}

	pub fn time(&self) -> Time {
		Time {
			seconds_since_midnight: self.seconds_since_epoch.rem_euclid(SECONDS_PER_DAY) as u32,
		}
	}

	pub fn to_datetime(&self) -> Datetime {
		Datetime {
			millis_since_epoch: self.seconds_since_epoch * 1000,
		}
	}

	/// Parses `YYYY-MM-DD HH:MM:SS`, a bare date means midnight
	pub fn parse(text: &str) -> Option<Self> {
		let (date, time) = parse_date_time(text)?;
		let (h, m, s, millis) = time;
		if millis != 0 {
			return None;
		}
		Self::from_parts(date, Time::new(h, m, s)?)
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.date(), self.time())
	}
}

/// Milliseconds since Unix epoch covering years 1 through 9999.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datetime {
	millis_since_epoch: i64,
}

impl Datetime {
	pub fn from_millis(millis: i64) -> Option<Self> {
		let days = millis.div_euclid(MILLIS_PER_DAY);
		Date::from_days_since_epoch(i32::try_from(days).ok()?)?;
		Some(Self {
			millis_since_epoch: millis,
		})
	}

	pub fn from_parts(date: Date, time: Time, millis: u32) -> Option<Self> {
		if millis > 999 {
			return None;
		}
		Self::from_millis(
			date.to_days_since_epoch() as i64 * MILLIS_PER_DAY
				+ time.seconds_since_midnight() as i64 * 1000
				+ millis as i64,
		)
	}

	pub fn min() -> Self {
		Self {
			millis_since_epoch: Date::min().to_days_since_epoch() as i64 * MILLIS_PER_DAY,
		}
	}

	pub fn millis_since_epoch(&self) -> i64 {
		self.millis_since_epoch
	}

	pub fn date(&self) -> Date {
		let days = self.millis_since_epoch.div_euclid(MILLIS_PER_DAY) as i32;
		Date::from_days_since_epoch(days).unwrap_or_default()
	}

	pub fn time(&self) -> Time {
		Time {
			seconds_since_midnight: (self.millis_since_epoch.rem_euclid(MILLIS_PER_DAY) / 1000) as u32,
		}
	}

	pub fn millisecond(&self) -> u32 {
		self.millis_since_epoch.rem_euclid(1000) as u32
	}

	pub fn to_timestamp(&self) -> Option<Timestamp> {
		Timestamp::from_seconds(self.millis_since_epoch.div_euclid(1000))
	}

	/// Parses `YYYY-MM-DD HH:MM:SS[.mmm]`, a bare date means midnight
	pub fn parse(text: &str) -> Option<Self> {
		let (date, (h, m, s, millis)) = parse_date_time(text)?;
		Self::from_parts(date, Time::new(h, m, s)?, millis)
	}
}

impl Display for Datetime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}.{:03}", self.date(), self.time(), self.millisecond())
	}
}

fn parse_date_time(text: &str) -> Option<(Date, (u32, u32, u32, u32))> {
	let text = text.trim();
	match text.split_once(|c| c == ' ' || c == 'T') {
		Some((date, time)) => Some((Date::parse(date)?, parse_clock(time.trim())?)),
		None => Some((Date::parse(text)?, (0, 0, 0, 0))),
	}
}

fn parse_clock(text: &str) -> Option<(u32, u32, u32, u32)> {
	let (clock, fraction) = match text.split_once('.') {
		Some((clock, fraction)) => (clock, Some(fraction)),
		None => (text, None),
	};

	let mut parts = clock.split(':');
	let hour = parts.next()?.parse::<u32>().ok()?;
	let minute = parts.next()?.parse::<u32>().ok()?;
	let second = match parts.next() {
		Some(s) => s.parse::<u32>().ok()?,
		None => 0,
	};
	if parts.next().is_some() {
		return None;
	}

	let millis = match fraction {
		None => 0,
		Some(f) if f.is_empty() || f.len() > 3 || !f.bytes().all(|b| b.is_ascii_digit()) => return None,
		Some(f) => f.parse::<u32>().ok()? * 10u32.pow(3 - f.len() as u32),
	};

	Some((hour, minute, second, millis))
}

#[cfg(test)]
mod tests {
	use super::*;

	mod time {
		use super::*;

		#[test]
		fn test_parse_and_display() {
			let time = Time::parse("09:05:30").unwrap();
			assert_eq!((time.hour(), time.minute(), time.second()), (9, 5, 30));
			assert_eq!(time.to_string(), "09:05:30");
			assert_eq!(Time::parse("23:59"), Time::new(23, 59, 0));
		}

		#[test]
		fn test_rejects_out_of_range() {
			assert!(Time::parse("24:00:00").is_none());
			assert!(Time::parse("12:60:00").is_none());
			assert!(Time::parse("12:00:00.5").is_none());
		}
	}

	mod timestamp {
		use super::*;

		#[test]
		fn test_parse() {
			let ts = Timestamp::parse("1970-01-02 00:00:01").unwrap();
			assert_eq!(ts.seconds_since_epoch(), 86_401);
			assert_eq!(ts.to_string(), "1970-01-02 00:00:01");
		}

		#[test]
		fn test_range() {
			assert!(Timestamp::parse("2038-01-19 03:14:07").is_some());
			assert!(Timestamp::parse("2038-01-19 03:14:08").is_none());
			assert!(Timestamp::parse("1969-12-31 23:59:59").is_none());
		}
	}

	mod datetime {
		use super::*;

		#[test]
		fn test_parse_with_millis() {
			let dt = Datetime::parse("2024-02-29 13:14:15.25").unwrap();
			assert_eq!(dt.millisecond(), 250);
			assert_eq!(dt.to_string(), "2024-02-29 13:14:15.250");
		}

		#[test]
		fn test_bare_date_is_midnight() {
			let dt = Datetime::parse("1999-12-31").unwrap();
			assert_eq!(dt.time(), Time::midnight());
			assert_eq!(dt.date(), Date::new(1999, 12, 31).unwrap());
		}

		#[test]
		fn test_before_epoch() {
			let dt = Datetime::parse("1969-12-31 23:59:59.999").unwrap();
			assert_eq!(dt.millis_since_epoch(), -1);
			assert_eq!(dt.date(), Date::new(1969, 12, 31).unwrap());
			assert!(dt.to_timestamp().is_none());
		}

		#[test]
		fn test_min() {
			assert_eq!(Datetime::min().to_string(), "0001-01-01 00:00:00.000");
		}
	}
}
