// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use thiserror::Error;

use crate::{
	error::diagnostic::{Diagnostic, IntoDiagnostic, cast},
	fragment::Fragment,
	value::{
		Domain, OrderedF32, OrderedF64, Type, Value, numeric,
		temporal::{Date, Datetime, Time, Timestamp},
	},
};

/// Why a literal could not be converted into a domain
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
	#[error("value {value} is out of range for {domain}")]
	Overflow {
		value: String,
		domain: Domain,
	},

	#[error("value {value} is incompatible with {domain}")]
	Incompatible {
		value: String,
		domain: Domain,
	},
}

impl CoercionError {
	pub fn is_overflow(&self) -> bool {
		matches!(self, CoercionError::Overflow { .. })
	}

	/// Diagnostic pointing at the literal that failed to convert
	pub fn at(self, fragment: Fragment) -> Diagnostic {
		match self {
			CoercionError::Overflow {
				value,
				domain,
			} => cast::value_overflow(fragment, &value, &domain),
			CoercionError::Incompatible {
				value,
				domain,
			} => cast::incompatible_value(fragment, &value, &domain),
		}
	}
}

impl IntoDiagnostic for CoercionError {
	fn into_diagnostic(self) -> Diagnostic {
		self.at(Fragment::None)
	}
}

type Coerced = Result<Value, CoercionError>;

impl Value {
	/// Converts the literal into `target`, rounding exact numerics to the
	/// target scale. NULL converts to every domain.
	pub fn coerce(&self, target: &Domain) -> Coerced {
		if self.is_null() {
			return Ok(Value::Null);
		}

		let ty = target.ty;
		match ty {
			Type::Maybe | Type::Na => Ok(self.clone()),
			Type::Null | Type::None | Type::Object => Err(self.incompatible(target)),
			Type::SmallInt | Type::Integer | Type::BigInt => self.coerce_integer(target),
			Type::Numeric => self.coerce_numeric(target),
			Type::Float | Type::Double | Type::Monetary => self.coerce_float(target),
			ty if ty.is_string() => self.coerce_string(target),
			ty if ty.is_bit() => self.coerce_bits(target),
			ty if ty.is_temporal() => self.coerce_temporal(target),
			Type::Logical => match self {
				Value::Logical(_) => Ok(self.clone()),
				_ => Err(self.incompatible(target)),
			},
			_ => self.coerce_collection(target),
		}
	}

	fn overflow(&self, domain: &Domain) -> CoercionError {
		CoercionError::Overflow {
			value: self.to_string(),
			domain: domain.clone(),
		}
	}

	fn incompatible(&self, domain: &Domain) -> CoercionError {
		CoercionError::Incompatible {
			value: self.to_string(),
			domain: domain.clone(),
		}
	}

	/// Numbers as exact decimals, strings parsed as numbers
	fn numeric_source(&self, target: &Domain) -> Result<BigDecimal, CoercionError> {
		if self.ty().is_numeric() {
			return self.to_decimal().ok_or_else(|| self.overflow(target));
		}
		match self.as_str() {
			Some(text) => BigDecimal::from_str(text.trim()).map_err(|_| self.incompatible(target)),
			None => Err(self.incompatible(target)),
		}
	}

	fn coerce_integer(&self, target: &Domain) -> Coerced {
		let decimal = self.numeric_source(target)?;
		let rounded = numeric::round_to_scale(&decimal, 0);
		let wide = rounded.to_i64().ok_or_else(|| self.overflow(target))?;
		let value = match target.ty {
			Type::SmallInt => Value::SmallInt(i16::try_from(wide).map_err(|_| self.overflow(target))?),
			Type::Integer => Value::Integer(i32::try_from(wide).map_err(|_| self.overflow(target))?),
			_ => Value::BigInt(wide),
		};
		Ok(value)
	}

	fn coerce_numeric(&self, target: &Domain) -> Coerced {
		let decimal = self.numeric_source(target)?;
		let scale = target.scale_or_default();
		let rounded = numeric::round_to_scale(&decimal, scale);
		if !target.fits(&rounded) {
			return Err(self.overflow(target));
		}
		Ok(Value::Numeric(rounded))
	}

	fn coerce_float(&self, target: &Domain) -> Coerced {
		let decimal = self.numeric_source(target)?;
		let wide = decimal.to_f64().filter(|f| f.is_finite()).ok_or_else(|| self.overflow(target))?;
		match target.ty {
			Type::Float => {
				let narrow = wide as f32;
				if !narrow.is_finite() {
					return Err(self.overflow(target));
				}
				OrderedF32::try_from(narrow).map(Value::Float).map_err(|_| self.incompatible(target))
			}
			Type::Monetary => {
				OrderedF64::try_from(wide).map(Value::Monetary).map_err(|_| self.incompatible(target))
			}
			_ => OrderedF64::try_from(wide).map(Value::Double).map_err(|_| self.incompatible(target)),
		}
	}

	/// Text a scalar value takes when stored into a string column
	fn textual(&self) -> Option<String> {
		let text = match self {
			Value::Char(s) | Value::Varchar(s) | Value::NChar(s) | Value::VarNChar(s) => s.clone(),
			Value::Bit(s) | Value::VarBit(s) => s.clone(),
			Value::Date(d) => d.to_string(),
			Value::Time(t) => t.to_string(),
			Value::Timestamp(ts) => ts.to_string(),
			Value::Datetime(dt) => dt.to_string(),
			Value::Logical(b) => b.to_string(),
			Value::Monetary(m) => m.to_string(),
			v if v.ty().is_numeric() => v.to_string(),
			_ => return None,
		};
		Some(text)
	}

	fn coerce_string(&self, target: &Domain) -> Coerced {
		let text = self.textual().ok_or_else(|| self.incompatible(target))?;
		if let Some(max) = target.precision {
			if text.chars().count() > max as usize {
				return Err(self.overflow(target));
			}
		}
		let value = match target.ty {
			Type::Char => Value::Char(text),
			Type::NChar => Value::NChar(text),
			Type::VarNChar => Value::VarNChar(text),
			_ => Value::Varchar(text),
		};
		Ok(value)
	}

	fn coerce_bits(&self, target: &Domain) -> Coerced {
		let digits = match self {
			Value::Bit(s) | Value::VarBit(s) => s.clone(),
			v => match v.as_str() {
				Some(s) if !s.is_empty() && s.bytes().all(|b| b == b'0' || b == b'1') => s.to_string(),
				_ => return Err(self.incompatible(target)),
			},
		};
		if let Some(max) = target.precision {
			if digits.len() > max as usize {
				return Err(self.overflow(target));
			}
		}
		Ok(match target.ty {
			Type::Bit => Value::Bit(digits),
			_ => Value::VarBit(digits),
		})
	}

	fn coerce_temporal(&self, target: &Domain) -> Coerced {
		let incompatible = || self.incompatible(target);
		let overflow = || self.overflow(target);
		match (target.ty, self) {
			(Type::Date, Value::Date(_)) => Ok(self.clone()),
			(Type::Date, Value::Timestamp(ts)) => Ok(Value::Date(ts.date())),
			(Type::Date, Value::Datetime(dt)) => Ok(Value::Date(dt.date())),
			(Type::Date, v) => {
				let text = v.as_str().ok_or_else(incompatible)?;
				Date::parse(text)
					.or_else(|| Datetime::parse(text).map(|dt| dt.date()))
					.map(Value::Date)
					.ok_or_else(incompatible)
			}

			(Type::Time, Value::Time(_)) => Ok(self.clone()),
			(Type::Time, Value::Timestamp(ts)) => Ok(Value::Time(ts.time())),
			(Type::Time, Value::Datetime(dt)) => Ok(Value::Time(dt.time())),
			(Type::Time, v) => {
				let text = v.as_str().ok_or_else(incompatible)?;
				Time::parse(text).map(Value::Time).ok_or_else(incompatible)
			}

			(Type::Timestamp, Value::Timestamp(_)) => Ok(self.clone()),
			(Type::Timestamp, Value::Date(d)) => {
				Timestamp::from_parts(*d, Time::midnight()).map(Value::Timestamp).ok_or_else(overflow)
			}
			(Type::Timestamp, Value::Datetime(dt)) => {
				dt.to_timestamp().map(Value::Timestamp).ok_or_else(overflow)
			}
			(Type::Timestamp, v) => {
				let text = v.as_str().ok_or_else(incompatible)?;
				let dt = Datetime::parse(text).ok_or_else(incompatible)?;
				dt.to_timestamp().map(Value::Timestamp).ok_or_else(overflow)
			}

			(Type::Datetime, Value::Datetime(_)) => Ok(self.clone()),
			(Type::Datetime, Value::Timestamp(ts)) => Ok(Value::Datetime(ts.to_datetime())),
			(Type::Datetime, Value::Date(d)) => {
				Datetime::from_parts(*d, Time::midnight(), 0).map(Value::Datetime).ok_or_else(overflow)
			}
			(Type::Datetime, v) => {
				let text = v.as_str().ok_or_else(incompatible)?;
				Datetime::parse(text).map(Value::Datetime).ok_or_else(incompatible)
			}

			_ => Err(incompatible()),
		}
	}

	fn coerce_collection(&self, target: &Domain) -> Coerced {
		let items = match self {
			Value::Set(items) | Value::Multiset(items) | Value::Sequence(items) => items,
			_ => return Err(self.incompatible(target)),
		};

		let mut coerced: Vec<Value> = Vec::with_capacity(items.len());
		for item in items {
			let value = if target.elements.is_empty() || item.is_null() {
				item.clone()
			} else {
				item.coerce_into_any(&target.elements)?
			};
			if target.ty == Type::Set && coerced.contains(&value) {
				continue;
			}
			coerced.push(value);
		}

		Ok(match target.ty {
			Type::Set => Value::Set(coerced),
			Type::Multiset => Value::Multiset(coerced),
			_ => Value::Sequence(coerced),
		})
	}

	/// First element domain that accepts the value. Reports the first
	/// failure when none does.
	fn coerce_into_any(&self, domains: &[Domain]) -> Coerced {
		if let Some(domain) = domains.iter().find(|d| d.ty == self.ty()) {
			if let Ok(value) = self.coerce(domain) {
				return Ok(value);
			}
		}
		let mut first_error = None;
		for domain in domains {
			match self.coerce(domain) {
				Ok(value) => return Ok(value),
				Err(err) => {
					first_error.get_or_insert(err);
				}
			}
		}
		Err(first_error.unwrap_or_else(|| self.incompatible(&Domain::new(Type::None))))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dec(s: &str) -> Value {
		Value::Numeric(BigDecimal::from_str(s).unwrap())
	}

	mod numeric {
		use super::*;

		#[test]
		fn test_rescale_rounds_half_up() {
			assert_eq!(dec("1.005").coerce(&Domain::numeric(5, 2)), Ok(dec("1.01")));
		}

		#[test]
		fn test_overflow() {
			let err = dec("1234.5").coerce(&Domain::numeric(5, 2)).unwrap_err();
			assert!(err.is_overflow());
		}

		#[test]
		fn test_rounding_can_overflow() {
			let err = dec("999.995").coerce(&Domain::numeric(5, 2)).unwrap_err();
			assert!(err.is_overflow());
		}

		#[test]
		fn test_from_integer_and_string() {
			assert_eq!(Value::Integer(42).coerce(&Domain::numeric(4, 1)), Ok(dec("42.0")));
			assert_eq!(Value::varchar(" 3.14 ").coerce(&Domain::numeric(3, 2)), Ok(dec("3.14")));
		}

		#[test]
		fn test_unparsable_string_is_incompatible() {
			let err = Value::varchar("abc").coerce(&Domain::numeric(5, 2)).unwrap_err();
			assert!(!err.is_overflow());
		}
	}

	mod integer {
		use super::*;

		#[test]
		fn test_range() {
			assert_eq!(Value::Integer(300).coerce(&Domain::smallint()), Ok(Value::SmallInt(300)));
			assert!(Value::Integer(40_000).coerce(&Domain::smallint()).unwrap_err().is_overflow());
			assert!(Value::BigInt(i64::MAX).coerce(&Domain::integer()).unwrap_err().is_overflow());
		}

		#[test]
		fn test_rounds_fraction() {
			assert_eq!(dec("2.5").coerce(&Domain::integer()), Ok(Value::Integer(3)));
			assert_eq!(dec("-2.5").coerce(&Domain::integer()), Ok(Value::Integer(-3)));
		}

		#[test]
		fn test_date_is_incompatible() {
			let date = Value::Date(Date::new(2024, 1, 1).unwrap());
			assert!(!date.coerce(&Domain::integer()).unwrap_err().is_overflow());
		}
	}

	mod string {
		use super::*;

		#[test]
		fn test_length_overflow() {
			assert!(Value::varchar("abcdef").coerce(&Domain::varchar(3)).unwrap_err().is_overflow());
			assert_eq!(Value::varchar("abc").coerce(&Domain::char(3)), Ok(Value::Char("abc".to_string())));
		}

		#[test]
		fn test_number_to_string() {
			assert_eq!(Value::Integer(12).coerce(&Domain::varchar(5)), Ok(Value::varchar("12")));
			assert_eq!(dec("1.50").coerce(&Domain::varchar(10)), Ok(Value::varchar("1.50")));
		}

		#[test]
		fn test_collection_to_string_is_incompatible() {
			let set = Value::Set(vec![Value::Integer(1)]);
			assert!(!set.coerce(&Domain::varchar(10)).unwrap_err().is_overflow());
		}
	}

	mod temporal {
		use super::*;

		#[test]
		fn test_parse_string() {
			assert_eq!(
				Value::varchar("2024-02-29").coerce(&Domain::new(Type::Date)),
				Ok(Value::Date(Date::new(2024, 2, 29).unwrap()))
			);
			assert!(!Value::varchar("2024-02-30").coerce(&Domain::new(Type::Date)).unwrap_err().is_overflow());
		}

		#[test]
		fn test_timestamp_range_overflow() {
			let far = Value::Date(Date::new(2100, 1, 1).unwrap());
			assert!(far.coerce(&Domain::new(Type::Timestamp)).unwrap_err().is_overflow());
		}

		#[test]
		fn test_date_to_datetime() {
			let date = Value::Date(Date::new(2024, 5, 6).unwrap());
			let Value::Datetime(dt) = date.coerce(&Domain::new(Type::Datetime)).unwrap() else {
				panic!("expected datetime");
			};
			assert_eq!(dt.to_string(), "2024-05-06 00:00:00.000");
		}
	}

	mod collection {
		use super::*;

		#[test]
		fn test_elements_are_coerced_and_set_deduplicated() {
			let target = Domain::collection(Type::Set, vec![Domain::numeric(3, 1)]);
			let value = Value::Sequence(vec![Value::Integer(1), dec("1.0"), Value::Integer(2)]);
			assert_eq!(value.coerce(&target), Ok(Value::Set(vec![dec("1.0"), dec("2.0")])));
		}

		#[test]
		fn test_element_failure_propagates() {
			let target = Domain::collection(Type::Set, vec![Domain::smallint()]);
			let value = Value::Set(vec![Value::Integer(100_000)]);
			assert!(value.coerce(&target).unwrap_err().is_overflow());
		}
	}

	#[test]
	fn test_null_coerces_everywhere() {
		assert_eq!(Value::Null.coerce(&Domain::numeric(2, 0)), Ok(Value::Null));
		assert_eq!(Value::Null.coerce(&Domain::object(None)), Ok(Value::Null));
	}

	#[test]
	fn test_into_diagnostic_codes() {
		let overflow = dec("1000").coerce(&Domain::numeric(3, 0)).unwrap_err();
		assert_eq!(overflow.into_diagnostic().code, "COERCE_001");
		let incompatible = Value::varchar("x").coerce(&Domain::integer()).unwrap_err();
		assert_eq!(incompatible.into_diagnostic().code, "COERCE_002");
	}
}
