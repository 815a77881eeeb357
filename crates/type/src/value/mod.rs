// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

mod cast;
mod coerce;
mod domain;
pub mod numeric;
mod ordered;
mod promote;
pub mod temporal;
mod r#type;

pub use cast::{CastValidity, check_cast};
pub use coerce::CoercionError;
pub use domain::{ClassId, Domain};
pub use ordered::{OrderedF32, OrderedF64, OrderedFloatError};
pub use promote::{common_domain, common_type};
pub use temporal::{Date, Datetime, Time, Timestamp};
pub use r#type::Type;

/// A literal value as it appears in a statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	Null,
	/// A 2-byte signed integer
	SmallInt(i16),
	/// A 4-byte signed integer
	Integer(i32),
	/// An 8-byte signed integer
	BigInt(i64),
	/// A 4-byte floating point
	Float(OrderedF32),
	/// An 8-byte floating point
	Double(OrderedF64),
	/// An exact decimal
	Numeric(BigDecimal),
	Monetary(OrderedF64),
	Char(String),
	Varchar(String),
	NChar(String),
	VarNChar(String),
	/// Binary digits, one char per bit
	Bit(String),
	VarBit(String),
	Date(Date),
	Time(Time),
	Timestamp(Timestamp),
	Datetime(Datetime),
	Logical(bool),
	Set(Vec<Value>),
	Multiset(Vec<Value>),
	Sequence(Vec<Value>),
}

impl Value {
	pub fn double(v: impl Into<f64>) -> Self {
		OrderedF64::try_from(v.into()).map(Value::Double).unwrap_or(Value::Null)
	}

	pub fn float(v: impl Into<f32>) -> Self {
		OrderedF32::try_from(v.into()).map(Value::Float).unwrap_or(Value::Null)
	}

	pub fn varchar(v: impl Into<String>) -> Self {
		Value::Varchar(v.into())
	}

	/// Bit string from binary digits, `None` if `text` contains anything
	/// other than `0` and `1`
	pub fn bits(text: impl Into<String>) -> Option<Self> {
		let text = text.into();
		if text.bytes().all(|b| b == b'0' || b == b'1') {
			Some(Value::VarBit(text))
		} else {
			None
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn ty(&self) -> Type {
		match self {
			Value::Null => Type::Null,
			Value::SmallInt(_) => Type::SmallInt,
			Value::Integer(_) => Type::Integer,
			Value::BigInt(_) => Type::BigInt,
			Value::Float(_) => Type::Float,
			Value::Double(_) => Type::Double,
			Value::Numeric(_) => Type::Numeric,
			Value::Monetary(_) => Type::Monetary,
			Value::Char(_) => Type::Char,
			Value::Varchar(_) => Type::Varchar,
			Value::NChar(_) => Type::NChar,
			Value::VarNChar(_) => Type::VarNChar,
			Value::Bit(_) => Type::Bit,
			Value::VarBit(_) => Type::VarBit,
			Value::Date(_) => Type::Date,
			Value::Time(_) => Type::Time,
			Value::Timestamp(_) => Type::Timestamp,
			Value::Datetime(_) => Type::Datetime,
			Value::Logical(_) => Type::Logical,
			Value::Set(_) => Type::Set,
			Value::Multiset(_) => Type::Multiset,
			Value::Sequence(_) => Type::Sequence,
		}
	}

	/// Smallest domain holding this value exactly
	pub fn domain(&self) -> Domain {
		match self {
			Value::Numeric(d) => {
				let (precision, scale) = numeric::precision_and_scale(d);
				Domain::numeric(precision, scale)
			}
			Value::Char(s) | Value::Varchar(s) | Value::NChar(s) | Value::VarNChar(s) => {
				Domain::sized(self.ty(), Some(s.chars().count().max(1) as u32))
			}
			Value::Bit(s) | Value::VarBit(s) => Domain::sized(self.ty(), Some(s.len().max(1) as u32)),
			Value::Set(items) | Value::Multiset(items) | Value::Sequence(items) => {
				let mut elements: Vec<Domain> = vec![];
				for item in items.iter().filter(|item| !item.is_null()) {
					let domain = item.domain();
					match elements.iter_mut().find(|e| e.ty == domain.ty) {
						Some(existing) => {
							if let Some(merged) = common_domain(existing, &domain, crate::MAX_NUMERIC_PRECISION) {
								*existing = merged;
							}
						}
						None => elements.push(domain),
					}
				}
				Domain::collection(self.ty(), elements)
			}
			_ => Domain::new(self.ty()),
		}
	}

	/// Exact decimal view of a numeric value
	pub fn to_decimal(&self) -> Option<BigDecimal> {
		match self {
			Value::SmallInt(v) => Some(BigDecimal::from(*v)),
			Value::Integer(v) => Some(BigDecimal::from(*v)),
			Value::BigInt(v) => Some(BigDecimal::from(*v)),
			Value::Numeric(v) => Some(v.clone()),
			Value::Float(v) => BigDecimal::from_f32(v.value()),
			Value::Double(v) | Value::Monetary(v) => BigDecimal::from_f64(v.value()),
			_ => None,
		}
	}

	pub fn to_f64(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(v.value() as f64),
			Value::Double(v) | Value::Monetary(v) => Some(v.value()),
			other => other.to_decimal()?.to_f64(),
		}
	}

	/// Text of a string value
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Char(s) | Value::Varchar(s) | Value::NChar(s) | Value::VarNChar(s) => Some(s),
			_ => None,
		}
	}

	fn to_datetime(&self) -> Option<Datetime> {
		match self {
			Value::Date(d) => Datetime::from_parts(*d, Time::midnight(), 0),
			Value::Timestamp(ts) => Some(ts.to_datetime()),
			Value::Datetime(dt) => Some(*dt),
			_ => None,
		}
	}

	/// Orders two values of comparable families. `None` when either is NULL
	/// or the families differ.
	pub fn compare(&self, other: &Value) -> Option<Ordering> {
		let (l, r) = (self.ty(), other.ty());
		if l.is_numeric() && r.is_numeric() {
			return Some(self.to_decimal()?.cmp(&other.to_decimal()?));
		}
		if l.is_string() && r.is_string() {
			return Some(self.as_str()?.cmp(other.as_str()?));
		}
		match (self, other) {
			(Value::Bit(a) | Value::VarBit(a), Value::Bit(b) | Value::VarBit(b)) => Some(a.cmp(b)),
			(Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
			(Value::Logical(a), Value::Logical(b)) => Some(a.cmp(b)),
			_ if l.is_temporal() && r.is_temporal() => Some(self.to_datetime()?.cmp(&other.to_datetime()?)),
			_ => None,
		}
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::double(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Integer(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::BigInt(v)
	}
}

impl From<BigDecimal> for Value {
	fn from(v: BigDecimal) -> Self {
		Value::Numeric(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Varchar(v.to_string())
	}
}

fn quote(text: &str) -> String {
	text.replace('\'', "''")
}

fn write_items(f: &mut Formatter<'_>, prefix: &str, items: &[Value]) -> std::fmt::Result {
	write!(f, "{}{{", prefix)?;
	for (i, item) in items.iter().enumerate() {
		if i > 0 {
			write!(f, ", ")?;
		}
		write!(f, "{}", item)?;
	}
	write!(f, "}}")
}

/// Renders the value as a SQL literal
impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::SmallInt(v) => Display::fmt(v, f),
			Value::Integer(v) => Display::fmt(v, f),
			Value::BigInt(v) => Display::fmt(v, f),
			Value::Float(v) => Display::fmt(v, f),
			Value::Double(v) => Display::fmt(v, f),
			Value::Numeric(v) => Display::fmt(v, f),
			Value::Monetary(v) => write!(f, "${}", v),
			Value::Char(s) | Value::Varchar(s) => write!(f, "'{}'", quote(s)),
			Value::NChar(s) | Value::VarNChar(s) => write!(f, "N'{}'", quote(s)),
			Value::Bit(s) | Value::VarBit(s) => write!(f, "B'{}'", s),
			Value::Date(d) => write!(f, "DATE '{}'", d),
			Value::Time(t) => write!(f, "TIME '{}'", t),
			Value::Timestamp(ts) => write!(f, "TIMESTAMP '{}'", ts),
			Value::Datetime(dt) => write!(f, "DATETIME '{}'", dt),
			Value::Logical(true) => f.write_str("TRUE"),
			Value::Logical(false) => f.write_str("FALSE"),
			Value::Set(items) => write_items(f, "", items),
			Value::Multiset(items) => write_items(f, "MULTISET", items),
			Value::Sequence(items) => write_items(f, "SEQUENCE", items),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	fn dec(s: &str) -> Value {
		Value::Numeric(BigDecimal::from_str(s).unwrap())
	}

	#[test]
	fn test_literal_domain() {
		assert_eq!(dec("123.45").domain(), Domain::numeric(5, 2));
		assert_eq!(Value::varchar("abc").domain(), Domain::varchar(3));
		assert_eq!(Value::Integer(1).domain(), Domain::integer());
	}

	#[test]
	fn test_collection_domain_merges_element_types() {
		let set = Value::Set(vec![Value::varchar("a"), Value::varchar("abcd"), Value::Integer(3), Value::Null]);
		let domain = set.domain();
		assert_eq!(domain.ty, Type::Set);
		assert_eq!(domain.elements, vec![Domain::varchar(4), Domain::integer()]);
	}

	#[test]
	fn test_compare_across_numeric_types() {
		assert_eq!(Value::Integer(2).compare(&dec("1.5")), Some(Ordering::Greater));
		assert_eq!(Value::SmallInt(3).compare(&Value::BigInt(3)), Some(Ordering::Equal));
		assert_eq!(Value::Integer(1).compare(&Value::varchar("1")), None);
		assert_eq!(Value::Null.compare(&Value::Null), None);
	}

	#[test]
	fn test_compare_temporal() {
		let date = Value::Date(Date::new(2024, 1, 1).unwrap());
		let dt = Value::Datetime(Datetime::parse("2024-01-01 00:00:01").unwrap());
		assert_eq!(date.compare(&dt), Some(Ordering::Less));
	}

	#[test]
	fn test_display_literals() {
		assert_eq!(Value::varchar("it's").to_string(), "'it''s'");
		assert_eq!(Value::NChar("x".to_string()).to_string(), "N'x'");
		assert_eq!(Value::bits("0101").unwrap().to_string(), "B'0101'");
		assert_eq!(Value::Date(Date::new(2024, 3, 1).unwrap()).to_string(), "DATE '2024-03-01'");
		assert_eq!(Value::Set(vec![Value::Integer(1), Value::Integer(2)]).to_string(), "{1, 2}");
		assert_eq!(dec("1.50").to_string(), "1.50");
	}

	#[test]
	fn test_bits_validation() {
		assert!(Value::bits("0102").is_none());
	}
}
