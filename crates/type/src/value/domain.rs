// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::value::{
	OrderedF32, OrderedF64, Type, Value, numeric,
	temporal::{Date, Datetime, Time, Timestamp},
};

/// Identifier of a class (table) in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u64);

impl Display for ClassId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A type together with its declared parameters.
///
/// `precision` and `scale` are only meaningful for numeric, string and bit
/// types. An object domain without a class accepts any object. A collection
/// domain without element domains accepts any element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain {
	pub ty: Type,
	pub precision: Option<u32>,
	pub scale: Option<u32>,
	pub class: Option<ClassId>,
	pub elements: Vec<Domain>,
}

impl Domain {
	pub fn new(ty: Type) -> Self {
		Self {
			ty,
			precision: None,
			scale: None,
			class: None,
			elements: vec![],
		}
	}

	pub fn smallint() -> Self {
		Self::new(Type::SmallInt)
	}

	pub fn integer() -> Self {
		Self::new(Type::Integer)
	}

	pub fn bigint() -> Self {
		Self::new(Type::BigInt)
	}

	pub fn double() -> Self {
		Self::new(Type::Double)
	}

	pub fn null() -> Self {
		Self::new(Type::Null)
	}

	pub fn numeric(precision: u32, scale: u32) -> Self {
		Self {
			precision: Some(precision),
			scale: Some(scale),
			..Self::new(Type::Numeric)
		}
	}

	/// String or bit domain, `None` means unbounded
	pub fn sized(ty: Type, precision: Option<u32>) -> Self {
		Self {
			precision,
			..Self::new(ty)
		}
	}

	pub fn varchar(precision: u32) -> Self {
		Self::sized(Type::Varchar, Some(precision))
	}

	pub fn char(precision: u32) -> Self {
		Self::sized(Type::Char, Some(precision))
	}

	pub fn object(class: Option<ClassId>) -> Self {
		Self {
			class,
			..Self::new(Type::Object)
		}
	}

	pub fn collection(ty: Type, elements: Vec<Domain>) -> Self {
		debug_assert!(ty.is_collection());
		Self {
			elements,
			..Self::new(ty)
		}
	}

	/// Declared precision, falling back to the type's natural precision
	pub fn precision_or_default(&self) -> Option<u32> {
		self.precision.or_else(|| self.ty.default_precision())
	}

	pub fn scale_or_default(&self) -> u32 {
		self.scale.unwrap_or(0)
	}

	/// Digits left of the decimal point for exact numeric domains
	pub fn integer_digits(&self) -> Option<u32> {
		let precision = self.precision_or_default()?;
		Some(precision.saturating_sub(self.scale_or_default()))
	}

	/// Object domain accepting any class
	pub fn is_wildcard(&self) -> bool {
		match self.ty {
			Type::Object => self.class.is_none(),
			ty if ty.is_collection() => self.elements.is_empty(),
			_ => false,
		}
	}

	/// Same type and same declared parameters
	pub fn same_parameters(&self, other: &Domain) -> bool {
		self.ty == other.ty
			&& self.precision_or_default() == other.precision_or_default()
			&& self.scale_or_default() == other.scale_or_default()
	}

	/// Smallest value of the domain, used as the low bound of index scans.
	/// `None` for domains without a total order.
	pub fn min_value(&self) -> Option<Value> {
		let value = match self.ty {
			Type::SmallInt => Value::SmallInt(i16::MIN),
			Type::Integer => Value::Integer(i32::MIN),
			Type::BigInt => Value::BigInt(i64::MIN),
			Type::Float => Value::Float(OrderedF32::try_from(f32::MIN).ok()?),
			Type::Double => Value::Double(OrderedF64::try_from(f64::MIN).ok()?),
			Type::Monetary => Value::Monetary(OrderedF64::try_from(f64::MIN).ok()?),
			Type::Numeric => {
				let precision = self.precision_or_default()?;
				let scale = self.scale_or_default();
				// -(10^p - 1) * 10^-s, all nines
				let nines = numeric::pow10(precision) - BigInt::one();
				Value::Numeric(-BigDecimal::new(nines, scale as i64))
			}
			Type::Char => Value::Char(String::new()),
			Type::Varchar => Value::Varchar(String::new()),
			Type::NChar => Value::NChar(String::new()),
			Type::VarNChar => Value::VarNChar(String::new()),
			Type::Bit => Value::Bit(String::new()),
			Type::VarBit => Value::VarBit(String::new()),
			Type::Date => Value::Date(Date::min()),
			Type::Time => Value::Time(Time::midnight()),
			Type::Timestamp => Value::Timestamp(Timestamp::from_seconds(0)?),
			Type::Datetime => Value::Datetime(Datetime::min()),
			Type::Logical => Value::Logical(false),
			Type::Object
			| Type::Set
			| Type::Multiset
			| Type::Sequence
			| Type::Null
			| Type::Na
			| Type::Maybe
			| Type::None => return None,
		};
		Some(value)
	}

	/// Whether the integer part of `value` fits the domain. Domains without a
	/// digit limit accept everything.
	pub fn fits(&self, value: &BigDecimal) -> bool {
		let Some(integer_digits) = self.integer_digits() else {
			return true;
		};
		numeric::integer_digit_count(value) <= integer_digits
	}
}

impl From<Type> for Domain {
	fn from(ty: Type) -> Self {
		Domain::new(ty)
	}
}

impl Display for Domain {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.ty {
			Type::Numeric => match (self.precision, self.scale) {
				(Some(p), Some(s)) => write!(f, "NUMERIC({},{})", p, s),
				(Some(p), None) => write!(f, "NUMERIC({})", p),
				_ => write!(f, "NUMERIC"),
			},
			ty if ty.has_precision() => match self.precision {
				Some(p) => write!(f, "{}({})", ty, p),
				None => write!(f, "{}", ty),
			},
			Type::Object => match self.class {
				Some(class) => write!(f, "OBJECT({})", class),
				None => write!(f, "OBJECT"),
			},
			ty if ty.is_collection() && !self.elements.is_empty() => {
				write!(f, "{}(", ty)?;
				for (i, element) in self.elements.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", element)?;
				}
				write!(f, ")")
			}
			ty => write!(f, "{}", ty),
		}
	}
}
