// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Semantic type tag resolved for a statement node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	SmallInt,
	Integer,
	BigInt,
	Float,
	Double,
	Numeric,
	Monetary,
	Char,
	Varchar,
	NChar,
	VarNChar,
	Bit,
	VarBit,
	Date,
	Time,
	Timestamp,
	Datetime,
	/// Result of predicates
	Logical,
	Object,
	Set,
	Multiset,
	Sequence,
	/// Type of the NULL literal
	Null,
	/// Not applicable, e.g. an untyped host variable slot
	Na,
	/// Type decided at run time, compatible with everything
	Maybe,
	/// No type could be derived. Never compatible.
	None,
}

impl Type {
	pub const ALL: [Type; 26] = [
		Type::SmallInt,
		Type::Integer,
		Type::BigInt,
		Type::Float,
		Type::Double,
		Type::Numeric,
		Type::Monetary,
		Type::Char,
		Type::Varchar,
		Type::NChar,
		Type::VarNChar,
		Type::Bit,
		Type::VarBit,
		Type::Date,
		Type::Time,
		Type::Timestamp,
		Type::Datetime,
		Type::Logical,
		Type::Object,
		Type::Set,
		Type::Multiset,
		Type::Sequence,
		Type::Null,
		Type::Na,
		Type::Maybe,
		Type::None,
	];

	pub fn is_numeric(&self) -> bool {
		matches!(
			self,
			Type::SmallInt
				| Type::Integer | Type::BigInt
				| Type::Float | Type::Double
				| Type::Numeric | Type::Monetary
		)
	}

	pub fn is_integer(&self) -> bool {
		matches!(self, Type::SmallInt | Type::Integer | Type::BigInt)
	}

	pub fn is_string(&self) -> bool {
		matches!(self, Type::Char | Type::Varchar | Type::NChar | Type::VarNChar)
	}

	pub fn is_national(&self) -> bool {
		matches!(self, Type::NChar | Type::VarNChar)
	}

	pub fn is_bit(&self) -> bool {
		matches!(self, Type::Bit | Type::VarBit)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Type::Date | Type::Time | Type::Timestamp | Type::Datetime)
	}

	pub fn is_collection(&self) -> bool {
		matches!(self, Type::Set | Type::Multiset | Type::Sequence)
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Type::Object)
	}

	/// NULL, NA and MAYBE adapt to whatever they are combined with
	pub fn is_unknown(&self) -> bool {
		matches!(self, Type::Null | Type::Na | Type::Maybe)
	}

	/// Primitive types are everything except objects, collections and the
	/// special NULL/NA/MAYBE/NONE tags.
	pub fn is_primitive(&self) -> bool {
		!self.is_object() && !self.is_collection() && !self.is_unknown() && *self != Type::None
	}

	/// Types whose declared precision (and scale) are part of their identity
	pub fn is_fixed_precision(&self) -> bool {
		matches!(self, Type::Numeric | Type::Char | Type::NChar | Type::Bit)
	}

	pub fn has_precision(&self) -> bool {
		matches!(
			self,
			Type::Numeric
				| Type::Char | Type::Varchar
				| Type::NChar | Type::VarNChar
				| Type::Bit | Type::VarBit
		)
	}

	/// Number of decimal digits needed to hold every value of an exact
	/// numeric type.
	pub fn default_precision(&self) -> Option<u32> {
		match self {
			Type::SmallInt => Some(5),
			Type::Integer => Some(10),
			Type::BigInt => Some(19),
			Type::Numeric => Some(15),
			Type::Char | Type::NChar | Type::Bit => Some(1),
			_ => None,
		}
	}

	/// Rank used when promoting two numeric types to a common one
	pub fn numeric_rank(&self) -> Option<u8> {
		match self {
			Type::SmallInt => Some(1),
			Type::Integer => Some(2),
			Type::BigInt => Some(3),
			Type::Numeric => Some(4),
			Type::Float => Some(5),
			Type::Double => Some(6),
			Type::Monetary => Some(7),
			_ => None,
		}
	}

	/// Rank used when promoting two collection kinds
	pub fn collection_rank(&self) -> Option<u8> {
		match self {
			Type::Set => Some(1),
			Type::Multiset => Some(2),
			Type::Sequence => Some(3),
			_ => None,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Type::SmallInt => "SMALLINT",
			Type::Integer => "INTEGER",
			Type::BigInt => "BIGINT",
			Type::Float => "FLOAT",
			Type::Double => "DOUBLE",
			Type::Numeric => "NUMERIC",
			Type::Monetary => "MONETARY",
			Type::Char => "CHAR",
			Type::Varchar => "VARCHAR",
			Type::NChar => "NCHAR",
			Type::VarNChar => "NCHAR VARYING",
			Type::Bit => "BIT",
			Type::VarBit => "BIT VARYING",
			Type::Date => "DATE",
			Type::Time => "TIME",
			Type::Timestamp => "TIMESTAMP",
			Type::Datetime => "DATETIME",
			Type::Logical => "LOGICAL",
			Type::Object => "OBJECT",
			Type::Set => "SET",
			Type::Multiset => "MULTISET",
			Type::Sequence => "SEQUENCE",
			Type::Null => "NULL",
			Type::Na => "NA",
			Type::Maybe => "MAYBE",
			Type::None => "NONE",
		};
		f.write_str(name)
	}
}
