// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use strata_type::value::Value;

use crate::error::CatalogError;

/// Persistent identity of a serial object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SerialOid(pub u64);

impl Display for SerialOid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "serial#{}", self.0)
	}
}

/// Attribute names of the serial row. Stored rows depend on them, never
/// rename.
pub mod attribute {
	pub const NAME: &str = "name";
	pub const OWNER: &str = "owner";
	pub const CURRENT_VAL: &str = "current_val";
	pub const INCREMENT_VAL: &str = "increment_val";
	pub const MAX_VAL: &str = "max_val";
	pub const MIN_VAL: &str = "min_val";
	pub const CYCLIC: &str = "cyclic";
	pub const STARTED: &str = "started";
	pub const CLASS_NAME: &str = "class_name";
	pub const ATT_NAME: &str = "att_name";
	pub const CACHED_NUM: &str = "cached_num";
	pub const IS_GLOBAL: &str = "is_global";
	pub const NODE_NAME: &str = "node_name";

	pub const ALL: [&str; 13] = [
		NAME,
		OWNER,
		CURRENT_VAL,
		INCREMENT_VAL,
		MAX_VAL,
		MIN_VAL,
		CYCLIC,
		STARTED,
		CLASS_NAME,
		ATT_NAME,
		CACHED_NUM,
		IS_GLOBAL,
		NODE_NAME,
	];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialRecord {
	pub oid: SerialOid,
	pub name: String,
	pub owner: String,
	pub current_val: BigDecimal,
	pub increment_val: BigDecimal,
	pub max_val: BigDecimal,
	pub min_val: BigDecimal,
	pub cyclic: bool,
	/// False until the first value has been handed out. The first value of
	/// a fresh serial is `current_val` itself.
	pub started: bool,
	/// Class and attribute of an AUTO_INCREMENT serial
	pub class_name: Option<String>,
	pub att_name: Option<String>,
	/// Values reserved per storage write, 0 and 1 disable caching
	pub cached_num: u32,
	pub is_global: bool,
	/// Node holding the real serial of a global serial
	pub node_name: Option<String>,
}

/// A serial as stored: attribute name and value pairs in schema order
pub type SerialRow = Vec<(&'static str, Value)>;

fn flag(value: bool) -> Value {
	Value::Integer(value as i32)
}

fn optional(value: &Option<String>) -> Value {
	match value {
		Some(v) => Value::Varchar(v.clone()),
		None => Value::Null,
	}
}

impl SerialRecord {
	pub fn is_auto_increment(&self) -> bool {
		self.class_name.is_some() && self.att_name.is_some()
	}

	pub fn to_row(&self) -> SerialRow {
		vec![
			(attribute::NAME, Value::Varchar(self.name.clone())),
			(attribute::OWNER, Value::Varchar(self.owner.clone())),
			(attribute::CURRENT_VAL, Value::Numeric(self.current_val.clone())),
			(attribute::INCREMENT_VAL, Value::Numeric(self.increment_val.clone())),
			(attribute::MAX_VAL, Value::Numeric(self.max_val.clone())),
			(attribute::MIN_VAL, Value::Numeric(self.min_val.clone())),
			(attribute::CYCLIC, flag(self.cyclic)),
			(attribute::STARTED, flag(self.started)),
			(attribute::CLASS_NAME, optional(&self.class_name)),
			(attribute::ATT_NAME, optional(&self.att_name)),
			(attribute::CACHED_NUM, Value::Integer(self.cached_num as i32)),
			(attribute::IS_GLOBAL, flag(self.is_global)),
			(attribute::NODE_NAME, optional(&self.node_name)),
		]
	}

	pub fn from_row(oid: SerialOid, row: &[(&str, Value)]) -> Result<Self, CatalogError> {
		let get = |attribute: &'static str| {
			row.iter()
				.find(|(name, _)| *name == attribute)
				.map(|(_, value)| value)
				.ok_or(CatalogError::MalformedSerialRow {
					attribute,
				})
		};
		let malformed = |attribute: &'static str| CatalogError::MalformedSerialRow {
			attribute,
		};

		let text = |attribute: &'static str| -> Result<String, CatalogError> {
			match get(attribute)? {
				Value::Varchar(s) | Value::Char(s) => Ok(s.clone()),
				_ => Err(malformed(attribute)),
			}
		};
		let optional_text = |attribute: &'static str| -> Result<Option<String>, CatalogError> {
			match get(attribute)? {
				Value::Null => Ok(None),
				Value::Varchar(s) | Value::Char(s) => Ok(Some(s.clone())),
				_ => Err(malformed(attribute)),
			}
		};
		let number = |attribute: &'static str| -> Result<BigDecimal, CatalogError> {
			get(attribute)?.to_decimal().ok_or(malformed(attribute))
		};
		let integer = |attribute: &'static str| -> Result<i32, CatalogError> {
			match get(attribute)? {
				Value::Integer(v) => Ok(*v),
				Value::SmallInt(v) => Ok(*v as i32),
				_ => Err(malformed(attribute)),
			}
		};

		let cached_num = integer(attribute::CACHED_NUM)?;
		Ok(SerialRecord {
			oid,
			name: text(attribute::NAME)?,
			owner: text(attribute::OWNER)?,
			current_val: number(attribute::CURRENT_VAL)?,
			increment_val: number(attribute::INCREMENT_VAL)?,
			max_val: number(attribute::MAX_VAL)?,
			min_val: number(attribute::MIN_VAL)?,
			cyclic: integer(attribute::CYCLIC)? != 0,
			started: integer(attribute::STARTED)? != 0,
			class_name: optional_text(attribute::CLASS_NAME)?,
			att_name: optional_text(attribute::ATT_NAME)?,
			cached_num: u32::try_from(cached_num).map_err(|_| malformed(attribute::CACHED_NUM))?,
			is_global: integer(attribute::IS_GLOBAL)? != 0,
			node_name: optional_text(attribute::NODE_NAME)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	fn record() -> SerialRecord {
		SerialRecord {
			oid: SerialOid(3),
			name: "order_seq".to_string(),
			owner: "dba".to_string(),
			current_val: BigDecimal::from(1),
			increment_val: BigDecimal::from(1),
			max_val: BigDecimal::from_str("99999999999999999999999999999999999999").unwrap(),
			min_val: BigDecimal::from(1),
			cyclic: false,
			started: false,
			class_name: Some("orders".to_string()),
			att_name: Some("id".to_string()),
			cached_num: 20,
			is_global: false,
			node_name: None,
		}
	}

	#[test]
	fn test_row_uses_schema_attribute_order() {
		let row = record().to_row();
		let names: Vec<&str> = row.iter().map(|(name, _)| *name).collect();
		assert_eq!(names, attribute::ALL.to_vec());
	}

	#[test]
	fn test_row_roundtrip() {
		let record = record();
		assert_eq!(SerialRecord::from_row(record.oid, &record.to_row()), Ok(record));
	}

	#[test]
	fn test_missing_attribute() {
		let mut row = record().to_row();
		row.retain(|(name, _)| *name != attribute::STARTED);
		assert_eq!(
			SerialRecord::from_row(SerialOid(3), &row),
			Err(CatalogError::MalformedSerialRow {
				attribute: attribute::STARTED
			})
		);
	}

	#[test]
	fn test_auto_increment() {
		assert!(record().is_auto_increment());
		let plain = SerialRecord {
			class_name: None,
			att_name: None,
			..record()
		};
		assert!(!plain.is_auto_increment());
	}
}
