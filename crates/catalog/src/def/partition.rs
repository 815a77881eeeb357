// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strata_type::value::{ClassId, Domain, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionKind {
	Range,
	List,
	Hash,
}

impl Display for PartitionKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PartitionKind::Range => f.write_str("RANGE"),
			PartitionKind::List => f.write_str("LIST"),
			PartitionKind::Hash => f.write_str("HASH"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartitionBound {
	/// Values strictly below `max`. `None` is MAXVALUE.
	Range {
		max: Option<Value>,
	},
	List(Vec<Value>),
	Hash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionDef {
	pub name: String,
	pub class: ClassId,
	pub bound: PartitionBound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionInfo {
	pub kind: PartitionKind,
	/// Name of the partition key column
	pub key: String,
	pub key_domain: Domain,
	pub partitions: Vec<PartitionDef>,
	/// Physical nodes of a globally hash partitioned class
	pub nodes: Vec<String>,
}

impl PartitionInfo {
	pub fn partition(&self, name: &str) -> Option<&PartitionDef> {
		self.partitions.iter().find(|p| p.name.eq_ignore_ascii_case(name))
	}

	/// Upper bound of the last range partition, `None` for MAXVALUE
	pub fn range_max(&self) -> Option<Option<&Value>> {
		match &self.partitions.last()?.bound {
			PartitionBound::Range {
				max,
			} => Some(max.as_ref()),
			_ => None,
		}
	}
}
