// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::def::PartitionKind;
use strata_type::fragment::Fragment;

use crate::ast::Expr;

/// PARTITION BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSpec {
	pub kind: PartitionKind,
	/// Partition key, a single column or an expression over one column
	pub key: Expr,
	pub partitions: Vec<PartitionDefinition>,
	/// PARTITIONS n of a hash partitioning
	pub hash_size: Option<i64>,
	/// Physical nodes of a global hash partitioning
	pub nodes: Vec<String>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionDefinition {
	pub name: String,
	pub values: PartitionValues,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionValues {
	/// VALUES LESS THAN (v), `v` may be MAXVALUE
	LessThan(Expr),
	/// VALUES IN (v, ...)
	In(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionAlter {
	/// PARTITION BY on an existing class
	Apply(PartitionSpec),
	Add(Vec<PartitionDefinition>),
	/// ADD PARTITION PARTITIONS n of a hash partitioning
	AddHash(i64),
	Drop(Vec<String>),
	Reorganize {
		partitions: Vec<String>,
		into: Vec<PartitionDefinition>,
	},
	/// Empty for every partition
	Analyze(Vec<String>),
	Coalesce(i64),
	Remove,
}

impl PartitionSpec {
	pub fn range(key: Expr, partitions: Vec<PartitionDefinition>) -> Self {
		Self {
			kind: PartitionKind::Range,
			key,
			partitions,
			hash_size: None,
			nodes: vec![],
			fragment: Fragment::None,
		}
	}

	pub fn list(key: Expr, partitions: Vec<PartitionDefinition>) -> Self {
		Self {
			kind: PartitionKind::List,
			..Self::range(key, partitions)
		}
	}

	pub fn hash(key: Expr, size: i64) -> Self {
		Self {
			kind: PartitionKind::Hash,
			hash_size: Some(size),
			..Self::range(key, vec![])
		}
	}
}

impl PartitionDefinition {
	pub fn less_than(name: impl Into<String>, max: Expr) -> Self {
		Self {
			name: name.into(),
			values: PartitionValues::LessThan(max),
			fragment: Fragment::None,
		}
	}

	pub fn values_in(name: impl Into<String>, values: Vec<Expr>) -> Self {
		Self {
			name: name.into(),
			values: PartitionValues::In(values),
			fragment: Fragment::None,
		}
	}

	pub fn fragment(&self) -> Fragment {
		if self.fragment.is_none() {
			Fragment::internal(format!("PARTITION {}", self.name))
		} else {
			self.fragment.clone()
		}
	}
}
