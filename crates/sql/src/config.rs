// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;
use strata_type::MAX_NUMERIC_PRECISION;

/// Limits and switches of the semantic checker
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
	/// Widest NUMERIC a common type may be widened to
	pub max_numeric_precision: u32,
	/// Most partitions of a RANGE or LIST partitioned class
	pub max_partitions: usize,
	/// Most buckets of a HASH partitioned class
	pub max_hash_partitions: usize,
	/// Add a full range predicate on an ordered, indexed first sort column
	pub order_by_index_hint: bool,
}

impl Default for CheckerConfig {
	fn default() -> Self {
		Self {
			max_numeric_precision: MAX_NUMERIC_PRECISION,
			max_partitions: 1024,
			max_hash_partitions: 1024,
			order_by_index_hint: true,
		}
	}
}
