// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
	/// Cache entries allocated up front
	pub initial_pool_capacity: usize,
	/// Name of this node, a global serial held elsewhere is served by proxy
	pub local_node: String,
	/// Values a proxy entry asks the real node for at once
	pub proxy_range_size: u32,
}

impl Default for SerialConfig {
	fn default() -> Self {
		Self {
			initial_pool_capacity: 64,
			local_node: "local".to_string(),
			proxy_range_size: 100,
		}
	}
}
