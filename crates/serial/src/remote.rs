// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use bigdecimal::BigDecimal;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use strata_type::Result;
use tracing::{debug, instrument};

use crate::{error::SerialError, generator::SerialGenerator, storage::TxnId};

/// Values handed from a real serial to a proxy: the `count` steps after
/// `start`, ending at `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialRange {
	/// Last value before the range
	pub start: BigDecimal,
	/// Last value of the range
	pub end: BigDecimal,
	pub count: u64,
}

/// Calls to the node holding the real serial of a proxy
pub trait RemoteSerials: Send + Sync {
	fn fetch_range(&self, node: &str, name: &str, count: u64) -> Result<SerialRange>;
}

/// Transaction ids of remote calls, kept clear of local ones
const REMOTE_TXN_BASE: u64 = 1 << 48;

/// Nodes of one process, wired directly to their generators
pub struct MemoryRemoteSerials {
	nodes: RwLock<HashMap<String, Arc<SerialGenerator>>>,
	unreachable: RwLock<HashSet<String>>,
	next_txn: AtomicU64,
}

impl Default for MemoryRemoteSerials {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryRemoteSerials {
	pub fn new() -> Self {
		Self {
			nodes: RwLock::new(HashMap::new()),
			unreachable: RwLock::new(HashSet::new()),
			next_txn: AtomicU64::new(REMOTE_TXN_BASE),
		}
	}

	pub fn register(&self, node: impl Into<String>, generator: Arc<SerialGenerator>) {
		self.nodes.write().insert(node.into(), generator);
	}

	/// Cuts `node` off, or reconnects it
	pub fn set_reachable(&self, node: &str, reachable: bool) {
		let mut unreachable = self.unreachable.write();
		if reachable {
			unreachable.remove(node);
		} else {
			unreachable.insert(node.to_string());
		}
	}
}

impl RemoteSerials for MemoryRemoteSerials {
	#[instrument(name = "serial::remote::fetch_range", level = "debug", skip(self))]
	fn fetch_range(&self, node: &str, name: &str, count: u64) -> Result<SerialRange> {
		let unavailable = || SerialError::RemoteUnavailable {
			node: node.to_string(),
			name: name.to_string(),
		};
		if self.unreachable.read().contains(node) {
			return Err(unavailable().into());
		}
		let Some(generator) = self.nodes.read().get(node).cloned() else {
			return Err(unavailable().into());
		};
		let txn = TxnId(self.next_txn.fetch_add(1, Ordering::SeqCst));
		let range = generator.reserve_range(txn, name, count)?;
		debug!(%txn, start = %range.start, end = %range.end, "range fetched");
		Ok(range)
	}
}
