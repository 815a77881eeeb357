// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use parking_lot::{Mutex, MutexGuard};
use slab::Slab;
use strata_catalog::def::{SerialOid, SerialRecord};
use strata_type::Result;
use tracing::{debug, instrument};

use crate::nth::{Progression, advance, compute_nth};

/// Where a cache entry gets its next block of values from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
	/// The local serial row
	Local,
	/// The real serial on another node
	Proxy {
		node: String,
	},
}

/// In-memory state of one serial.
///
/// `current` is the last value handed out, or the first value to hand out
/// while `started` is false. The `available` steps after `current` up to
/// `last_cached` are reserved already and cost no storage write.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
	pub oid: SerialOid,
	pub name: String,
	pub progression: Progression,
	pub current: BigDecimal,
	pub last_cached: BigDecimal,
	pub available: u64,
	pub started: bool,
	pub source: EntrySource,
}

impl CacheEntry {
	/// Entry of a local serial, nothing reserved yet
	pub fn local(record: &SerialRecord) -> Self {
		Self {
			oid: record.oid,
			name: record.name.clone(),
			progression: Progression::of(record),
			current: record.current_val.clone(),
			last_cached: record.current_val.clone(),
			available: 0,
			started: record.started,
			source: EntrySource::Local,
		}
	}

	/// Entry of a serial whose values come from `node`. Values of a proxy
	/// always start after the range start, so a proxy entry counts as
	/// started from the beginning.
	pub fn proxy(record: &SerialRecord, node: impl Into<String>) -> Self {
		Self {
			started: true,
			source: EntrySource::Proxy {
				node: node.into(),
			},
			..Self::local(record)
		}
	}

	/// Reserved steps `count` values take
	pub fn needed(&self, count: u64) -> u64 {
		if self.started {
			count
		} else {
			count.saturating_sub(1)
		}
	}

	pub fn can_serve(&self, count: u64) -> bool {
		self.available >= self.needed(count)
	}

	/// Hands out `count` reserved values and returns the first one
	pub fn take(&mut self, count: u64) -> Result<BigDecimal> {
		let steps = self.needed(count);
		let first = if self.started {
			compute_nth(&self.name, &self.progression, &self.current, 1)?
		} else {
			self.current.clone()
		};
		let current = advance(&self.name, &self.progression, &self.current, steps)?;

		self.current = current;
		self.available -= steps;
		self.started = true;
		Ok(first)
	}
}

pub struct PoolEntries {
	entries: Slab<CacheEntry>,
	index: HashMap<SerialOid, usize>,
}

impl PoolEntries {
	pub fn get(&self, oid: SerialOid) -> Option<&CacheEntry> {
		self.index.get(&oid).and_then(|&key| self.entries.get(key))
	}

	pub fn get_mut(&mut self, oid: SerialOid) -> Option<&mut CacheEntry> {
		let key = *self.index.get(&oid)?;
		self.entries.get_mut(key)
	}

	/// Adds `entry`, replacing any entry of the same serial. Freed slots
	/// are reused before the slab grows.
	pub fn insert(&mut self, entry: CacheEntry) -> &mut CacheEntry {
		let oid = entry.oid;
		if let Some(key) = self.index.get(&oid).copied() {
			self.entries[key] = entry;
			return &mut self.entries[key];
		}
		let key = self.entries.insert(entry);
		self.index.insert(oid, key);
		debug!(%oid, slot = key, "serial cached");
		&mut self.entries[key]
	}

	pub fn remove(&mut self, oid: SerialOid) -> Option<CacheEntry> {
		let key = self.index.remove(&oid)?;
		self.entries.try_remove(key)
	}

	pub fn clear(&mut self) -> usize {
		let count = self.entries.len();
		self.entries.clear();
		self.index.clear();
		count
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Cache entries of every serial in use, behind one pool-wide lock.
///
/// Lookups, inserts, removals and refills all hold the lock, so refills
/// are serialized across serials.
pub struct CachePool {
	inner: Mutex<PoolEntries>,
}

impl CachePool {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			inner: Mutex::new(PoolEntries {
				entries: Slab::with_capacity(capacity),
				index: HashMap::with_capacity(capacity),
			}),
		}
	}

	#[instrument(name = "serial::pool::lock", level = "trace", skip(self))]
	pub fn lock(&self) -> MutexGuard<'_, PoolEntries> {
		self.inner.lock()
	}

	pub fn contains(&self, oid: SerialOid) -> bool {
		self.inner.lock().get(oid).is_some()
	}

	/// Copy of the entry of `oid`
	pub fn entry(&self, oid: SerialOid) -> Option<CacheEntry> {
		self.inner.lock().get(oid).cloned()
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Slots allocated, in use or free
	pub fn capacity(&self) -> usize {
		self.inner.lock().entries.capacity()
	}
}

#[cfg(test)]
mod tests {
	use strata_catalog::test_utils;

	use super::*;

	fn record(oid: u64, name: &str) -> SerialRecord {
		SerialRecord {
			oid: SerialOid(oid),
			..test_utils::serial(name)
		}
	}

	mod entry {
		use super::*;

		#[test]
		fn test_first_value_of_fresh_serial_is_current() {
			let mut entry = CacheEntry::local(&record(1, "s"));
			entry.available = 4;
			assert!(entry.can_serve(5));
			assert!(!entry.can_serve(6));

			assert_eq!(entry.take(1).unwrap(), BigDecimal::from(1));
			assert_eq!(entry.available, 4);
			assert_eq!(entry.take(2).unwrap(), BigDecimal::from(2));
			assert_eq!(entry.current, BigDecimal::from(3));
			assert_eq!(entry.available, 2);
		}

		#[test]
		fn test_started_serial_continues_after_current() {
			let mut entry = CacheEntry::local(&SerialRecord {
				started: true,
				current_val: BigDecimal::from(10),
				increment_val: BigDecimal::from(5),
				..record(1, "s")
			});
			entry.available = 3;
			assert_eq!(entry.take(1).unwrap(), BigDecimal::from(15));
			assert_eq!(entry.take(2).unwrap(), BigDecimal::from(20));
			assert_eq!(entry.current, BigDecimal::from(25));
			assert!(!entry.can_serve(1));
		}

		#[test]
		fn test_cyclic_block_starts_at_restart_value() {
			let mut entry = CacheEntry::local(&SerialRecord {
				started: true,
				current_val: BigDecimal::from(10),
				max_val: BigDecimal::from(10),
				cyclic: true,
				..record(1, "s")
			});
			entry.available = 5;
			assert_eq!(entry.take(3).unwrap(), BigDecimal::from(1));
			assert_eq!(entry.current, BigDecimal::from(3));
			assert_eq!(entry.take(2).unwrap(), BigDecimal::from(4));
			assert_eq!(entry.current, BigDecimal::from(5));
			assert!(!entry.can_serve(1));
		}

		#[test]
		fn test_proxy_counts_as_started() {
			let entry = CacheEntry::proxy(&record(1, "s"), "node2");
			assert!(entry.started);
			assert_eq!(entry.needed(3), 3);
			assert_eq!(
				entry.source,
				EntrySource::Proxy {
					node: "node2".to_string()
				}
			);
		}
	}

	mod pool {
		use super::*;

		#[test]
		fn test_insert_remove() {
			let pool = CachePool::with_capacity(4);
			{
				let mut entries = pool.lock();
				entries.insert(CacheEntry::local(&record(1, "a")));
				entries.insert(CacheEntry::local(&record(2, "b")));
			}
			assert_eq!(pool.len(), 2);
			assert!(pool.contains(SerialOid(2)));
			assert_eq!(pool.entry(SerialOid(1)).unwrap().name, "a");

			assert_eq!(pool.lock().remove(SerialOid(1)).unwrap().name, "a");
			assert!(pool.lock().remove(SerialOid(1)).is_none());
			assert!(!pool.contains(SerialOid(1)));
			assert_eq!(pool.len(), 1);
		}

		#[test]
		fn test_reinsert_replaces() {
			let pool = CachePool::with_capacity(4);
			let mut entries = pool.lock();
			entries.insert(CacheEntry::local(&record(1, "a"))).available = 7;
			entries.insert(CacheEntry::local(&record(1, "a")));
			assert_eq!(entries.len(), 1);
			assert_eq!(entries.get(SerialOid(1)).unwrap().available, 0);
		}

		#[test]
		fn test_freed_slots_are_reused() {
			let pool = CachePool::with_capacity(2);
			let capacity = pool.capacity();
			let mut entries = pool.lock();
			for round in 0..10u64 {
				entries.insert(CacheEntry::local(&record(round, "s")));
				entries.remove(SerialOid(round));
			}
			assert!(entries.is_empty());
			drop(entries);
			assert_eq!(pool.capacity(), capacity);
		}

		#[test]
		fn test_clear() {
			let pool = CachePool::with_capacity(2);
			let mut entries = pool.lock();
			for oid in 0..5u64 {
				entries.insert(CacheEntry::local(&record(oid, "s")));
			}
			assert_eq!(entries.clear(), 5);
			assert!(entries.get(SerialOid(3)).is_none());
		}
	}
}
