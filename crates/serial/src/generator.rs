// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Serial value generation.
//!
//! A serial with `cached_num` above one is served from its cache entry.
//! The entry hands out values in memory and writes the serial row once per
//! block: the stored `current_val` is the last value of the reserved block,
//! so a crash loses the unused rest of a block but never repeats a value.
//! Serials with `cached_num` of one or less are read, advanced and written
//! on every request.
//!
//! A global serial held by another node is served by proxy. Its entry asks
//! the real node for a range of values whenever it runs dry.

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use bigdecimal::BigDecimal;
use strata_catalog::def::{SerialOid, SerialRecord};
use strata_type::Result;
use tracing::{debug, instrument, trace};

use crate::{
	config::SerialConfig,
	error::SerialError,
	nth::{Progression, reserve},
	pool::{CacheEntry, CachePool, EntrySource},
	remote::{RemoteSerials, SerialRange},
	storage::{RowLock, SerialStorage, SystemOp, TxnId},
};

pub struct SerialGenerator {
	config: SerialConfig,
	storage: Arc<dyn SerialStorage>,
	remote: Option<Arc<dyn RemoteSerials>>,
	pool: CachePool,
	shut_down: AtomicBool,
}

impl SerialGenerator {
	pub fn new(config: SerialConfig, storage: Arc<dyn SerialStorage>) -> Self {
		let pool = CachePool::with_capacity(config.initial_pool_capacity);
		Self {
			config,
			storage,
			remote: None,
			pool,
			shut_down: AtomicBool::new(false),
		}
	}

	pub fn with_remote(mut self, remote: Arc<dyn RemoteSerials>) -> Self {
		self.remote = Some(remote);
		self
	}

	pub fn config(&self) -> &SerialConfig {
		&self.config
	}

	pub fn pool(&self) -> &CachePool {
		&self.pool
	}

	/// Reserves `count` consecutive values of serial `oid` and returns the
	/// first one
	#[instrument(name = "serial::next_value", level = "trace", skip(self))]
	pub fn next_value(&self, txn: TxnId, oid: SerialOid, count: u64) -> Result<BigDecimal> {
		self.ensure_running()?;
		if count == 0 {
			return Err(SerialError::ZeroCount.into());
		}

		let mut entries = self.pool.lock();
		if let Some(entry) = entries.get_mut(oid) {
			if entry.can_serve(count) {
				trace!(serial = %entry.name, "cache hit");
				return entry.take(count);
			}
			self.refill(txn, entry, count)?;
			return entry.take(count);
		}

		let record = self.storage.read(oid)?;
		let mut entry = match self.proxy_node(&record) {
			Some(node) => CacheEntry::proxy(&record, node),
			None if record.cached_num <= 1 => {
				drop(entries);
				return self.next_uncached(txn, oid, count);
			}
			None => CacheEntry::local(&record),
		};
		// cached only once the first block is reserved
		self.refill(txn, &mut entry, count)?;
		entries.insert(entry).take(count)
	}

	/// Last value handed out, or the first value to hand out of a serial
	/// that never produced one
	pub fn current_value(&self, oid: SerialOid) -> Result<BigDecimal> {
		self.ensure_running()?;
		if let Some(entry) = self.pool.entry(oid) {
			return Ok(entry.current);
		}
		Ok(self.storage.read(oid)?.current_val)
	}

	/// Drops the cache entry of `oid`, the unused rest of its block is lost
	pub fn decache(&self, oid: SerialOid) -> bool {
		let removed = self.pool.lock().remove(oid);
		if let Some(entry) = &removed {
			debug!(serial = %entry.name, lost = entry.available, "serial decached");
		}
		removed.is_some()
	}

	/// Empties the pool, every later request fails
	pub fn shutdown(&self) {
		self.shut_down.store(true, Ordering::SeqCst);
		let dropped = self.pool.lock().clear();
		debug!(dropped, "serial pool shut down");
	}

	/// Advances the stored serial `name` by `count` steps on behalf of a
	/// proxy. The range always starts after the stored value, also for a
	/// serial that has not produced its first value yet.
	#[instrument(name = "serial::reserve_range", level = "debug", skip(self))]
	pub fn reserve_range(&self, txn: TxnId, name: &str, count: u64) -> Result<SerialRange> {
		self.ensure_running()?;
		if count == 0 {
			return Err(SerialError::ZeroCount.into());
		}
		let Some(oid) = self.storage.find(name)? else {
			return Err(SerialError::NotFound {
				name: name.to_string(),
			}
			.into());
		};

		let storage = &*self.storage;
		let _lock = RowLock::acquire(storage, txn, oid)?;
		let op = SystemOp::begin(storage, txn)?;
		let mut record = storage.read(oid)?;
		let reservation = reserve(&record.name, &Progression::of(&record), &record.current_val, count, 1)?;

		let range = SerialRange {
			start: record.current_val.clone(),
			end: reservation.boundary.clone(),
			count: reservation.steps,
		};
		record.current_val = reservation.boundary;
		record.started = true;
		storage.write(txn, &record)?;
		op.commit()?;
		Ok(range)
	}

	fn ensure_running(&self) -> Result<()> {
		if self.shut_down.load(Ordering::SeqCst) {
			return Err(SerialError::ShutDown.into());
		}
		Ok(())
	}

	fn proxy_node(&self, record: &SerialRecord) -> Option<String> {
		match &record.node_name {
			Some(node) if record.is_global && !node.eq_ignore_ascii_case(&self.config.local_node) => {
				Some(node.clone())
			}
			_ => None,
		}
	}

	fn refill(&self, txn: TxnId, entry: &mut CacheEntry, count: u64) -> Result<()> {
		match entry.source.clone() {
			EntrySource::Local => self.refill_local(txn, entry, count),
			EntrySource::Proxy {
				node,
			} => self.refill_proxy(&node, entry, count),
		}
	}

	/// Reserves the next block under the row lock. The entry is only
	/// touched once the block is committed.
	#[instrument(name = "serial::refill", level = "debug", skip(self, entry), fields(serial = %entry.name))]
	fn refill_local(&self, txn: TxnId, entry: &mut CacheEntry, count: u64) -> Result<()> {
		let storage = &*self.storage;
		let _lock = RowLock::acquire(storage, txn, entry.oid)?;
		let op = SystemOp::begin(storage, txn)?;
		let mut record = storage.read(entry.oid)?;
		let progression = Progression::of(&record);

		let continues = record.current_val == entry.last_cached
			&& record.started == entry.started
			&& progression == entry.progression;
		let (current, started, available) = if continues {
			(entry.current.clone(), entry.started, entry.available)
		} else {
			debug!(stored = %record.current_val, "serial advanced outside the cache");
			(record.current_val.clone(), record.started, 0)
		};

		let needed = if started {
			count
		} else {
			count - 1
		}
		.saturating_sub(available);
		// a block holds cached_num values, the first of an unstarted serial
		// is the stored value itself
		let block = if started {
			u64::from(record.cached_num)
		} else {
			u64::from(record.cached_num).saturating_sub(1)
		};
		let wanted = block.max(needed);
		let reservation = reserve(&record.name, &progression, &record.current_val, wanted, needed)?;

		record.current_val = reservation.boundary.clone();
		record.started = true;
		storage.write(txn, &record)?;
		op.commit()?;

		debug!(steps = reservation.steps, boundary = %reservation.boundary, "block reserved");
		entry.name = record.name;
		entry.progression = progression;
		entry.current = current;
		entry.started = started;
		entry.available = available + reservation.steps;
		entry.last_cached = reservation.boundary;
		Ok(())
	}

	fn refill_proxy(&self, node: &str, entry: &mut CacheEntry, count: u64) -> Result<()> {
		let Some(remote) = &self.remote else {
			return Err(SerialError::RemoteUnavailable {
				node: node.to_string(),
				name: entry.name.clone(),
			}
			.into());
		};
		let wanted = u64::from(self.config.proxy_range_size).max(count);
		let range = remote.fetch_range(node, &entry.name, wanted)?;
		if range.count < count {
			return Err(SerialError::RangeOverflow {
				name: entry.name.clone(),
				bound: range.end,
			}
			.into());
		}

		entry.current = range.start;
		entry.last_cached = range.end;
		entry.available = range.count;
		Ok(())
	}

	/// Serves a serial without a cache: read, advance and write per request
	fn next_uncached(&self, txn: TxnId, oid: SerialOid, count: u64) -> Result<BigDecimal> {
		let storage = &*self.storage;
		let _lock = RowLock::acquire(storage, txn, oid)?;
		let op = SystemOp::begin(storage, txn)?;
		let mut record = storage.read(oid)?;

		let mut step = CacheEntry::local(&record);
		let needed = step.needed(count);
		step.available = reserve(&record.name, &step.progression, &record.current_val, needed, needed)?.steps;
		let first = step.take(count)?;

		record.current_val = step.current;
		record.started = true;
		storage.write(txn, &record)?;
		op.commit()?;
		trace!(serial = %record.name, value = %first, "uncached value");
		Ok(first)
	}
}
