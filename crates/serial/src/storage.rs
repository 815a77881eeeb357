// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	fmt::{Display, Formatter},
	sync::atomic::{AtomicBool, Ordering},
	time::{Duration, Instant},
};

use bigdecimal::BigDecimal;
use parking_lot::{Condvar, Mutex};
use strata_catalog::def::{SerialOid, SerialRecord, SerialRow, serial::attribute};
use strata_type::{Result, value::Value};
use tracing::{debug, instrument, warn};

use crate::error::SerialError;

/// Transaction on whose behalf storage is locked and written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxnId(pub u64);

impl Display for TxnId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "txn#{}", self.0)
	}
}

/// Durable home of serial rows.
///
/// A serial row is only written inside a system operation of the writing
/// transaction, while that transaction holds the row lock. Committing the
/// system operation makes the write visible and replicates it as one unit.
pub trait SerialStorage: Send + Sync {
	/// Looks a serial up through the unique index over its name
	fn find(&self, name: &str) -> Result<Option<SerialOid>>;

	fn read(&self, oid: SerialOid) -> Result<SerialRecord>;

	/// Takes the exclusive row lock, waiting at most the storage lock
	/// timeout
	fn lock(&self, txn: TxnId, oid: SerialOid) -> Result<()>;

	fn unlock(&self, txn: TxnId, oid: SerialOid);

	fn begin_system_op(&self, txn: TxnId) -> Result<()>;

	fn write(&self, txn: TxnId, record: &SerialRecord) -> Result<()>;

	fn commit_system_op(&self, txn: TxnId) -> Result<()>;

	fn abort_system_op(&self, txn: TxnId);
}

/// Row lock held until dropped
pub(crate) struct RowLock<'a> {
	storage: &'a dyn SerialStorage,
	txn: TxnId,
	oid: SerialOid,
}

impl<'a> RowLock<'a> {
	pub(crate) fn acquire(storage: &'a dyn SerialStorage, txn: TxnId, oid: SerialOid) -> Result<Self> {
		storage.lock(txn, oid)?;
		Ok(Self {
			storage,
			txn,
			oid,
		})
	}
}

impl Drop for RowLock<'_> {
	fn drop(&mut self) {
		self.storage.unlock(self.txn, self.oid);
	}
}

/// Nested top-level operation, aborted when dropped without a commit
pub(crate) struct SystemOp<'a> {
	storage: &'a dyn SerialStorage,
	txn: TxnId,
	open: bool,
}

impl<'a> SystemOp<'a> {
	pub(crate) fn begin(storage: &'a dyn SerialStorage, txn: TxnId) -> Result<Self> {
		storage.begin_system_op(txn)?;
		Ok(Self {
			storage,
			txn,
			open: true,
		})
	}

	pub(crate) fn commit(mut self) -> Result<()> {
		self.storage.commit_system_op(self.txn)?;
		self.open = false;
		Ok(())
	}
}

impl Drop for SystemOp<'_> {
	fn drop(&mut self) {
		if self.open {
			warn!(txn = %self.txn, "aborting system operation");
			self.storage.abort_system_op(self.txn);
		}
	}
}

/// A committed serial write as shipped to replicas
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationEntry {
	pub oid: SerialOid,
	pub name: String,
	pub current_val: BigDecimal,
}

#[derive(Default)]
struct MemoryState {
	rows: HashMap<SerialOid, SerialRow>,
	names: HashMap<String, SerialOid>,
	locks: HashMap<SerialOid, TxnId>,
	pending: HashMap<TxnId, Vec<(SerialOid, SerialRow)>>,
	log: Vec<ReplicationEntry>,
	next_oid: u64,
}

impl MemoryState {
	fn name_of(&self, oid: SerialOid) -> String {
		self.rows
			.get(&oid)
			.and_then(|row| row.iter().find(|(name, _)| *name == attribute::NAME))
			.and_then(|(_, value)| match value {
				Value::Varchar(name) => Some(name.clone()),
				_ => None,
			})
			.unwrap_or_else(|| oid.to_string())
	}
}

/// In-memory [`SerialStorage`] keeping every serial in its row form
pub struct MemorySerialStorage {
	state: Mutex<MemoryState>,
	released: Condvar,
	lock_timeout: Duration,
	fail_writes: AtomicBool,
}

impl Default for MemorySerialStorage {
	fn default() -> Self {
		Self::new()
	}
}

impl MemorySerialStorage {
	pub fn new() -> Self {
		Self::with_lock_timeout(Duration::from_secs(1))
	}

	pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
		Self {
			state: Mutex::new(MemoryState::default()),
			released: Condvar::new(),
			lock_timeout,
			fail_writes: AtomicBool::new(false),
		}
	}

	/// Stores `record` under a fresh oid and returns the oid
	pub fn insert(&self, record: SerialRecord) -> Result<SerialOid> {
		let mut state = self.state.lock();
		let key = record.name.to_lowercase();
		if state.names.contains_key(&key) {
			return Err(SerialError::storage(format!("duplicate serial name `{}`", record.name)).into());
		}
		state.next_oid += 1;
		let oid = SerialOid(state.next_oid);
		let record = SerialRecord {
			oid,
			..record
		};
		state.rows.insert(oid, record.to_row());
		state.names.insert(key, oid);
		debug!(%oid, name = %record.name, "serial stored");
		Ok(oid)
	}

	/// Makes every following write fail
	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Committed writes in commit order
	pub fn replication_log(&self) -> Vec<ReplicationEntry> {
		self.state.lock().log.clone()
	}

	pub fn is_locked(&self, oid: SerialOid) -> bool {
		self.state.lock().locks.contains_key(&oid)
	}

	pub fn open_system_ops(&self) -> usize {
		self.state.lock().pending.len()
	}
}

impl SerialStorage for MemorySerialStorage {
	fn find(&self, name: &str) -> Result<Option<SerialOid>> {
		Ok(self.state.lock().names.get(&name.to_lowercase()).copied())
	}

	fn read(&self, oid: SerialOid) -> Result<SerialRecord> {
		let state = self.state.lock();
		let Some(row) = state.rows.get(&oid) else {
			return Err(SerialError::NotFound {
				name: oid.to_string(),
			}
			.into());
		};
		Ok(SerialRecord::from_row(oid, row)?)
	}

	#[instrument(name = "serial::storage::lock", level = "trace", skip(self))]
	fn lock(&self, txn: TxnId, oid: SerialOid) -> Result<()> {
		let deadline = Instant::now() + self.lock_timeout;
		let mut state = self.state.lock();
		loop {
			let holder = state.locks.get(&oid).copied();
			match holder {
				None => {
					state.locks.insert(oid, txn);
					return Ok(());
				}
				Some(holder) if holder == txn => return Ok(()),
				Some(holder) => {
					if self.released.wait_until(&mut state, deadline).timed_out() {
						warn!(%oid, %holder, "row lock timed out");
						return Err(SerialError::LockTimeout {
							name: state.name_of(oid),
						}
						.into());
					}
				}
			}
		}
	}

	fn unlock(&self, txn: TxnId, oid: SerialOid) {
		let mut state = self.state.lock();
		if state.locks.get(&oid) == Some(&txn) {
			state.locks.remove(&oid);
			self.released.notify_all();
		}
	}

	fn begin_system_op(&self, txn: TxnId) -> Result<()> {
		let mut state = self.state.lock();
		if state.pending.contains_key(&txn) {
			return Err(SerialError::storage(format!("{} already has an open system operation", txn)).into());
		}
		state.pending.insert(txn, vec![]);
		Ok(())
	}

	fn write(&self, txn: TxnId, record: &SerialRecord) -> Result<()> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(SerialError::storage(format!("write of serial `{}` failed", record.name)).into());
		}
		let mut state = self.state.lock();
		if state.locks.get(&record.oid) != Some(&txn) {
			return Err(SerialError::storage(format!("{} writes serial `{}` without its lock", txn, record.name))
				.into());
		}
		let Some(pending) = state.pending.get_mut(&txn) else {
			return Err(SerialError::storage(format!("{} has no open system operation", txn)).into());
		};
		pending.push((record.oid, record.to_row()));
		Ok(())
	}

	fn commit_system_op(&self, txn: TxnId) -> Result<()> {
		let mut state = self.state.lock();
		let Some(writes) = state.pending.remove(&txn) else {
			return Err(SerialError::storage(format!("{} has no open system operation", txn)).into());
		};
		for (oid, row) in writes {
			let record = SerialRecord::from_row(oid, &row)?;
			state.log.push(ReplicationEntry {
				oid,
				name: record.name,
				current_val: record.current_val,
			});
			state.rows.insert(oid, row);
		}
		Ok(())
	}

	fn abort_system_op(&self, txn: TxnId) {
		if let Some(writes) = self.state.lock().pending.remove(&txn) {
			debug!(%txn, discarded = writes.len(), "system operation aborted");
		}
	}
}
