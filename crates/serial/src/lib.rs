// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Serial value generation.
//!
//! [`SerialGenerator`] hands out values of serial objects. Cached serials
//! are served from a process-wide [`CachePool`] and written back once per
//! block; global serials held by another node are served by proxy through
//! [`RemoteSerials`].

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::SerialConfig;
pub use error::{RANGE_OVERFLOW, SerialError};
pub use generator::SerialGenerator;
pub use nth::{Progression, Reservation, advance, compute_nth, reserve};
pub use pool::{CacheEntry, CachePool, EntrySource};
pub use remote::{MemoryRemoteSerials, RemoteSerials, SerialRange};
pub use storage::{MemorySerialStorage, ReplicationEntry, SerialStorage, TxnId};

mod config;
mod error;
mod generator;
mod nth;
mod pool;
mod remote;
mod storage;
