// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Duration};

use bigdecimal::BigDecimal;
use strata_catalog::{
	def::{SerialOid, SerialRecord},
	test_utils,
};
use strata_serial::{
	EntrySource, MemoryRemoteSerials, MemorySerialStorage, RANGE_OVERFLOW, SerialConfig, SerialGenerator,
	SerialRange, SerialStorage, TxnId,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

fn global(name: &str, node: &str) -> SerialRecord {
	SerialRecord {
		is_global: true,
		node_name: Some(node.to_string()),
		..test_utils::serial(name)
	}
}

fn config(node: &str, proxy_range_size: u32) -> SerialConfig {
	SerialConfig {
		local_node: node.to_string(),
		proxy_range_size,
		..SerialConfig::default()
	}
}

struct Cluster {
	real: Arc<SerialGenerator>,
	real_storage: Arc<MemorySerialStorage>,
	real_oid: SerialOid,
	proxy: SerialGenerator,
	proxy_oid: SerialOid,
	remote: Arc<MemoryRemoteSerials>,
}

fn cluster(record: SerialRecord, proxy_range_size: u32) -> Cluster {
	init_tracing();
	let real_storage = Arc::new(MemorySerialStorage::new());
	let real_oid = real_storage.insert(record.clone()).unwrap();
	let real = Arc::new(SerialGenerator::new(config("n1", 0), real_storage.clone()));

	let remote = Arc::new(MemoryRemoteSerials::new());
	remote.register("n1", Arc::clone(&real));

	let proxy_storage = Arc::new(MemorySerialStorage::new());
	let proxy_oid = proxy_storage.insert(record).unwrap();
	let proxy = SerialGenerator::new(config("n2", proxy_range_size), proxy_storage).with_remote(remote.clone());

	Cluster {
		real,
		real_storage,
		real_oid,
		proxy,
		proxy_oid,
		remote,
	}
}

#[test]
fn test_proxy_serves_fetched_range() {
	let c = cluster(global("g", "n1"), 10);

	let values: Vec<BigDecimal> = (0..12).map(|_| c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap()).collect();
	assert_eq!(values, (2..=13).map(BigDecimal::from).collect::<Vec<_>>());

	let entry = c.proxy.pool().entry(c.proxy_oid).unwrap();
	assert_eq!(
		entry.source,
		EntrySource::Proxy {
			node: "n1".to_string()
		}
	);
	assert_eq!(entry.last_cached, BigDecimal::from(21));
	assert_eq!(c.real_storage.read(c.real_oid).unwrap().current_val, BigDecimal::from(21));
	assert_eq!(c.real_storage.replication_log().len(), 2);
}

#[test]
fn test_real_node_serves_locally_after_proxy() {
	let c = cluster(global("g", "n1"), 5);
	assert_eq!(c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap(), BigDecimal::from(2));

	assert_eq!(c.real.next_value(TxnId(2), c.real_oid, 1).unwrap(), BigDecimal::from(7));
	assert!(c.real.pool().is_empty());
	assert_eq!(c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap(), BigDecimal::from(3));
}

#[test]
fn test_request_larger_than_range() {
	let c = cluster(global("g", "n1"), 4);
	assert_eq!(c.proxy.next_value(TxnId(1), c.proxy_oid, 9).unwrap(), BigDecimal::from(2));
	assert_eq!(c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap(), BigDecimal::from(11));
}

#[test]
fn test_unreachable_node() {
	let c = cluster(global("g", "n1"), 2);
	c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap();
	c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap();

	c.remote.set_reachable("n1", false);
	let err = c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap_err();
	assert_eq!(err.code(), "SERIAL_004");

	c.remote.set_reachable("n1", true);
	assert_eq!(c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap(), BigDecimal::from(4));
}

#[test]
fn test_proxy_without_remote() {
	init_tracing();
	let storage = Arc::new(MemorySerialStorage::new());
	let oid = storage.insert(global("g", "n1")).unwrap();
	let generator = SerialGenerator::new(config("n2", 10), storage);
	assert_eq!(generator.next_value(TxnId(1), oid, 1).unwrap_err().code(), "SERIAL_004");
}

#[test]
fn test_exhausted_real_serial() {
	let record = SerialRecord {
		max_val: BigDecimal::from(5),
		..global("g", "n1")
	};
	let c = cluster(record, 10);

	let values: Vec<BigDecimal> = (0..4).map(|_| c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap()).collect();
	assert_eq!(values, [2, 3, 4, 5].map(BigDecimal::from));

	let err = c.proxy.next_value(TxnId(1), c.proxy_oid, 1).unwrap_err();
	assert_eq!(err.code(), RANGE_OVERFLOW);
}

#[test]
fn test_reserve_range() {
	let c = cluster(global("g", "n1"), 10);
	let range = c.real.reserve_range(TxnId(7), "G", 3).unwrap();
	assert_eq!(
		range,
		SerialRange {
			start: BigDecimal::from(1),
			end: BigDecimal::from(4),
			count: 3,
		}
	);
	let record = c.real_storage.read(c.real_oid).unwrap();
	assert!(record.started);
	assert_eq!(record.current_val, BigDecimal::from(4));
}

#[test]
fn test_lock_timeout_caches_nothing() {
	init_tracing();
	let storage = Arc::new(MemorySerialStorage::with_lock_timeout(Duration::from_millis(20)));
	let oid = storage
		.insert(SerialRecord {
			cached_num: 5,
			..test_utils::serial("s")
		})
		.unwrap();
	let generator = SerialGenerator::new(SerialConfig::default(), storage.clone());

	storage.lock(TxnId(99), oid).unwrap();
	let err = generator.next_value(TxnId(1), oid, 1).unwrap_err();
	assert_eq!(err.code(), "SERIAL_003");

	assert!(!generator.pool().contains(oid));
	assert_eq!(storage.open_system_ops(), 0);
	assert!(!storage.read(oid).unwrap().started);

	storage.unlock(TxnId(99), oid);
	assert_eq!(generator.next_value(TxnId(1), oid, 1).unwrap(), BigDecimal::from(1));
	assert_eq!(generator.next_value(TxnId(1), oid, 1).unwrap(), BigDecimal::from(2));
}
