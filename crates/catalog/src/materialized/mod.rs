// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use crossbeam_skiplist::SkipMap;
use strata_type::value::ClassId;

use crate::def::{ClassDef, IndexDef, NodeDef, SerialOid, SerialRecord, TriggerDef, UserDef};

mod class;
mod lookup;
mod object;

pub use class::{AttributeToCreate, ClassToCreate};

/// In-memory catalog. Cheap to clone, clones share state.
#[derive(Clone)]
pub struct MaterializedCatalog(Arc<MaterializedCatalogInner>);

pub struct MaterializedCatalogInner {
	pub(crate) classes: SkipMap<ClassId, ClassDef>,
	/// Index from lower-cased class name to class ID
	pub(crate) classes_by_name: SkipMap<String, ClassId>,

	/// Keyed by lower-cased name
	pub(crate) indexes: SkipMap<String, IndexDef>,
	pub(crate) serials: SkipMap<String, SerialRecord>,
	pub(crate) triggers: SkipMap<String, TriggerDef>,
	pub(crate) users: SkipMap<String, UserDef>,
	pub(crate) nodes: SkipMap<String, NodeDef>,

	next_class_id: AtomicU64,
	next_serial_oid: AtomicU64,
}

impl std::ops::Deref for MaterializedCatalog {
	type Target = MaterializedCatalogInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Default for MaterializedCatalog {
	fn default() -> Self {
		Self::new()
	}
}

impl MaterializedCatalog {
	pub fn new() -> Self {
		Self(Arc::new(MaterializedCatalogInner {
			classes: SkipMap::new(),
			classes_by_name: SkipMap::new(),
			indexes: SkipMap::new(),
			serials: SkipMap::new(),
			triggers: SkipMap::new(),
			users: SkipMap::new(),
			nodes: SkipMap::new(),
			next_class_id: AtomicU64::new(1),
			next_serial_oid: AtomicU64::new(1),
		}))
	}

	pub(crate) fn next_class_id(&self) -> ClassId {
		ClassId(self.next_class_id.fetch_add(1, Ordering::Relaxed))
	}

	pub(crate) fn next_serial_oid(&self) -> SerialOid {
		SerialOid(self.next_serial_oid.fetch_add(1, Ordering::Relaxed))
	}
}

pub(crate) fn key(name: &str) -> String {
	name.to_ascii_lowercase()
}
