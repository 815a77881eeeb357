// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crossbeam_skiplist::SkipMap;
use strata_type::fragment::Fragment;
use tracing::{debug, instrument};

use crate::{
	Result,
	def::{IndexDef, NodeDef, SerialRecord, TriggerDef, UserDef},
	error::{CatalogError, CatalogObjectKind},
	materialized::{MaterializedCatalog, key},
};

fn insert_unique<T: Send + 'static>(
	map: &SkipMap<String, T>,
	kind: CatalogObjectKind,
	name: &str,
	value: T,
) -> Result<()> {
	let name_key = key(name);
	if map.contains_key(&name_key) {
		return Err(CatalogError::AlreadyExists {
			kind,
			name: name.to_string(),
			fragment: Fragment::None,
		}
		.into());
	}
	map.insert(name_key, value);
	Ok(())
}

impl MaterializedCatalog {
	#[instrument(name = "catalog::index::create", level = "debug", skip(self, index), fields(name = %index.name))]
	pub fn create_index(&self, index: IndexDef) -> Result<()> {
		insert_unique(&self.indexes, CatalogObjectKind::Index, &index.name.clone(), index)
	}

	#[instrument(name = "catalog::trigger::create", level = "debug", skip(self, trigger), fields(name = %trigger.name))]
	pub fn create_trigger(&self, trigger: TriggerDef) -> Result<()> {
		insert_unique(&self.triggers, CatalogObjectKind::Trigger, &trigger.name.clone(), trigger)
	}

	pub fn create_user(&self, user: UserDef) -> Result<()> {
		insert_unique(&self.users, CatalogObjectKind::User, &user.name.clone(), user)
	}

	pub fn create_node(&self, node: NodeDef) -> Result<()> {
		insert_unique(&self.nodes, CatalogObjectKind::Node, &node.name.clone(), node)
	}

	/// Registers a serial under a fresh oid and returns the stored record
	#[instrument(name = "catalog::serial::create", level = "debug", skip(self, serial), fields(name = %serial.name))]
	pub fn create_serial(&self, serial: SerialRecord) -> Result<SerialRecord> {
		let record = SerialRecord {
			oid: self.next_serial_oid(),
			..serial
		};
		insert_unique(&self.serials, CatalogObjectKind::Serial, &record.name.clone(), record.clone())?;
		debug!(oid = record.oid.0, "serial created");
		Ok(record)
	}

	/// Replaces the stored record of an existing serial
	pub fn update_serial(&self, serial: SerialRecord) -> Result<()> {
		let name_key = key(&serial.name);
		if !self.serials.contains_key(&name_key) {
			return Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Serial,
				name: serial.name,
				fragment: Fragment::None,
			}
			.into());
		}
		self.serials.insert(name_key, serial);
		Ok(())
	}

	pub fn drop_serial(&self, name: &str) -> Option<SerialRecord> {
		self.serials.remove(&key(name)).map(|entry| entry.value().clone())
	}

	/// Enables or disables a trigger, returns false for an unknown trigger
	pub fn set_trigger_active(&self, name: &str, active: bool) -> bool {
		let Some(entry) = self.triggers.get(&key(name)) else {
			return false;
		};
		let mut trigger = entry.value().clone();
		trigger.active = active;
		self.triggers.insert(key(name), trigger);
		true
	}
}

#[cfg(test)]
mod tests {
	use strata_type::value::ClassId;

	use super::*;
	use crate::{Catalog, def::TriggerEvent};

	#[test]
	fn test_duplicate_index() {
		let catalog = MaterializedCatalog::new();
		let index = IndexDef {
			name: "idx_a".to_string(),
			class: ClassId(1),
			columns: vec!["a".to_string()],
			unique: false,
		};
		catalog.create_index(index.clone()).unwrap();
		assert_eq!(catalog.create_index(index).unwrap_err().code(), "CATALOG_001");
	}

	#[test]
	fn test_trigger_toggle() {
		let catalog = MaterializedCatalog::new();
		catalog.create_trigger(TriggerDef {
			name: "audit".to_string(),
			class: ClassId(4),
			event: TriggerEvent::Insert,
			attribute: None,
			active: true,
		})
		.unwrap();

		assert!(catalog.has_active_triggers(ClassId(4)).unwrap());
		assert!(catalog.set_trigger_active("AUDIT", false));
		assert!(!catalog.has_active_triggers(ClassId(4)).unwrap());
		assert!(!catalog.set_trigger_active("missing", false));
	}
}
