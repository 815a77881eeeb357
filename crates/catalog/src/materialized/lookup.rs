// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use strata_type::value::ClassId;
use tracing::instrument;

use crate::{
	Catalog, Result,
	def::{ClassDef, IndexDef, NodeDef, SerialRecord, TriggerDef, UserDef},
	materialized::{MaterializedCatalog, key},
};

impl Catalog for MaterializedCatalog {
	#[instrument(name = "catalog::class::find", level = "trace", skip(self))]
	fn find_class(&self, name: &str) -> Result<Option<ClassDef>> {
		let Some(id) = self.classes_by_name.get(&key(name)).map(|e| *e.value()) else {
			return Ok(None);
		};
		self.get_class(id)
	}

	#[instrument(name = "catalog::class::get", level = "trace", skip(self))]
	fn get_class(&self, id: ClassId) -> Result<Option<ClassDef>> {
		Ok(self.classes.get(&id).map(|e| e.value().clone()))
	}

	#[instrument(name = "catalog::class::is_subclass", level = "trace", skip(self))]
	fn is_subclass(&self, sub: ClassId, sup: ClassId) -> Result<bool> {
		let mut seen = HashSet::new();
		let mut pending = vec![sub];
		while let Some(current) = pending.pop() {
			if !seen.insert(current) {
				continue;
			}
			let Some(entry) = self.classes.get(&current) else {
				continue;
			};
			for parent in &entry.value().superclasses {
				if *parent == sup {
					return Ok(true);
				}
				pending.push(*parent);
			}
		}
		Ok(false)
	}

	#[instrument(name = "catalog::trigger::has_active", level = "trace", skip(self))]
	fn has_active_triggers(&self, class: ClassId) -> Result<bool> {
		Ok(self.triggers.iter().any(|e| e.value().class == class && e.value().active))
	}

	#[instrument(name = "catalog::index::find", level = "trace", skip(self))]
	fn find_index(&self, name: &str) -> Result<Option<IndexDef>> {
		Ok(self.indexes.get(&key(name)).map(|e| e.value().clone()))
	}

	fn class_indexes(&self, class: ClassId) -> Result<Vec<IndexDef>> {
		Ok(self.indexes.iter().filter(|e| e.value().class == class).map(|e| e.value().clone()).collect())
	}

	#[instrument(name = "catalog::serial::find", level = "trace", skip(self))]
	fn find_serial(&self, name: &str) -> Result<Option<SerialRecord>> {
		Ok(self.serials.get(&key(name)).map(|e| e.value().clone()))
	}

	fn find_trigger(&self, name: &str) -> Result<Option<TriggerDef>> {
		Ok(self.triggers.get(&key(name)).map(|e| e.value().clone()))
	}

	fn find_user(&self, name: &str) -> Result<Option<UserDef>> {
		Ok(self.users.get(&key(name)).map(|e| e.value().clone()))
	}

	fn find_node(&self, name: &str) -> Result<Option<NodeDef>> {
		Ok(self.nodes.get(&key(name)).map(|e| e.value().clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::materialized::ClassToCreate;

	mod is_subclass {
		use super::*;

		#[test]
		fn test_transitive() {
			let catalog = MaterializedCatalog::new();
			let a = catalog.create_class(ClassToCreate::class("a", vec![])).unwrap();
			let b = catalog
				.create_class(ClassToCreate {
					superclasses: vec![a.id],
					..ClassToCreate::class("b", vec![])
				})
				.unwrap();
			let c = catalog
				.create_class(ClassToCreate {
					superclasses: vec![b.id],
					..ClassToCreate::class("c", vec![])
				})
				.unwrap();

			assert!(catalog.is_subclass(c.id, a.id).unwrap());
			assert!(catalog.is_subclass(b.id, a.id).unwrap());
			assert!(!catalog.is_subclass(a.id, c.id).unwrap());
			assert!(!catalog.is_subclass(a.id, a.id).unwrap());
		}
	}

	mod find_class {
		use super::*;

		#[test]
		fn test_case_insensitive() {
			let catalog = MaterializedCatalog::new();
			let class = catalog.create_class(ClassToCreate::class("Orders", vec![])).unwrap();
			assert_eq!(catalog.find_class("ORDERS").unwrap().map(|c| c.id), Some(class.id));
			assert_eq!(catalog.find_class("missing").unwrap(), None);
		}
	}

	mod view {
		use super::*;

		#[test]
		fn test_view_specs_and_real_classes() {
			let catalog = MaterializedCatalog::new();
			let t = catalog.create_class(ClassToCreate::class("t", vec![])).unwrap();
			let v = catalog
				.create_class(ClassToCreate::view("v", vec![], vec!["SELECT a FROM t".to_string()], vec![t.id]))
				.unwrap();

			assert!(catalog.is_view(v.id).unwrap());
			assert!(!catalog.is_view(t.id).unwrap());
			assert_eq!(catalog.query_specs(v.id).unwrap(), vec!["SELECT a FROM t".to_string()]);
			assert_eq!(catalog.real_classes(v.id).unwrap(), vec![t.id]);
		}
	}
}
