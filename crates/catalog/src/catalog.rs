// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::value::ClassId;

use crate::{
	Result,
	def::{AttributeDef, ClassDef, IndexDef, NodeDef, PartitionInfo, SerialRecord, TriggerDef, UserDef},
};

/// Read access to the schema manager.
///
/// Names are matched case-insensitively. Lookups hand out owned copies so a
/// caller never holds a borrow into the catalog while it checks a statement.
pub trait Catalog {
	fn find_class(&self, name: &str) -> Result<Option<ClassDef>>;

	fn get_class(&self, id: ClassId) -> Result<Option<ClassDef>>;

	fn get_attribute(&self, class: ClassId, name: &str) -> Result<Option<AttributeDef>> {
		Ok(self.get_class(class)?.and_then(|c| c.attribute(name).cloned()))
	}

	/// Attributes in definition order, empty for an unknown class
	fn get_attributes(&self, class: ClassId) -> Result<Vec<AttributeDef>> {
		Ok(self.get_class(class)?.map(|c| c.attributes).unwrap_or_default())
	}

	/// Whether `sub` inherits from `sup`, directly or transitively. A class
	/// is not its own subclass.
	fn is_subclass(&self, sub: ClassId, sup: ClassId) -> Result<bool>;

	fn is_view(&self, class: ClassId) -> Result<bool> {
		Ok(self.get_class(class)?.map(|c| c.is_view()).unwrap_or(false))
	}

	fn query_specs(&self, view: ClassId) -> Result<Vec<String>> {
		Ok(self.get_class(view)?.map(|c| c.query_specs).unwrap_or_default())
	}

	/// Classes a view is defined over
	fn real_classes(&self, view: ClassId) -> Result<Vec<ClassId>> {
		Ok(self.get_class(view)?.map(|c| c.real_classes).unwrap_or_default())
	}

	fn partition_info(&self, class: ClassId) -> Result<Option<PartitionInfo>> {
		Ok(self.get_class(class)?.and_then(|c| c.partition))
	}

	fn has_active_triggers(&self, class: ClassId) -> Result<bool>;

	fn find_index(&self, name: &str) -> Result<Option<IndexDef>>;

	/// Indexes defined on `class`
	fn class_indexes(&self, class: ClassId) -> Result<Vec<IndexDef>>;

	fn find_serial(&self, name: &str) -> Result<Option<SerialRecord>>;

	fn find_trigger(&self, name: &str) -> Result<Option<TriggerDef>>;

	fn find_user(&self, name: &str) -> Result<Option<UserDef>>;

	fn find_node(&self, name: &str) -> Result<Option<NodeDef>>;
}
