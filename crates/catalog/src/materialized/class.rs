// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{
	fragment::Fragment,
	value::{ClassId, Domain, Value},
};
use tracing::{debug, instrument};

use crate::{
	Result,
	def::{AttributeDef, ClassDef, ClassKind, PartitionInfo},
	error::{CatalogError, CatalogObjectKind},
	materialized::{MaterializedCatalog, key},
};

#[derive(Debug, Clone)]
pub struct AttributeToCreate {
	pub name: String,
	pub domain: Domain,
	pub not_null: bool,
	pub unique: bool,
	pub default: Option<Value>,
	pub auto_increment: Option<String>,
	pub satellite_class: Option<ClassId>,
}

impl AttributeToCreate {
	pub fn new(name: impl Into<String>, domain: Domain) -> Self {
		Self {
			name: name.into(),
			domain,
			not_null: false,
			unique: false,
			default: None,
			auto_increment: None,
			satellite_class: None,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.not_null = true;
		self
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}

	pub fn default_value(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	pub fn auto_increment(mut self, serial: impl Into<String>) -> Self {
		self.auto_increment = Some(serial.into());
		self
	}

	pub fn satellite(mut self, class: ClassId) -> Self {
		self.satellite_class = Some(class);
		self
	}
}

#[derive(Debug, Clone)]
pub struct ClassToCreate {
	pub name: String,
	pub kind: ClassKind,
	pub attributes: Vec<AttributeToCreate>,
	pub superclasses: Vec<ClassId>,
	pub query_specs: Vec<String>,
	pub real_classes: Vec<ClassId>,
	pub partition_of: Option<ClassId>,
	pub is_global: bool,
}

impl ClassToCreate {
	pub fn class(name: impl Into<String>, attributes: Vec<AttributeToCreate>) -> Self {
		Self {
			name: name.into(),
			kind: ClassKind::Class,
			attributes,
			superclasses: vec![],
			query_specs: vec![],
			real_classes: vec![],
			partition_of: None,
			is_global: false,
		}
	}

	pub fn view(
		name: impl Into<String>,
		attributes: Vec<AttributeToCreate>,
		query_specs: Vec<String>,
		real_classes: Vec<ClassId>,
	) -> Self {
		Self {
			kind: ClassKind::View,
			query_specs,
			real_classes,
			..Self::class(name, attributes)
		}
	}
}

impl MaterializedCatalog {
	#[instrument(name = "catalog::class::create", level = "debug", skip(self, to_create), fields(name = %to_create.name))]
	pub fn create_class(&self, to_create: ClassToCreate) -> Result<ClassDef> {
		let name_key = key(&to_create.name);
		if self.classes_by_name.contains_key(&name_key) {
			return Err(CatalogError::AlreadyExists {
				kind: match to_create.kind {
					ClassKind::Class => CatalogObjectKind::Class,
					ClassKind::View => CatalogObjectKind::View,
				},
				name: to_create.name,
				fragment: Fragment::None,
			}
			.into());
		}

		let id = self.next_class_id();

		// inherited attributes come first, in superclass order
		let mut attributes: Vec<AttributeDef> = vec![];
		for sup in &to_create.superclasses {
			let Some(entry) = self.classes.get(sup) else {
				return Err(CatalogError::NotFound {
					kind: CatalogObjectKind::Class,
					name: sup.to_string(),
					fragment: Fragment::None,
				}
				.into());
			};
			for attribute in &entry.value().attributes {
				if !attributes.iter().any(|a| a.name.eq_ignore_ascii_case(&attribute.name)) {
					attributes.push(attribute.clone());
				}
			}
		}

		for attribute in to_create.attributes {
			attributes.retain(|a| !a.name.eq_ignore_ascii_case(&attribute.name));
			attributes.push(AttributeDef {
				name: attribute.name,
				domain: attribute.domain,
				declared_in: id,
				not_null: attribute.not_null,
				unique: attribute.unique,
				default: attribute.default,
				auto_increment: attribute.auto_increment,
				satellite_class: attribute.satellite_class,
			});
		}

		let class = ClassDef {
			id,
			name: to_create.name,
			kind: to_create.kind,
			attributes,
			superclasses: to_create.superclasses,
			query_specs: to_create.query_specs,
			real_classes: to_create.real_classes,
			partition: None,
			partition_of: to_create.partition_of,
			is_global: to_create.is_global,
		};

		self.classes_by_name.insert(name_key, id);
		self.classes.insert(id, class.clone());
		debug!(id = id.0, "class created");
		Ok(class)
	}

	/// Attaches partitioning information to a class, `None` removes it
	#[instrument(name = "catalog::class::set_partition", level = "debug", skip(self, partition))]
	pub fn set_partition(&self, class: ClassId, partition: Option<PartitionInfo>) -> Result<()> {
		let Some(entry) = self.classes.get(&class) else {
			return Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Class,
				name: class.to_string(),
				fragment: Fragment::None,
			}
			.into());
		};
		let mut updated = entry.value().clone();
		updated.partition = partition;
		self.classes.insert(class, updated);
		Ok(())
	}

	#[instrument(name = "catalog::class::drop", level = "debug", skip(self))]
	pub fn drop_class(&self, class: ClassId) -> Result<Option<ClassDef>> {
		let Some(entry) = self.classes.remove(&class) else {
			return Ok(None);
		};
		let def = entry.value().clone();
		self.classes_by_name.remove(&key(&def.name));
		Ok(Some(def))
	}
}
