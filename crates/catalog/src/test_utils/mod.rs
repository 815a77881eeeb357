// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixtures shared by the catalog tests and the crates built on top of it.

use bigdecimal::BigDecimal;
use strata_type::value::{ClassId, Domain};

use crate::{
	AttributeToCreate, ClassToCreate, MaterializedCatalog,
	def::{ClassDef, IndexDef, NodeDef, SerialOid, SerialRecord, TriggerDef, TriggerEvent},
};

pub fn create_class(catalog: &MaterializedCatalog, name: &str, attributes: &[(&str, Domain)]) -> ClassDef {
	let attributes = attributes.iter().map(|(name, domain)| AttributeToCreate::new(*name, domain.clone())).collect();
	catalog.create_class(ClassToCreate::class(name, attributes)).unwrap()
}

pub fn create_subclass(
	catalog: &MaterializedCatalog,
	name: &str,
	superclass: ClassId,
	attributes: &[(&str, Domain)],
) -> ClassDef {
	let attributes = attributes.iter().map(|(name, domain)| AttributeToCreate::new(*name, domain.clone())).collect();
	catalog.create_class(ClassToCreate {
		superclasses: vec![superclass],
		..ClassToCreate::class(name, attributes)
	})
	.unwrap()
}

pub fn create_view(
	catalog: &MaterializedCatalog,
	name: &str,
	attributes: &[(&str, Domain)],
	query_spec: &str,
	real_classes: &[ClassId],
) -> ClassDef {
	let attributes = attributes.iter().map(|(name, domain)| AttributeToCreate::new(*name, domain.clone())).collect();
	catalog.create_class(ClassToCreate::view(name, attributes, vec![query_spec.to_string()], real_classes.to_vec()))
		.unwrap()
}

pub fn create_index(catalog: &MaterializedCatalog, name: &str, class: ClassId, columns: &[&str], unique: bool) {
	catalog.create_index(IndexDef {
		name: name.to_string(),
		class,
		columns: columns.iter().map(|c| c.to_string()).collect(),
		unique,
	})
	.unwrap()
}

pub fn create_trigger(catalog: &MaterializedCatalog, name: &str, class: ClassId, event: TriggerEvent) {
	catalog.create_trigger(TriggerDef {
		name: name.to_string(),
		class,
		event,
		attribute: None,
		active: true,
	})
	.unwrap()
}

pub fn create_node(catalog: &MaterializedCatalog, name: &str) {
	catalog.create_node(NodeDef {
		name: name.to_string(),
		host: format!("{}.cluster", name),
	})
	.unwrap()
}

/// Ascending serial starting at 1, neither cached nor cyclic
pub fn serial(name: &str) -> SerialRecord {
	SerialRecord {
		oid: SerialOid(0),
		name: name.to_string(),
		owner: "dba".to_string(),
		current_val: BigDecimal::from(1),
		increment_val: BigDecimal::from(1),
		max_val: BigDecimal::from(i64::MAX),
		min_val: BigDecimal::from(1),
		cyclic: false,
		started: false,
		class_name: None,
		att_name: None,
		cached_num: 0,
		is_global: false,
		node_name: None,
	}
}

pub fn create_serial(catalog: &MaterializedCatalog, record: SerialRecord) -> SerialRecord {
	catalog.create_serial(record).unwrap()
}
