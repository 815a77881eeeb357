// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use strata_type::value::{ClassId, Domain, Value};

use crate::def::PartitionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
	Class,
	View,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
	pub id: ClassId,
	pub name: String,
	pub kind: ClassKind,
	/// Declared and inherited attributes in definition order
	pub attributes: Vec<AttributeDef>,
	pub superclasses: Vec<ClassId>,
	/// Stored SELECT statements of a view
	pub query_specs: Vec<String>,
	/// Classes a view is defined over
	pub real_classes: Vec<ClassId>,
	pub partition: Option<PartitionInfo>,
	/// Set on the sub-classes holding the partitions of a partitioned class
	pub partition_of: Option<ClassId>,
	/// Distributed across nodes
	pub is_global: bool,
}

impl ClassDef {
	pub fn is_view(&self) -> bool {
		self.kind == ClassKind::View
	}

	pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
		self.attributes.iter().find(|a| a.name.eq_ignore_ascii_case(name))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
	pub name: String,
	pub domain: Domain,
	/// Class that declares the attribute, differs from the owning class for
	/// inherited attributes
	pub declared_in: ClassId,
	pub not_null: bool,
	pub unique: bool,
	pub default: Option<Value>,
	/// Name of the serial generating values for an AUTO_INCREMENT attribute
	pub auto_increment: Option<String>,
	/// Class created alongside the attribute to hold its values
	pub satellite_class: Option<ClassId>,
}
