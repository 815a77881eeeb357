// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strata_catalog::def::{AttributeDef, ClassDef};
use strata_type::value::Domain;

/// Handle of a FROM source in a [`SpecTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecId(pub u32);

impl Display for SpecId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "spec#{}", self.0)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecSource {
	Class(ClassDef),
	Derived,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecColumn {
	pub name: String,
	pub domain: Domain,
	/// Catalog attribute behind the column, `None` for derived tables
	pub attribute: Option<AttributeDef>,
}

/// A FROM source as seen by name resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
	pub id: SpecId,
	/// Alias, or the class name when unaliased. Derived tables without an
	/// alias expose no name.
	pub name: Option<String>,
	pub source: SpecSource,
	pub columns: Vec<SpecColumn>,
}

impl Spec {
	pub fn column(&self, name: &str) -> Option<&SpecColumn> {
		self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
	}

	pub fn class(&self) -> Option<&ClassDef> {
		match &self.source {
			SpecSource::Class(class) => Some(class),
			SpecSource::Derived => None,
		}
	}

	pub fn is_named(&self, name: &str) -> bool {
		self.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name))
	}
}

/// Side table of every FROM source of a statement. Handles stay valid for
/// the statement's lifetime, specs are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecTable {
	specs: Vec<Spec>,
}

impl SpecTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, name: Option<String>, source: SpecSource, columns: Vec<SpecColumn>) -> SpecId {
		let id = SpecId(self.specs.len() as u32);
		self.specs.push(Spec {
			id,
			name,
			source,
			columns,
		});
		id
	}

	pub fn get(&self, id: SpecId) -> Option<&Spec> {
		self.specs.get(id.0 as usize)
	}

	pub fn len(&self) -> usize {
		self.specs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Spec> {
		self.specs.iter()
	}
}
