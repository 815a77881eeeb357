// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use strata_catalog::def::{ClassKind, TriggerEvent};
use strata_type::{fragment::Fragment, value::Domain};

use crate::ast::{Expr, PartitionAlter, PartitionSpec, Query, SortDirection};

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
	pub name: String,
	pub domain: Domain,
	/// Class named by an object domain, resolved into `domain.class`
	pub class_name: Option<String>,
	pub not_null: bool,
	pub unique: bool,
	pub default: Option<Expr>,
	pub auto_increment: Option<AutoIncrement>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoIncrement {
	pub start: Option<BigDecimal>,
	pub increment: Option<BigDecimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClass {
	pub name: String,
	pub kind: ClassKind,
	pub if_not_exists: bool,
	pub attributes: Vec<AttributeDefinition>,
	pub superclasses: Vec<String>,
	/// AS SELECT ... of a view
	pub query_specs: Vec<Query>,
	pub partition: Option<PartitionSpec>,
	pub is_global: bool,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterClass {
	pub name: String,
	pub actions: Vec<AlterAction>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterAction {
	AddAttribute(AttributeDefinition),
	DropAttributes(Vec<String>),
	ChangeAttribute {
		name: String,
		definition: AttributeDefinition,
	},
	RenameAttribute {
		from: String,
		to: String,
	},
	AddQuerySpec(Query),
	/// 1-based position of the spec to remove
	DropQuerySpec(usize),
	AddSuperclasses(Vec<String>),
	DropSuperclasses(Vec<String>),
	Partition(PartitionAlter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropClass {
	pub kind: ClassKind,
	pub names: Vec<String>,
	pub if_exists: bool,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
	pub name: String,
	pub class: String,
	pub columns: Vec<IndexColumn>,
	pub unique: bool,
	/// WHERE clause of a filtered index
	pub filter: Option<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
	pub name: String,
	pub prefix_length: Option<u32>,
	pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterIndex {
	pub name: String,
	pub class: Option<String>,
	pub rebuild: bool,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropIndex {
	pub name: String,
	pub class: Option<String>,
	pub if_exists: bool,
	pub fragment: Fragment,
}

/// CREATE SERIAL. The checker fills in every omitted option.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateSerial {
	pub name: String,
	pub start: Option<BigDecimal>,
	pub increment: Option<BigDecimal>,
	pub min: Option<BigDecimal>,
	pub max: Option<BigDecimal>,
	pub cyclic: bool,
	pub cached_num: Option<i64>,
	/// Set on the serial synthesized for an AUTO_INCREMENT attribute
	pub owner: Option<AutoIncrementOwner>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoIncrementOwner {
	pub class: String,
	pub attribute: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlterSerial {
	pub name: String,
	pub start: Option<BigDecimal>,
	pub increment: Option<BigDecimal>,
	pub min: Option<BigDecimal>,
	pub max: Option<BigDecimal>,
	pub cyclic: Option<bool>,
	pub cached_num: Option<i64>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropSerial {
	pub name: String,
	pub if_exists: bool,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rename {
	pub pairs: Vec<(String, String)>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
	Select,
	Insert,
	Update,
	Delete,
	Alter,
	Index,
	Execute,
	All,
}

impl Display for Privilege {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Privilege::Select => "SELECT",
			Privilege::Insert => "INSERT",
			Privilege::Update => "UPDATE",
			Privilege::Delete => "DELETE",
			Privilege::Alter => "ALTER",
			Privilege::Index => "INDEX",
			Privilege::Execute => "EXECUTE",
			Privilege::All => "ALL PRIVILEGES",
		})
	}
}

/// Shared by GRANT and REVOKE
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
	pub privileges: Vec<Privilege>,
	pub classes: Vec<String>,
	pub users: Vec<String>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTrigger {
	pub name: String,
	pub class: String,
	pub event: TriggerEvent,
	/// Attribute watched by an UPDATE trigger
	pub attribute: Option<String>,
	pub condition: Option<Expr>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTrigger {
	pub name: String,
	pub active: bool,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTrigger {
	pub names: Vec<String>,
	pub fragment: Fragment,
}

impl AttributeDefinition {
	pub fn new(name: impl Into<String>, domain: Domain) -> Self {
		Self {
			name: name.into(),
			domain,
			class_name: None,
			not_null: false,
			unique: false,
			default: None,
			auto_increment: None,
			fragment: Fragment::None,
		}
	}

	/// Object attribute referencing `class`
	pub fn object(name: impl Into<String>, class: impl Into<String>) -> Self {
		Self {
			class_name: Some(class.into()),
			..Self::new(name, Domain::object(None))
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

	pub fn default_value(mut self, value: Expr) -> Self {
		self.default = Some(value);
		self
	}

	pub fn auto_increment(mut self) -> Self {
		self.auto_increment = Some(AutoIncrement::default());
		self
	}
}

impl CreateClass {
	pub fn class(name: impl Into<String>, attributes: Vec<AttributeDefinition>) -> Self {
		Self {
			name: name.into(),
			kind: ClassKind::Class,
			if_not_exists: false,
			attributes,
			superclasses: vec![],
			query_specs: vec![],
			partition: None,
			is_global: false,
			fragment: Fragment::None,
		}
	}

	pub fn view(name: impl Into<String>, attributes: Vec<AttributeDefinition>, query_specs: Vec<Query>) -> Self {
		Self {
			kind: ClassKind::View,
			query_specs,
			..Self::class(name, attributes)
		}
	}

	pub fn under(mut self, superclass: impl Into<String>) -> Self {
		self.superclasses.push(superclass.into());
		self
	}

	pub fn partition(mut self, partition: PartitionSpec) -> Self {
		self.partition = Some(partition);
		self
	}
}

impl AlterClass {
	pub fn new(name: impl Into<String>, actions: Vec<AlterAction>) -> Self {
		Self {
			name: name.into(),
			actions,
			fragment: Fragment::None,
		}
	}
}

impl DropClass {
	pub fn classes(names: &[&str]) -> Self {
		Self {
			kind: ClassKind::Class,
			names: names.iter().map(|n| n.to_string()).collect(),
			if_exists: false,
			fragment: Fragment::None,
		}
	}

	pub fn views(names: &[&str]) -> Self {
		Self {
			kind: ClassKind::View,
			..Self::classes(names)
		}
	}
}

impl CreateIndex {
	pub fn new(name: impl Into<String>, class: impl Into<String>, columns: &[&str]) -> Self {
		Self {
			name: name.into(),
			class: class.into(),
			columns: columns
				.iter()
				.map(|c| IndexColumn {
					name: c.to_string(),
					prefix_length: None,
					direction: SortDirection::Asc,
				})
				.collect(),
			unique: false,
			filter: None,
			fragment: Fragment::None,
		}
	}
}

impl CreateSerial {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}
}

impl Grant {
	pub fn new(privileges: Vec<Privilege>, classes: &[&str], users: &[&str]) -> Self {
		Self {
			privileges,
			classes: classes.iter().map(|c| c.to_string()).collect(),
			users: users.iter().map(|u| u.to_string()).collect(),
			fragment: Fragment::None,
		}
	}
}

impl CreateTrigger {
	pub fn new(name: impl Into<String>, class: impl Into<String>, event: TriggerEvent) -> Self {
		Self {
			name: name.into(),
			class: class.into(),
			event,
			attribute: None,
			condition: None,
			fragment: Fragment::None,
		}
	}
}
