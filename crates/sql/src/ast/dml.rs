// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::fragment::Fragment;

use crate::ast::{ColumnRef, Expr, FromItem, Query};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
	pub class: String,
	/// Target attributes, empty for all attributes in definition order
	pub columns: Vec<String>,
	pub source: InsertSource,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
	Values(Vec<Vec<Expr>>),
	Query(Query),
	DefaultValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
	pub target: FromItem,
	pub assignments: Vec<Assignment>,
	pub filter: Option<Expr>,
	pub fragment: Fragment,
}

/// `a = 1` or the tuple form `(a, b) = (1, 2)` / `(a, b) = (SELECT ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
	pub columns: Vec<ColumnRef>,
	pub source: AssignmentSource,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentSource {
	Values(Vec<Expr>),
	Query(Query),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
	pub targets: Vec<FromItem>,
	pub filter: Option<Expr>,
	pub fragment: Fragment,
}

impl Insert {
	pub fn values(class: impl Into<String>, columns: &[&str], rows: Vec<Vec<Expr>>) -> Self {
		Self {
			class: class.into(),
			columns: columns.iter().map(|c| c.to_string()).collect(),
			source: InsertSource::Values(rows),
			fragment: Fragment::None,
		}
	}

	pub fn query(class: impl Into<String>, columns: &[&str], query: Query) -> Self {
		Self {
			class: class.into(),
			columns: columns.iter().map(|c| c.to_string()).collect(),
			source: InsertSource::Query(query),
			fragment: Fragment::None,
		}
	}
}

impl Update {
	pub fn new(target: FromItem, assignments: Vec<Assignment>) -> Self {
		Self {
			target,
			assignments,
			filter: None,
			fragment: Fragment::None,
		}
	}

	pub fn filter(mut self, filter: Expr) -> Self {
		self.filter = Some(filter);
		self
	}
}

impl Assignment {
	pub fn set(column: &str, value: Expr) -> Self {
		Self {
			columns: vec![column_ref(column)],
			source: AssignmentSource::Values(vec![value]),
			fragment: Fragment::None,
		}
	}

	pub fn tuple(columns: &[&str], values: Vec<Expr>) -> Self {
		Self {
			columns: columns.iter().map(|c| column_ref(c)).collect(),
			source: AssignmentSource::Values(values),
			fragment: Fragment::None,
		}
	}

	pub fn tuple_query(columns: &[&str], query: Query) -> Self {
		Self {
			columns: columns.iter().map(|c| column_ref(c)).collect(),
			source: AssignmentSource::Query(query),
			fragment: Fragment::None,
		}
	}
}

impl Delete {
	pub fn new(targets: Vec<FromItem>) -> Self {
		Self {
			targets,
			filter: None,
			fragment: Fragment::None,
		}
	}

	pub fn filter(mut self, filter: Expr) -> Self {
		self.filter = Some(filter);
		self
	}
}

fn column_ref(name: &str) -> ColumnRef {
	match name.split_once('.') {
		Some((qualifier, name)) => ColumnRef {
			qualifier: Some(qualifier.to_string()),
			name: name.to_string(),
			binding: None,
		},
		None => ColumnRef {
			qualifier: None,
			name: name.to_string(),
			binding: None,
		},
	}
}
