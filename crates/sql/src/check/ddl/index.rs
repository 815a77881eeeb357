// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{
	CatalogError, CatalogObjectKind,
	def::{ClassDef, IndexDef},
};
use strata_type::{Error, Result, error, fragment::Fragment, return_error};
use tracing::{debug, instrument};

use crate::{
	ast::{AlterIndex, CreateIndex, DropIndex, Expr, ExprKind, IndexColumn, Walk},
	check::{Checker, Clause},
	error::CheckError,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::create_index", level = "debug", skip_all, fields(name = %create.name))]
	pub(crate) fn check_create_index(&mut self, create: &mut CreateIndex) -> Result<()> {
		if self.catalog.find_index(&create.name)?.is_some() {
			return Err(CatalogError::AlreadyExists {
				kind: CatalogObjectKind::Index,
				name: create.name.clone(),
				fragment: create.fragment.clone(),
			}
			.into());
		}

		let class = self.require_class(&create.class, &create.fragment)?;
		if class.is_view() {
			return_error!(CheckError::IndexOnView {
				name: class.name.clone(),
				fragment: create.fragment.clone(),
			});
		}

		for (i, column) in create.columns.iter().enumerate() {
			if create.columns[..i].iter().any(|c| c.name.eq_ignore_ascii_case(&column.name)) {
				self.report(error!(CheckError::DuplicateColumn {
					column: column.name.clone(),
					fragment: create.fragment.clone(),
				}));
				continue;
			}
			let result = index_column(&class, column, &create.fragment);
			self.attempt(result);
		}

		if let Some(filter) = &mut create.filter {
			let errors = filter_errors(&class, filter);
			if !errors.is_empty() {
				self.report_all(errors);
				return Ok(());
			}
			let typed = self.scoped(|checker| {
				checker.enter_class(&class);
				checker.type_expr(filter, Clause::IndexFilter)
			});
			self.attempt(typed);
		}
		Ok(())
	}

	pub(crate) fn check_alter_index(&mut self, alter: &mut AlterIndex) -> Result<()> {
		let index = self.require_index(&alter.name, alter.class.as_deref(), &alter.fragment)?;
		debug!(class = %index.class, rebuild = alter.rebuild, "index found");
		Ok(())
	}

	pub(crate) fn check_drop_index(&mut self, drop: &mut DropIndex) -> Result<()> {
		match self.require_index(&drop.name, drop.class.as_deref(), &drop.fragment) {
			Ok(_) => Ok(()),
			Err(err) if drop.if_exists && err.code() == "CATALOG_002" => Ok(()),
			Err(err) => Err(err),
		}
	}

	/// Index `name`, which must belong to `class` when one is named
	fn require_index(&self, name: &str, class: Option<&str>, fragment: &Fragment) -> Result<IndexDef> {
		let index = self.catalog.find_index(name)?;
		let owner = match class {
			Some(class) => Some(self.require_class(class, fragment)?),
			None => None,
		};
		match (index, owner) {
			(Some(index), Some(owner)) if index.class != owner.id => Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Index,
				name: format!("{}.{}", owner.name, name),
				fragment: fragment.clone(),
			}
			.into()),
			(Some(index), _) => Ok(index),
			(None, _) => Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Index,
				name: name.to_string(),
				fragment: fragment.clone(),
			}
			.into()),
		}
	}
}

fn index_column(class: &ClassDef, column: &IndexColumn, fragment: &Fragment) -> Result<()> {
	let Some(attribute) = class.attribute(&column.name) else {
		return Err(CatalogError::NotFound {
			kind: CatalogObjectKind::Attribute,
			name: format!("{}.{}", class.name, column.name),
			fragment: fragment.clone(),
		}
		.into());
	};
	let ty = attribute.domain.ty;
	if ty.is_object() || ty.is_collection() {
		return_error!(CheckError::IndexColumnType {
			column: attribute.name.clone(),
			domain: attribute.domain.clone(),
			fragment: fragment.clone(),
		});
	}
	if column.prefix_length.is_some() && !ty.is_string() && !ty.is_bit() {
		return_error!(CheckError::PrefixLength {
			column: attribute.name.clone(),
			domain: attribute.domain.clone(),
			fragment: fragment.clone(),
		});
	}
	Ok(())
}

/// Constructs an index filter cannot contain. A filter is evaluated per
/// row of its own class.
fn filter_errors(class: &ClassDef, filter: &Expr) -> Vec<Error> {
	let mut errors = vec![];
	if let Some(aggregate) = filter.find_aggregate() {
		errors.push(error!(CheckError::IndexFilter {
			reason: "aggregate functions",
			fragment: aggregate.fragment(),
		}));
	}
	if filter.contains_subquery() {
		errors.push(error!(CheckError::IndexFilter {
			reason: "subqueries",
			fragment: filter.fragment(),
		}));
	}
	filter.walk(&mut |node| {
		match &node.kind {
			ExprKind::HostVariable(_) => errors.push(error!(CheckError::IndexFilter {
				reason: "host variables",
				fragment: node.fragment(),
			})),
			ExprKind::Column(column) => {
				if let Some(qualifier) = &column.qualifier
					&& !qualifier.eq_ignore_ascii_case(&class.name)
				{
					errors.push(error!(CheckError::IndexFilterForeign {
						column: format!("{}.{}", qualifier, column.name),
						class: class.name.clone(),
						fragment: node.fragment(),
					}));
				}
			}
			_ => {}
		}
		Walk::Continue
	});
	errors
}
