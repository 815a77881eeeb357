// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{
	CatalogError, CatalogObjectKind,
	def::{AttributeDef, ClassDef},
};
use strata_type::{Result, error, fragment::Fragment, return_error, value::Domain};
use tracing::{instrument, trace};

use crate::{
	ast::{
		Assignment, AssignmentSource, Binding, ColumnRef, Delete, Expr, ExprKind, Insert, InsertSource, Query,
		Update,
	},
	check::{Checker, Clause},
	compat::{cast_column, is_assignable},
	error::CheckError,
	scope::SpecId,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::insert", level = "trace", skip_all, fields(class = %insert.class))]
	pub(crate) fn check_insert(&mut self, insert: &mut Insert) -> Result<()> {
		let class = self.require_class(&insert.class, &insert.fragment)?;
		let targets = self.insert_targets(&class, &insert.columns, &insert.fragment)?;

		let assigned: Vec<&AttributeDef> = match &mut insert.source {
			InsertSource::Values(rows) => {
				for row in rows.iter_mut() {
					if row.len() != targets.len() {
						self.report(
							CheckError::ValueCount {
								expected: targets.len(),
								actual: row.len(),
								fragment: row.first().map(Expr::fragment).unwrap_or_else(|| insert.fragment.clone()),
							}
							.into(),
						);
						continue;
					}
					for (expr, attribute) in row.iter_mut().zip(&targets) {
						let result = self.isolated(|checker| checker.check_value(expr, attribute, Clause::Values));
						self.attempt(result);
					}
				}
				targets.iter().collect()
			}
			InsertSource::Query(query) => {
				self.isolated(|checker| checker.check_query(query))?;
				let result = self.assign_query(query, &targets);
				self.attempt(result);
				targets.iter().collect()
			}
			InsertSource::DefaultValues => vec![],
		};

		// omitted attributes take their default
		for attribute in &class.attributes {
			if assigned.iter().any(|a| a.name.eq_ignore_ascii_case(&attribute.name)) {
				continue;
			}
			if requires_value(attribute) {
				self.report(
					CheckError::NullIntoNotNull {
						column: attribute.name.clone(),
						fragment: insert.fragment.clone(),
					}
					.into(),
				);
			}
		}
		Ok(())
	}

	/// Target attributes of an INSERT, every attribute when no column list
	/// is given
	fn insert_targets(&mut self, class: &ClassDef, columns: &[String], fragment: &Fragment) -> Result<Vec<AttributeDef>> {
		if columns.is_empty() {
			return Ok(class.attributes.clone());
		}

		let mut targets: Vec<AttributeDef> = Vec::with_capacity(columns.len());
		for column in columns {
			let Some(attribute) = class.attribute(column) else {
				self.report(
					CatalogError::NotFound {
						kind: CatalogObjectKind::Attribute,
						name: format!("{}.{}", class.name, column),
						fragment: fragment.clone(),
					}
					.into(),
				);
				continue;
			};
			if targets.iter().any(|t| t.name.eq_ignore_ascii_case(&attribute.name)) {
				self.report(
					CheckError::DuplicateColumn {
						column: column.clone(),
						fragment: fragment.clone(),
					}
					.into(),
				);
				continue;
			}
			targets.push(attribute.clone());
		}
		Ok(targets)
	}

	/// Types a value assigned to `attribute` and converts it where needed
	fn check_value(&mut self, expr: &mut Expr, attribute: &AttributeDef, clause: Clause) -> Result<()> {
		match expr.kind {
			ExprKind::Default => {
				if requires_value(attribute) {
					return_error!(CheckError::NullIntoNotNull {
						column: attribute.name.clone(),
						fragment: expr.fragment(),
					});
				}
				expr.domain = Some(attribute.domain.clone());
				Ok(())
			}
			// placeholders take the type of their target
			ExprKind::HostVariable(_) => {
				expr.domain = Some(attribute.domain.clone());
				Ok(())
			}
			_ => {
				self.bind_expr(expr);
				let domain = self.type_expr(expr, clause)?;
				self.coerce_assignment(expr, attribute, domain)
			}
		}
	}

	pub(crate) fn coerce_assignment(&mut self, expr: &mut Expr, attribute: &AttributeDef, src: Domain) -> Result<()> {
		let dest = &attribute.domain;

		if let Some(value) = expr.as_literal() {
			if value.is_null() {
				if attribute.not_null {
					return_error!(CheckError::NullIntoNotNull {
						column: attribute.name.clone(),
						fragment: expr.fragment(),
					});
				}
				expr.domain = Some(dest.clone());
				return Ok(());
			}
			// objects and collections are checked for assignability only
			if dest.ty.is_primitive() {
				return match value.coerce(dest) {
					Ok(coerced) => {
						trace!(column = %attribute.name, "coerced literal");
						expr.kind = ExprKind::Literal(coerced);
						expr.domain = Some(dest.clone());
						Ok(())
					}
					Err(err) => Err(error!(err.at(expr.fragment()).with_column(&attribute.name, dest.clone()))),
				};
			}
		}

		if !self.assignable(dest, &src)? {
			return_error!(CheckError::AssignmentIncompatible {
				column: attribute.name.clone(),
				from: src,
				to: dest.clone(),
				fragment: expr.fragment(),
			});
		}
		if needs_cast(dest, &src) {
			let operand = std::mem::replace(expr, Expr::null());
			let fragment = operand.fragment.clone();
			*expr = Expr {
				kind: ExprKind::Cast {
					operand: Box::new(operand),
					target: dest.clone(),
				},
				domain: Some(dest.clone()),
				fragment,
			};
			self.casts += 1;
		}
		Ok(())
	}

	/// Assignability plus narrowing within one primitive type, which is
	/// checked when the row is written
	fn assignable(&self, dest: &Domain, src: &Domain) -> Result<bool> {
		if dest.ty == src.ty && dest.ty.is_primitive() {
			return Ok(true);
		}
		is_assignable(self.catalog, dest, src)
	}

	/// Matches the columns of a query against the attributes they are
	/// stored into, casting where the domains differ
	fn assign_query(&mut self, query: &mut Query, targets: &[AttributeDef]) -> Result<()> {
		let count = query.column_count();
		if count != targets.len() {
			return_error!(CheckError::ValueCount {
				expected: targets.len(),
				actual: count,
				fragment: query.leftmost().fragment.clone(),
			});
		}

		for (position, (attribute, src)) in targets.iter().zip(query.column_domains()).enumerate() {
			let dest = &attribute.domain;
			if !self.assignable(dest, &src)? {
				self.report(
					CheckError::AssignmentIncompatible {
						column: attribute.name.clone(),
						from: src,
						to: dest.clone(),
						fragment: query.leftmost().fragment.clone(),
					}
					.into(),
				);
				continue;
			}
			if needs_cast(dest, &src) {
				self.casts += cast_column(query, position, dest);
			}
		}
		Ok(())
	}

	#[instrument(name = "sql::check::update", level = "trace", skip_all)]
	pub(crate) fn check_update(&mut self, update: &mut Update) -> Result<()> {
		if update.target.is_derived() {
			return_error!(CheckError::DerivedTarget {
				operation: "update",
				fragment: update.target.fragment.clone(),
			});
		}
		self.scoped(|checker| checker.check_update_in_scope(update))
	}

	fn check_update_in_scope(&mut self, update: &mut Update) -> Result<()> {
		let spec = self.resolve_from_item(&mut update.target)?;
		let Some(class) = self.specs.get(spec).and_then(|spec| spec.class().cloned()) else {
			return Ok(());
		};
		let exposed = update.target.exposed_name().unwrap_or(&class.name).to_string();

		let mut seen: Vec<String> = vec![];
		for assignment in &update.assignments {
			for column in &assignment.columns {
				let name = column.name.to_ascii_lowercase();
				if seen.contains(&name) {
					self.report(
						CheckError::DuplicateAssignment {
							column: column.name.clone(),
							fragment: assignment.fragment.clone(),
						}
						.into(),
					);
				} else {
					seen.push(name);
				}
			}
		}

		for assignment in update.assignments.iter_mut() {
			let result = self.check_assignment(spec, &class, &exposed, assignment);
			self.attempt(result);
		}

		if let Some(filter) = &mut update.filter {
			self.bind_expr(filter);
			let result = self.type_expr(filter, Clause::Where);
			self.attempt(result);
		}
		Ok(())
	}

	fn check_assignment(
		&mut self,
		spec: SpecId,
		class: &ClassDef,
		exposed: &str,
		assignment: &mut Assignment,
	) -> Result<()> {
		let mut targets: Vec<AttributeDef> = Vec::with_capacity(assignment.columns.len());
		for column in assignment.columns.iter_mut() {
			targets.push(assignment_target(spec, class, exposed, column, &assignment.fragment)?);
		}

		match &mut assignment.source {
			AssignmentSource::Values(values) => {
				if values.len() != targets.len() {
					return_error!(CheckError::ValueCount {
						expected: targets.len(),
						actual: values.len(),
						fragment: assignment.fragment.clone(),
					});
				}
				for (expr, attribute) in values.iter_mut().zip(&targets) {
					let result = self.check_value(expr, attribute, Clause::Set);
					self.attempt(result);
				}
				Ok(())
			}
			// a correlated subquery sees the target
			AssignmentSource::Query(query) => {
				self.check_query(query)?;
				self.assign_query(query, &targets)
			}
		}
	}

	#[instrument(name = "sql::check::delete", level = "trace", skip_all)]
	pub(crate) fn check_delete(&mut self, delete: &mut Delete) -> Result<()> {
		if delete.targets.len() > 1 {
			return_error!(CheckError::DeleteMultipleTargets {
				count: delete.targets.len(),
				fragment: delete.fragment.clone(),
			});
		}
		let Some(target) = delete.targets.first_mut() else {
			return Ok(());
		};
		if target.is_derived() {
			return_error!(CheckError::DerivedTarget {
				operation: "delete",
				fragment: target.fragment.clone(),
			});
		}

		self.scoped(|checker| {
			checker.resolve_from_item(target)?;
			if let Some(filter) = &mut delete.filter {
				checker.bind_expr(filter);
				checker.type_expr(filter, Clause::Where)?;
			}
			Ok(())
		})
	}
}

fn assignment_target(
	spec: SpecId,
	class: &ClassDef,
	exposed: &str,
	column: &mut ColumnRef,
	fragment: &Fragment,
) -> Result<AttributeDef> {
	if let Some(qualifier) = &column.qualifier
		&& !qualifier.eq_ignore_ascii_case(exposed)
	{
		return_error!(CheckError::UnknownQualifier {
			name: qualifier.clone(),
			fragment: fragment.clone(),
		});
	}
	let Some(attribute) = class.attribute(&column.name) else {
		return_error!(CheckError::ColumnNotFound {
			name: column.name.clone(),
			fragment: fragment.clone(),
		});
	};
	column.binding = Some(Binding::Attribute {
		spec,
		attribute: attribute.name.clone(),
	});
	Ok(attribute.clone())
}

/// NOT NULL without a value source of its own
fn requires_value(attribute: &AttributeDef) -> bool {
	attribute.not_null && attribute.default.is_none() && attribute.auto_increment.is_none()
}

fn needs_cast(dest: &Domain, src: &Domain) -> bool {
	dest.ty.is_primitive() && src.ty.is_primitive() && !src.same_parameters(dest)
}
