// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Result, return_error};
use tracing::{instrument, trace};

use crate::{
	ast::{Binding, ColumnRef, Compound, Expr, ExprKind, FromItem, FromSource, Query, Select, SelectItem, Walk},
	check::{CheckState, Checker, Clause},
	compat::resolve_union,
	error::CheckError,
	scope::{SpecColumn, SpecId, SpecSource},
};

impl<'a> Checker<'a> {
	/// Resolves and types a query, including set operations, ORDER BY and
	/// the INTO clause
	#[instrument(name = "sql::check::query", level = "trace", skip_all)]
	pub(crate) fn check_query(&mut self, query: &mut Query) -> Result<()> {
		match query {
			Query::Select(select) => self.check_select(select)?,
			Query::Compound(compound) => self.check_compound(compound)?,
		}

		let into = query.into_vars().len();
		let columns = query.column_count();
		if into > 0 && into != columns {
			return_error!(CheckError::IntoArity {
				expected: columns,
				actual: into,
				fragment: query.leftmost().fragment.clone(),
			});
		}
		Ok(())
	}

	fn check_compound(&mut self, compound: &mut Compound) -> Result<()> {
		let errors_before = self.diagnostic_count();
		let left = self.check_query(&mut compound.left);
		let left = self.attempt(left).is_some();
		let right = self.check_query(&mut compound.right);
		let right = self.attempt(right).is_some();

		if left && right && self.diagnostic_count() == errors_before {
			match resolve_union(
				self.catalog,
				compound.op,
				&mut compound.left,
				&mut compound.right,
				self.config.max_numeric_precision,
			) {
				Ok(resolution) => {
					trace!(casts = resolution.casts, "resolved set operation");
					self.casts += resolution.casts;
					compound.columns = resolution.columns;
				}
				Err(errors) => {
					self.report_all(errors);
					compound.columns = compound.left.column_domains();
				}
			}
		} else {
			compound.columns = compound.left.column_domains();
		}

		self.resolve_compound_order_by(compound);
		Ok(())
	}

	fn check_select(&mut self, select: &mut Select) -> Result<()> {
		self.scoped(|checker| checker.check_select_in_scope(select))
	}

	fn check_select_in_scope(&mut self, select: &mut Select) -> Result<()> {
		for item in select.from.iter_mut() {
			let result = self.resolve_from_item(item);
			self.attempt(result);
		}
		self.expand_stars(select);

		for item in select.list.iter_mut() {
			self.bind_expr(&mut item.expr);
		}
		for expr in select.filter.iter_mut().chain(select.group_by.iter_mut()).chain(select.having.iter_mut()) {
			self.bind_expr(expr);
		}
		self.advance(CheckState::NameResolved);

		for item in select.list.iter_mut() {
			let result = self.type_expr(&mut item.expr, Clause::SelectList);
			self.attempt(result);
		}
		if let Some(filter) = &mut select.filter {
			let result = self.type_expr(filter, Clause::Where);
			self.attempt(result);
		}
		for expr in select.group_by.iter_mut() {
			let result = self.type_expr(expr, Clause::GroupBy);
			self.attempt(result);
		}
		if let Some(having) = &mut select.having {
			let result = self.type_expr(having, Clause::Having);
			self.attempt(result);
		}

		self.resolve_select_order_by(select);

		if select.is_aggregate() {
			let errors = check_grouping(select);
			self.report_all(errors);
		}
		Ok(())
	}

	/// Registers a FROM source in the innermost scope
	pub(crate) fn resolve_from_item(&mut self, item: &mut FromItem) -> Result<SpecId> {
		let name = item.exposed_name().map(str::to_string);
		let fragment = item.fragment.clone();

		let id = match &mut item.source {
			FromSource::Class(class_name) => {
				let class = self.require_class(class_name, &fragment)?;
				let columns = class
					.attributes
					.iter()
					.map(|attribute| SpecColumn {
						name: attribute.name.clone(),
						domain: attribute.domain.clone(),
						attribute: Some(attribute.clone()),
					})
					.collect();
				self.specs.register(name, SpecSource::Class(class), columns)
			}
			FromSource::Derived(query) => {
				// a derived table sees neither its siblings nor the query it
				// is part of
				self.isolated(|checker| checker.check_query(query))?;
				let columns = query
					.column_names()
					.into_iter()
					.zip(query.column_domains())
					.map(|(name, domain)| SpecColumn {
						name,
						domain,
						attribute: None,
					})
					.collect();
				self.specs.register(name, SpecSource::Derived, columns)
			}
		};

		item.spec = Some(id);
		if let Some(scope) = self.scopes.last_mut() {
			scope.push(id);
		}
		Ok(id)
	}

	/// Replaces `*` and `t.*` by the columns of the matching FROM sources
	fn expand_stars(&mut self, select: &mut Select) {
		if !select.list.iter().any(|item| matches!(item.expr.kind, ExprKind::Star(_))) {
			return;
		}
		let current: Vec<SpecId> = self.scopes.last().cloned().unwrap_or_default();

		let mut list = Vec::with_capacity(select.list.len());
		for item in std::mem::take(&mut select.list) {
			let ExprKind::Star(qualifier) = &item.expr.kind else {
				list.push(item);
				continue;
			};
			let fragment = item.expr.fragment();
			let specs: Vec<SpecId> = match qualifier {
				None => current.clone(),
				Some(name) => {
					let found = current.iter().copied().find(|id| self.specs.get(*id).is_some_and(|s| s.is_named(name)));
					match found {
						Some(id) => vec![id],
						None => {
							self.report(
								CheckError::UnknownQualifier {
									name: name.clone(),
									fragment,
								}
								.into(),
							);
							continue;
						}
					}
				}
			};
			if specs.is_empty() {
				self.report(
					CheckError::ColumnNotFound {
						name: "*".to_string(),
						fragment,
					}
					.into(),
				);
				continue;
			}

			for id in specs {
				let Some(spec) = self.specs.get(id) else {
					continue;
				};
				for column in &spec.columns {
					list.push(SelectItem::new(Expr {
						kind: ExprKind::Column(ColumnRef {
							qualifier: spec.name.clone(),
							name: column.name.clone(),
							binding: Some(Binding::Attribute {
								spec: id,
								attribute: column.name.clone(),
							}),
						}),
						domain: Some(column.domain.clone()),
						fragment: item.expr.fragment.clone(),
					}));
				}
			}
		}
		select.list = list;
	}
}

/// Every column of the select list and HAVING must be grouped or sit inside
/// an aggregate
fn check_grouping(select: &Select) -> Vec<strata_type::Error> {
	let mut errors = vec![];
	let exprs = select.list.iter().map(|item| &item.expr).chain(select.having.iter());
	for expr in exprs {
		if let Some(ungrouped) = find_ungrouped(expr, &select.group_by) {
			errors.push(
				CheckError::NotGrouped {
					expr: ungrouped.to_string(),
					fragment: ungrouped.fragment(),
				}
				.into(),
			);
		}
	}
	errors
}

fn find_ungrouped<'e>(expr: &'e Expr, group_by: &[Expr]) -> Option<&'e Expr> {
	let mut found = None;
	expr.walk(&mut |node| {
		if group_by.iter().any(|g| g.equivalent(node)) {
			return Walk::SkipChildren;
		}
		match node.kind {
			ExprKind::Aggregate {
				..
			}
			| ExprKind::Subquery(_) => Walk::SkipChildren,
			ExprKind::Column(_) => {
				found = Some(node);
				Walk::Stop
			}
			_ => Walk::Continue,
		}
	});
	found
}
