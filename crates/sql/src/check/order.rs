// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::def::AttributeDef;
use strata_type::{
	Result, return_error,
	fragment::Fragment,
	value::{ClassId, Domain, Type, Value},
};
use tracing::debug;

use crate::{
	ast::{BinaryOp, Binding, Compound, Expr, ExprKind, Select, SelectItem, SortKey},
	check::{Checker, Clause},
	error::CheckError,
};

/// Sort key resolved to a select list position
struct Resolved {
	position: usize,
	domain: Domain,
}

impl<'a> Checker<'a> {
	/// Rewrites every sort key of a SELECT into a 1-based position of its
	/// select list. Keys that select nothing are appended as hidden columns
	/// unless the query is DISTINCT.
	pub(crate) fn resolve_select_order_by(&mut self, select: &mut Select) {
		if select.order_by.is_empty() {
			return;
		}

		let keys = std::mem::take(&mut select.order_by);
		let mut resolved: Vec<SortKey> = Vec::with_capacity(keys.len());
		for mut key in keys {
			let fragment = key.expr.fragment();
			let Resolved {
				position,
				domain,
			} = match self.select_position(select, &mut key.expr) {
				Ok(resolved) => resolved,
				Err(err) => {
					self.report(err);
					continue;
				}
			};
			key.expr = position_literal(position, Some(domain));
			if let Some(key) = merge_duplicate(&resolved, position, &key, fragment, self) {
				resolved.push(key);
			}
		}
		select.order_by = resolved;

		if self.config.order_by_index_hint && !self.has_errors() {
			self.index_hint(select);
		}
	}

	fn select_position(&mut self, select: &mut Select, expr: &mut Expr) -> Result<Resolved> {
		let count = select.visible_len();

		if let Some(value) = expr.as_literal()
			&& let Some(n) = integer_value(value)
		{
			if n < 1 || n > count as i64 {
				return_error!(CheckError::OrderByRange {
					position: n,
					count,
					fragment: expr.fragment(),
				});
			}
			let position = n as usize;
			return Ok(Resolved {
				position,
				domain: select.list[position - 1].expr.resolved_domain(),
			});
		}

		// an output alias wins over a column of the same name
		if let Some(column) = expr.as_column()
			&& column.qualifier.is_none()
			&& column.binding.is_none()
			&& let Some(index) = select.list.iter().position(|item| {
				!item.hidden && item.alias.as_deref().is_some_and(|alias| alias.eq_ignore_ascii_case(&column.name))
			}) {
			return Ok(Resolved {
				position: index + 1,
				domain: select.list[index].expr.resolved_domain(),
			});
		}

		self.bind_expr(expr);
		let domain = self.type_expr(expr, Clause::OrderBy)?;

		if let Some(index) = select.list.iter().position(|item| item.expr.equivalent(expr)) {
			return Ok(Resolved {
				position: index + 1,
				domain: select.list[index].expr.resolved_domain(),
			});
		}

		if select.distinct {
			return_error!(CheckError::OrderByNotSelected {
				expr: expr.to_string(),
				fragment: expr.fragment(),
			});
		}

		select.list.push(SelectItem {
			expr: expr.clone(),
			alias: None,
			hidden: true,
		});
		debug!(expr = %expr, position = select.list.len(), "appended hidden sort column");
		Ok(Resolved {
			position: select.list.len(),
			domain,
		})
	}

	/// Sort keys of a set operation may only name result columns, by
	/// position or by name
	pub(crate) fn resolve_compound_order_by(&mut self, compound: &mut Compound) {
		if compound.order_by.is_empty() {
			return;
		}
		let names = compound.left.column_names();
		let count = names.len();

		let keys = std::mem::take(&mut compound.order_by);
		let mut resolved: Vec<SortKey> = Vec::with_capacity(keys.len());
		for mut key in keys {
			let position = if let Some(n) = key.expr.as_literal().and_then(integer_value) {
				if n < 1 || n > count as i64 {
					self.report(
						CheckError::OrderByRange {
							position: n,
							count,
							fragment: key.expr.fragment(),
						}
						.into(),
					);
					continue;
				}
				n as usize
			} else {
				let found = key
					.expr
					.as_column()
					.filter(|column| column.qualifier.is_none())
					.and_then(|column| names.iter().position(|name| name.eq_ignore_ascii_case(&column.name)));
				match found {
					Some(index) => index + 1,
					None => {
						self.report(
							CheckError::OrderByNotSelected {
								expr: key.expr.to_string(),
								fragment: key.expr.fragment(),
							}
							.into(),
						);
						continue;
					}
				}
			};

			let fragment = key.expr.fragment();
			key.expr = position_literal(position, compound.columns.get(position - 1).cloned());
			if let Some(key) = merge_duplicate(&resolved, position, &key, fragment, self) {
				resolved.push(key);
			}
		}
		compound.order_by = resolved;
	}

	/// ANDs `col BETWEEN <min> AND MAXVALUE` into the filter when the first
	/// sort column is an attribute an index scan could deliver in order
	fn index_hint(&mut self, select: &mut Select) {
		let [from] = select.from.as_slice() else {
			return;
		};
		if from.is_derived() {
			return;
		}
		let Some(spec_id) = from.spec else {
			return;
		};
		let Some(position) = select.order_by.first().and_then(|key| key.position) else {
			return;
		};
		let Some(item) = select.list.get(position - 1) else {
			return;
		};
		let Some(Binding::Attribute {
			spec,
			attribute,
		}) = item.expr.as_column().and_then(|column| column.binding.as_ref())
		else {
			return;
		};
		if *spec != spec_id {
			return;
		}
		let Some(spec) = self.specs.get(spec_id) else {
			return;
		};
		let (Some(class), Some(attribute)) =
			(spec.class().map(|class| class.id), spec.column(attribute).and_then(|column| column.attribute.clone()))
		else {
			return;
		};
		if !self.is_ordered_access(class, &attribute) {
			return;
		}
		let Some(min) = attribute.domain.min_value() else {
			return;
		};

		let column = item.expr.clone();
		let logical = || Some(Domain::new(Type::Logical));
		let mut low = Expr::literal(min);
		low.domain = Some(attribute.domain.clone());
		let mut high = Expr::max_value();
		high.domain = Some(attribute.domain.clone());

		let mut predicate = Expr::between(column.clone(), low, high);
		predicate.domain = logical();
		if !attribute.not_null {
			let mut is_null = Expr::is_null(column);
			is_null.domain = logical();
			predicate = Expr::binary(BinaryOp::Or, predicate, is_null);
			predicate.domain = logical();
		}
		debug!(attribute = %attribute.name, "added range predicate for ordered scan");

		select.filter = Some(match select.filter.take() {
			Some(filter) => {
				let mut and = Expr::binary(BinaryOp::And, filter, predicate);
				and.domain = logical();
				and
			}
			None => predicate,
		});
	}

	fn is_ordered_access(&mut self, class: ClassId, attribute: &AttributeDef) -> bool {
		if attribute.not_null || attribute.unique {
			return true;
		}
		let indexes = self.catalog.class_indexes(class);
		match self.attempt(indexes) {
			Some(indexes) => indexes
				.iter()
				.any(|index| index.columns.first().is_some_and(|first| first.eq_ignore_ascii_case(&attribute.name))),
			None => false,
		}
	}
}

/// Returns the key to keep, `None` when it duplicates an earlier key.
/// Opposite directions on one position are reported.
fn merge_duplicate(
	resolved: &[SortKey],
	position: usize,
	key: &SortKey,
	fragment: Fragment,
	checker: &mut Checker<'_>,
) -> Option<SortKey> {
	match resolved.iter().find(|earlier| earlier.position == Some(position)) {
		None => Some(SortKey {
			expr: key.expr.clone(),
			direction: key.direction,
			position: Some(position),
		}),
		Some(earlier) if earlier.direction != key.direction => {
			checker.report(
				CheckError::OrderByConflict {
					position,
					fragment,
				}
				.into(),
			);
			None
		}
		Some(_) => None,
	}
}

fn integer_value(value: &Value) -> Option<i64> {
	match value {
		Value::SmallInt(v) => Some(*v as i64),
		Value::Integer(v) => Some(*v as i64),
		Value::BigInt(v) => Some(*v),
		_ => None,
	}
}

fn position_literal(position: usize, domain: Option<Domain>) -> Expr {
	let mut expr = Expr::new(ExprKind::Literal(Value::BigInt(position as i64)));
	expr.domain = domain;
	expr
}
