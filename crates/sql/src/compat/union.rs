// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::Catalog;
use strata_type::{
	Error, error,
	value::{Domain, Type, common_domain},
};
use tracing::{instrument, trace};

use crate::{
	ast::{Binding, Expr, ExprKind, Query, SelectItem, SetOperator},
	compat::{is_assignable, is_object_assignable},
	error::CheckError,
};

/// Outcome of comparing two parallel select list columns
#[derive(Debug, Clone, PartialEq)]
pub enum Compatibility {
	/// Usable as they are
	Compatible,
	/// Usable after casting to a common domain
	Fixable,
	/// No cast makes them usable together
	Unfixable,
	/// A literal could not be converted, or a catalog lookup failed
	Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionContext {
	/// Comparing a view attribute (left) against its query spec column
	/// (right)
	pub view: bool,
	pub max_precision: u32,
}

/// Compares two select list columns, converting literal sides to the common
/// domain in place.
pub fn union_compatible(catalog: &dyn Catalog, left: &mut Expr, right: &mut Expr, ctx: UnionContext) -> Compatibility {
	let l = left.resolved_domain();
	let r = right.resolved_domain();

	if l.ty == Type::None || r.ty == Type::None {
		return Compatibility::Unfixable;
	}

	if l.ty == r.ty && l.ty.is_primitive() {
		if l.same_parameters(&r) {
			return Compatibility::Compatible;
		}
		// fixed precision is part of the value, varying precision only
		// matters when a view attribute declares it
		return if l.ty.is_fixed_precision() || ctx.view {
			Compatibility::Fixable
		} else {
			Compatibility::Compatible
		};
	}

	if l.ty.is_unknown() || r.ty.is_unknown() {
		return Compatibility::Compatible;
	}

	let Some(common) = common_domain(&l, &r, ctx.max_precision) else {
		return Compatibility::Unfixable;
	};

	if common.ty.is_primitive() {
		for side in [&mut *left, &mut *right] {
			if let Err(err) = coerce_literal(side, &common) {
				return Compatibility::Error(err);
			}
		}
	}

	if common.ty == Type::Object {
		if is_object_name(left) || is_object_name(right) {
			return Compatibility::Compatible;
		}
		let compatible = if ctx.view {
			is_object_assignable(catalog, l.class, r.class)
		} else {
			is_object_assignable(catalog, l.class, r.class)
				.and_then(|forward| Ok(forward || is_object_assignable(catalog, r.class, l.class)?))
		};
		return match compatible {
			Ok(true) => Compatibility::Compatible,
			Ok(false) => Compatibility::Unfixable,
			Err(err) => Compatibility::Error(err),
		};
	}

	if common.ty.is_collection() {
		if l.ty != r.ty {
			return Compatibility::Unfixable;
		}
		let compatible = is_assignable(catalog, &l, &r).and_then(|forward| {
			let backward = is_assignable(catalog, &r, &l)?;
			Ok(if ctx.view {
				forward || backward
			} else {
				forward && backward
			})
		});
		return match compatible {
			Ok(true) => Compatibility::Compatible,
			Ok(false) => Compatibility::Unfixable,
			Err(err) => Compatibility::Error(err),
		};
	}

	let l = left.resolved_domain();
	let r = right.resolved_domain();
	if l == common && r == common {
		Compatibility::Compatible
	} else {
		Compatibility::Fixable
	}
}

/// Converts a literal to `target` in place. NULL and non-literals are left
/// alone.
pub(crate) fn coerce_literal(expr: &mut Expr, target: &Domain) -> Result<(), Error> {
	let ExprKind::Literal(value) = &expr.kind else {
		return Ok(());
	};
	if value.is_null() {
		return Ok(());
	}
	match value.coerce(target) {
		Ok(coerced) => {
			expr.kind = ExprKind::Literal(coerced);
			expr.domain = Some(target.clone());
			Ok(())
		}
		Err(err) => Err(error!(err.at(expr.fragment()))),
	}
}

fn is_object_name(expr: &Expr) -> bool {
	matches!(
		&expr.kind,
		ExprKind::Column(column) if matches!(column.binding, Some(Binding::Object { .. }))
	)
}

/// Result of resolving a set operation
#[derive(Debug, Clone, PartialEq)]
pub struct UnionResolution {
	/// Result domain per column
	pub columns: Vec<Domain>,
	/// Number of cast nodes inserted
	pub casts: usize,
}

/// Checks the operands of a set operation column by column and casts
/// fixable columns of both operands to their common domain.
#[instrument(name = "sql::union::resolve", level = "trace", skip(catalog, left, right))]
pub fn resolve_union(
	catalog: &dyn Catalog,
	op: SetOperator,
	left: &mut Query,
	right: &mut Query,
	max_precision: u32,
) -> Result<UnionResolution, Vec<Error>> {
	let (left_count, right_count) = (left.column_count(), right.column_count());
	if left_count != right_count {
		return Err(vec![
			CheckError::UnionArity {
				op: op.to_string(),
				left: left_count,
				right: right_count,
				fragment: right.leftmost().fragment.clone(),
			}
			.into(),
		]);
	}

	let ctx = UnionContext {
		view: false,
		max_precision,
	};
	let mut errors = vec![];
	let mut columns = Vec::with_capacity(left_count);
	let mut casts = 0;

	for position in 0..left_count {
		let mut left_probe = column_probe(left, position);
		let mut right_probe = column_probe(right, position);

		match union_compatible(catalog, &mut left_probe, &mut right_probe, ctx) {
			Compatibility::Compatible => {
				write_back(left, position, left_probe.clone());
				write_back(right, position, right_probe.clone());
				let (l, r) = (left_probe.resolved_domain(), right_probe.resolved_domain());
				let domain = if l.ty.is_unknown() {
					r
				} else if r.ty.is_unknown() {
					l
				} else {
					common_domain(&l, &r, max_precision).unwrap_or(l)
				};
				columns.push(domain);
			}
			Compatibility::Fixable => {
				write_back(left, position, left_probe.clone());
				write_back(right, position, right_probe.clone());
				let (l, r) = (left_probe.resolved_domain(), right_probe.resolved_domain());
				let Some(target) = common_domain(&l, &r, max_precision) else {
					columns.push(l);
					continue;
				};
				trace!(position, %target, "casting union column");
				casts += cast_column(left, position, &target);
				casts += cast_column(right, position, &target);
				columns.push(target);
			}
			Compatibility::Unfixable => {
				errors.push(
					CheckError::UnionIncompatible {
						op: op.to_string(),
						position: position + 1,
						left: left_probe.resolved_domain(),
						right: right_probe.resolved_domain(),
						fragment: right_probe.fragment(),
					}
					.into(),
				);
				columns.push(left_probe.resolved_domain());
			}
			Compatibility::Error(err) => {
				errors.push(err);
				columns.push(left_probe.resolved_domain());
			}
		}
	}

	if errors.is_empty() {
		Ok(UnionResolution {
			columns,
			casts,
		})
	} else {
		Err(errors)
	}
}

/// Checks a view's query spec against the view's attribute domains, casting
/// fixable query columns to the attribute domain.
#[instrument(name = "sql::union::resolve_view", level = "trace", skip(catalog, attributes, query))]
pub fn resolve_view_columns(
	catalog: &dyn Catalog,
	attributes: &[(String, Domain)],
	query: &mut Query,
	max_precision: u32,
) -> Result<usize, Vec<Error>> {
	let count = query.column_count();
	if count != attributes.len() {
		return Err(vec![
			CheckError::ViewArity {
				expected: attributes.len(),
				actual: count,
				fragment: query.leftmost().fragment.clone(),
			}
			.into(),
		]);
	}

	let ctx = UnionContext {
		view: true,
		max_precision,
	};
	let mut errors = vec![];
	let mut casts = 0;
	for (position, (name, domain)) in attributes.iter().enumerate() {
		let mut attribute = Expr {
			domain: Some(domain.clone()),
			..Expr::column(name.clone())
		};
		let mut column = column_probe(query, position);
		match union_compatible(catalog, &mut attribute, &mut column, ctx) {
			Compatibility::Compatible => write_back(query, position, column),
			Compatibility::Fixable => {
				write_back(query, position, column);
				casts += cast_column(query, position, domain);
			}
			Compatibility::Unfixable => errors.push(
				CheckError::ViewIncompatible {
					attribute: name.clone(),
					from: column.resolved_domain(),
					to: domain.clone(),
					fragment: column.fragment(),
				}
				.into(),
			),
			Compatibility::Error(err) => errors.push(err),
		}
	}

	if errors.is_empty() {
		Ok(casts)
	} else {
		Err(errors)
	}
}

/// Column `position` of a query as an expression. A compound operand is
/// represented by its leftmost column carrying the operand's result domain.
fn column_probe(query: &Query, position: usize) -> Expr {
	let mut probe = query.leftmost().visible().nth(position).map(|item| item.expr.clone()).unwrap_or_else(Expr::null);
	if let Query::Compound(compound) = query {
		if let Some(domain) = compound.columns.get(position) {
			probe.domain = Some(domain.clone());
		}
	}
	probe
}

/// Stores a probe converted in place back into a plain select list
fn write_back(query: &mut Query, position: usize, probe: Expr) {
	if let Query::Select(select) = query {
		if let Some(item) = visible_item_mut(&mut select.list, position) {
			item.expr = probe;
		}
	}
}

fn visible_item_mut(list: &mut [SelectItem], position: usize) -> Option<&mut SelectItem> {
	list.iter_mut().filter(|item| !item.hidden).nth(position)
}

/// Wraps column `position` of every SELECT of `query` into a cast to
/// `target`. The result column keeps its name. Returns the number of casts
/// inserted.
pub fn cast_column(query: &mut Query, position: usize, target: &Domain) -> usize {
	match query {
		Query::Select(select) => {
			let Some(item) = visible_item_mut(&mut select.list, position) else {
				return 0;
			};
			if item.expr.domain.as_ref() == Some(target) {
				return 0;
			}
			if item.alias.is_none() && item.expr.as_column().is_none() {
				item.alias = Some(item.name());
			}
			let operand = std::mem::replace(&mut item.expr, Expr::null());
			let fragment = operand.fragment.clone();
			item.expr = Expr {
				kind: ExprKind::Cast {
					operand: Box::new(operand),
					target: target.clone(),
				},
				domain: Some(target.clone()),
				fragment,
			};
			1
		}
		Query::Compound(compound) => {
			let casts = cast_column(&mut compound.left, position, target)
				+ cast_column(&mut compound.right, position, target);
			if let Some(column) = compound.columns.get_mut(position) {
				*column = target.clone();
			}
			casts
		}
	}
}

#[cfg(test)]
mod tests {
	use strata_catalog::{MaterializedCatalog, test_utils};
	use strata_type::{
		MAX_NUMERIC_PRECISION,
		value::{ClassId, Value},
	};

	use super::*;
	use crate::ast::{FromItem, Select, SelectItem};

	const UNION: UnionContext = UnionContext {
		view: false,
		max_precision: MAX_NUMERIC_PRECISION,
	};

	const VIEW: UnionContext = UnionContext {
		view: true,
		max_precision: MAX_NUMERIC_PRECISION,
	};

	fn typed(name: &str, domain: Domain) -> Expr {
		Expr {
			domain: Some(domain),
			..Expr::column(name)
		}
	}

	fn typed_literal(value: Value) -> Expr {
		let domain = value.domain();
		Expr {
			domain: Some(domain),
			..Expr::literal(value)
		}
	}

	fn select(items: Vec<SelectItem>) -> Query {
		Query::select(Select::new(items).from(FromItem::class("t")))
	}

	fn sample_domain(ty: Type) -> Domain {
		match ty {
			Type::Numeric => Domain::numeric(8, 2),
			Type::Char | Type::Varchar | Type::NChar | Type::VarNChar | Type::Bit | Type::VarBit => {
				Domain::sized(ty, Some(4))
			}
			Type::Set | Type::Multiset | Type::Sequence => Domain::collection(ty, vec![Domain::integer()]),
			ty => Domain::new(ty),
		}
	}

	mod union_compatible {
		use super::*;

		#[test]
		fn test_symmetric_outside_views() {
			let catalog = MaterializedCatalog::new();
			for a in Type::ALL {
				for b in Type::ALL {
					if a.is_object() || b.is_object() {
						continue;
					}
					let forward = union_compatible(
						&catalog,
						&mut typed("a", sample_domain(a)),
						&mut typed("b", sample_domain(b)),
						UNION,
					);
					let backward = union_compatible(
						&catalog,
						&mut typed("b", sample_domain(b)),
						&mut typed("a", sample_domain(a)),
						UNION,
					);
					assert_eq!(forward, backward, "{} / {}", a, b);
				}
			}
		}

		#[test]
		fn test_none_is_never_compatible() {
			let catalog = MaterializedCatalog::new();
			for ty in Type::ALL {
				let result = union_compatible(
					&catalog,
					&mut typed("a", Domain::new(Type::None)),
					&mut typed("b", sample_domain(ty)),
					UNION,
				);
				assert_eq!(result, Compatibility::Unfixable, "{}", ty);
			}
		}

		#[test]
		fn test_maybe_is_always_compatible() {
			let catalog = MaterializedCatalog::new();
			let result = union_compatible(
				&catalog,
				&mut typed("a", Domain::new(Type::Maybe)),
				&mut typed("b", Domain::new(Type::Date)),
				UNION,
			);
			assert_eq!(result, Compatibility::Compatible);
		}

		#[test]
		fn test_precision_mismatch() {
			let catalog = MaterializedCatalog::new();
			let result = union_compatible(
				&catalog,
				&mut typed("a", Domain::numeric(5, 2)),
				&mut typed("b", Domain::numeric(8, 3)),
				UNION,
			);
			assert_eq!(result, Compatibility::Fixable);

			let result = union_compatible(
				&catalog,
				&mut typed("a", Domain::varchar(5)),
				&mut typed("b", Domain::varchar(8)),
				UNION,
			);
			assert_eq!(result, Compatibility::Compatible);

			let result = union_compatible(
				&catalog,
				&mut typed("a", Domain::varchar(5)),
				&mut typed("b", Domain::varchar(8)),
				VIEW,
			);
			assert_eq!(result, Compatibility::Fixable);
		}

		#[test]
		fn test_time_and_date_are_unfixable() {
			let catalog = MaterializedCatalog::new();
			let result = union_compatible(
				&catalog,
				&mut typed("a", Domain::new(Type::Time)),
				&mut typed("b", Domain::new(Type::Date)),
				UNION,
			);
			assert_eq!(result, Compatibility::Unfixable);
		}

		#[test]
		fn test_literal_is_coerced_in_place() {
			let catalog = MaterializedCatalog::new();
			let mut left = typed("a", Domain::double());
			let mut right = typed_literal(Value::Integer(3));
			let result = union_compatible(&catalog, &mut left, &mut right, UNION);
			assert_eq!(result, Compatibility::Compatible);
			assert_eq!(right.as_literal(), Some(&Value::double(3.0)));
			assert_eq!(right.domain, Some(Domain::double()));
		}

		#[test]
		fn test_failed_literal_coercion_is_an_error() {
			let catalog = MaterializedCatalog::new();
			let mut left = typed("a", Domain::new(Type::Date));
			let mut right = typed_literal(Value::varchar("not a date"));
			let result = union_compatible(&catalog, &mut left, &mut right, UNION);
			let Compatibility::Error(err) = result else {
				panic!("expected an error, got {:?}", result);
			};
			assert_eq!(err.code(), "COERCE_002");
		}

		#[test]
		fn test_objects_follow_class_hierarchy() {
			let catalog = MaterializedCatalog::new();
			let person = test_utils::create_class(&catalog, "person", &[]);
			let student = test_utils::create_subclass(&catalog, "student", person.id, &[]);
			let other = test_utils::create_class(&catalog, "other", &[]);

			let object = |class: ClassId| typed("o", Domain::object(Some(class)));

			assert_eq!(
				union_compatible(&catalog, &mut object(student.id), &mut object(person.id), UNION),
				Compatibility::Compatible
			);
			assert_eq!(
				union_compatible(&catalog, &mut object(student.id), &mut object(person.id), VIEW),
				Compatibility::Unfixable
			);
			assert_eq!(
				union_compatible(&catalog, &mut object(person.id), &mut object(student.id), VIEW),
				Compatibility::Compatible
			);
			assert_eq!(
				union_compatible(&catalog, &mut object(person.id), &mut object(other.id), UNION),
				Compatibility::Unfixable
			);
		}

		#[test]
		fn test_object_name_is_compatible() {
			let catalog = MaterializedCatalog::new();
			let a = test_utils::create_class(&catalog, "a", &[]);
			let b = test_utils::create_class(&catalog, "b", &[]);
			let mut left = Expr {
				kind: ExprKind::Column(crate::ast::ColumnRef {
					qualifier: None,
					name: "a".to_string(),
					binding: Some(Binding::Object {
						spec: crate::scope::SpecId(0),
					}),
				}),
				domain: Some(Domain::object(Some(a.id))),
				fragment: Default::default(),
			};
			let mut right = typed("b", Domain::object(Some(b.id)));
			assert_eq!(union_compatible(&catalog, &mut left, &mut right, UNION), Compatibility::Compatible);
		}

		#[test]
		fn test_collections_need_same_kind() {
			let catalog = MaterializedCatalog::new();
			let set = Domain::collection(Type::Set, vec![Domain::integer()]);
			let wide_set = Domain::collection(Type::Set, vec![Domain::integer(), Domain::varchar(3)]);
			let sequence = Domain::collection(Type::Sequence, vec![Domain::integer()]);

			assert_eq!(
				union_compatible(&catalog, &mut typed("a", set.clone()), &mut typed("b", sequence), UNION),
				Compatibility::Unfixable
			);
			assert_eq!(
				union_compatible(&catalog, &mut typed("a", set.clone()), &mut typed("b", wide_set.clone()), UNION),
				Compatibility::Unfixable
			);
			assert_eq!(
				union_compatible(&catalog, &mut typed("a", wide_set), &mut typed("b", set), VIEW),
				Compatibility::Compatible
			);
		}
	}

	mod resolve_union {
		use super::*;

		#[test]
		fn test_numeric_common_domain_is_cast_on_both_sides() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![SelectItem::new(typed("a", Domain::numeric(5, 2)))]);
			let mut right = select(vec![SelectItem::new(typed("b", Domain::numeric(4, 3)))]);

			let resolution =
				resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION).unwrap();

			assert_eq!(resolution.columns, vec![Domain::numeric(6, 3)]);
			assert_eq!(resolution.casts, 2);
			for query in [&left, &right] {
				let item = &query.leftmost().list[0];
				assert!(matches!(item.expr.kind, ExprKind::Cast { .. }));
				assert_eq!(item.expr.domain, Some(Domain::numeric(6, 3)));
			}
		}

		#[test]
		fn test_wider_side_is_left_uncast() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![SelectItem::new(typed("a", Domain::numeric(5, 2)))]);
			let mut right = select(vec![SelectItem::new(typed("b", Domain::numeric(8, 3)))]);

			let resolution =
				resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION).unwrap();

			assert_eq!(resolution.columns, vec![Domain::numeric(8, 3)]);
			assert_eq!(resolution.casts, 1);
			assert!(matches!(left.leftmost().list[0].expr.kind, ExprKind::Cast { .. }));
			assert!(!matches!(right.leftmost().list[0].expr.kind, ExprKind::Cast { .. }));
		}

		#[test]
		fn test_precision_cap_reduces_scale() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![SelectItem::new(typed("a", Domain::numeric(38, 0)))]);
			let mut right = select(vec![SelectItem::new(typed("b", Domain::numeric(10, 6)))]);

			let resolution =
				resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION).unwrap();
			assert_eq!(resolution.columns, vec![Domain::numeric(38, 0)]);
		}

		#[test]
		fn test_cast_keeps_alias() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![SelectItem::aliased(typed("a", Domain::integer()), "total")]);
			let mut right = select(vec![SelectItem::new(typed("b", Domain::double()))]);

			resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION).unwrap();

			let item = &left.leftmost().list[0];
			assert!(matches!(item.expr.kind, ExprKind::Cast { .. }));
			assert_eq!(item.name(), "total");
			assert_eq!(right.leftmost().list[0].name(), "b");
		}

		#[test]
		fn test_column_count_mismatch() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![
				SelectItem::new(typed("a", Domain::integer())),
				SelectItem::new(typed("b", Domain::integer())),
			]);
			let mut right = select(vec![SelectItem::new(typed("c", Domain::integer()))]);

			let errors = resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION)
				.unwrap_err();
			assert_eq!(errors.len(), 1);
			assert_eq!(errors[0].code(), "UNION_001");
			assert!(errors[0].message.contains("2 and 1"));
		}

		#[test]
		fn test_reports_every_incompatible_column() {
			let catalog = MaterializedCatalog::new();
			let mut left = select(vec![
				SelectItem::new(typed("a", Domain::new(Type::Time))),
				SelectItem::new(typed("b", Domain::integer())),
				SelectItem::new(typed("c", Domain::new(Type::Date))),
			]);
			let mut right = select(vec![
				SelectItem::new(typed("d", Domain::new(Type::Date))),
				SelectItem::new(typed("e", Domain::integer())),
				SelectItem::new(typed("f", Domain::collection(Type::Set, vec![]))),
			]);

			let errors = resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION)
				.unwrap_err();
			let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
			assert_eq!(codes, vec!["UNION_002", "UNION_002"]);
		}

		#[test]
		fn test_nested_compound_is_cast_in_every_arm() {
			let catalog = MaterializedCatalog::new();
			let mut inner_left = select(vec![SelectItem::new(typed("a", Domain::integer()))]);
			let mut inner_right = select(vec![SelectItem::new(typed("b", Domain::integer()))]);
			let inner = resolve_union(
				&catalog,
				SetOperator::Union,
				&mut inner_left,
				&mut inner_right,
				MAX_NUMERIC_PRECISION,
			)
			.unwrap();
			let mut left = Query::union(inner_left, inner_right);
			if let Query::Compound(compound) = &mut left {
				compound.columns = inner.columns;
			}
			let mut right = select(vec![SelectItem::new(typed("c", Domain::double()))]);

			let resolution =
				resolve_union(&catalog, SetOperator::Union, &mut left, &mut right, MAX_NUMERIC_PRECISION).unwrap();
			assert_eq!(resolution.columns, vec![Domain::double()]);
			assert_eq!(resolution.casts, 3);
		}
	}

	mod resolve_view_columns {
		use super::*;

		#[test]
		fn test_casts_to_attribute_domain() {
			let catalog = MaterializedCatalog::new();
			let attributes = vec![("total".to_string(), Domain::numeric(10, 2))];
			let mut query = select(vec![SelectItem::new(typed("a", Domain::integer()))]);

			let casts = resolve_view_columns(&catalog, &attributes, &mut query, MAX_NUMERIC_PRECISION).unwrap();
			assert_eq!(casts, 1);
			assert_eq!(query.leftmost().list[0].expr.domain, Some(Domain::numeric(10, 2)));
		}

		#[test]
		fn test_arity() {
			let catalog = MaterializedCatalog::new();
			let attributes = vec![("a".to_string(), Domain::integer()), ("b".to_string(), Domain::integer())];
			let mut query = select(vec![SelectItem::new(typed("a", Domain::integer()))]);

			let errors = resolve_view_columns(&catalog, &attributes, &mut query, MAX_NUMERIC_PRECISION).unwrap_err();
			assert_eq!(errors[0].code(), "DDL_007");
		}

		#[test]
		fn test_incompatible_column() {
			let catalog = MaterializedCatalog::new();
			let attributes = vec![("d".to_string(), Domain::new(Type::Date))];
			let mut query = select(vec![SelectItem::new(typed("t", Domain::new(Type::Time)))]);

			let errors = resolve_view_columns(&catalog, &attributes, &mut query, MAX_NUMERIC_PRECISION).unwrap_err();
			assert_eq!(errors[0].code(), "DDL_008");
		}
	}
}
