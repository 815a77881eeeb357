// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{
	Result,
	error::diagnostic::cast::{invalid_cast, unsupported_cast},
	fragment::Fragment,
	return_error,
	value::{CastValidity, Domain, Type, check_cast, common_domain, common_type},
};
use tracing::trace;

use crate::{
	ast::{AggregateFunction, BinaryOp, Binding, ColumnRef, Expr, ExprKind, UnaryOp},
	check::Checker,
	error::CheckError,
	scope::{Spec, SpecId},
};

/// Clause an expression appears in, decides where aggregates may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause {
	SelectList,
	Where,
	GroupBy,
	Having,
	OrderBy,
	Values,
	Set,
	Default,
	IndexFilter,
	TriggerCondition,
	PartitionKey,
}

impl Clause {
	fn name(self) -> &'static str {
		match self {
			Clause::SelectList => "the select list",
			Clause::Where => "WHERE",
			Clause::GroupBy => "GROUP BY",
			Clause::Having => "HAVING",
			Clause::OrderBy => "ORDER BY",
			Clause::Values => "VALUES",
			Clause::Set => "SET",
			Clause::Default => "DEFAULT",
			Clause::IndexFilter => "an index filter",
			Clause::TriggerCondition => "a trigger condition",
			Clause::PartitionKey => "a partition key",
		}
	}

	fn allows_aggregates(self) -> bool {
		matches!(self, Clause::SelectList | Clause::Having | Clause::OrderBy)
	}
}

impl<'a> Checker<'a> {
	/// Binds every column reference outside subqueries. Failures are
	/// reported and leave the column typed MAYBE so typing can go on.
	pub(crate) fn bind_expr(&mut self, expr: &mut Expr) {
		if matches!(expr.kind, ExprKind::Column(_)) {
			let fragment = expr.fragment();
			let ExprKind::Column(column) = &mut expr.kind else {
				return;
			};
			match self.resolve_column(column, fragment) {
				Ok(domain) => expr.domain = Some(domain),
				Err(err) => {
					self.report(err);
					expr.domain = Some(Domain::new(Type::Maybe));
				}
			}
			return;
		}
		for child in expr.children_mut() {
			self.bind_expr(child);
		}
	}

	pub(crate) fn resolve_column(&self, column: &mut ColumnRef, fragment: Fragment) -> Result<Domain> {
		if let Some(binding) = &column.binding {
			return Ok(self.binding_domain(binding));
		}

		if let Some(qualifier) = &column.qualifier {
			let Some(spec) = self.lookup_spec(qualifier) else {
				return_error!(CheckError::UnknownQualifier {
					name: qualifier.clone(),
					fragment,
				});
			};
			let Some(found) = spec.column(&column.name) else {
				return_error!(CheckError::ColumnNotFound {
					name: format!("{}.{}", qualifier, column.name),
					fragment,
				});
			};
			column.binding = Some(Binding::Attribute {
				spec: spec.id,
				attribute: found.name.clone(),
			});
			return Ok(found.domain.clone());
		}

		for scope in self.scopes.iter().rev() {
			let mut found: Option<(SpecId, String, Domain)> = None;
			for id in scope {
				let Some(spec) = self.specs.get(*id) else {
					continue;
				};
				if let Some(candidate) = spec.column(&column.name) {
					if found.is_some() {
						return_error!(CheckError::AmbiguousColumn {
							name: column.name.clone(),
							fragment,
						});
					}
					found = Some((spec.id, candidate.name.clone(), candidate.domain.clone()));
				}
			}
			if let Some((spec, attribute, domain)) = found {
				trace!(column = %column.name, %spec, "bound column");
				column.binding = Some(Binding::Attribute {
					spec,
					attribute,
				});
				return Ok(domain);
			}
		}

		// the name of a class source stands for its objects
		if let Some(spec) = self.lookup_spec(&column.name)
			&& let Some(class) = spec.class()
		{
			column.binding = Some(Binding::Object {
				spec: spec.id,
			});
			return Ok(Domain::object(Some(class.id)));
		}

		return_error!(CheckError::ColumnNotFound {
			name: column.name.clone(),
			fragment,
		})
	}

	/// Innermost FROM source exposed under `name`
	pub(crate) fn lookup_spec(&self, name: &str) -> Option<&Spec> {
		self.scopes
			.iter()
			.rev()
			.flat_map(|scope| scope.iter().rev())
			.filter_map(|id| self.specs.get(*id))
			.find(|spec| spec.is_named(name))
	}

	fn binding_domain(&self, binding: &Binding) -> Domain {
		match binding {
			Binding::Attribute {
				spec,
				attribute,
			} => self
				.specs
				.get(*spec)
				.and_then(|spec| spec.column(attribute))
				.map(|column| column.domain.clone())
				.unwrap_or_else(|| Domain::new(Type::Maybe)),
			Binding::Object {
				spec,
			} => Domain::object(self.specs.get(*spec).and_then(|spec| spec.class()).map(|class| class.id)),
		}
	}

	/// Derives the domain of `expr` bottom up and stores it on every node.
	/// Unbound columns are bound on the way.
	pub(crate) fn type_expr(&mut self, expr: &mut Expr, clause: Clause) -> Result<Domain> {
		if matches!(expr.kind, ExprKind::Column(_)) && expr.domain.is_none() {
			self.bind_expr(expr);
		}
		let fragment = expr.fragment();
		let max_precision = self.config.max_numeric_precision;

		let domain = match &mut expr.kind {
			ExprKind::Literal(value) => value.domain(),
			ExprKind::HostVariable(_) => Domain::new(Type::Na),
			ExprKind::Default | ExprKind::MaxValue => Domain::new(Type::Maybe),
			ExprKind::Column(_) => expr.domain.clone().unwrap_or_else(|| Domain::new(Type::Maybe)),
			ExprKind::Star(_) => {
				return_error!(CheckError::ColumnNotFound {
					name: "*".to_string(),
					fragment,
				})
			}
			ExprKind::Unary {
				op,
				operand,
			} => {
				let op = *op;
				let domain = self.type_expr(operand, clause)?;
				match op {
					UnaryOp::Neg if domain.ty.is_numeric() || domain.ty.is_unknown() => domain,
					UnaryOp::Not if domain.ty == Type::Logical || domain.ty.is_unknown() => {
						Domain::new(Type::Logical)
					}
					_ => return_error!(CheckError::OperandType {
						operator: if op == UnaryOp::Neg {
							"-".to_string()
						} else {
							"NOT".to_string()
						},
						domain,
						fragment,
					}),
				}
			}
			ExprKind::Binary {
				op,
				left,
				right,
			} => {
				let op = *op;
				let l = self.type_expr(left, clause)?;
				let r = self.type_expr(right, clause)?;
				binary_domain(op, &l, &r, max_precision, fragment)?
			}
			ExprKind::Between {
				operand,
				low,
				high,
				..
			} => {
				let domain = self.type_expr(operand, clause)?;
				let low_domain = self.type_expr(low, clause)?;
				let high_domain = self.type_expr(high, clause)?;
				comparable(&domain, &low_domain, low.fragment())?;
				comparable(&domain, &high_domain, high.fragment())?;
				Domain::new(Type::Logical)
			}
			ExprKind::IsNull {
				operand,
				..
			} => {
				self.type_expr(operand, clause)?;
				Domain::new(Type::Logical)
			}
			ExprKind::Cast {
				operand,
				target,
			} => {
				let from = self.type_expr(operand, clause)?;
				if !from.ty.is_unknown() {
					match check_cast(from.ty, target.ty) {
						CastValidity::Valid => {}
						CastValidity::Invalid => return_error!(invalid_cast(operand.fragment(), &from, target)),
						CastValidity::Unsupported => {
							return_error!(unsupported_cast(operand.fragment(), &from, target))
						}
					}
				}
				target.clone()
			}
			ExprKind::Aggregate {
				function,
				argument,
				..
			} => {
				if !clause.allows_aggregates() {
					return_error!(CheckError::AggregateNotAllowed {
						clause: clause.name(),
						fragment,
					});
				}
				let function = *function;
				match argument {
					None => Domain::bigint(),
					Some(argument) => {
						if let Some(nested) = argument.find_aggregate() {
							return_error!(CheckError::NestedAggregate {
								fragment: nested.fragment(),
							});
						}
						let domain = self.type_expr(argument, clause)?;
						aggregate_domain(function, domain, max_precision, fragment)?
					}
				}
			}
			ExprKind::Collection {
				kind,
				items,
			} => {
				let ty = kind.ty();
				let mut elements: Vec<Domain> = vec![];
				for item in items.iter_mut() {
					let domain = self.type_expr(item, clause)?;
					if domain.ty.is_unknown() {
						continue;
					}
					match elements.iter_mut().find(|e| e.ty == domain.ty) {
						Some(existing) => {
							if let Some(merged) = common_domain(existing, &domain, max_precision) {
								*existing = merged;
							}
						}
						None => elements.push(domain),
					}
				}
				Domain::collection(ty, elements)
			}
			ExprKind::Subquery(query) => {
				self.check_query(query)?;
				let count = query.column_count();
				if count != 1 {
					return_error!(CheckError::SubqueryArity {
						count,
						fragment,
					});
				}
				query.column_domains().into_iter().next().unwrap_or_else(|| Domain::new(Type::Maybe))
			}
		};

		expr.domain = Some(domain.clone());
		Ok(domain)
	}
}

fn operand_error(operator: impl ToString, domain: &Domain, fragment: Fragment) -> CheckError {
	CheckError::OperandType {
		operator: operator.to_string(),
		domain: domain.clone(),
		fragment,
	}
}

fn comparable(left: &Domain, right: &Domain, fragment: Fragment) -> Result<()> {
	if left.ty.is_unknown() || right.ty.is_unknown() || common_type(left.ty, right.ty) != Type::None {
		return Ok(());
	}
	return_error!(CheckError::Incomparable {
		left: left.clone(),
		right: right.clone(),
		fragment,
	})
}

fn binary_domain(op: BinaryOp, l: &Domain, r: &Domain, max_precision: u32, fragment: Fragment) -> Result<Domain> {
	if op.is_comparison() {
		comparable(l, r, fragment.clone())?;
		if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
			return Ok(Domain::new(Type::Logical));
		}
		// objects and collections only compare for equality
		for side in [l, r] {
			if side.ty.is_object() || side.ty.is_collection() {
				return Err(operand_error(op, side, fragment).into());
			}
		}
		return Ok(Domain::new(Type::Logical));
	}

	if op.is_logical() {
		for side in [l, r] {
			if side.ty != Type::Logical && !side.ty.is_unknown() {
				return Err(operand_error(op, side, fragment).into());
			}
		}
		return Ok(Domain::new(Type::Logical));
	}

	if op == BinaryOp::Concat {
		return concat_domain(l, r, fragment);
	}

	// arithmetic
	match (l.ty.is_unknown(), r.ty.is_unknown()) {
		(true, true) => return Ok(Domain::new(Type::Maybe)),
		(true, false) if r.ty.is_numeric() => return Ok(r.clone()),
		(false, true) if l.ty.is_numeric() => return Ok(l.clone()),
		_ => {}
	}
	if l.ty.is_numeric() && r.ty.is_numeric() {
		if let Some(domain) = common_domain(l, r, max_precision) {
			return Ok(domain);
		}
	}
	// date arithmetic, a temporal value shifted by an integer amount
	if matches!(op, BinaryOp::Add | BinaryOp::Sub) && l.ty.is_temporal() && (r.ty.is_integer() || r.ty.is_unknown())
	{
		return Ok(l.clone());
	}
	if op == BinaryOp::Add && r.ty.is_temporal() && l.ty.is_integer() {
		return Ok(r.clone());
	}
	let offending = if l.ty.is_numeric() || l.ty.is_unknown() {
		r
	} else {
		l
	};
	Err(operand_error(op, offending, fragment).into())
}

fn concat_domain(l: &Domain, r: &Domain, fragment: Fragment) -> Result<Domain> {
	for side in [l, r] {
		if side.ty.is_object() || side.ty.is_collection() || side.ty == Type::None {
			return Err(operand_error(BinaryOp::Concat, side, fragment).into());
		}
	}
	if l.ty.is_bit() && r.ty.is_bit() {
		return Ok(Domain::sized(Type::VarBit, sum_precision(l, r)));
	}
	let ty = if l.ty.is_national() || r.ty.is_national() {
		Type::VarNChar
	} else {
		Type::Varchar
	};
	let precision = if l.ty.is_string() && r.ty.is_string() {
		sum_precision(l, r)
	} else {
		None
	};
	Ok(Domain::sized(ty, precision))
}

fn sum_precision(l: &Domain, r: &Domain) -> Option<u32> {
	Some(l.precision_or_default()?.saturating_add(r.precision_or_default()?))
}

fn aggregate_domain(function: AggregateFunction, domain: Domain, max_precision: u32, fragment: Fragment) -> Result<Domain> {
	if domain.ty.is_unknown() {
		return Ok(match function {
			AggregateFunction::Count => Domain::bigint(),
			AggregateFunction::Avg => Domain::double(),
			_ => domain,
		});
	}
	let result = match function {
		AggregateFunction::Count => Domain::bigint(),
		AggregateFunction::Sum => match domain.ty {
			Type::SmallInt | Type::Integer => Domain::bigint(),
			Type::BigInt => Domain::numeric(max_precision, 0),
			Type::Numeric => Domain::numeric(max_precision, domain.scale_or_default()),
			Type::Float | Type::Double => Domain::double(),
			Type::Monetary => domain,
			_ => return Err(operand_error(function, &domain, fragment).into()),
		},
		AggregateFunction::Avg => {
			if !domain.ty.is_numeric() {
				return Err(operand_error(function, &domain, fragment).into());
			}
			Domain::double()
		}
		AggregateFunction::Min | AggregateFunction::Max => {
			if domain.ty.is_object() || domain.ty.is_collection() {
				return Err(operand_error(function, &domain, fragment).into());
			}
			domain
		}
	};
	Ok(result)
}

#[cfg(test)]
mod tests {
	use strata_type::MAX_NUMERIC_PRECISION;

	use super::*;

	#[test]
	fn test_sum_widens() {
		let fragment = Fragment::None;
		assert_eq!(
			aggregate_domain(AggregateFunction::Sum, Domain::integer(), MAX_NUMERIC_PRECISION, fragment.clone())
				.unwrap(),
			Domain::bigint()
		);
		assert_eq!(
			aggregate_domain(AggregateFunction::Sum, Domain::numeric(6, 2), MAX_NUMERIC_PRECISION, fragment.clone())
				.unwrap(),
			Domain::numeric(38, 2)
		);
		assert!(aggregate_domain(AggregateFunction::Sum, Domain::varchar(3), MAX_NUMERIC_PRECISION, fragment)
			.is_err());
	}

	#[test]
	fn test_arithmetic_promotes() {
		let domain =
			binary_domain(BinaryOp::Add, &Domain::integer(), &Domain::double(), MAX_NUMERIC_PRECISION, Fragment::None)
				.unwrap();
		assert_eq!(domain, Domain::double());
	}

	#[test]
	fn test_date_shift() {
		let date = Domain::new(Type::Date);
		let domain =
			binary_domain(BinaryOp::Sub, &date, &Domain::integer(), MAX_NUMERIC_PRECISION, Fragment::None).unwrap();
		assert_eq!(domain, date);
	}

	#[test]
	fn test_arithmetic_on_strings_fails() {
		let err = binary_domain(
			BinaryOp::Mul,
			&Domain::integer(),
			&Domain::new(Type::Date),
			MAX_NUMERIC_PRECISION,
			Fragment::None,
		)
		.unwrap_err();
		assert_eq!(err.code(), "EXPR_001");
	}

	#[test]
	fn test_comparison_needs_common_type() {
		let err = binary_domain(
			BinaryOp::Lt,
			&Domain::new(Type::Time),
			&Domain::new(Type::Date),
			MAX_NUMERIC_PRECISION,
			Fragment::None,
		)
		.unwrap_err();
		assert_eq!(err.code(), "EXPR_002");
	}

	#[test]
	fn test_concat_adds_lengths() {
		let domain = binary_domain(
			BinaryOp::Concat,
			&Domain::varchar(3),
			&Domain::char(4),
			MAX_NUMERIC_PRECISION,
			Fragment::None,
		)
		.unwrap();
		assert_eq!(domain, Domain::varchar(7));
	}
}
